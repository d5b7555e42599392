//! Interactive storefront over the screen models.

use anyhow::Result;
use dialoguer::{Input, Select};
use trove_commerce::catalog::Category;
use trove_screens::{
    CartMsg, CartScreen, CatalogMsg, CatalogScreen, DetailMsg, DetailScreen, Event, Screen, Slide,
    Storefront,
};

/// What the user asked for at a prompt.
#[derive(Debug, PartialEq)]
enum Action {
    Send(Event),
    /// Nothing to pick from; show the screen again.
    Redraw,
    Quit,
}

impl Action {
    fn picked(event: Option<Event>) -> Self {
        event.map_or(Action::Redraw, Action::Send)
    }
}

use crate::context::Context;
use crate::output::{cart_badge, favorite_badge};

/// Run the interactive shop until the user quits.
pub async fn run(ctx: &Context) -> Result<()> {
    let mut store = Storefront::new(ctx.client()?).with_logger(ctx.logger()?);

    let spinner = ctx.output.spinner("Loading TechnoTrove...");
    store.start().await;
    spinner.finish_and_clear();

    loop {
        if let Some(dismiss) = show_notice(ctx, &store) {
            store.dispatch(dismiss).await;
        }

        let action = match store.current() {
            Screen::Catalog(screen) => {
                render_catalog(ctx, screen);
                catalog_action(screen)?
            }
            Screen::Cart(screen) => {
                render_cart(ctx, screen);
                cart_action(screen)?
            }
            Screen::Detail(screen) => {
                render_detail(ctx, screen);
                detail_action(screen)?
            }
        };

        let event = match action {
            Action::Send(event) => event,
            Action::Redraw => continue,
            Action::Quit => break,
        };

        let Some(commands) = store.apply(event.clone()) else {
            continue;
        };
        show_pending(ctx, &store, &event);

        let spinner = ctx.output.spinner("Working...");
        store.run(commands).await;
        spinner.finish_and_clear();
    }

    Ok(())
}

/// Echo state that is already applied while its request is still out.
fn show_pending(ctx: &Context, store: &Storefront, event: &Event) {
    if let (Event::Catalog(CatalogMsg::ToggleFavorite(sku)), Some(catalog)) =
        (event, store.catalog())
    {
        if let Some(card) = catalog.cards().iter().find(|c| c.id == *sku) {
            ctx.output.info(&format!(
                "{} {} (saving)",
                favorite_badge(card.favorite),
                card.name
            ));
        }
    }
}

fn show_notice(ctx: &Context, store: &Storefront) -> Option<Event> {
    let notice = store.current().notice()?;
    ctx.output.notice(notice);
    Some(Event::dismiss_notice(store.route()))
}

fn render_catalog(ctx: &Context, screen: &CatalogScreen) {
    ctx.output.header(&format!("TechnoTrove - {}", screen.category()));
    if !screen.search_query().is_empty() {
        ctx.output.kv("search", screen.search_query());
    }
    if let Some(kind) = screen.error() {
        ctx.output.warn(kind.user_message());
    }
    if let Some(text) = screen.empty_text() {
        ctx.output.info(text);
    }
    for card in screen.cards() {
        ctx.output.list_item(&format!(
            "{} {} {} [{}]",
            favorite_badge(card.favorite),
            card.name,
            card.price_label,
            cart_badge(!card.can_add_to_cart)
        ));
    }
}

fn catalog_action(screen: &CatalogScreen) -> Result<Action> {
    const ACTIONS: [&str; 8] = [
        "Open product",
        "Add to cart",
        "Toggle favorite",
        "Change category",
        "Search",
        "Open cart",
        "Refresh",
        "Quit",
    ];
    let choice = Select::new()
        .with_prompt("What next?")
        .items(&ACTIONS)
        .default(0)
        .interact()?;

    let cards = screen.cards();
    let pick = |prompt: &str, only_addable: bool| -> Result<Option<trove_commerce::Sku>> {
        let candidates: Vec<_> = cards
            .iter()
            .filter(|c| !only_addable || c.can_add_to_cart)
            .collect();
        if candidates.is_empty() {
            return Ok(None);
        }
        let labels: Vec<String> = candidates
            .iter()
            .map(|c| format!("{} ({})", c.name, c.price_label))
            .collect();
        let index = Select::new()
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()?;
        Ok(Some(candidates[index].id))
    };

    let msg = match ACTIONS[choice] {
        "Open product" => pick("Product", false)?.map(CatalogMsg::OpenProduct),
        "Add to cart" => pick("Add which product?", true)?.map(CatalogMsg::AddToCart),
        "Toggle favorite" => pick("Favorite which product?", false)?.map(CatalogMsg::ToggleFavorite),
        "Change category" => {
            let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
            let current = Category::ALL
                .iter()
                .position(|c| *c == screen.category())
                .unwrap_or(0);
            let index = Select::new()
                .with_prompt("Category")
                .items(&labels)
                .default(current)
                .interact()?;
            Some(CatalogMsg::SelectCategory(Category::ALL[index]))
        }
        "Search" => {
            let query: String = Input::new()
                .with_prompt("Search (empty to clear)")
                .allow_empty(true)
                .interact_text()?;
            Some(CatalogMsg::Search(query))
        }
        "Open cart" => Some(CatalogMsg::OpenCart),
        "Refresh" => Some(CatalogMsg::Refresh),
        _ => return Ok(Action::Quit),
    };
    Ok(Action::picked(msg.map(Event::Catalog)))
}

fn render_cart(ctx: &Context, screen: &CartScreen) {
    ctx.output.header("Cart");
    if let Some(kind) = screen.error() {
        ctx.output.warn(kind.user_message());
    }
    if let Some(text) = screen.empty_text() {
        ctx.output.info(text);
    }
    for line in screen.lines() {
        ctx.output
            .list_item(&format!("{} {} (sku {})", line.name, line.price_label, line.sku));
    }
    if let Some(total) = screen.total_text() {
        ctx.output.info(&total);
    }
}

fn cart_action(screen: &CartScreen) -> Result<Action> {
    let mut actions = vec!["Back", "Refresh", "Quit"];
    if !screen.is_empty() {
        actions.insert(0, "Remove item");
    }
    let choice = Select::new()
        .with_prompt("What next?")
        .items(&actions)
        .default(0)
        .interact()?;

    let event = match actions[choice] {
        "Remove item" => {
            let lines = screen.lines();
            let labels: Vec<String> = lines
                .iter()
                .map(|l| format!("{} ({})", l.name, l.price_label))
                .collect();
            let index = Select::new()
                .with_prompt("Remove which item?")
                .items(&labels)
                .default(0)
                .interact()?;
            Event::Cart(CartMsg::Remove(lines[index].sku))
        }
        "Back" => Event::Back,
        "Refresh" => Event::Cart(CartMsg::Refresh),
        _ => return Ok(Action::Quit),
    };
    Ok(Action::Send(event))
}

fn render_detail(ctx: &Context, screen: &DetailScreen) {
    ctx.output.header(screen.title());
    ctx.output.info(&screen.price_text());
    ctx.output.info(screen.description());

    let slides = screen.slides();
    match screen.current_slide() {
        Some(Slide::Image(url)) => ctx.output.kv(
            &format!("image {}/{}", screen.position() + 1, slides.len()),
            &url,
        ),
        Some(Slide::Placeholder) | None => {
            ctx.output.kv("image", trove_screens::detail::IMAGE_PLACEHOLDER)
        }
    }

    let others = screen.other_variants();
    if !others.is_empty() {
        ctx.output.info("Other Variants");
        for card in &others {
            ctx.output.list_item(&card.label);
        }
    }
}

fn detail_action(screen: &DetailScreen) -> Result<Action> {
    const ACTIONS: [&str; 7] = [
        "Add to cart",
        "Next image",
        "Previous image",
        "Other variant",
        "Go to cart",
        "Back",
        "Quit",
    ];
    let choice = Select::new()
        .with_prompt("What next?")
        .items(&ACTIONS)
        .default(0)
        .interact()?;

    let event = match ACTIONS[choice] {
        "Add to cart" => Event::Detail(DetailMsg::AddToCart),
        "Next image" => Event::Detail(DetailMsg::Next),
        "Previous image" => Event::Detail(DetailMsg::Prev),
        "Other variant" => {
            let others = screen.other_variants();
            if others.is_empty() {
                return Ok(Action::Redraw);
            }
            let labels: Vec<&str> = others.iter().map(|c| c.label.as_str()).collect();
            let index = Select::new()
                .with_prompt("Variant")
                .items(&labels)
                .default(0)
                .interact()?;
            Event::Detail(DetailMsg::SelectVariant(others[index].sku))
        }
        "Go to cart" => Event::Detail(DetailMsg::GoToCart),
        "Back" => Event::Back,
        _ => return Ok(Action::Quit),
    };
    Ok(Action::Send(event))
}

#[cfg(test)]
mod tests {
    use trove_commerce::Sku;

    use super::*;

    #[test]
    fn test_empty_pick_redraws_without_an_event() {
        assert_eq!(Action::picked(None), Action::Redraw);
        assert_eq!(
            Action::picked(Some(Event::Catalog(CatalogMsg::OpenProduct(Sku::new(3))))),
            Action::Send(Event::Catalog(CatalogMsg::OpenProduct(Sku::new(3))))
        );
    }
}
