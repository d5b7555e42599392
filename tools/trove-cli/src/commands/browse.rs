//! Catalog listing commands.

use anyhow::{Context as _, Result};
use trove_commerce::catalog::Category;
use trove_commerce::search::SearchFilter;

use super::BrowseArgs;
use crate::context::Context;
use crate::output::{cart_badge, Table};

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let spinner = ctx
        .output
        .spinner(&format!("Fetching {} products...", args.category));
    let products = client.list_products(args.category).await;
    spinner.finish_and_clear();
    let products =
        products.with_context(|| format!("Failed to fetch {} products", args.category))?;

    let filter = SearchFilter::new(args.search.unwrap_or_default());
    let visible = filter.apply(&products);

    if ctx.output.is_json() {
        ctx.output.json(&visible);
        return Ok(());
    }

    ctx.output.header(&format!("{} ({})", args.category, visible.len()));
    if visible.is_empty() {
        ctx.output.info(trove_screens::catalog::NO_PRODUCTS);
        return Ok(());
    }

    let mut table = Table::new(&["SKU", "NAME", "PRICE", "CART"]);
    for product in &visible {
        table.row([
            product.id.to_string(),
            product.name.clone(),
            product.price_label.clone(),
            cart_badge(product.in_cart),
        ]);
    }
    ctx.output.table(&table);

    Ok(())
}

/// List the categories in tab order.
pub async fn categories(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
        ctx.output.json(&labels);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in Category::ALL {
        ctx.output.kv(
            category.label(),
            &format!("GET /{}", category.api_segments().join("/")),
        );
    }

    Ok(())
}
