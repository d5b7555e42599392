//! Application components and pages.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::*;
use trove_commerce::catalog::Category;
use trove_commerce::{StoreClient, StoreConfig};
use trove_observability::{ClientLogger, LogFormat, LogLevel, SessionId};
use trove_screens::detail::{AUTOPLAY_INTERVAL, IMAGE_PLACEHOLDER};
use trove_screens::{
    CartMsg, CartScreen, CatalogMsg, CatalogScreen, DetailMsg, DetailScreen, Event, ProductCard,
    Route, Slide, Storefront,
};

use crate::shop::Shop;
use crate::sink::ConsoleSink;

/// Store settings, with the API base overridable at build time.
fn store_config() -> StoreConfig {
    match option_env!("TROVE_API_BASE") {
        Some(base) => StoreConfig::default().with_api_base(base),
        None => StoreConfig::default(),
    }
}

// ============================================================================
// App Component
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let client = match StoreClient::new(store_config()) {
        Ok(client) => client,
        Err(e) => {
            return view! { <p class="error">"Invalid store configuration: " {e.to_string()}</p> }
                .into_any()
        }
    };
    let logger = ClientLogger::new(SessionId::generate())
        .with_min_level(LogLevel::Debug)
        .with_format(LogFormat::Human)
        .with_sink(Arc::new(ConsoleSink));
    let store = Storefront::new(client)
        .with_logger(logger)
        .with_cache_bust(|| (js_sys::Date::now() as u64).to_string());

    let shop = Shop::new(store);
    shop.start();

    // Carousel autoplay; ticks only matter while a detail screen is up.
    set_interval(
        move || {
            if untrack(|| shop.route()) == Some(Route::ProductDescriptionPage) {
                shop.send(Event::Detail(DetailMsg::Tick));
            }
        },
        AUTOPLAY_INTERVAL,
    );

    let route = Memo::new(move |_| shop.route());

    view! {
        <Meta name="description" content="TechnoTrove - electronics, delivered"/>
        <Title text="TechnoTrove"/>

        <Header shop=shop route=route/>
        <main>
            {move || match route.get() {
                None => view! { <p class="loading">"Loading..."</p> }.into_any(),
                Some(Route::TechnoTrove) => view! { <CatalogPage shop=shop/> }.into_any(),
                Some(Route::Cart) => view! { <CartPage shop=shop/> }.into_any(),
                Some(Route::ProductDescriptionPage) => view! { <DetailPage shop=shop/> }.into_any(),
            }}
        </main>
        <NoticeDialog shop=shop/>
    }
    .into_any()
}

// ============================================================================
// Layout Components
// ============================================================================

#[component]
fn Header(shop: Shop, route: Memo<Option<Route>>) -> impl IntoView {
    let title = move || route.get().map(Route::name).unwrap_or("TechnoTrove");
    let below_root = move || matches!(route.get(), Some(r) if r != Route::TechnoTrove);
    let on_catalog = move || route.get() == Some(Route::TechnoTrove);

    view! {
        <header>
            <Show when=below_root>
                <button class="back" on:click=move |_| shop.send(Event::Back)>"Back"</button>
            </Show>
            <h1>{title}</h1>
            <Show when=move || shop.busy()>
                <span class="spinner" aria-label="Loading"></span>
            </Show>
            <Show when=on_catalog>
                <button
                    class="cart-link"
                    on:click=move |_| shop.send(Event::Catalog(CatalogMsg::OpenCart))
                >
                    "Cart"
                </button>
            </Show>
        </header>
    }
}

/// Success or error dialog raised by the current screen.
#[component]
fn NoticeDialog(shop: Shop) -> impl IntoView {
    move || {
        shop.notice().map(|notice| {
            let title = notice.title();
            let class = if notice.is_error() { "notice error" } else { "notice success" };
            let dismiss = move |_| {
                if let Some(route) = untrack(|| shop.route()) {
                    shop.send(Event::dismiss_notice(route));
                }
            };
            view! {
                <div class=class role="alertdialog">
                    <strong>{title}</strong>
                    <p>{notice.message}</p>
                    <button on:click=dismiss>"OK"</button>
                </div>
            }
        })
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[component]
fn CatalogPage(shop: Shop) -> impl IntoView {
    let category = move || shop.catalog(CatalogScreen::category).unwrap_or_default();
    let query = move || {
        shop.catalog(|c| c.search_query().to_string())
            .unwrap_or_default()
    };
    let error = move || shop.catalog(CatalogScreen::error).flatten();
    let empty = move || shop.catalog(CatalogScreen::empty_text).flatten();
    let cards = move || shop.catalog(CatalogScreen::cards).unwrap_or_default();

    view! {
        <nav class="categories">
            {Category::ALL
                .into_iter()
                .map(move |c| {
                    view! {
                        <button
                            class:active=move || category() == c
                            on:click=move |_| shop.send(Event::Catalog(CatalogMsg::SelectCategory(c)))
                        >
                            {c.label()}
                        </button>
                    }
                })
                .collect::<Vec<_>>()}
        </nav>
        <input
            type="search"
            class="search"
            placeholder="Search products"
            prop:value=query
            on:input=move |ev| {
                shop.send(Event::Catalog(CatalogMsg::Search(event_target_value(&ev))))
            }
        />
        {move || error().map(|kind| view! { <p class="error">{kind.user_message()}</p> })}
        {move || empty().map(|text| view! { <p class="empty">{text}</p> })}
        <div class="products">
            {move || {
                cards()
                    .into_iter()
                    .map(move |card| view! { <ProductTile card=card shop=shop/> })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

#[component]
fn ProductTile(card: ProductCard, shop: Shop) -> impl IntoView {
    let ProductCard {
        id,
        name,
        price_label,
        image,
        favorite,
        can_add_to_cart,
    } = card;
    let heart = if favorite { "\u{2665}" } else { "\u{2661}" };
    let picture = match image {
        Some(src) => view! { <img src=src alt=name.clone()/> }.into_any(),
        None => view! { <div class="image-placeholder">{IMAGE_PLACEHOLDER}</div> }.into_any(),
    };
    let cart_action = if can_add_to_cart {
        view! {
            <button
                class="btn"
                on:click=move |_| shop.send(Event::Catalog(CatalogMsg::AddToCart(id)))
            >
                "Add to Cart"
            </button>
        }
        .into_any()
    } else {
        view! { <span class="in-cart">"In Cart"</span> }.into_any()
    };

    view! {
        <div class="product-card">
            <button
                class="favorite"
                class:on=favorite
                on:click=move |_| shop.send(Event::Catalog(CatalogMsg::ToggleFavorite(id)))
            >
                {heart}
            </button>
            <div
                class="product-open"
                on:click=move |_| shop.send(Event::Catalog(CatalogMsg::OpenProduct(id)))
            >
                {picture}
                <div class="product-info">
                    <h3>{name}</h3>
                    <p class="price">{price_label}</p>
                </div>
            </div>
            {cart_action}
        </div>
    }
}

// ============================================================================
// Cart
// ============================================================================

#[component]
fn CartPage(shop: Shop) -> impl IntoView {
    let lines = move || shop.cart(CartScreen::lines).unwrap_or_default();
    let total = move || shop.cart(CartScreen::total_text).flatten();
    let error = move || shop.cart(CartScreen::error).flatten();
    let empty = move || shop.cart(CartScreen::empty_text).flatten();
    let checkout = move || shop.cart(CartScreen::shows_checkout).unwrap_or(false);

    view! {
        <section class="cart">
            {move || error().map(|kind| view! { <p class="error">{kind.user_message()}</p> })}
            {move || empty().map(|text| view! { <p class="empty">{text}</p> })}
            <ul class="cart-lines">
                {move || {
                    lines()
                        .into_iter()
                        .map(move |line| {
                            let sku = line.sku;
                            view! {
                                <li class="cart-line">
                                    {line.image.map(|src| view! { <img src=src alt=""/> })}
                                    <span class="name">{line.name}</span>
                                    <span class="price">{line.price_label}</span>
                                    <button
                                        class="remove"
                                        on:click=move |_| shop.send(Event::Cart(CartMsg::Remove(sku)))
                                    >
                                        "Remove"
                                    </button>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
            {move || total().map(|text| view! { <p class="total">{text}</p> })}
            <Show when=checkout>
                <button class="btn checkout">"Checkout"</button>
            </Show>
        </section>
    }
}

// ============================================================================
// Product detail
// ============================================================================

#[component]
fn DetailPage(shop: Shop) -> impl IntoView {
    let send = move |msg: DetailMsg| shop.send(Event::Detail(msg));
    let title = move || shop.detail(|d| d.title().to_string()).unwrap_or_default();
    let price = move || shop.detail(DetailScreen::price_text).unwrap_or_default();
    let description = move || {
        shop.detail(|d| d.description().to_string())
            .unwrap_or_default()
    };
    let slide = move || shop.detail(DetailScreen::current_slide).flatten();
    let dots = move || {
        shop.detail(|d| (d.position(), d.slides().len()))
            .unwrap_or((0, 0))
    };
    let variants = move || shop.detail(DetailScreen::other_variants).unwrap_or_default();

    view! {
        <section class="detail">
            <div class="carousel">
                <button class="prev" on:click=move |_| send(DetailMsg::Prev)>"\u{2039}"</button>
                {move || match slide() {
                    Some(Slide::Image(src)) => {
                        view! { <img src=src alt="" on:error=move |_| send(DetailMsg::ImageFailed)/> }
                            .into_any()
                    }
                    Some(Slide::Placeholder) | None => {
                        view! { <div class="image-placeholder">{IMAGE_PLACEHOLDER}</div> }.into_any()
                    }
                }}
                <button class="next" on:click=move |_| send(DetailMsg::Next)>"\u{203a}"</button>
                <div class="dots">
                    {move || {
                        let (position, count) = dots();
                        (0..count)
                            .map(|i| view! { <span class="dot" class:active=i == position></span> })
                            .collect::<Vec<_>>()
                    }}
                </div>
            </div>
            <h2>{title}</h2>
            <p class="price">{price}</p>
            <p class="description">{description}</p>
            <div class="actions">
                <button class="btn" on:click=move |_| send(DetailMsg::AddToCart)>"Add to Cart"</button>
                <button class="btn secondary" on:click=move |_| send(DetailMsg::GoToCart)>
                    "Go to Cart"
                </button>
            </div>
            <Show when=move || !variants().is_empty()>
                <h3>"Other Variants"</h3>
            </Show>
            <ul class="variants">
                {move || {
                    variants()
                        .into_iter()
                        .map(move |card| {
                            let sku = card.sku;
                            view! {
                                <li
                                    class="variant"
                                    on:click=move |_| send(DetailMsg::SelectVariant(sku))
                                >
                                    {card.image.map(|src| view! { <img src=src alt=""/> })}
                                    <span>{card.label}</span>
                                </li>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </ul>
        </section>
    }
}
