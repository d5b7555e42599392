//! Cart commands.

use anyhow::{Context as _, Result};
use serde_json::json;
use trove_commerce::cart::cart_total;
use trove_commerce::RemoveOutcome;
use trove_screens::cart::CART_EMPTY;
use trove_screens::notice::{ADDED_TO_CART, ADD_TO_CART_FAILED, REMOVE_FAILED};

use super::SkuArgs;
use crate::context::Context;
use crate::output::Table;

/// Show the cart lines and total.
pub async fn show(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let spinner = ctx.output.spinner("Fetching cart...");
    let entries = client.cart().await;
    spinner.finish_and_clear();
    let entries = entries.context("Failed to fetch cart")?;

    let currency = client.config().currency;
    let total = cart_total(&entries, currency);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": entries,
            "total": total.display(),
        }));
        return Ok(());
    }

    ctx.output.header("Cart");
    if entries.is_empty() {
        ctx.output.info(CART_EMPTY);
        return Ok(());
    }

    let mut table = Table::new(&["SKU", "NAME", "PRICE"]);
    for entry in &entries {
        table.row([
            entry.sku_id.to_string(),
            entry.name.clone(),
            entry.price_label(currency),
        ]);
    }
    ctx.output.table(&table);
    ctx.output.info(&format!("Total: {}", total.display()));

    Ok(())
}

/// Add a product to the cart.
pub async fn add(args: SkuArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    client
        .add_to_cart(args.sku)
        .await
        .context(ADD_TO_CART_FAILED)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "sku": args.sku, "added": true }));
    } else {
        ctx.output.success(ADDED_TO_CART);
    }
    Ok(())
}

/// Remove a product from the cart.
pub async fn remove(args: SkuArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let outcome = client
        .remove_from_cart(args.sku)
        .await
        .context(REMOVE_FAILED)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "sku": args.sku, "removed": outcome.is_removed() }));
        return Ok(());
    }

    match outcome {
        RemoveOutcome::Removed => ctx.output.success(trove_commerce::api::REMOVED_FROM_CART),
        RemoveOutcome::Other(message) => ctx
            .output
            .warn(&format!("Server did not confirm removal: {}", message)),
    }
    Ok(())
}
