//! Product detail command.

use anyhow::{Context as _, Result};
use serde_json::json;

use super::SkuArgs;
use crate::context::Context;

/// Show a product's active variant and its siblings.
pub async fn run(args: SkuArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let spinner = ctx.output.spinner(&format!("Fetching product {}...", args.sku));
    let product = client.resolved_product(args.sku).await;
    spinner.finish_and_clear();
    let product = product.context(trove_screens::notice::PRODUCT_FETCH_FAILED)?;

    let currency = client.config().currency;
    let active = &product.active;
    let images: Vec<String> = active.images().into_iter().map(|u| client.image_url(u)).collect();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "sku": active.sku_id,
            "name": active.name,
            "price": active.price.label(currency),
            "description": active.description_or_default(),
            "images": images,
            "other_variants": product.siblings.iter().map(|v| json!({
                "sku": v.sku_id,
                "name": v.name,
                "price": v.price.label(currency),
            })).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    ctx.output.header(&active.name);
    ctx.output.kv("sku", &active.sku_id.to_string());
    ctx.output.info(&active.price_text(currency));
    ctx.output.info(active.description_or_default());

    if images.is_empty() {
        ctx.output.kv("images", trove_screens::detail::IMAGE_PLACEHOLDER);
    }
    for url in &images {
        ctx.output.list_item(url);
    }

    if !product.siblings.is_empty() {
        ctx.output.header("Other Variants");
        for variant in &product.siblings {
            ctx.output.list_item(&format!(
                "{} - {} (sku {})",
                variant.name,
                variant.price.label(currency),
                variant.sku_id
            ));
        }
    }

    Ok(())
}
