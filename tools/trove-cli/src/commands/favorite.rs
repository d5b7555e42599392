//! Favorite toggle command.

use anyhow::{Context as _, Result};
use serde_json::json;
use trove_commerce::FavoriteStatus;
use trove_screens::notice::FAVORITE_FAILED;

use super::SkuArgs;
use crate::context::Context;
use crate::output::favorite_badge;

/// Toggle a product's favorite flag and report the server's answer.
pub async fn run(args: SkuArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let status = client
        .toggle_favorite(args.sku)
        .await
        .context(FAVORITE_FAILED)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&json!({ "sku": args.sku, "favorite": status.confirmed() }));
        return Ok(());
    }

    match status {
        FavoriteStatus::Added => ctx.output.success(&format!(
            "{} {}",
            favorite_badge(true),
            trove_commerce::api::FAVORITE_ADDED
        )),
        FavoriteStatus::Removed => ctx.output.success(&format!(
            "{} {}",
            favorite_badge(false),
            trove_commerce::api::FAVORITE_REMOVED
        )),
        FavoriteStatus::Unrecognized(message) => ctx
            .output
            .warn(&format!("Unrecognized favorite response: {}", message)),
    }
    Ok(())
}
