//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests roster engineer names as the admin types, so bills and payments are attributed
//! to the exact name the ledger aggregates on.

use crate::{bot::BotData, core::engineer, errors::Error};
use tracing::warn;

/// Discord shows at most this many suggestions
const MAX_SUGGESTIONS: usize = 25;

/// Case-insensitive substring match over names, sorted, capped at the Discord limit.
#[must_use]
pub fn matching_names(names: Vec<String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .collect();
    matching.sort();
    matching.truncate(MAX_SUGGESTIONS);
    matching
}

/// Provides autocomplete suggestions for engineer names.
pub async fn autocomplete_engineer_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    match engineer::list_engineers(db).await {
        Ok(engineers) => matching_names(engineers.into_iter().map(|e| e.name).collect(), partial),
        Err(e) => {
            warn!("Engineer autocomplete failed: {e}");
            Vec::new()
        }
    }
}
