//! Local clock configuration.
//!
//! Month windows ("this month") and section labels are computed in the business's local
//! time, not UTC. The offset is read from `LEDGER_UTC_OFFSET` and passed explicitly to every
//! computation together with a fixed `now`.

use crate::errors::{Error, Result};
use chrono::{DateTime, FixedOffset, Utc};

/// Offset used when `LEDGER_UTC_OFFSET` is not set (India Standard Time)
pub const DEFAULT_UTC_OFFSET: &str = "+05:30";

/// Parses an offset of the form `+HH:MM` or `-HH:MM`.
pub fn parse_utc_offset(text: &str) -> Result<FixedOffset> {
    text.trim()
        .parse::<FixedOffset>()
        .map_err(|e| Error::Config {
            message: format!("Invalid UTC offset '{text}': {e}"),
        })
}

/// Reads `LEDGER_UTC_OFFSET`, falling back to [`DEFAULT_UTC_OFFSET`].
pub fn get_utc_offset() -> Result<FixedOffset> {
    let raw = std::env::var("LEDGER_UTC_OFFSET").unwrap_or_else(|_| DEFAULT_UTC_OFFSET.to_string());
    parse_utc_offset(&raw)
}

/// Current time in the given local offset.
#[must_use]
pub fn now_in(offset: FixedOffset) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&offset)
}
