//! Query filters shared by the bill and payment record sources.

use chrono::{DateTime, Utc};

/// Equality filter on the engineer key and lower-bound filter on the creation time.
///
/// The default filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Only records attributed to this engineer
    pub engineer: Option<String>,
    /// Only records created at or after this instant
    pub since: Option<DateTime<Utc>>,
}

impl RecordFilter {
    /// Matches every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one engineer.
    #[must_use]
    pub fn for_engineer(mut self, name: impl Into<String>) -> Self {
        self.engineer = Some(name.into());
        self
    }

    /// Restricts to records created at or after `since`.
    #[must_use]
    pub const fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }
}
