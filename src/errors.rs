//! Unified error type for the service ledger.
//!
//! Every fallible operation in the crate returns [`Result`]. Storage failures are kept
//! distinct from validation failures so callers can tell "the fetch failed" apart from
//! "there is nothing to show".

use thiserror::Error;

/// All errors produced by the service ledger.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is malformed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// The record store failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A money amount was missing, malformed, or out of range
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount {
        /// The text (or value) that was rejected
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// A bill failed field validation
    #[error("Invalid bill: {message}")]
    InvalidBill {
        /// Which field was wrong and how
        message: String,
    },

    /// A job order failed validation or cannot make the requested transition
    #[error("Invalid order: {message}")]
    InvalidOrder {
        /// What was wrong
        message: String,
    },

    /// No job order with this id exists
    #[error("Order #{id} not found")]
    OrderNotFound {
        /// Order id that was looked up
        id: i64,
    },

    /// An engineer name was empty or otherwise unusable
    #[error("Invalid engineer name: {message}")]
    InvalidName {
        /// Why the name was rejected
        message: String,
    },

    /// No engineer with this name is on the roster
    #[error("Engineer '{name}' not found")]
    EngineerNotFound {
        /// Name that was looked up
        name: String,
    },

    /// An engineer with this name already exists
    #[error("Engineer '{name}' already exists")]
    DuplicateEngineer {
        /// Name that collided
        name: String,
    },

    /// No bill with this number exists
    #[error("Bill '{bill_number}' not found")]
    BillNotFound {
        /// Bill number that was looked up
        bill_number: String,
    },

    /// A required environment variable was missing or not unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Integer narrowing failed
    #[error("Integer conversion error: {0}")]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// Writing a report into a string failed
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Discord/poise framework failure
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
