//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Bill recording and revenue commands
pub mod bill;

/// Commission ledger and payout commands
pub mod commission;

/// General utility commands
pub mod general;

/// Job order commands
pub mod order;

// Export commands
pub use bill::*;
pub use commission::*;
pub use general::*;
pub use order::*;
