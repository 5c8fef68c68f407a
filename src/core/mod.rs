//! Core business logic - framework-agnostic commission, ledger, and reporting operations.

/// Bill recording and lookup
pub mod bill;
/// Commission calculation
pub mod commission;
/// Engineer roster
pub mod engineer;
/// Record filters shared by the bill and payment sources
pub mod filter;
/// Per-engineer balance aggregation
pub mod ledger;
/// Money parsing, conversion and formatting
pub mod money;
/// Job order lifecycle
pub mod order;
/// Commission payouts
pub mod payment;
/// Local calendar windows
pub mod period;
/// Text rendering of ledgers and reports
pub mod report;
/// Monthly revenue history
pub mod revenue;
/// Day/month sectioning of transaction histories
pub mod sections;
