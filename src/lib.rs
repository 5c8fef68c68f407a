//! `ServiceLedger` - Commission ledger for a field-service business
//!
//! This crate records service bills and engineer payouts, derives each engineer's 25%
//! commission, pending balance and date-sectioned history, and exposes the results to an
//! admin through a Discord bot.
//!
//! Balances are never stored: every read re-aggregates the bill and payment records.

#![deny(
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::float_arithmetic,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::large_types_passed_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::redundant_closure_for_method_calls,
    clippy::wildcard_imports,
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
)]

// poise::command generates undocumented items, so missing_docs stays a warning

/// Discord admin interface - commands, handlers, and bot context
pub mod bot;
/// Environment, database and roster configuration
pub mod config;
/// Core business logic - framework-agnostic commission, ledger, and reporting operations
pub mod core;
/// SeaORM entity definitions for the engineers, bills and payments tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
