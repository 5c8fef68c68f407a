//! Shared test utilities for the service ledger.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        bill::{self, NewBill, PaymentMethod},
        engineer, money, payment,
    },
    entities,
    errors::Result,
};
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The local offset used by tests (+05:30).
pub fn test_offset() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
}

/// A fixed "now" for tests: Monday 19 October 2026, 15:00 local.
pub fn test_now() -> DateTime<FixedOffset> {
    test_offset()
        .with_ymd_and_hms(2026, 10, 19, 15, 0, 0)
        .unwrap()
}

/// Adds an engineer to the roster.
pub async fn create_test_engineer(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::engineer::Model> {
    engineer::create_engineer(db, name.to_string(), Utc::now()).await
}

/// A UPI bill for `engineer_name` with placeholder customer details.
pub fn sample_new_bill(engineer_name: &str, service_charge: Decimal) -> NewBill {
    NewBill {
        service_type: "AC Repair".to_string(),
        engineer_name: engineer_name.to_string(),
        customer_name: "Test Customer".to_string(),
        contact_number: "9876543210".to_string(),
        address: "12 Test Street".to_string(),
        service_charge,
        payment_method: PaymentMethod::Upi,
        cash_given: None,
        notes: None,
    }
}

/// Records a UPI bill with the given charge text at `at`.
pub async fn create_test_bill(
    db: &DatabaseConnection,
    engineer_name: &str,
    service_charge: &str,
    at: DateTime<FixedOffset>,
) -> Result<entities::bill::Model> {
    let charge = money::parse_amount(service_charge)?;
    bill::create_bill(db, sample_new_bill(engineer_name, charge), at).await
}

/// Records a payment with the given amount text at `at`. The engineer must exist.
pub async fn create_test_payment(
    db: &DatabaseConnection,
    engineer_name: &str,
    amount: &str,
    at: DateTime<FixedOffset>,
) -> Result<entities::payment::Model> {
    let amount = money::parse_positive_amount(amount)?;
    payment::record_payment(db, engineer_name, amount, at.with_timezone(&Utc)).await
}
