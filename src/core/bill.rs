//! Bill business logic - Records finalised service visits.
//!
//! Bills are validated on the way in so the ledger never has to guess: the service charge
//! must be a real non-negative amount, the contact number must be ten digits, and cash bills
//! must say how much cash was handed over. Bills are immutable once written; deletion exists
//! only for admin corrections.

use crate::{
    core::{filter::RecordFilter, money},
    entities::{Bill, bill},
    errors::{Error, Result},
};
use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ConnectionTrait, QueryOrder, QuerySelect, Select, Set, SqlErr, TransactionTrait, prelude::*,
};
use std::{fmt, str::FromStr};
use tracing::{debug, info, warn};

/// How the customer paid for the visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Cash in hand; change may be returned
    Cash,
    /// UPI transfer
    Upi,
}

impl PaymentMethod {
    /// Stored representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Upi => "upi",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "upi" => Ok(Self::Upi),
            other => Err(Error::InvalidBill {
                message: format!("unknown payment method '{other}', expected cash or upi"),
            }),
        }
    }
}

/// Everything needed to record a bill.
#[derive(Debug, Clone)]
pub struct NewBill {
    /// Kind of service performed
    pub service_type: String,
    /// Engineer who performed the visit
    pub engineer_name: String,
    /// Customer billed
    pub customer_name: String,
    /// Ten-digit contact number
    pub contact_number: String,
    /// Service address
    pub address: String,
    /// Service charge
    pub service_charge: Decimal,
    /// How the customer paid
    pub payment_method: PaymentMethod,
    /// Cash handed over, required for cash bills
    pub cash_given: Option<Decimal>,
    /// Optional notes
    pub notes: Option<String>,
}

fn required(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidBill {
            message: format!("{field} is required"),
        });
    }
    Ok(trimmed.to_string())
}

/// Exactly ten ASCII digits.
#[must_use]
pub fn is_valid_contact_number(value: &str) -> bool {
    value.len() == 10 && value.chars().all(|c| c.is_ascii_digit())
}

fn validate_contact_number(value: &str) -> Result<String> {
    let trimmed = value.trim();
    if !is_valid_contact_number(trimmed) {
        return Err(Error::InvalidBill {
            message: "a valid 10-digit contact number is required".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Change returned to the customer, never negative.
#[must_use]
pub fn change_due(total: Decimal, cash_given: Decimal) -> Decimal {
    if cash_given > total {
        cash_given - total
    } else {
        Decimal::ZERO
    }
}

/// Attempts at assigning a bill number before giving up on a collision
const NUMBER_ATTEMPTS: u32 = 3;

/// Formats the bill number for the `sequence`-th bill on `now`'s local date.
#[must_use]
pub fn format_bill_number(now: DateTime<FixedOffset>, sequence: u64) -> String {
    format!("{}{sequence:04}", bill_number_prefix(now))
}

/// Validates and stores a bill, assigning the next bill number for the local day.
///
/// The number is one past the highest already issued that day, so numbers freed by
/// [`delete_bill`] are not handed out again. A collision with a concurrent writer is
/// retried a few times before surfacing as a database error.
///
/// The bill total equals the service charge. For cash bills the change due is stored
/// alongside the cash given.
pub async fn create_bill(
    db: &DatabaseConnection,
    new_bill: NewBill,
    now: DateTime<FixedOffset>,
) -> Result<bill::Model> {
    let service_type = required(&new_bill.service_type, "service type")?;
    let engineer_name = required(&new_bill.engineer_name, "engineer name")?;
    let customer_name = required(&new_bill.customer_name, "customer name")?;
    let address = required(&new_bill.address, "address")?;
    let contact_number = validate_contact_number(&new_bill.contact_number)?;

    let service_charge = money::check_amount(new_bill.service_charge)?;
    let total = service_charge;

    let (cash_given_minor, change_minor) = match new_bill.payment_method {
        PaymentMethod::Cash => {
            let given = new_bill.cash_given.ok_or_else(|| Error::InvalidBill {
                message: "cash given is required for cash bills".to_string(),
            })?;
            let given = money::check_amount(given)?;
            (
                Some(money::to_minor(given)?),
                Some(money::to_minor(change_due(total, given))?),
            )
        }
        PaymentMethod::Upi => (None, None),
    };

    let notes = new_bill
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let template = bill::ActiveModel {
        service_type: Set(service_type),
        engineer_name: Set(engineer_name),
        customer_name: Set(customer_name),
        contact_number: Set(contact_number),
        address: Set(address),
        service_charge_minor: Set(money::to_minor(service_charge)?),
        total_minor: Set(money::to_minor(total)?),
        payment_method: Set(new_bill.payment_method.as_str().to_string()),
        cash_given_minor: Set(cash_given_minor),
        change_minor: Set(change_minor),
        notes: Set(notes),
        created_at: Set(now.with_timezone(&Utc)),
        ..Default::default()
    };

    let prefix = bill_number_prefix(now);
    let mut attempt = 1;
    loop {
        let txn = db.begin().await?;
        let sequence = next_sequence(&txn, &prefix).await?;
        let mut model = template.clone();
        model.bill_number = Set(format_bill_number(now, sequence));

        match model.insert(&txn).await {
            Ok(created) => {
                txn.commit().await?;
                info!(
                    bill_number = %created.bill_number,
                    engineer = %created.engineer_name,
                    "Recorded bill"
                );
                return Ok(created);
            }
            // Another writer took the same number between our read and insert
            Err(e) if attempt < NUMBER_ATTEMPTS && is_unique_violation(&e) => {
                warn!(attempt, sequence, "Bill number taken, retrying");
                txn.rollback().await?;
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn bill_number_prefix(now: DateTime<FixedOffset>) -> String {
    format!("BILL-{}-", now.format("%Y%m%d"))
}

/// Sequence part of a bill number carrying `prefix`, e.g. `12` for `BILL-20260307-0012`.
#[must_use]
pub fn parse_sequence(bill_number: &str, prefix: &str) -> Option<u64> {
    bill_number.strip_prefix(prefix)?.parse().ok()
}

/// One past the highest sequence already used under `prefix`.
///
/// Gaps left by deleted bills are never reused.
async fn next_sequence<C: ConnectionTrait>(conn: &C, prefix: &str) -> Result<u64> {
    let numbers: Vec<String> = Bill::find()
        .select_only()
        .column(bill::Column::BillNumber)
        .filter(bill::Column::BillNumber.starts_with(prefix))
        .into_tuple::<String>()
        .all(conn)
        .await?;

    let highest = numbers
        .iter()
        .filter_map(|number| parse_sequence(number, prefix))
        .max()
        .unwrap_or(0);
    Ok(highest + 1)
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn apply_filter(mut query: Select<Bill>, filter: &RecordFilter) -> Select<Bill> {
    if let Some(engineer) = &filter.engineer {
        query = query.filter(bill::Column::EngineerName.eq(engineer.as_str()));
    }
    if let Some(since) = filter.since {
        query = query.filter(bill::Column::CreatedAt.gte(since));
    }
    query
}

/// Lists bills matching `filter`, newest first.
pub async fn list_bills(
    db: &DatabaseConnection,
    filter: &RecordFilter,
) -> Result<Vec<bill::Model>> {
    let bills = apply_filter(Bill::find(), filter)
        .order_by_desc(bill::Column::CreatedAt)
        .order_by_desc(bill::Column::Id)
        .all(db)
        .await?;
    debug!(count = bills.len(), ?filter, "Fetched bills");
    Ok(bills)
}

/// Finds a bill by its bill number.
pub async fn get_bill_by_number(
    db: &DatabaseConnection,
    bill_number: &str,
) -> Result<Option<bill::Model>> {
    Bill::find()
        .filter(bill::Column::BillNumber.eq(bill_number.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Deletes a bill as an admin correction, returning the removed record.
pub async fn delete_bill(db: &DatabaseConnection, bill_number: &str) -> Result<bill::Model> {
    let bill = get_bill_by_number(db, bill_number)
        .await?
        .ok_or_else(|| Error::BillNotFound {
            bill_number: bill_number.trim().to_string(),
        })?;

    bill.clone().delete(db).await?;
    info!(bill_number = %bill.bill_number, "Deleted bill");
    Ok(bill)
}
