//! Commission ledger derivation.
//!
//! Balances are never stored. Every read re-aggregates the bill and payment records into
//! per-engineer totals for two scopes side by side: the current local calendar month and
//! all time. Pending is earned minus paid and may be negative when an engineer has been
//! overpaid; it is never clamped.

use crate::{
    core::{
        bill, commission, engineer,
        filter::RecordFilter,
        money, payment, period,
        sections::{self, LedgerEntry, Section},
    },
    entities::{bill as bill_entity, engineer as engineer_entity, payment as payment_entity},
    errors::{Error, Result},
};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;
use tracing::debug;

/// Earned and paid totals for one engineer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineerLedgerSummary {
    /// Roster id, `None` when the name only appears on records
    pub engineer_id: Option<i64>,
    /// Engineer name (attribution key)
    pub name: String,
    /// Commission earned this month
    pub month_commission: Decimal,
    /// Paid out this month
    pub month_paid: Decimal,
    /// Commission earned all time
    pub total_commission: Decimal,
    /// Paid out all time
    pub total_paid: Decimal,
    /// `total_commission - total_paid`
    pub pending: Decimal,
    /// `month_commission - month_paid`
    pub month_pending: Decimal,
}

impl EngineerLedgerSummary {
    fn from_totals(engineer_id: Option<i64>, name: String, totals: &Totals) -> Self {
        Self {
            engineer_id,
            name,
            month_commission: totals.month_commission,
            month_paid: totals.month_paid,
            total_commission: totals.total_commission,
            total_paid: totals.total_paid,
            pending: totals.total_commission - totals.total_paid,
            month_pending: totals.month_commission - totals.month_paid,
        }
    }

    /// More has been paid out than earned.
    #[must_use]
    pub fn is_overpaid(&self) -> bool {
        self.pending.is_sign_negative() && !self.pending.is_zero()
    }

    /// Nothing is owed to the engineer.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.pending <= Decimal::ZERO
    }
}

/// Per-engineer summaries plus fleet-wide totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetSummary {
    /// One row per engineer, highest pending first
    pub engineers: Vec<EngineerLedgerSummary>,
    /// Commission earned by everyone this month
    pub month_commission_total: Decimal,
    /// Sum of everyone's all-time pending
    pub pending_total: Decimal,
}

#[derive(Debug, Clone, Default)]
struct Totals {
    month_commission: Decimal,
    month_paid: Decimal,
    total_commission: Decimal,
    total_paid: Decimal,
}

impl Totals {
    fn add_bill(&mut self, bill: &bill_entity::Model, now: DateTime<FixedOffset>) {
        let earned = commission::bill_commission(bill);
        self.total_commission += earned;
        if period::is_current_month(bill.created_at, now) {
            self.month_commission += earned;
        }
    }

    fn add_payment(&mut self, payment: &payment_entity::Model, now: DateTime<FixedOffset>) {
        let paid = money::from_minor(payment.amount_minor);
        self.total_paid += paid;
        if period::is_current_month(payment.created_at, now) {
            self.month_paid += paid;
        }
    }
}

/// Builds a summary for every engineer on the roster or named on any record.
///
/// Rows are ordered by descending pending balance so the engineers owed the most come first;
/// equal balances fall back to name order.
#[must_use]
pub fn summarize_engineers(
    roster: &[engineer_entity::Model],
    bills: &[bill_entity::Model],
    payments: &[payment_entity::Model],
    now: DateTime<FixedOffset>,
) -> FleetSummary {
    let mut totals: BTreeMap<String, Totals> = roster
        .iter()
        .map(|e| (e.name.clone(), Totals::default()))
        .collect();

    for bill in bills {
        totals
            .entry(bill.engineer_name.clone())
            .or_default()
            .add_bill(bill, now);
    }
    for payment in payments {
        totals
            .entry(payment.engineer_name.clone())
            .or_default()
            .add_payment(payment, now);
    }

    let ids: BTreeMap<&str, i64> = roster.iter().map(|e| (e.name.as_str(), e.id)).collect();
    let mut engineers: Vec<EngineerLedgerSummary> = totals
        .iter()
        .map(|(name, t)| {
            EngineerLedgerSummary::from_totals(ids.get(name.as_str()).copied(), name.clone(), t)
        })
        .collect();
    engineers.sort_by(|a, b| b.pending.cmp(&a.pending).then_with(|| a.name.cmp(&b.name)));

    FleetSummary {
        month_commission_total: engineers.iter().map(|e| e.month_commission).sum(),
        pending_total: engineers.iter().map(|e| e.pending).sum(),
        engineers,
    }
}

/// Summary for a single engineer; records attributed to anyone else are ignored.
#[must_use]
pub fn summarize_engineer(
    engineer_id: Option<i64>,
    name: &str,
    bills: &[bill_entity::Model],
    payments: &[payment_entity::Model],
    now: DateTime<FixedOffset>,
) -> EngineerLedgerSummary {
    let mut totals = Totals::default();
    for bill in bills.iter().filter(|b| b.engineer_name == name) {
        totals.add_bill(bill, now);
    }
    for payment in payments.iter().filter(|p| p.engineer_name == name) {
        totals.add_payment(payment, now);
    }
    EngineerLedgerSummary::from_totals(engineer_id, name.to_string(), &totals)
}

/// Summary and sectioned history for one engineer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineerLedger {
    /// Balances for the engineer
    pub summary: EngineerLedgerSummary,
    /// Commission history by day/month
    pub commissions: Vec<Section>,
    /// Payment history by day/month
    pub payments: Vec<Section>,
}

/// Builds the detail view for one engineer from already-fetched records.
#[must_use]
pub fn build_engineer_ledger(
    engineer: &engineer_entity::Model,
    bills: &[bill_entity::Model],
    payments: &[payment_entity::Model],
    now: DateTime<FixedOffset>,
) -> EngineerLedger {
    let summary = summarize_engineer(Some(engineer.id), &engineer.name, bills, payments, now);

    let commission_entries = bills
        .iter()
        .filter(|b| b.engineer_name == engineer.name)
        .map(LedgerEntry::from_bill)
        .collect();
    let payment_entries = payments
        .iter()
        .filter(|p| p.engineer_name == engineer.name)
        .map(LedgerEntry::from_payment)
        .collect();

    EngineerLedger {
        summary,
        commissions: sections::group_into_sections(commission_entries, now),
        payments: sections::group_into_sections(payment_entries, now),
    }
}

/// Fetches roster, bills and payments concurrently and summarises every engineer.
///
/// If any fetch fails the whole summary fails; an empty store yields an empty summary.
pub async fn load_fleet_summary(
    db: &DatabaseConnection,
    now: DateTime<FixedOffset>,
) -> Result<FleetSummary> {
    let filter = RecordFilter::all();
    let (roster, bills, payments) = tokio::try_join!(
        engineer::list_engineers(db),
        bill::list_bills(db, &filter),
        payment::list_payments(db, &filter),
    )?;
    debug!(
        engineers = roster.len(),
        bills = bills.len(),
        payments = payments.len(),
        "Aggregating fleet summary"
    );

    Ok(summarize_engineers(&roster, &bills, &payments, now))
}

/// Fetches one engineer's bills and payments concurrently and builds their ledger.
pub async fn load_engineer_ledger(
    db: &DatabaseConnection,
    name: &str,
    now: DateTime<FixedOffset>,
) -> Result<EngineerLedger> {
    let engineer = engineer::get_engineer_by_name(db, name)
        .await?
        .ok_or_else(|| Error::EngineerNotFound {
            name: name.trim().to_string(),
        })?;

    let filter = RecordFilter::all().for_engineer(engineer.name.as_str());
    let (bills, payments) = tokio::try_join!(
        bill::list_bills(db, &filter),
        payment::list_payments(db, &filter),
    )?;

    Ok(build_engineer_ledger(&engineer, &bills, &payments, now))
}
