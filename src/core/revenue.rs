//! Monthly revenue history.
//!
//! Sums bill totals per local calendar month, newest month first.

use crate::{
    core::{bill, filter::RecordFilter, money, period},
    entities::bill as bill_entity,
    errors::Result,
};
use chrono::{Datelike, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use std::collections::BTreeMap;

/// Revenue billed in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRevenue {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// Display title, e.g. `"October 2026"`
    pub title: String,
    /// Sum of bill totals
    pub total: Decimal,
    /// Number of bills in the month
    pub bill_count: usize,
}

/// Groups bills by the local month they were created in.
#[must_use]
pub fn monthly_revenue(bills: &[bill_entity::Model], offset: FixedOffset) -> Vec<MonthlyRevenue> {
    let mut months: BTreeMap<(i32, u32), (Decimal, usize)> = BTreeMap::new();
    for bill in bills {
        let date = period::local_date(bill.created_at, offset);
        let slot = months.entry((date.year(), date.month())).or_default();
        slot.0 += money::from_minor(bill.total_minor);
        slot.1 += 1;
    }

    months
        .into_iter()
        .rev()
        .map(|((year, month), (total, bill_count))| MonthlyRevenue {
            year,
            month,
            title: NaiveDate::from_ymd_opt(year, month, 1)
                .map_or_else(|| format!("{month}/{year}"), |d| d.format("%B %Y").to_string()),
            total,
            bill_count,
        })
        .collect()
}

/// Fetches every bill and builds the revenue history.
pub async fn load_revenue_history(
    db: &DatabaseConnection,
    offset: FixedOffset,
) -> Result<Vec<MonthlyRevenue>> {
    let bills = bill::list_bills(db, &RecordFilter::all()).await?;
    Ok(monthly_revenue(&bills, offset))
}
