//! Date sectioning of an engineer's commission and payment history.
//!
//! Recent activity (within one calendar month of `now`) is listed day by day; anything older
//! collapses into one section per month. Day sections always come before month sections, and
//! within each kind the section holding the newest entry comes first.

use crate::{
    core::{commission, money, period},
    entities::{bill, payment},
};
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// What an entry in an engineer's history represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Commission earned on a bill
    Commission,
    /// Payout received from the admin
    Payment,
}

/// A single timestamped line in an engineer's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Id of the bill or payment row
    pub id: i64,
    /// Commission or payment
    pub kind: EntryKind,
    /// When the underlying record was created
    pub timestamp: DateTime<Utc>,
    /// Commission earned or amount paid
    pub amount: Decimal,
    /// Bill number, commissions only
    pub bill_number: Option<String>,
    /// Customer on the bill, commissions only
    pub customer_name: Option<String>,
    /// Service performed, commissions only
    pub service_type: Option<String>,
}

impl LedgerEntry {
    /// Commission line for a bill.
    #[must_use]
    pub fn from_bill(bill: &bill::Model) -> Self {
        Self {
            id: bill.id,
            kind: EntryKind::Commission,
            timestamp: bill.created_at,
            amount: commission::bill_commission(bill),
            bill_number: Some(bill.bill_number.clone()),
            customer_name: Some(bill.customer_name.clone()),
            service_type: Some(bill.service_type.clone()),
        }
    }

    /// Payout line for a payment.
    #[must_use]
    pub fn from_payment(payment: &payment::Model) -> Self {
        Self {
            id: payment.id,
            kind: EntryKind::Payment,
            timestamp: payment.created_at,
            amount: money::from_minor(payment.amount_minor),
            bill_number: None,
            customer_name: None,
            service_type: None,
        }
    }
}

/// How much time one section covers. Day sections sort before month sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
    /// One local calendar day
    Day,
    /// One local calendar month
    Month,
}

/// A titled group of entries with a rolled-up total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Display title, e.g. `"Monday, 19 Oct 2026"` or `"August 2026"`
    pub title: String,
    /// Whether this section is a single day or a whole month
    pub granularity: Granularity,
    /// Entries, newest first
    pub entries: Vec<LedgerEntry>,
    /// Sum of entry amounts
    pub total: Decimal,
}

impl Section {
    fn new(title: String, granularity: Granularity, mut entries: Vec<LedgerEntry>) -> Self {
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        let total = entries.iter().map(|e| e.amount).sum();
        Self {
            title,
            granularity,
            entries,
            total,
        }
    }

    /// Timestamp of the newest entry in the section.
    #[must_use]
    pub fn newest(&self) -> Option<DateTime<Utc>> {
        self.entries.first().map(|e| e.timestamp)
    }
}

fn day_title(date: NaiveDate) -> String {
    date.format("%A, %-d %b %Y").to_string()
}

fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Groups entries into day and month sections relative to `now`.
///
/// Titles use the local offset carried by `now`. Every entry lands in exactly one section.
#[must_use]
pub fn group_into_sections(entries: Vec<LedgerEntry>, now: DateTime<FixedOffset>) -> Vec<Section> {
    let offset = *now.offset();
    let cutoff = period::one_month_before(now);

    let mut buckets: BTreeMap<(Granularity, NaiveDate), Vec<LedgerEntry>> = BTreeMap::new();
    for entry in entries {
        let date = period::local_date(entry.timestamp, offset);
        let key = if entry.timestamp < cutoff {
            (Granularity::Month, first_of_month(date))
        } else {
            (Granularity::Day, date)
        };
        buckets.entry(key).or_default().push(entry);
    }

    let mut sections: Vec<Section> = buckets
        .into_iter()
        .map(|((granularity, date), entries)| {
            let title = match granularity {
                Granularity::Day => day_title(date),
                Granularity::Month => month_title(date),
            };
            Section::new(title, granularity, entries)
        })
        .collect();

    sections.sort_by(|a, b| {
        a.granularity
            .cmp(&b.granularity)
            .then_with(|| b.newest().cmp(&a.newest()))
    });
    sections
}

/// Keeps only the entries that fall on `day` in local time, dropping emptied sections.
///
/// Section totals are recomputed over the remaining entries.
#[must_use]
pub fn filter_sections_to_day(
    sections: &[Section],
    day: NaiveDate,
    offset: FixedOffset,
) -> Vec<Section> {
    sections
        .iter()
        .filter_map(|section| {
            let entries: Vec<LedgerEntry> = section
                .entries
                .iter()
                .filter(|e| period::local_date(e.timestamp, offset) == day)
                .cloned()
                .collect();
            if entries.is_empty() {
                None
            } else {
                Some(Section::new(section.title.clone(), section.granularity, entries))
            }
        })
        .collect()
}

/// Sum of all section totals.
#[must_use]
pub fn sections_total(sections: &[Section]) -> Decimal {
    sections.iter().map(|s| s.total).sum()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
    }

    fn now() -> DateTime<FixedOffset> {
        ist().with_ymd_and_hms(2026, 10, 19, 15, 0, 0).unwrap()
    }

    fn payment_at(id: i64, y: i32, m: u32, d: u32, h: u32, amount: Decimal) -> LedgerEntry {
        LedgerEntry {
            id,
            kind: EntryKind::Payment,
            timestamp: ist()
                .with_ymd_and_hms(y, m, d, h, 0, 0)
                .unwrap()
                .with_timezone(&Utc),
            amount,
            bill_number: None,
            customer_name: None,
            service_type: None,
        }
    }

    fn sample_entries() -> Vec<LedgerEntry> {
        vec![
            payment_at(1, 2026, 10, 19, 9, dec!(100)),
            payment_at(2, 2026, 10, 19, 13, dec!(50)),
            payment_at(3, 2026, 10, 2, 10, dec!(75)),
            payment_at(4, 2026, 8, 14, 10, dec!(300)),
            payment_at(5, 2026, 8, 30, 10, dec!(200)),
            payment_at(6, 2026, 9, 10, 10, dec!(20)),
            payment_at(7, 2025, 12, 25, 10, dec!(10)),
        ]
    }

    #[test]
    fn test_empty_input_yields_no_sections() {
        assert!(group_into_sections(Vec::new(), now()).is_empty());
    }

    #[test]
    fn test_recent_entries_get_day_sections() {
        let sections = group_into_sections(sample_entries(), now());

        assert_eq!(sections[0].title, "Monday, 19 Oct 2026");
        assert_eq!(sections[0].granularity, Granularity::Day);
        assert_eq!(sections[0].total, dec!(150));
        // newest first inside the section
        assert_eq!(sections[0].entries[0].id, 2);
        assert_eq!(sections[0].entries[1].id, 1);

        assert_eq!(sections[1].title, "Friday, 2 Oct 2026");
        assert_eq!(sections[1].granularity, Granularity::Day);
    }

    #[test]
    fn test_older_entries_collapse_into_months() {
        let sections = group_into_sections(sample_entries(), now());
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();

        assert_eq!(
            titles,
            vec![
                "Monday, 19 Oct 2026",
                "Friday, 2 Oct 2026",
                "September 2026",
                "August 2026",
                "December 2025",
            ]
        );

        let august = &sections[3];
        assert_eq!(august.granularity, Granularity::Month);
        assert_eq!(august.total, dec!(500));
        assert_eq!(august.entries[0].id, 5);
        assert_eq!(august.entries[1].id, 4);
    }

    #[test]
    fn test_same_month_can_have_day_and_month_sections() {
        // 25 Sep is within a month of 19 Oct, 10 Sep is not
        let entries = vec![
            payment_at(1, 2026, 9, 25, 10, dec!(5)),
            payment_at(2, 2026, 9, 10, 10, dec!(7)),
        ];
        let sections = group_into_sections(entries, now());

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Friday, 25 Sep 2026");
        assert_eq!(sections[1].title, "September 2026");
    }

    #[test]
    fn test_every_entry_in_exactly_one_section_and_ordered() {
        let input = sample_entries();
        let sections = group_into_sections(input.clone(), now());

        let flattened: Vec<&LedgerEntry> = sections.iter().flat_map(|s| &s.entries).collect();
        assert_eq!(flattened.len(), input.len());
        let mut ids: Vec<i64> = flattened.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);

        // day sections precede month sections
        let first_month = sections
            .iter()
            .position(|s| s.granularity == Granularity::Month)
            .unwrap();
        assert!(sections[..first_month].iter().all(|s| s.granularity == Granularity::Day));
        assert!(sections[first_month..].iter().all(|s| s.granularity == Granularity::Month));

        // newest first within each granularity
        for pair in sections.windows(2) {
            if pair[0].granularity == pair[1].granularity {
                assert!(pair[0].newest() >= pair[1].newest());
            }
        }
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let first = group_into_sections(sample_entries(), now());
        let mut reversed = sample_entries();
        reversed.reverse();
        let second = group_into_sections(reversed, now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_day_titles_use_local_offset() {
        // 20:00 UTC on 18 Oct is 01:30 IST on 19 Oct
        let entry = LedgerEntry {
            timestamp: Utc.with_ymd_and_hms(2026, 10, 18, 20, 0, 0).unwrap(),
            ..payment_at(1, 2026, 10, 1, 1, dec!(1))
        };
        let sections = group_into_sections(vec![entry], now());
        assert_eq!(sections[0].title, "Monday, 19 Oct 2026");
    }

    #[test]
    fn test_filter_sections_to_day() {
        let sections = group_into_sections(sample_entries(), now());

        let filtered =
            filter_sections_to_day(&sections, NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(), ist());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "August 2026");
        assert_eq!(filtered[0].entries.len(), 1);
        assert_eq!(filtered[0].total, dec!(200));

        let nothing =
            filter_sections_to_day(&sections, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), ist());
        assert!(nothing.is_empty());
    }

    #[test]
    fn test_sections_total() {
        let sections = group_into_sections(sample_entries(), now());
        assert_eq!(sections_total(&sections), dec!(755));
    }
}
