//! Report formatting.
//!
//! Turns ledger summaries, sectioned histories and revenue rows into plain text for the bot
//! layer. All functions are pure and framework-agnostic.

use crate::{
    core::{
        commission,
        ledger::{EngineerLedgerSummary, FleetSummary},
        money::{self, format_inr},
        order::OrderStatus,
        revenue::MonthlyRevenue,
        sections::{EntryKind, Granularity, LedgerEntry, Section},
    },
    entities::{bill, order},
    errors::Result,
};
use chrono::FixedOffset;
use std::fmt::Write;

/// Discord rejects messages longer than this
pub const MESSAGE_LIMIT: usize = 2000;

/// Status word shown next to an engineer's balance.
#[must_use]
pub fn pending_status(summary: &EngineerLedgerSummary) -> &'static str {
    if summary.is_overpaid() {
        "Overpaid"
    } else if summary.is_settled() {
        "Paid"
    } else {
        "Pending"
    }
}

/// One line of the fleet summary.
#[must_use]
pub fn format_engineer_line(summary: &EngineerLedgerSummary) -> String {
    format!(
        "**{}** | {} | this month {} | pending {}",
        summary.name,
        pending_status(summary),
        format_inr(summary.month_commission),
        format_inr(summary.pending)
    )
}

/// Full fleet summary: totals followed by one line per engineer.
pub fn format_fleet_report(fleet: &FleetSummary) -> Result<String> {
    if fleet.engineers.is_empty() {
        return Ok("No engineers or bills recorded yet.".to_string());
    }

    let mut report = format!(
        "**Engineer Commissions**\nThis month: {} | Total pending: {}\n\n",
        format_inr(fleet.month_commission_total),
        format_inr(fleet.pending_total)
    );
    for summary in &fleet.engineers {
        writeln!(report, "{}", format_engineer_line(summary))?;
    }
    Ok(truncate_message(&report, MESSAGE_LIMIT))
}

/// One entry inside a section, with local time of day.
#[must_use]
pub fn format_entry_line(entry: &LedgerEntry, offset: FixedOffset) -> String {
    let time = entry.timestamp.with_timezone(&offset).format("%d %b %H:%M");
    match entry.kind {
        EntryKind::Commission => format!(
            "• {time} | {} | {} | {} | {}",
            entry.bill_number.as_deref().unwrap_or("-"),
            entry.customer_name.as_deref().unwrap_or("-"),
            entry.service_type.as_deref().unwrap_or("-"),
            format_inr(entry.amount)
        ),
        EntryKind::Payment => format!("• {time} | paid {}", format_inr(entry.amount)),
    }
}

/// Section header with its rolled-up total.
#[must_use]
pub fn format_section_header(section: &Section) -> String {
    let suffix = match section.granularity {
        Granularity::Day => "",
        Granularity::Month => " (Monthly Summary)",
    };
    format!("__{}{suffix}__ | {}", section.title, format_inr(section.total))
}

/// Balance block for a single engineer.
#[must_use]
pub fn format_engineer_summary(summary: &EngineerLedgerSummary) -> String {
    format!(
        "**{}** ({})\nMonthly commission: {}\nMonthly paid: {}\nTotal commission: {}\nTotal paid: {}\nPending: {}",
        summary.name,
        pending_status(summary),
        format_inr(summary.month_commission),
        format_inr(summary.month_paid),
        format_inr(summary.total_commission),
        format_inr(summary.total_paid),
        format_inr(summary.pending)
    )
}

/// Summary block followed by the given sections, each listing up to `max_entries` lines.
pub fn format_engineer_report(
    summary: &EngineerLedgerSummary,
    heading: &str,
    sections: &[Section],
    offset: FixedOffset,
    max_entries: usize,
) -> Result<String> {
    let mut report = format_engineer_summary(summary);
    write!(report, "\n\n**{heading}**\n")?;

    if sections.is_empty() {
        report.push_str("No transactions found.\n");
    }
    for section in sections {
        writeln!(report, "{}", format_section_header(section))?;
        for entry in section.entries.iter().take(max_entries) {
            writeln!(report, "{}", format_entry_line(entry, offset))?;
        }
        let hidden = section.entries.len().saturating_sub(max_entries);
        if hidden > 0 {
            writeln!(report, "  …and {hidden} more")?;
        }
    }
    Ok(truncate_message(&report, MESSAGE_LIMIT))
}

/// Month-by-month revenue listing.
pub fn format_revenue_report(history: &[MonthlyRevenue]) -> Result<String> {
    if history.is_empty() {
        return Ok("No revenue history available.".to_string());
    }
    let mut report = String::from("**Monthly Revenue History**\n");
    for month in history {
        writeln!(
            report,
            "{} | {} | {} bills",
            month.title,
            format_inr(month.total),
            month.bill_count
        )?;
    }
    Ok(truncate_message(&report, MESSAGE_LIMIT))
}

/// Receipt-style summary of a stored bill, including the engineer's commission.
pub fn format_bill_receipt(bill: &bill::Model, offset: FixedOffset) -> Result<String> {
    let mut receipt = format!(
        "**{}** | {}\nService: {}\nEngineer: {}\nCustomer: {} ({})\nAddress: {}\nService charge: {}\nCommission (25%): {}\nTotal: {}\nPayment method: {}",
        bill.bill_number,
        bill.created_at.with_timezone(&offset).format("%d %b %Y %H:%M"),
        bill.service_type,
        bill.engineer_name,
        bill.customer_name,
        bill.contact_number,
        bill.address,
        format_inr(money::from_minor(bill.service_charge_minor)),
        format_inr(commission::bill_commission(bill)),
        format_inr(money::from_minor(bill.total_minor)),
        bill.payment_method.to_uppercase()
    );
    if let (Some(given), Some(change)) = (bill.cash_given_minor, bill.change_minor) {
        write!(
            receipt,
            "\nCash given: {}\nChange returned: {}",
            format_inr(money::from_minor(given)),
            format_inr(money::from_minor(change))
        )?;
    }
    if let Some(notes) = &bill.notes {
        write!(receipt, "\nNotes: {notes}")?;
    }
    Ok(receipt)
}

/// One job order: id, when, who, where, and the quote if any.
#[must_use]
pub fn format_order_line(order: &order::Model, offset: FixedOffset) -> String {
    let when = order.completed_at.unwrap_or(order.created_at);
    let quote = order
        .quoted_amount_minor
        .map_or_else(String::new, |minor| {
            format!(" | quoted {}", format_inr(money::from_minor(minor)))
        });
    format!(
        "• #{} | {} | {} | {} ({}) | {}{quote}",
        order.id,
        when.with_timezone(&offset).format("%d %b %H:%M"),
        order.service_type,
        order.customer_name,
        order.contact_number,
        order.engineer_name
    )
}

/// Listing of orders under a status heading.
pub fn format_order_list(
    orders: &[order::Model],
    status: OrderStatus,
    offset: FixedOffset,
) -> Result<String> {
    let heading = match status {
        OrderStatus::Pending => "Pending Orders",
        OrderStatus::Completed => "Completed Orders",
    };
    if orders.is_empty() {
        return Ok(format!("No {status} orders."));
    }
    let mut report = format!("**{heading}** ({})\n", orders.len());
    for order in orders {
        writeln!(report, "{}", format_order_line(order, offset))?;
    }
    Ok(truncate_message(&report, MESSAGE_LIMIT))
}

/// Cuts `text` to at most `limit` characters, marking the cut.
#[must_use]
pub fn truncate_message(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let marker = "\n…";
    let keep = limit.saturating_sub(marker.chars().count());
    let mut cut: String = text.chars().take(keep).collect();
    cut.push_str(marker);
    cut
}
