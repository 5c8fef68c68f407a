//! Commission ledger Discord commands - `commissions`, `engineer`, `pay` and `add_engineer`.
//!
//! Every command reads "now" once from the bot clock and hands it to the core ledger
//! functions, so a single reply is computed against a single instant.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{engineer, ledger, money, payment, report, sections},
        errors::{Error, Result},
    };
    use chrono::{NaiveDate, Utc};
    use tracing::info;

    /// Entries shown per section before collapsing the rest
    const MAX_ENTRIES_PER_SECTION: usize = 10;

    /// Which history to show for an engineer.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum HistoryTab {
        #[name = "Commissions"]
        Commissions,
        #[name = "Payments"]
        Payments,
    }

    /// Shows pending and this month's commission for every engineer.
    #[poise::command(slash_command, prefix_command)]
    pub async fn commissions(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let fleet = ledger::load_fleet_summary(&data.database, data.now()).await?;
        ctx.say(report::format_fleet_report(&fleet)?).await?;
        Ok(())
    }

    /// Shows one engineer's balances and their commission or payment history.
    #[poise::command(slash_command)]
    pub async fn engineer(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Engineer name"]
        #[autocomplete = "autocomplete::autocomplete_engineer_name"]
        name: String,
        #[description = "History to show"] tab: Option<HistoryTab>,
        #[description = "Only show one day (YYYY-MM-DD)"] day: Option<String>,
    ) -> Result<()> {
        let day = match day.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    ctx.say(format!("❌ Invalid day '{text}': use YYYY-MM-DD"))
                        .await?;
                    return Ok(());
                }
            },
        };

        let data = ctx.data();
        let detail = match ledger::load_engineer_ledger(&data.database, &name, data.now()).await {
            Ok(detail) => detail,
            Err(Error::EngineerNotFound { name }) => {
                ctx.say(format!(
                    "❌ Engineer '{name}' not found. Use `/commissions` to see the roster."
                ))
                .await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let tab = tab.unwrap_or(HistoryTab::Commissions);
        let (heading, history) = match tab {
            HistoryTab::Commissions => ("Commission History", &detail.commissions),
            HistoryTab::Payments => ("Payment History", &detail.payments),
        };
        let shown = match day {
            Some(day) => sections::filter_sections_to_day(history, day, data.utc_offset),
            None => history.clone(),
        };

        let text = report::format_engineer_report(
            &detail.summary,
            heading,
            &shown,
            data.utc_offset,
            MAX_ENTRIES_PER_SECTION,
        )?;
        ctx.say(text).await?;
        Ok(())
    }

    /// Records a payout to an engineer.
    #[poise::command(slash_command, prefix_command)]
    pub async fn pay(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Engineer being paid"]
        #[autocomplete = "autocomplete::autocomplete_engineer_name"]
        engineer_name: String,
        #[description = "Amount paid, e.g. 1500 or 1500.50"] amount: String,
    ) -> Result<()> {
        let amount = match money::parse_positive_amount(&amount) {
            Ok(amount) => amount,
            Err(e) => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
        };

        let data = ctx.data();
        let now = data.now();
        let paid_at = now.with_timezone(&Utc);
        let recorded =
            payment::record_payment(&data.database, &engineer_name, amount, paid_at).await?;
        info!(
            engineer = %recorded.engineer_name,
            author = %ctx.author().name,
            "Payment recorded via command"
        );

        let detail =
            ledger::load_engineer_ledger(&data.database, &recorded.engineer_name, now).await?;
        ctx.say(format!(
            "✅ Paid {} to {}. Pending is now {}.",
            money::format_inr(amount),
            recorded.engineer_name,
            money::format_inr(detail.summary.pending)
        ))
        .await?;
        Ok(())
    }

    /// Adds an engineer to the roster.
    #[poise::command(slash_command, prefix_command)]
    pub async fn add_engineer(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Engineer name"] name: String,
    ) -> Result<()> {
        let data = ctx.data();
        let added_at = data.now().with_timezone(&Utc);
        match engineer::create_engineer(&data.database, name, added_at).await {
            Ok(created) => {
                ctx.say(format!("✅ Added engineer '{}'.", created.name))
                    .await?;
            }
            Err(e @ (Error::DuplicateEngineer { .. } | Error::InvalidName { .. })) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
