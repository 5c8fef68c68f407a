//! Billing Discord commands - `bill`, `delete_bill` and `revenue`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            bill::{self, NewBill, PaymentMethod},
            money, report, revenue,
        },
        errors::{Error, Result},
    };
    use tracing::info;

    /// How the customer paid, as offered in the slash command.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum PaymentChoice {
        #[name = "Cash"]
        Cash,
        #[name = "UPI"]
        Upi,
    }

    impl From<PaymentChoice> for PaymentMethod {
        fn from(choice: PaymentChoice) -> Self {
            match choice {
                PaymentChoice::Cash => Self::Cash,
                PaymentChoice::Upi => Self::Upi,
            }
        }
    }

    /// Records a completed service visit and replies with the receipt.
    #[poise::command(slash_command)]
    pub async fn bill(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Service performed"] service_type: String,
        #[description = "Engineer who did the visit"]
        #[autocomplete = "autocomplete::autocomplete_engineer_name"]
        engineer_name: String,
        #[description = "Customer name"] customer_name: String,
        #[description = "10-digit contact number"] contact_number: String,
        #[description = "Service address"] address: String,
        #[description = "Service charge, e.g. 1000 or 999.50"] service_charge: String,
        #[description = "Payment method"] payment_method: PaymentChoice,
        #[description = "Cash received (cash bills only)"] cash_given: Option<String>,
        #[description = "Optional notes"] notes: Option<String>,
    ) -> Result<()> {
        let service_charge = match money::parse_amount(&service_charge) {
            Ok(amount) => amount,
            Err(e) => {
                ctx.say(format!("❌ Service charge: {e}")).await?;
                return Ok(());
            }
        };
        let cash_given = match cash_given.as_deref().map(money::parse_amount).transpose() {
            Ok(amount) => amount,
            Err(e) => {
                ctx.say(format!("❌ Cash given: {e}")).await?;
                return Ok(());
            }
        };

        let new_bill = NewBill {
            service_type,
            engineer_name,
            customer_name,
            contact_number,
            address,
            service_charge,
            payment_method: payment_method.into(),
            cash_given,
            notes,
        };

        let data = ctx.data();
        match bill::create_bill(&data.database, new_bill, data.now()).await {
            Ok(created) => {
                info!(
                    bill_number = %created.bill_number,
                    author = %ctx.author().name,
                    "Bill recorded via command"
                );
                ctx.say(format!(
                    "✅ Bill recorded.\n{}",
                    report::format_bill_receipt(&created, data.utc_offset)?
                ))
                .await?;
            }
            Err(e @ (Error::InvalidBill { .. } | Error::InvalidAmount { .. })) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Deletes a bill entered by mistake.
    #[poise::command(slash_command, prefix_command)]
    pub async fn delete_bill(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Bill number, e.g. BILL-20261019-0001"] bill_number: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        match bill::delete_bill(db, &bill_number).await {
            Ok(deleted) => {
                ctx.say(format!(
                    "✅ Deleted bill {} for {} ({}).",
                    deleted.bill_number,
                    deleted.customer_name,
                    money::format_inr(money::from_minor(deleted.total_minor))
                ))
                .await?;
            }
            Err(e @ Error::BillNotFound { .. }) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Shows revenue totals per calendar month, newest first.
    #[poise::command(slash_command, prefix_command)]
    pub async fn revenue(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let history = revenue::load_revenue_history(&data.database, data.utc_offset).await?;
        ctx.say(report::format_revenue_report(&history)?).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
