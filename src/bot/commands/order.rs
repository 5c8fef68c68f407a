//! Job order Discord commands - `order`, `orders`, `complete_order` and `reopen_order`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, handlers::autocomplete},
        core::{
            money,
            order::{self, NewOrder, OrderStatus},
            report,
        },
        errors::{Error, Result},
    };
    use chrono::Utc;
    use tracing::info;

    /// Which order list to show.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum OrderStatusChoice {
        #[name = "Pending"]
        Pending,
        #[name = "Completed"]
        Completed,
    }

    impl From<OrderStatusChoice> for OrderStatus {
        fn from(choice: OrderStatusChoice) -> Self {
            match choice {
                OrderStatusChoice::Pending => Self::Pending,
                OrderStatusChoice::Completed => Self::Completed,
            }
        }
    }

    /// Books a job order for an engineer.
    #[poise::command(slash_command)]
    pub async fn order(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Service requested"] service_type: String,
        #[description = "Engineer assigned"]
        #[autocomplete = "autocomplete::autocomplete_engineer_name"]
        engineer_name: String,
        #[description = "Customer name"] customer_name: String,
        #[description = "10-digit contact number"] contact_number: String,
        #[description = "Service address"] address: Option<String>,
        #[description = "Quoted amount, e.g. 650"] quoted_amount: Option<String>,
    ) -> Result<()> {
        let quoted_amount = match quoted_amount.as_deref().map(money::parse_amount).transpose() {
            Ok(amount) => amount,
            Err(e) => {
                ctx.say(format!("❌ Quoted amount: {e}")).await?;
                return Ok(());
            }
        };

        let new_order = NewOrder {
            service_type,
            engineer_name,
            customer_name,
            contact_number,
            address: address.unwrap_or_default(),
            quoted_amount,
        };

        let data = ctx.data();
        let booked_at = data.now().with_timezone(&Utc);
        match order::create_order(&data.database, new_order, booked_at).await {
            Ok(created) => {
                info!(
                    order_id = created.id,
                    author = %ctx.author().name,
                    "Order booked via command"
                );
                ctx.say(format!(
                    "✅ Order booked.\n{}",
                    report::format_order_line(&created, data.utc_offset)
                ))
                .await?;
            }
            Err(
                e @ (Error::InvalidOrder { .. }
                | Error::InvalidAmount { .. }
                | Error::EngineerNotFound { .. }),
            ) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Lists pending or completed job orders.
    #[poise::command(slash_command)]
    pub async fn orders(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Which orders to show (default: pending)"]
        status: Option<OrderStatusChoice>,
    ) -> Result<()> {
        let status = status.map_or(OrderStatus::Pending, OrderStatus::from);
        let data = ctx.data();
        let orders = order::list_orders(&data.database, status).await?;
        ctx.say(report::format_order_list(&orders, status, data.utc_offset)?)
            .await?;
        Ok(())
    }

    /// Marks a pending order completed.
    #[poise::command(slash_command, prefix_command)]
    pub async fn complete_order(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Order number"] id: i64,
    ) -> Result<()> {
        let data = ctx.data();
        let completed_at = data.now().with_timezone(&Utc);
        match order::complete_order(&data.database, id, completed_at).await {
            Ok(updated) => {
                ctx.say(format!(
                    "✅ Order #{} completed.\n{}",
                    updated.id,
                    report::format_order_line(&updated, data.utc_offset)
                ))
                .await?;
            }
            Err(e @ (Error::OrderNotFound { .. } | Error::InvalidOrder { .. })) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Moves a completed order back to pending.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reopen_order(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Order number"] id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        match order::reopen_order(db, id).await {
            Ok(updated) => {
                ctx.say(format!("✅ Order #{} moved back to pending.", updated.id))
                    .await?;
            }
            Err(e @ (Error::OrderNotFound { .. } | Error::InvalidOrder { .. })) => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
