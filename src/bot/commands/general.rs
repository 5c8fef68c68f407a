//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Service Ledger Help**\n\
        Commission is 25% of each bill's service charge. Pending is earned minus paid.\n\n\
        **Ledger Commands**\n\
        • `/commissions` - Pending and this month's commission for every engineer.\n\
        • `/engineer <name> [tab] [day]` - One engineer's balances with commission or payment history. `day` is `YYYY-MM-DD`.\n\
        • `/pay <engineer> <amount>` - Records a payout to an engineer.\n\n\
        **Billing Commands**\n\
        • `/bill ...` - Records a completed service visit.\n\
        • `/delete_bill <bill_number>` - Removes a bill entered by mistake.\n\
        • `/revenue` - Month-by-month revenue history.\n\n\
        **Order Commands**\n\
        • `/order ...` - Books a job order for an engineer.\n\
        • `/orders [status]` - Lists pending or completed orders.\n\
        • `/complete_order <id>` / `/reopen_order <id>` - Moves an order between pending and completed.\n\n\
        **Admin Commands**\n\
        • `/add_engineer <name>` - Adds an engineer to the roster.\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
