//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord admin interface for the service ledger,
//! including all slash commands, autocomplete handlers, and bot context management.

/// Discord command implementations (commissions, bills, orders, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::clock,
    errors::{Error, Result},
};
use chrono::{DateTime, FixedOffset};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info};

/// Shared data available to all bot commands.
/// This structure holds the database connection and the local clock offset
/// that every ledger computation needs.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Local offset for month windows and date labels
    pub utc_offset: FixedOffset,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection and offset.
    #[must_use]
    pub const fn new(database: DatabaseConnection, utc_offset: FixedOffset) -> Self {
        Self {
            database,
            utc_offset,
        }
    }

    /// Current local time; each command reads it once and passes it down.
    #[must_use]
    pub fn now(&self) -> DateTime<FixedOffset> {
        clock::now_in(self.utc_offset)
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().name, "Command failed: {error}");
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send error message: {e}");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Registers every command and runs the Discord client until it stops.
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::commissions(),
                commands::engineer(),
                commands::pay(),
                commands::add_engineer(),
                commands::bill(),
                commands::delete_bill(),
                commands::revenue(),
                commands::order(),
                commands::orders(),
                commands::complete_order(),
                commands::reopen_order(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered commands globally");
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Starting Discord client");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;
    client.start().await?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;
