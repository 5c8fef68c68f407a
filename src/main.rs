use chrono::Utc;
use dotenvy::dotenv;
use service_ledger::{
    bot::{self, BotData},
    config::{clock, database, engineers},
    core::engineer,
    errors::{Error, Result},
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Local clock offset for month windows and labels
    let utc_offset = clock::get_utc_offset()
        .inspect(|offset| info!("Using local offset {offset}"))
        .inspect_err(|e| error!("Invalid LEDGER_UTC_OFFSET: {e}"))?;

    // 4. Connect and make sure the tables exist
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Seed the engineer roster from config.toml when present
    match engineers::load_default_config()? {
        Some(config) => {
            engineer::seed_engineers(&db, &config, Utc::now())
                .await
                .inspect(|added| info!("Seeded {added} engineer(s) from config"))
                .inspect_err(|e| error!("Failed to seed engineers: {e}"))?;
        }
        None => info!("No {} found, skipping roster seed", engineers::DEFAULT_CONFIG_PATH),
    }

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(db, utc_offset)).await
}
