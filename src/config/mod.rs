/// Database configuration and connection management
pub mod database;

/// Engineer roster loading from config.toml
pub mod engineers;

/// Local time offset used for month windows and date labels
pub mod clock;
