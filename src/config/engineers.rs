//! Engineer roster loading from config.toml
//!
//! The engineers listed in config.toml are seeded into the database on startup so the
//! commission summary shows every engineer, including those with no bills yet.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the roster file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Engineers to seed
    #[serde(default)]
    pub engineers: Vec<EngineerConfig>,
}

/// Configuration for a single engineer
#[derive(Debug, Deserialize, Clone)]
pub struct EngineerConfig {
    /// Name of the engineer, used as the attribution key on bills
    pub name: String,
}

/// Loads the roster from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the roster from ./config.toml, or `None` when the file does not exist.
pub fn load_default_config() -> Result<Option<Config>> {
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if !path.exists() {
        return Ok(None);
    }
    load_config(path).map(Some)
}
