mod config;
pub mod database;
pub mod migrations;
mod records;

pub use config::{Config, DayConfig, LoggingConfig};
pub use database::Database;
pub use records::{Barrier, CheckIn, Reflection};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `DAYWEATHER_DATA_DIR` wins when set. Otherwise `~/.config/dayweather/`,
/// or `~/.config/dayweather-dev/` when `DAYWEATHER_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("DAYWEATHER_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DAYWEATHER_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("dayweather-dev")
            } else {
                base_dir.join("dayweather")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
