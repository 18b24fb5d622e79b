mod config;
pub mod database;

pub use config::{Config, NotificationsConfig, TimerDefaults};
pub use database::Database;

use std::path::PathBuf;

/// Returns `~/.config/studyblock[-dev]/` based on STUDYBLOCK_ENV.
///
/// Set STUDYBLOCK_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYBLOCK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studyblock-dev")
    } else {
        base_dir.join("studyblock")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
