mod config;

pub use config::{Config, OutputConfig, PreferencesConfig};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the config directory, creating it if needed.
///
/// `STUDYPLANNER_CONFIG_DIR` overrides the location outright. Otherwise the
/// directory is `~/.config/studyplanner[-dev]/` based on STUDYPLANNER_ENV.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("STUDYPLANNER_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("STUDYPLANNER_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("studyplanner-dev")
            } else {
                base_dir.join("studyplanner")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
