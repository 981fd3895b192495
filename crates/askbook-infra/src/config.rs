//! Client configuration loader for Askbook.
//!
//! Reads `config.toml` from the data directory (`~/.askbook/` in production)
//! and deserializes it into [`ClientConfig`]. Falls back to defaults when
//! the file is missing or malformed, so a fresh install talks to a local
//! backend without any setup.

use std::path::{Path, PathBuf};

use askbook_types::config::ClientConfig;

/// Environment variable overriding the data directory location.
pub const DATA_DIR_ENV: &str = "ASKBOOK_DATA_DIR";

/// Resolve the data directory.
///
/// `ASKBOOK_DATA_DIR` wins when set; otherwise `~/.askbook`. Falls back to
/// `.askbook` in the working directory when no home directory is known
/// (containers).
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".askbook"),
        None => PathBuf::from(".askbook"),
    }
}

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}
