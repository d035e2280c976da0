//! Configuration loaders for helpbot.
//!
//! Reads `config.toml` from the config directory (`~/.helpbot/` by default)
//! into [`GlobalConfig`], and parses inline JSON widget configuration into
//! [`WidgetConfig`]. Both fall back to defaults when the input is missing or
//! malformed.

use std::path::{Path, PathBuf};

use helpbot_types::config::{GlobalConfig, WidgetConfig};

/// Resolve the config directory from environment or platform defaults.
///
/// Priority:
/// 1. `HELPBOT_CONFIG_DIR` environment variable
/// 2. `~/.helpbot`
pub fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("HELPBOT_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".helpbot");
    }

    PathBuf::from(".helpbot")
}

/// Default location of `config.toml`.
pub fn default_config_path() -> PathBuf {
    resolve_config_dir().join("config.toml")
}

/// Load global configuration from `config_path`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(config_path: &Path) -> GlobalConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Parse an inline JSON widget configuration blob.
///
/// Hosts embed this as an attribute payload on the page. Blank input yields
/// the default config; malformed JSON is logged and also yields the default.
pub fn parse_inline_config(json: &str) -> WidgetConfig {
    if json.trim().is_empty() {
        return WidgetConfig::default();
    }

    match serde_json::from_str::<WidgetConfig>(json) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Invalid inline widget configuration: {err}, using defaults");
            WidgetConfig::default()
        }
    }
}
