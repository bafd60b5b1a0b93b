/// Config file loading and creation for the shelfrank CLI.
///
/// Config lives at ~/.config/shelfrank/config.toml.
/// All fields are optional — CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default)]
pub struct ShelfrankConfig {
    pub endpoint: Option<String>,
    pub similar_window: Option<i64>,
    pub similar_bias: Option<f64>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# shelfrank configuration
# All values here can be overridden by CLI flags.

# Base URL of the ranking backend (PostgREST-style API)
# endpoint = \"https://myproject.example.co/rest/v1\"

# API key: use SHELFRANK_API_KEY env var or --api-key flag (not stored in config)

# Rating gap under which two items count as similarly rated
# similar_window = 200

# Probability that a freeform draw uses the similar-rating pool
# similar_bias = 0.85
";

/// Returns the default config path: ~/.config/shelfrank/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("shelfrank").join("config.toml")
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> ShelfrankConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            toml::from_str(&content)
                .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display())))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => ShelfrankConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    // Create parent directories
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}
