//! Load — config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::ConsoleConfig;

impl ConsoleConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("CONSOLE_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/gridwatch/console.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using environment variables", config_path);
            Self::from_env()
        };

        // Environment variables override file config
        if let Ok(url) = std::env::var("CONSOLE_SERVER_URL") {
            config.server_url = url;
        }
        if let Ok(Ok(secs)) = std::env::var("CONSOLE_POLL_INTERVAL").map(|s| s.parse()) {
            config.poll_interval_secs = secs;
        }
        if let Ok(Ok(secs)) = std::env::var("CONSOLE_REQUEST_TIMEOUT").map(|s| s.parse()) {
            config.request_timeout_secs = secs;
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: ConsoleConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_url: std::env::var("CONSOLE_SERVER_URL")
                .unwrap_or(defaults.server_url),
            poll_interval_secs: std::env::var("CONSOLE_POLL_INTERVAL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.poll_interval_secs),
            request_timeout_secs: std::env::var("CONSOLE_REQUEST_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            status_interval_secs: std::env::var("CONSOLE_STATUS_INTERVAL")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.status_interval_secs),
            edit_mode: std::env::var("CONSOLE_EDIT_MODE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.edit_mode),
        }
    }
}
