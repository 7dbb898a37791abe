//! Model — ConsoleConfig struct.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub server_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub status_interval_secs: u64,
    pub edit_mode: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".to_string(),
            poll_interval_secs: 1,
            request_timeout_secs: 5,
            status_interval_secs: 5,
            edit_mode: true,
        }
    }
}

impl ConsoleConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.server_url.is_empty() {
            return Err("server_url must not be empty".to_string());
        }
        if self.poll_interval_secs == 0 {
            return Err("poll_interval_secs must be > 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be > 0".to_string());
        }
        if self.status_interval_secs == 0 {
            return Err("status_interval_secs must be > 0".to_string());
        }
        Ok(())
    }
}
