//! Config - Backend connection settings
//!
//! Layered the same way everywhere the client runs: built-in defaults,
//! then `config.toml` in the working directory, then environment overrides.

use serde::{Deserialize, Serialize};

const CONFIG_FILE_PATH: &str = "config.toml";

const DEFAULT_SERVER_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Client-side deadline for every backend call. A request that exceeds
    /// it resolves through the normal failure path instead of leaving the
    /// session stuck in flight.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn parse_secs_env(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();

        if std::path::Path::new(CONFIG_FILE_PATH).exists() {
            if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_PATH) {
                if let Ok(file_config) = toml::from_str::<Config>(&content) {
                    config = file_config;
                }
            }
        }

        if let Ok(server_url) = std::env::var("RAG_SERVER_URL") {
            config.server_url = server_url;
        }
        if let Ok(timeout) = std::env::var("RAG_REQUEST_TIMEOUT_SECS") {
            if let Some(secs) = parse_secs_env(&timeout) {
                config.request_timeout_secs = secs;
            }
        }

        config.server_url = config.server_url.trim_end_matches('/').to_string();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn parse_secs_env_valid_values() {
        assert_eq!(parse_secs_env("10"), Some(10));
        assert_eq!(parse_secs_env(" 45 "), Some(45));
    }

    #[test]
    fn parse_secs_env_invalid_values() {
        for value in ["0", "-5", "abc", "", "  "] {
            assert_eq!(parse_secs_env(value), None, "value {value:?} should be rejected");
        }
    }

    #[test]
    fn test_partial_file_config_fills_defaults() {
        let config: Config = toml::from_str("server_url = \"http://kb.internal:9000\"").unwrap();
        assert_eq!(config.server_url, "http://kb.internal:9000");
        assert_eq!(config.request_timeout_secs, 30);
    }
}
