//! HTTP server settings from TOML (`[server]` section)

use super::lookup_env;
use serde::{Deserialize, Serialize};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    /// Falls back to `$PORT`, then 8080
    pub port: Option<u16>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: None,
        }
    }
}

impl FileServerConfig {
    pub fn port(&self) -> u16 {
        self.port_with(lookup_env)
    }

    pub(crate) fn port_with(&self, env: impl Fn(&str) -> Option<String>) -> u16 {
        self.port
            .or_else(|| env("PORT").and_then(|p| p.trim().parse().ok()))
            .unwrap_or(DEFAULT_PORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_fallbacks() {
        let config = FileServerConfig::default();
        assert_eq!(config.port_with(|_| None), 8080);
        assert_eq!(config.port_with(|_| Some("3001".to_string())), 3001);
        assert_eq!(config.port_with(|_| Some("not-a-port".to_string())), 8080);

        let config = FileServerConfig {
            port: Some(9000),
            ..Default::default()
        };
        assert_eq!(config.port_with(|_| Some("3001".to_string())), 9000);
    }
}
