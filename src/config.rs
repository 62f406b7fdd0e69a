//! Configuration Management
//!
//! Describes which controller a client talks to, with optional persistence
//! under the user's config directory.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Port the controller REST API listens on
pub const DEFAULT_PORT: u16 = 9999;

/// Host used when nothing else is configured
pub const DEFAULT_HOST: &str = "localhost";

const DEFAULT_SCHEME: &str = "http";

/// Controller client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Controller host name or address
    #[serde(default = "default_host")]
    pub host: String,
    /// REST API port
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Per-request timeout in milliseconds; `None` waits indefinitely
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_scheme() -> String {
    DEFAULT_SCHEME.to_string()
}

fn default_user_agent() -> String {
    format!("netpolicy-client/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            scheme: default_scheme(),
            timeout_ms: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Config for the given controller host with default port and scheme
    pub fn new(host: &str) -> Self {
        Self {
            host: host.to_string(),
            ..Self::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_ms = Some(millis);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Base URL of the REST API, always ending in `/api/`
    pub fn base_url(&self) -> Result<Url> {
        if self.host.is_empty() {
            return Err(Error::config("controller host is empty"));
        }
        let raw = format!("{}://{}:{}/api/", self.scheme, self.host, self.port);
        Url::parse(&raw).map_err(|e| Error::config(format!("{}: {}", raw, e)))
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("netpolicy").join("config.json"))
    }

    /// Load configuration from the user's config directory
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Loaded configuration with `NETPOLICY_*` environment overrides applied
    pub fn from_env() -> Self {
        Self::load().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up through `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("NETPOLICY_HOST").filter(|h| !h.is_empty()) {
            self.host = host;
        }
        if let Some(port) = lookup("NETPOLICY_PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring invalid NETPOLICY_PORT: {}", port),
            }
        }
        if let Some(secs) = lookup("NETPOLICY_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.timeout_ms = Some(u64::saturating_mul(secs, 1000)),
                Err(_) => tracing::warn!("Ignoring invalid NETPOLICY_TIMEOUT_SECS: {}", secs),
            }
        }
        self
    }

    /// Save configuration to the user's config directory
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_local_controller() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 9999);
        assert_eq!(config.timeout(), None);
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "http://localhost:9999/api/"
        );
    }

    #[test]
    fn test_empty_host_is_rejected() {
        let config = ClientConfig::new("");
        assert!(matches!(config.base_url(), Err(Error::Config(_))));
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::default().with_env_overrides(|key| match key {
            "NETPOLICY_HOST" => Some("netmaster".to_string()),
            "NETPOLICY_PORT" => Some("not-a-port".to_string()),
            "NETPOLICY_TIMEOUT_SECS" => Some("5".to_string()),
            _ => None,
        });
        assert_eq!(config.host, "netmaster");
        assert_eq!(config.port, 9999);
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_sub_second_timeout_is_kept() {
        let config = ClientConfig::default().with_timeout(Duration::from_millis(200));
        assert_eq!(config.timeout_ms, Some(200));
        assert_eq!(config.timeout(), Some(Duration::from_millis(200)));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = ClientConfig::new("10.0.0.5").with_port(8080);
        config.save_to(&path).unwrap();

        assert_eq!(ClientConfig::load_from(&path), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"host": "netmaster"}"#).unwrap();

        let config = ClientConfig::load_from(&path);
        assert_eq!(config.host, "netmaster");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_missing_or_corrupt_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert_eq!(ClientConfig::load_from(&missing), ClientConfig::default());

        let corrupt = dir.path().join("corrupt.json");
        std::fs::write(&corrupt, "{not json").unwrap();
        assert_eq!(ClientConfig::load_from(&corrupt), ClientConfig::default());
    }
}
