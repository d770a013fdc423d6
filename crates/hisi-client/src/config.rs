//! # Client Configuration
//!
//! Configuration management for the Hisi Studio client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     HISI_API_URL=https://api.hisistudio.com                            │
//! │     HISI_REQUEST_TIMEOUT_SECS=15                                       │
//! │     HISI_SESSION_PATH=/tmp/session.json                                │
//! │                                                                         │
//! │  2. TOML Config File (--config, HISI_CONFIG, or platform default)      │
//! │     ~/.config/hisi/client.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.hisistudio.hisi/client.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:5000, 30s timeout                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "https://api.hisistudio.com"
//! request_timeout_secs = 30
//! user_agent = "hisi-client/0.1.0"
//!
//! [storage]
//! session_path = "/home/amani/.local/share/hisi/session.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "HISI_CONFIG";

// =============================================================================
// API Settings
// =============================================================================

/// Where and how to reach the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Backend origin; endpoints live under `<base_url>/api/v1/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound for a whole request (connect + response), in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Sent as the `User-Agent` header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("hisi-client/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the persisted session lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Explicit session file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_path: Option<PathBuf>,
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config pointing at `base_url`, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.api.base_url = base_url.into();
        config
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (see [`ClientConfig::config_file_path`])
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let path = Self::config_file_path(config_path);
        let mut config = Self::load_file(path.as_deref())?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Defaults plus the file at `path`, without environment overrides.
    ///
    /// A missing file is not an error; this is what `save` round-trips.
    pub fn load_file(path: Option<&Path>) -> ClientResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading client config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> ClientResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.api.base_url, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "Base URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.request_timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the process environment in
    /// production, a map in tests).
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("HISI_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = lookup("HISI_REQUEST_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.request_timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric HISI_REQUEST_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = lookup("HISI_SESSION_PATH") {
            debug!(path = %path, "Overriding session path from environment");
            self.storage.session_path = Some(PathBuf::from(path));
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "hisistudio", "hisi")
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("client.toml"))
    }

    /// The file to read and write: `explicit`, else `HISI_CONFIG`, else
    /// the platform default.
    pub fn config_file_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_config_path)
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Parsed base URL with a trailing slash so joins keep any path prefix.
    pub fn base_url(&self) -> ClientResult<Url> {
        let mut raw = self.api.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Url::parse(&raw)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Session file: explicit setting, else `<data_dir>/session.json`.
    pub fn session_path(&self) -> Option<PathBuf> {
        self.storage.session_path.clone().or_else(|| {
            Self::project_dirs().map(|dirs| dirs.data_dir().join("session.json"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert!(config.api.user_agent.starts_with("hisi-client/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.api.base_url = "ftp://files.hisistudio.com".to_string();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "https://api.hisistudio.com".to_string();
        config.api.request_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("HISI_API_URL", "https://staging.hisistudio.com"),
            ("HISI_REQUEST_TIMEOUT_SECS", "5"),
            ("HISI_SESSION_PATH", "/tmp/hisi-session.json"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config.apply_overrides_from(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://staging.hisistudio.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.session_path(),
            Some(PathBuf::from("/tmp/hisi-session.json"))
        );
    }

    #[test]
    fn test_bad_timeout_override_is_ignored() {
        let mut config = ClientConfig::default();
        config.apply_overrides_from(|k| (k == "HISI_REQUEST_TIMEOUT_SECS").then(|| "soon".into()));
        assert_eq!(config.api.request_timeout_secs, 30);
    }

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let config = ClientConfig::with_base_url("https://hisistudio.com/backend");
        let base = config.base_url().unwrap();
        assert_eq!(
            base.join("api/v1/products").unwrap().as_str(),
            "https://hisistudio.com/backend/api/v1/products"
        );
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("client.toml");

        let mut config = ClientConfig::with_base_url("https://api.hisistudio.com");
        config.api.request_timeout_secs = 12;
        config.save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));

        let loaded = ClientConfig::load_file(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_file_missing_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("client.toml");

        assert_eq!(ClientConfig::load_file(Some(&missing)).unwrap(), ClientConfig::default());
        assert_eq!(ClientConfig::load_file(None).unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_load_file_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(ClientConfig::load_file(Some(&path)).is_err());
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let explicit = PathBuf::from("/etc/hisi/client.toml");
        assert_eq!(ClientConfig::config_file_path(Some(explicit.clone())), Some(explicit));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str("[api]\nbase_url = \"https://x.io\"\n").unwrap();
        assert_eq!(config.api.request_timeout_secs, 30);
        assert!(config.storage.session_path.is_none());
    }
}
