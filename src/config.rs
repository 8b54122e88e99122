//! Client configuration at ~/.config/evently/config.toml

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, File};
use evently_core::{EventError, EventResult};
use serde::{Deserialize, Serialize};
use url::Url;

static DEFAULT_BASE_URL: &str = "http://localhost/";
static DEFAULT_ENDPOINT: &str = "api.php";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Where the event API lives and how long to wait for it.
///
/// The API is a single endpoint (e.g. `api.php`) under `base_url`;
/// operations are told apart by HTTP method and query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request transport timeout. The store itself never times out.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        ClientConfig {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn config_path() -> EventResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventError::Config("Could not determine config directory".into()))?
            .join("evently");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/evently/config.toml, writing a commented default
    /// file first if there is none.
    pub fn load() -> EventResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path. Missing keys (or a missing file) fall
    /// back to the defaults.
    pub fn load_from(path: &Path) -> EventResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| EventError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventError::Config(e.to_string()))
    }

    /// Save to ~/.config/evently/config.toml
    pub fn save(&self) -> EventResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> EventResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| EventError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| EventError::Config(format!("Could not write config file: {e}")))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventResult<()> {
        let contents = format!(
            "\
# evently configuration

# Server hosting the event API:
# base_url = \"{DEFAULT_BASE_URL}\"

# Endpoint under base_url that serves every operation:
# endpoint = \"{DEFAULT_ENDPOINT}\"

# Request timeout in milliseconds:
# timeout_ms = {DEFAULT_TIMEOUT_MS}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventError::Config(format!("Could not write config file: {e}")))
    }

    /// Full URL of the endpoint, e.g. `http://localhost/api.php`.
    pub fn endpoint_url(&self) -> EventResult<Url> {
        let mut base = Url::parse(&self.base_url)
            .map_err(|e| EventError::Config(format!("Invalid base_url '{}': {e}", self.base_url)))?;

        // Url::join replaces the last path segment unless it ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        base.join(&self.endpoint)
            .map_err(|e| EventError::Config(format!("Invalid endpoint '{}': {e}", self.endpoint)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
