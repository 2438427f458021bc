//! TOML configuration.
//!
//! The configuration is loaded once at startup and passed explicitly to the
//! proxy server and the data client. Credentials are resolved at load time:
//! a value in the file wins, otherwise the named environment variable is
//! read, otherwise the credential is the empty string. A missing credential
//! is not an error; the empty token is sent as-is.
//!
//! ```toml
//! [api]
//! base_url = "https://api.proof-of-hustle.com"
//! key_env = "POH_API_KEY"
//!
//! [github]
//! token_env = "GITHUB_TOKEN"
//!
//! [server]
//! bind = "127.0.0.1:3000"
//!
//! [client]
//! base_url = "http://127.0.0.1:3000"
//! timeout_secs = 10
//!
//! [fallback]
//! seed = 42
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
}

/// Upstream reputation backend reached by the proxy operations.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub key_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            key: None,
            key_env: default_api_key_env(),
        }
    }
}

impl ApiConfig {
    /// Bearer token sent upstream. Empty when none was configured.
    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or("")
    }
}

fn default_api_base_url() -> String {
    "https://api.proof-of-hustle.com".to_string()
}
fn default_api_key_env() -> String {
    "POH_API_KEY".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct GithubConfig {
    #[serde(default = "default_github_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_github_token_env")]
    pub token_env: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: default_github_base_url(),
            token: None,
            token_env: default_github_token_env(),
        }
    }
}

impl GithubConfig {
    pub fn token(&self) -> &str {
        self.token.as_deref().unwrap_or("")
    }
}

fn default_github_base_url() -> String {
    "https://api.github.com".to_string()
}
fn default_github_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

/// Where the resilient data client sends its requests (the local proxy).
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "default_client_base_url")]
    pub base_url: String,
    /// Request timeout. `None` leaves the transport default in place.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_client_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_client_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FallbackConfig {
    /// Seed for the fallback data source. Unseeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Config {
    /// Default configuration with credentials resolved from the environment.
    ///
    /// Used by commands that can run without a config file.
    pub fn minimal() -> Self {
        let mut config = Config::default();
        config.resolve_credentials();
        config
    }

    fn resolve_credentials(&mut self) {
        if self.api.key.is_none() {
            self.api.key = Some(std::env::var(&self.api.key_env).unwrap_or_default());
        }
        if self.github.token.is_none() {
            self.github.token = Some(std::env::var(&self.github.token_env).unwrap_or_default());
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

/// Parses and validates configuration text, then resolves credentials.
pub fn parse_config(content: &str) -> Result<Config> {
    let mut config: Config =
        toml::from_str(content).with_context(|| "Failed to parse config file")?;

    for (field, url) in [
        ("api.base_url", &config.api.base_url),
        ("github.base_url", &config.github.base_url),
        ("client.base_url", &config.client.base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("{} must start with http:// or https://, got '{}'", field, url);
        }
    }

    if config.client.timeout_secs == Some(0) {
        anyhow::bail!("client.timeout_secs must be > 0");
    }

    config.resolve_credentials();

    Ok(config)
}
