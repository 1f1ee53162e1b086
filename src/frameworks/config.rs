use crate::interface_adapters::clients::{ClientError, IdentityToolkitClient};
use crate::use_cases::AuthService;
use serde::Deserialize;
use std::{env, fmt, path::Path, time::Duration};

// Runtime configuration for the identity client (read-only after construction).

pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const API_KEY_VAR: &str = "IDENTITY_API_KEY";
const BASE_URL_VAR: &str = "IDENTITY_BASE_URL";
const TIMEOUT_VAR: &str = "IDENTITY_TIMEOUT_MS";

#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingApiKey,
    Io(std::io::Error),
    Parse(toml::de::Error),
    Client(ClientError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingApiKey => write!(f, "identity api key is not configured"),
            ConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            ConfigError::Parse(err) => write!(f, "failed to parse config file: {err}"),
            ConfigError::Client(err) => write!(f, "failed to initialize identity client: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// Shape of the optional TOML config file.
#[derive(Debug, Deserialize)]
struct FileConfig {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_ms: Option<u64>,
}

/// Reads `IDENTITY_API_KEY`, `IDENTITY_BASE_URL` and `IDENTITY_TIMEOUT_MS`
/// from the process environment. `.env` is loaded by the binary's bootstrap.
pub fn from_env() -> Result<ClientConfig, ConfigError> {
    from_vars(|name| env::var(name).ok())
}

/// Reads a TOML file with `api_key`, and optionally `base_url` and `timeout_ms`.
pub fn from_file(path: impl AsRef<Path>) -> Result<ClientConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_file(&contents)
}

pub fn build_service(
    config: &ClientConfig,
) -> Result<AuthService<IdentityToolkitClient>, ConfigError> {
    let client = IdentityToolkitClient::new(&config.base_url, &config.api_key, config.timeout)
        .map_err(ConfigError::Client)?;
    tracing::debug!(
        base_url = %config.base_url,
        timeout_ms = config.timeout.as_millis(),
        "identity client configured."
    );
    Ok(AuthService::new(client))
}

fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<ClientConfig, ConfigError> {
    let api_key = lookup(API_KEY_VAR)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingApiKey)?;
    let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let timeout = lookup(TIMEOUT_VAR)
        .and_then(|value| value.parse::<u64>().ok())
        .and_then(timeout_from_millis)
        .unwrap_or(DEFAULT_TIMEOUT);

    Ok(ClientConfig {
        api_key,
        base_url,
        timeout,
    })
}

fn parse_file(contents: &str) -> Result<ClientConfig, ConfigError> {
    let file: FileConfig = toml::from_str(contents).map_err(ConfigError::Parse)?;
    let api_key = file
        .api_key
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingApiKey)?;

    Ok(ClientConfig {
        api_key,
        base_url: file
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        timeout: file
            .timeout_ms
            .and_then(timeout_from_millis)
            .unwrap_or(DEFAULT_TIMEOUT),
    })
}

// Zero would make every request time out immediately.
fn timeout_from_millis(millis: u64) -> Option<Duration> {
    (millis > 0).then(|| Duration::from_millis(millis))
}
