use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_string_from_number;

use crate::endpoints::{DEFAULT_API_VERSION, DEFAULT_SITE_ROOT};

/// Client configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. cicero.yaml file (if exists)
/// 3. Environment variables with CICERO_ prefix (always wins)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Site root, e.g. `https://cicero.azavea.com/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version path segment.
    #[serde(default = "default_version")]
    pub version: String,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sent as the `User-Agent` header on every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    /// `<base_url>/<version>/`, the prefix every endpoint path is joined to.
    #[must_use]
    pub fn api_root(&self) -> String {
        format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            self.version.trim_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            version: default_version(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Account login. Only needed by callers that authenticate from config.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct CredentialsConfig {
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub username: String,

    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub password: String,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_base_url() -> String {
    DEFAULT_SITE_ROOT.to_string()
}

fn default_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

// serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("cicero-client/{}", env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            credentials: CredentialsConfig::default(),
            logging: LoggingConfig {
                level: default_log_level(),
            },
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. cicero.yaml file (if exists)
    /// 3. Environment variables with CICERO_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("cicero.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("CICERO_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.api.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "api.base_url must start with http:// or https://, got: '{base_url}'"
            )));
        }

        if self.api.version.trim_matches('/').is_empty() {
            return Err(ConfigError::Validation("api.version cannot be empty".into()));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Username and password for authenticating from config.
    ///
    /// # Errors
    /// Returns an error naming the first missing field.
    pub fn require_credentials(&self) -> Result<(&str, &str), ConfigError> {
        if self.credentials.username.is_empty() {
            return Err(ConfigError::Validation(
                "credentials.username is required. Set CICERO_CREDENTIALS__USERNAME environment variable or configure in cicero.yaml.".into(),
            ));
        }

        if self.credentials.password.is_empty() {
            return Err(ConfigError::Validation(
                "credentials.password is required. Set CICERO_CREDENTIALS__PASSWORD environment variable or configure in cicero.yaml.".into(),
            ));
        }

        Ok((&self.credentials.username, &self.credentials.password))
    }
}
