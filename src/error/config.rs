//! Configuration errors.

use thiserror::Error;

/// Invalid configuration value, usually from an environment override.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The API base URL is empty or lacks an http(s) scheme.
    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),

    /// The request timeout is not a positive integer number of seconds.
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    /// The locale is not one of the supported denial-message locales.
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// A role name could not be parsed.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// The HTTP transport could not be built from the settings.
    #[error("Could not build HTTP client: {0}")]
    HttpClient(String),
}

impl ConfigError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidApiUrl(_) => "E_CFG_API_URL",
            ConfigError::InvalidTimeout(_) => "E_CFG_TIMEOUT",
            ConfigError::UnsupportedLocale(_) => "E_CFG_LOCALE",
            ConfigError::UnknownRole(_) => "E_CFG_ROLE",
            ConfigError::HttpClient(_) => "E_CFG_HTTP",
        }
    }
}
