//! Application configuration.
//!
//! Use the builder methods to customize, or [`AppConfig::from_env`] to apply
//! `STOREDASH_*` overrides on top of the defaults.
//!
//! # Example
//!
//! ```ignore
//! use storedash::config::{AppConfig, Locale};
//!
//! let config = AppConfig::default()
//!     .with_api_base_url("https://shop.example.com")
//!     .with_locale(Locale::Es);
//! ```

use std::time::Duration;

use crate::error::ConfigError;

pub const API_URL_ENV: &str = "STOREDASH_API_URL";
pub const API_TOKEN_ENV: &str = "STOREDASH_API_TOKEN";
pub const LOCALE_ENV: &str = "STOREDASH_LOCALE";
pub const TIMEOUT_ENV: &str = "STOREDASH_TIMEOUT_SECS";

/// Locale of the fixed user-facing messages (denial view, not-found text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
    Pt,
}

impl Locale {
    /// Parse a locale tag such as `es`, `pt-BR`, or `en_US`.
    pub fn parse(tag: &str) -> Option<Self> {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Locale::En),
            "es" => Some(Locale::Es),
            "pt" => Some(Locale::Pt),
            _ => None,
        }
    }

    /// Message shown by the denial view.
    pub fn denial_message(&self) -> &'static str {
        match self {
            Locale::En => "You are not authorized to view this page.",
            Locale::Es => "No tienes autorización para ver esta página.",
            Locale::Pt => "Você não tem autorização para ver esta página.",
        }
    }

    /// Message shown when a route does not exist.
    pub fn not_found_message(&self) -> &'static str {
        match self {
            Locale::En => "Page not found.",
            Locale::Es => "Página no encontrada.",
            Locale::Pt => "Página não encontrada.",
        }
    }
}

/// Configuration shared by the binary and library consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the backend API (default: http://localhost:3000)
    pub api_base_url: String,
    /// Bearer token attached to backend requests
    pub api_token: Option<String>,
    /// Per-request timeout of the HTTP transport (default: 30s)
    pub request_timeout: Duration,
    /// Locale of the denial and not-found messages
    pub locale: Locale,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(30),
            locale: Locale::default(),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Defaults overridden by `STOREDASH_API_URL`, `STOREDASH_API_TOKEN`,
    /// `STOREDASH_LOCALE` and `STOREDASH_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV) {
            let url = url.trim().to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidApiUrl(url));
            }
            config.api_base_url = url;
        }

        if let Some(token) = lookup(API_TOKEN_ENV).filter(|t| !t.is_empty()) {
            config.api_token = Some(token);
        }

        if let Some(tag) = lookup(LOCALE_ENV) {
            config.locale = Locale::parse(&tag).ok_or(ConfigError::UnsupportedLocale(tag))?;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(raw.clone()))?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
