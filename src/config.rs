use crate::error::{RelayError, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_TEXT_SERVICE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_IMAGE_SERVICE_URL: &str = "https://api.laozhang.ai/v1/chat/completions";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub text_service_key: Option<String>,
    pub text_service_url: String,
    pub image_service_key: Option<String>,
    pub image_service_url: String,
    pub host: String,
    pub port: u16,
    pub http_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            text_service_key: None,
            text_service_url: DEFAULT_TEXT_SERVICE_URL.to_string(),
            image_service_key: None,
            image_service_url: DEFAULT_IMAGE_SERVICE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            http_timeout: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the process environment and validates the result.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match non_blank("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| RelayError::ConfigError(format!("PORT is not a valid port: {}", raw)))?,
            None => defaults.port,
        };

        let http_timeout = match non_blank("HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|_| {
                RelayError::ConfigError(format!("HTTP_TIMEOUT_SECS is not a number: {}", raw))
            })?)),
            None => None,
        };

        let config = Config {
            text_service_key: non_blank("GEMINI_API_KEY"),
            text_service_url: non_blank("GEMINI_API_URL").unwrap_or(defaults.text_service_url),
            image_service_key: non_blank("SORA_API_KEY"),
            image_service_url: non_blank("SORA_API_URL").unwrap_or(defaults.image_service_url),
            host: non_blank("HOST").unwrap_or(defaults.host),
            port,
            http_timeout,
        };

        config.validate()?;
        Ok(config)
    }

    /// Both credentials must be present; there is no fallback value.
    pub fn validate(&self) -> Result<()> {
        let missing = |key: &Option<String>| key.as_deref().map_or(true, |k| k.trim().is_empty());

        if missing(&self.text_service_key) {
            return Err(RelayError::ConfigError("GEMINI_API_KEY is not set".into()));
        }
        if missing(&self.image_service_key) {
            return Err(RelayError::ConfigError("SORA_API_KEY is not set".into()));
        }
        if self.text_service_url.trim().is_empty() {
            return Err(RelayError::ConfigError("GEMINI_API_URL is empty".into()));
        }
        if self.image_service_url.trim().is_empty() {
            return Err(RelayError::ConfigError("SORA_API_URL is empty".into()));
        }
        Ok(())
    }

    pub fn with_text_service(
        mut self,
        key: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.text_service_key = Some(key.into());
        self.text_service_url = url.into();
        self
    }

    pub fn with_image_service(
        mut self,
        key: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.image_service_key = Some(key.into());
        self.image_service_url = url.into();
        self
    }

    pub fn with_bind(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    pub fn text_service_key(&self) -> &str {
        self.text_service_key.as_deref().unwrap_or_default()
    }

    pub fn image_service_key(&self) -> &str {
        self.image_service_key.as_deref().unwrap_or_default()
    }
}

/// Keeps the first four characters of a secret for log output.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
