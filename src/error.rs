use std::fmt;
use thiserror::Error;

/// Which outbound API a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    TextGeneration,
    ImageGeneration,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::TextGeneration => write!(f, "text generation service"),
            Service::ImageGeneration => write!(f, "image generation service"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("{service} error: {message}")]
    Upstream { service: Service, message: String },
}

impl RelayError {
    pub fn upstream(service: Service, message: impl Into<String>) -> Self {
        RelayError::Upstream {
            service,
            message: message.into(),
        }
    }

    pub fn text(message: impl Into<String>) -> Self {
        Self::upstream(Service::TextGeneration, message)
    }

    pub fn image(message: impl Into<String>) -> Self {
        Self::upstream(Service::ImageGeneration, message)
    }

    pub fn service(&self) -> Option<Service> {
        match self {
            RelayError::Upstream { service, .. } => Some(*service),
            RelayError::ConfigError(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
