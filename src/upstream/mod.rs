pub mod extract;
pub mod image_client;
pub mod text_client;

use crate::{
    config::Config,
    error::{RelayError, Result},
};
use async_trait::async_trait;
use reqwest::StatusCode;

pub use extract::{ParenthesizedUrls, UrlExtractor};
pub use image_client::ImageClient;
pub use text_client::TextClient;

/// Turns raw user text into a detailed English image prompt.
#[async_trait]
pub trait PromptExpander: Send + Sync {
    async fn expand(&self, user_input: &str) -> Result<String>;
}

/// Asks the image service for a picture and returns every URL found in the reply.
#[async_trait]
pub trait ImageRequester: Send + Sync {
    async fn request_images(&self, prompt: &str) -> Result<Vec<String>>;
}

/// One pooled client shared by both upstream services.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.http_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| RelayError::ConfigError(format!("failed to build HTTP client: {}", e)))
}

const MAX_BODY_IN_ERROR: usize = 200;

pub(crate) fn status_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("HTTP {}", status);
    }
    let snippet: String = body.chars().take(MAX_BODY_IN_ERROR).collect();
    if snippet.len() < body.len() {
        format!("HTTP {}: {}...", status, snippet)
    } else {
        format!("HTTP {}: {}", status, snippet)
    }
}
