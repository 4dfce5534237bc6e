use crate::{
    config::Config,
    error::{RelayError, Result},
    models::{ChatCompletionRequest, ChatCompletionResponse, IMAGE_MODEL},
    upstream::{status_message, ImageRequester, ParenthesizedUrls, UrlExtractor},
};
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    extractor: Arc<dyn UrlExtractor>,
}

impl ImageClient {
    pub fn new(http: reqwest::Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            api_key: api_key.into(),
            extractor: Arc::new(ParenthesizedUrls),
        }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self::new(http, &config.image_service_url, config.image_service_key())
    }

    /// Replaces the rule used to find URLs in the reply text.
    pub fn with_extractor(mut self, extractor: Arc<dyn UrlExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// One non-streaming chat completion for `prompt`.
    pub async fn generate(&self, prompt: &str) -> Result<ChatCompletionResponse> {
        let request = ChatCompletionRequest::for_prompt(prompt);

        log::info!("Generating image with model: {}", IMAGE_MODEL);

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Image generation request failed: {:?}", e);
                RelayError::image(format!("request failed: {}", e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::image(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            log::error!("Image generation returned {}: {}", status, body);
            return Err(RelayError::image(status_message(status, &body)));
        }

        serde_json::from_str(&body)
            .map_err(|e| RelayError::image(format!("unparseable response: {}", e)))
    }
}

#[async_trait]
impl ImageRequester for ImageClient {
    async fn request_images(&self, prompt: &str) -> Result<Vec<String>> {
        let response = self.generate(prompt).await?;

        let urls = match response.first_choice() {
            Some(choice) => self.extractor.extract(&choice.message.content),
            None => {
                log::warn!("Image generation reply had no choices");
                Vec::new()
            }
        };

        log::debug!("Extracted {} image URL(s)", urls.len());
        Ok(urls)
    }
}
