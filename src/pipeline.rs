use crate::{
    config::Config,
    error::Result,
    logger,
    models::RenderContext,
    upstream::{build_http_client, ImageClient, ImageRequester, PromptExpander, TextClient},
};
use std::sync::Arc;
use uuid::Uuid;

/// How a single submission ended. Exactly one variant per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input; nothing was sent upstream.
    Empty,
    ExpansionFailed { input: String, error: String },
    ImageFailed { input: String, error: String },
    /// `image_url` is `None` when the reply carried no link.
    Completed {
        input: String,
        prompt: String,
        image_url: Option<String>,
    },
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Outcome::ExpansionFailed { .. } | Outcome::ImageFailed { .. }
        )
    }
}

impl From<Outcome> for RenderContext {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Empty => RenderContext::empty(),
            Outcome::ExpansionFailed { input, error } => {
                RenderContext::with_error(input, format!("Prompt generation failed: {}", error))
            }
            Outcome::ImageFailed { input, error } => {
                RenderContext::with_error(input, format!("Image generation failed: {}", error))
            }
            Outcome::Completed {
                input, image_url, ..
            } => RenderContext::with_image(input, image_url),
        }
    }
}

/// Prompt expansion followed by image generation, built once and shared by every request.
#[derive(Clone)]
pub struct Pipeline {
    expander: Arc<dyn PromptExpander>,
    images: Arc<dyn ImageRequester>,
}

impl Pipeline {
    pub fn new(expander: Arc<dyn PromptExpander>, images: Arc<dyn ImageRequester>) -> Self {
        Self { expander, images }
    }

    /// Wires the Gemini and sora-image clients over one shared HTTP pool.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let http = build_http_client(config)?;

        Ok(Self::new(
            Arc::new(TextClient::from_config(http.clone(), config)),
            Arc::new(ImageClient::from_config(http, config)),
        ))
    }

    pub async fn run(&self, input: &str) -> Outcome {
        if input.trim().is_empty() {
            log::info!("Empty prompt submitted, nothing to do");
            return Outcome::Empty;
        }

        let request_id = Uuid::new_v4().simple().to_string();
        let request_id = &request_id[..8];
        log::info!("[req:{}] New prompt ({} chars)", request_id, input.chars().count());

        let prompt = {
            let _timer = logger::timer(&format!("req:{} prompt expansion", request_id));
            match self.expander.expand(input).await {
                Ok(prompt) => prompt,
                Err(e) => {
                    log::error!("[req:{}] Prompt expansion failed: {}", request_id, e);
                    return Outcome::ExpansionFailed {
                        input: input.to_string(),
                        error: e.to_string(),
                    };
                }
            }
        };
        log::debug!("[req:{}] Expanded prompt: {}", request_id, prompt);

        let urls = {
            let _timer = logger::timer(&format!("req:{} image generation", request_id));
            match self.images.request_images(&prompt).await {
                Ok(urls) => urls,
                Err(e) => {
                    log::error!("[req:{}] Image generation failed: {}", request_id, e);
                    return Outcome::ImageFailed {
                        input: input.to_string(),
                        error: e.to_string(),
                    };
                }
            }
        };

        let image_url = urls.into_iter().next();
        match &image_url {
            Some(url) => log::info!("[req:{}] Image ready: {}", request_id, url),
            None => log::warn!("[req:{}] Image service replied without a link", request_id),
        }

        Outcome::Completed {
            input: input.to_string(),
            prompt,
            image_url,
        }
    }
}
