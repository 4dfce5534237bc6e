use serde::Serialize;

/// Everything the page needs to render one response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    pub prompt_text: String,
    pub error: Option<String>,
    pub image_url: Option<String>,
}

impl RenderContext {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_error(prompt_text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            prompt_text: prompt_text.into(),
            error: Some(error.into()),
            image_url: None,
        }
    }

    pub fn with_image(prompt_text: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            prompt_text: prompt_text.into(),
            error: None,
            image_url,
        }
    }
}
