use serde::{Deserialize, Serialize};

pub const IMAGE_MODEL: &str = "sora-image";
pub const SYSTEM_PRIMER: &str = "You are a helpful assistant.";

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub stream: bool,
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    /// Fixed two-message conversation: the system primer, then the prompt.
    pub fn for_prompt(prompt: impl Into<String>) -> Self {
        Self {
            model: IMAGE_MODEL.to_string(),
            stream: false,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PRIMER.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.into(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    // Absent and `null` both mean no choices.
    #[serde(default)]
    pub choices: Option<Vec<ChatChoice>>,
}

impl ChatCompletionResponse {
    pub fn first_choice(&self) -> Option<&ChatChoice> {
        self.choices.as_ref().and_then(|choices| choices.first())
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}
