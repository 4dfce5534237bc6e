use crate::{
    config::Config,
    error::{RelayError, Result},
    models::{GenerateContentRequest, GenerateContentResponse, TEXT_MODEL},
    upstream::{status_message, PromptExpander},
};
use async_trait::async_trait;

const EXPANSION_INSTRUCTION: &str = "Write a very detailed prompt for Sora. Reply with the prompt only, \
with no extra words. The goal is to draw the picture as well as possible without inventing anything \
extra; the main task is to preserve the original idea. The user's request follows, answer in English:\n";

/// Fixed instruction followed by the raw user text.
pub fn expansion_prompt(user_input: &str) -> String {
    format!("{}{}", EXPANSION_INSTRUCTION, user_input)
}

#[derive(Clone)]
pub struct TextClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TextClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self::new(http, &config.text_service_url, config.text_service_key())
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            TEXT_MODEL
        )
    }

    /// Sends `prompt` as a single user turn and returns the reply text untouched.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::user_text(prompt);

        log::info!("Invoking model: {}", TEXT_MODEL);
        log::debug!("Text generation prompt: {}", prompt);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Text generation request failed: {:?}", e);
                RelayError::text(format!("request failed: {}", e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::text(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            log::error!("Text generation returned {}: {}", status, body);
            return Err(RelayError::text(status_message(status, &body)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| RelayError::text(format!("unparseable response: {}", e)))?;

        parsed.text().ok_or_else(|| {
            let reason = parsed
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            RelayError::text(format!("response contained no text ({})", reason))
        })
    }
}

#[async_trait]
impl PromptExpander for TextClient {
    async fn expand(&self, user_input: &str) -> Result<String> {
        let text = self.generate(&expansion_prompt(user_input)).await?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Service;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    fn reply(text: &str) -> serde_json::Value {
        json!({
            "candidates": [
                {
                    "content": { "role": "model", "parts": [{ "text": text }] },
                    "finishReason": "STOP"
                }
            ]
        })
    }

    #[test]
    fn test_expansion_prompt_appends_input() {
        let prompt = expansion_prompt("кот в шляпе");
        assert!(prompt.starts_with("Write a very detailed prompt"));
        assert!(prompt.contains("answer in English"));
        assert!(prompt.ends_with("\nкот в шляпе"));
    }

    #[test]
    fn test_endpoint_ignores_trailing_slash() {
        let client = TextClient::new(reqwest::Client::new(), "http://localhost:1/", "k");
        assert_eq!(client.endpoint(), format!("http://localhost:1{}", GENERATE_PATH));
    }

    #[tokio::test]
    async fn test_expand_sends_one_call_and_trims() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "gem-key"))
            .and(body_json(json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": expansion_prompt("a cat in a hat") }] }
                ]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(reply("\n  A tabby cat wearing a top hat.  \n")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TextClient::new(reqwest::Client::new(), mock_server.uri(), "gem-key");
        let prompt = client.expand("a cat in a hat").await.unwrap();

        assert_eq!(prompt, "A tabby cat wearing a top hat.");
    }

    #[tokio::test]
    async fn test_expand_is_repeatable() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("Same prompt")))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = TextClient::new(reqwest::Client::new(), mock_server.uri(), "gem-key");
        let first = client.expand("sunset").await.unwrap();
        let second = client.expand("sunset").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_joins_multiple_parts() {
        let mock_server = MockServer::start().await;
        let body = json!({
            "candidates": [
                { "content": { "parts": [{ "text": "A red " }, { "text": "fox." }] } }
            ]
        });
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let client = TextClient::new(reqwest::Client::new(), mock_server.uri(), "gem-key");
        assert_eq!(client.expand("fox").await.unwrap(), "A red fox.");
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TextClient::new(reqwest::Client::new(), mock_server.uri(), "bad");
        let err = client.expand("fox").await.unwrap_err();

        assert_eq!(err.service(), Some(Service::TextGeneration));
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_upstream_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = TextClient::new(reqwest::Client::new(), mock_server.uri(), "gem-key");
        let err = client.expand("fox").await.unwrap_err();
        assert!(err.to_string().contains("unparseable response"));
    }

    #[tokio::test]
    async fn test_blocked_reply_without_text_is_upstream_error() {
        let mock_server = MockServer::start().await;
        let body = json!({ "candidates": [{ "finishReason": "SAFETY" }] });
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let client = TextClient::new(reqwest::Client::new(), mock_server.uri(), "gem-key");
        let err = client.expand("fox").await.unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_upstream_error() {
        let client = TextClient::new(reqwest::Client::new(), "http://127.0.0.1:9", "gem-key");
        let err = client.expand("fox").await.unwrap_err();
        assert_eq!(err.service(), Some(Service::TextGeneration));
        assert!(err.to_string().contains("request failed"));
    }
}
