//! OpenAI chat-completions client used by the recipe generation service.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const OPENAI_API_URL: &str = "https://api.openai.com/v1";
const MODEL: &str = "gpt-3.5-turbo";
// Deterministic-leaning output; structure matters more than variety here.
const TEMPERATURE: f32 = 0.2;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("response parsing failed: {0}")]
    ResponseParseFailed(String),
    #[error("rate limited - too many requests")]
    RateLimited,
    #[error("unauthorized - invalid API key")]
    Unauthorized,
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("completion contained no choices")]
    EmptyCompletion,
}

/// Seam between the generation service and the external provider, so tests
/// can script responses without a network.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url: OPENAI_API_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (test servers).
    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[async_trait]
impl CompletionApi for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a recipe generator that replies with structured JSON only.",
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let body = response
                    .json::<ChatResponse>()
                    .await
                    .map_err(|e| CompletionError::ResponseParseFailed(e.to_string()))?;
                body.choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content)
                    .ok_or(CompletionError::EmptyCompletion)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(CompletionError::RateLimited),
            StatusCode::UNAUTHORIZED => Err(CompletionError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(CompletionError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new("test-key".into()).with_api_url(server.uri())
    }

    #[tokio::test]
    async fn extracts_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "{\"ok\":true}" } }]
            })))
            .mount(&server)
            .await;

        let content = client_for(&server).complete("prompt").await.unwrap();
        assert_eq!(content, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn maps_provider_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("prompt").await.unwrap_err();
        assert!(matches!(err, CompletionError::RateLimited));
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("prompt").await.unwrap_err();
        assert!(matches!(err, CompletionError::EmptyCompletion));
    }
}
