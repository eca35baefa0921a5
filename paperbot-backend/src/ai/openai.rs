use crate::ai::{CompletionBackend, Message};
use crate::error::CompletionError;
use async_trait::async_trait;
use reqwest::{Client, header};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Client for any OpenAI-compatible chat-completions endpoint.
#[derive(Clone, Debug)]
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ApiMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl OpenAiClient {
    /// Build a client. Fails when no API key is provided and no endpoint
    /// override points at a backend that does not require one.
    pub fn new(
        api_key: &str,
        endpoint: Option<&str>,
        model: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, CompletionError> {
        if api_key.is_empty() && endpoint.is_none() {
            return Err(CompletionError::Configuration(
                "no API key and no endpoint override provided".to_string(),
            ));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if !api_key.is_empty() {
            let auth_value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| {
                    CompletionError::Configuration(format!("invalid API key format: {}", e))
                })?;
            headers.insert(header::AUTHORIZATION, auth_value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                CompletionError::Configuration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.unwrap_or(DEFAULT_ENDPOINT).to_string(),
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, messages: Vec<Message>) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages
                .into_iter()
                .map(|m| ApiMessage {
                    role: m.role.to_string(),
                    content: m.content,
                })
                .collect(),
            max_tokens: self.max_tokens,
        };

        log::info!(
            "[AI] sending {} messages to {} (model {})",
            request.messages.len(),
            self.endpoint,
            self.model
        );

        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if let Ok(parsed) = serde_json::from_str::<ApiErrorResponse>(&error_text) {
                return Err(CompletionError::Api(parsed.error.message));
            }
            return Err(CompletionError::Api(format!(
                "completion endpoint returned status {}: {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        log::debug!("[AI] raw response:\n{}", body);

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            CompletionError::Api(format!("failed to parse response: {} - body: {}", e, body))
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::Api("completion returned no choices".to_string()))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_and_endpoint_is_a_configuration_error() {
        let err = OpenAiClient::new("", None, None, 30).unwrap_err();
        assert!(matches!(err, CompletionError::Configuration(_)));
    }

    #[test]
    fn endpoint_override_allows_empty_key() {
        let client = OpenAiClient::new("", Some("http://localhost:11434/v1/chat/completions"), None, 30);
        assert!(client.is_ok());
    }

    #[test]
    fn defaults_applied_when_unset() {
        let client = OpenAiClient::new("sk-test", None, None, 30).unwrap();
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client.model, DEFAULT_MODEL);
    }
}
