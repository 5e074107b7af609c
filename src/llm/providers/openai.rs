use crate::llm::config::OpenAIConfig;
use crate::llm::provider::{LLMProvider, Message, ProviderKind, SYSTEM_PERSONA, non_empty};
use crate::utils::error::{RejectionReason, RulegenError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "openai";
const TEMPERATURE: f32 = 0.7;

/// Hosted chat-completion client.
///
/// Sends a two-message conversation (persona + prompt) to
/// `{base_url}/chat/completions` and returns the first choice's text.
pub struct OpenAIProvider {
    api_key: Option<String>,
    model: String,
    base_url: String,
    max_tokens: usize,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_tokens: usize,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
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
struct OpenAIError {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<String>,
    message: Option<String>,
}

impl OpenAIProvider {
    pub fn new(config: &OpenAIConfig, client: Client) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_tokens: config.max_tokens,
            client,
        }
    }

    /// Map an error response onto the taxonomy using its status and error code.
    fn classify_error(status: StatusCode, body: &str) -> RulegenError {
        let detail = serde_json::from_str::<OpenAIError>(body)
            .ok()
            .and_then(|e| e.error);
        let code = detail
            .as_ref()
            .and_then(|d| d.code.as_deref().or(d.error_type.as_deref()))
            .unwrap_or_default();
        let message = detail
            .as_ref()
            .and_then(|d| d.message.clone())
            .unwrap_or_else(|| body.to_string());

        let reason = match (status.as_u16(), code) {
            (401, _) | (_, "invalid_api_key") => {
                Some(RejectionReason::InvalidCredential)
            }
            (429, _) | (_, "insufficient_quota") => {
                Some(RejectionReason::QuotaExceeded)
            }
            (_, "content_filter" | "content_policy_violation") => {
                Some(RejectionReason::SafetyBlocked)
            }
            _ => None,
        };

        match reason {
            Some(reason) => RulegenError::rejected(PROVIDER, reason, message),
            None => RulegenError::http_status(PROVIDER, status.as_u16(), body),
        }
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn send(&self, prompt: &str) -> Result<String, RulegenError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| RulegenError::missing_api_key(PROVIDER, "OPENAI_API_KEY"))?;

        let messages = [Message::system(SYSTEM_PERSONA), Message::user(prompt)];
        let request_body = ChatRequest {
            model: &self.model,
            messages: &messages,
            max_tokens: self.max_tokens,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| RulegenError::from_reqwest(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::classify_error(status, &error_text));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| RulegenError::from_reqwest(PROVIDER, e))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        non_empty(ProviderKind::OpenAi, content)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    #[test]
    fn test_request_serialization() {
        let messages = [Message::system("persona"), Message::user("Hello")];
        let request = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: &messages,
            max_tokens: 2000,
            temperature: 0.7,
        };
        let json = serde_json::to_value(&request).expect("serialization should succeed");
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 2000);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Hello");
    }

    #[test]
    fn test_classify_quota_code() {
        let body = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"insufficient_quota"}}"#;
        let err = OpenAIProvider::classify_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert_eq!(err.status_code(), 429);
    }

    #[test]
    fn test_classify_invalid_key() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        let err = OpenAIProvider::classify_error(StatusCode::UNAUTHORIZED, body);
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_classify_server_error_is_transport() {
        let err = OpenAIProvider::classify_error(StatusCode::INTERNAL_SERVER_ERROR, "oops");
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("oops"));
    }
}
