use crate::llm::config::HuggingFaceConfig;
use crate::llm::provider::{LLMProvider, ProviderKind, non_empty};
use crate::utils::error::{RejectionReason, RulegenError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

const PROVIDER: &str = "huggingface";
const MAX_NEW_TOKENS: u32 = 1500;
const TEMPERATURE: f32 = 0.7;

const INSTRUCTION: &str = "System: You are an expert software architect. Create a comprehensive development ruleset in markdown format.";

/// Hosted inference-endpoint client.
///
/// Posts one combined text as `inputs` to `{base_url}/models/{model}`.
pub struct HuggingFaceProvider {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

impl HuggingFaceProvider {
    pub fn new(config: &HuggingFaceConfig, client: Client) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn combined_input(prompt: &str) -> String {
        format!("{INSTRUCTION}\n\nUser: {prompt}")
    }

    /// Pull text out of an inference response.
    ///
    /// A non-empty list yields its first element's `generated_text`, a bare
    /// string is taken as-is and `null` yields nothing. Any other JSON value
    /// is stringified.
    fn extract_text(value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(text) => text,
            Value::Array(items) => items
                .into_iter()
                .next()
                .and_then(|first| {
                    first
                        .get("generated_text")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_default(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
impl LLMProvider for HuggingFaceProvider {
    async fn send(&self, prompt: &str) -> Result<String, RulegenError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| RulegenError::missing_api_key(PROVIDER, "HUGGINGFACE_API_KEY"))?;

        let inputs = Self::combined_input(prompt);
        let request_body = InferenceRequest {
            inputs: &inputs,
            parameters: GenerationParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| RulegenError::from_reqwest(PROVIDER, e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => RulegenError::rejected(
                    PROVIDER,
                    RejectionReason::InvalidCredential,
                    error_text,
                ),
                429 => RulegenError::rejected(PROVIDER, RejectionReason::QuotaExceeded, error_text),
                code => RulegenError::http_status(PROVIDER, code, &error_text),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| RulegenError::from_reqwest(PROVIDER, e))?;

        non_empty(ProviderKind::HuggingFace, Self::extract_text(body))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::HuggingFace
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_from_list() {
        let value = json!([{"generated_text": "# Rules"}, {"generated_text": "ignored"}]);
        assert_eq!(HuggingFaceProvider::extract_text(value), "# Rules");
    }

    #[test]
    fn test_extract_from_empty_list() {
        assert_eq!(HuggingFaceProvider::extract_text(json!([])), "");
    }

    #[test]
    fn test_extract_stringifies_other_values() {
        let value = json!({"summary_text": "hi"});
        assert_eq!(
            HuggingFaceProvider::extract_text(value),
            r#"{"summary_text":"hi"}"#
        );
    }

    #[test]
    fn test_extract_null_and_bare_string() {
        assert_eq!(HuggingFaceProvider::extract_text(Value::Null), "");
        assert_eq!(HuggingFaceProvider::extract_text(json!("hello")), "hello");
    }

    #[test]
    fn test_combined_input_layout() {
        let input = HuggingFaceProvider::combined_input("Build it");
        assert!(input.starts_with("System: "));
        assert!(input.ends_with("\n\nUser: Build it"));
    }

    #[test]
    fn test_parameters_suppress_prompt_echo() {
        let request = InferenceRequest {
            inputs: "x",
            parameters: GenerationParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
                return_full_text: false,
            },
        };
        let json = serde_json::to_value(&request).expect("serializes");
        assert_eq!(json["parameters"]["return_full_text"], false);
        assert_eq!(json["parameters"]["max_new_tokens"], 1500);
    }
}
