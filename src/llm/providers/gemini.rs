//! Hosted generative-content client (Gemini `generateContent` REST API).
//!
//! Upstream refusals are classified from the structured error body first
//! (`error.status`, `error.details[].reason`, `promptFeedback.blockReason`,
//! `finishReason`). Substring matching on the raw message is only a
//! best-effort fallback for bodies that carry no structured fields.

use crate::llm::config::GeminiConfig;
use crate::llm::health::ProviderStatus;
use crate::llm::provider::{LLMProvider, ProviderKind, non_empty};
use crate::utils::error::{RejectionReason, RulegenError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROVIDER: &str = "gemini";
const API_KEY_HEADER: &str = "x-goog-api-key";
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const SYSTEM_INSTRUCTION: &str = "You are an expert software architect and technical writer who specializes in writing comprehensive development guides for AI coding assistants.

Your task:
- Write detailed, actionable and clear guidelines
- Produce professional content with Turkish and English sections
- Apply modern best practices
- Give instructions that AI assistants can follow unambiguously
- Include code examples and practical applications

Produce the guide in markdown, structured with clear headings and bullet points.";

pub struct GeminiProvider {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
            max_output_tokens: 4000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
    status: Option<String>,
    #[serde(default)]
    details: Vec<ErrorInfo>,
}

#[derive(Debug, Deserialize)]
struct ErrorInfo {
    reason: Option<String>,
}

/// Best-effort classification of an unstructured upstream message.
pub(crate) fn classify_message(message: &str) -> Option<RejectionReason> {
    if message.contains("API_KEY_INVALID") {
        Some(RejectionReason::InvalidCredential)
    } else if message.contains("QUOTA_EXCEEDED") || message.contains("RESOURCE_EXHAUSTED") {
        Some(RejectionReason::QuotaExceeded)
    } else if message.contains("SAFETY") {
        Some(RejectionReason::SafetyBlocked)
    } else {
        None
    }
}

/// Classify an error response from status code and body.
pub(crate) fn classify_error(status: u16, body: &str) -> RulegenError {
    let structured = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);

    let reason = structured.as_ref().and_then(|detail| {
        let reasons: Vec<&str> = detail
            .details
            .iter()
            .filter_map(|d| d.reason.as_deref())
            .collect();
        if reasons.contains(&"API_KEY_INVALID")
            || matches!(
                detail.status.as_deref(),
                Some("UNAUTHENTICATED" | "PERMISSION_DENIED")
            )
        {
            Some(RejectionReason::InvalidCredential)
        } else if detail.status.as_deref() == Some("RESOURCE_EXHAUSTED") {
            Some(RejectionReason::QuotaExceeded)
        } else {
            None
        }
    });

    let reason = reason
        .or(match status {
            401 | 403 => Some(RejectionReason::InvalidCredential),
            429 => Some(RejectionReason::QuotaExceeded),
            _ => None,
        })
        .or_else(|| classify_message(body));

    match reason {
        Some(reason) => {
            let message = structured
                .and_then(|d| d.message)
                .unwrap_or_else(|| body.to_string());
            RulegenError::rejected(PROVIDER, reason, message)
        }
        None => RulegenError::http_status(PROVIDER, status, body),
    }
}

impl GeminiProvider {
    pub fn new(config: &GeminiConfig, client: Client) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn api_key(&self) -> Result<&str, RulegenError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| RulegenError::missing_api_key(PROVIDER, "GEMINI_API_KEY"))
    }

    fn full_prompt(prompt: &str) -> String {
        format!("{SYSTEM_INSTRUCTION}\n\n{prompt}")
    }

    /// Turn a successful response body into text or a typed refusal.
    fn extract_text(body: GenerateResponse) -> Result<String, RulegenError> {
        if let Some(block) = body.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(RulegenError::rejected(
                PROVIDER,
                RejectionReason::SafetyBlocked,
                format!("Prompt blocked: {block}"),
            ));
        }

        let Some(candidate) = body.candidates.into_iter().next() else {
            return Err(RulegenError::empty_response(PROVIDER));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() && candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(RulegenError::rejected(
                PROVIDER,
                RejectionReason::SafetyBlocked,
                "Response blocked by the content safety filter",
            ));
        }

        non_empty(ProviderKind::Gemini, text)
    }

    /// Probe credentials with a model lookup, without generating content.
    pub async fn check(&self) -> ProviderStatus {
        let Ok(api_key) = self.api_key() else {
            return ProviderStatus::NotConfigured;
        };

        let response = self
            .client
            .get(format!("{}/models/{}", self.base_url, self.model))
            .header(API_KEY_HEADER, api_key)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => ProviderStatus::Connected,
            Ok(r) => {
                let status = r.status().as_u16();
                let body = r.text().await.unwrap_or_default();
                match classify_error(status, &body) {
                    RulegenError::Rejected {
                        reason: RejectionReason::InvalidCredential,
                        ..
                    } => ProviderStatus::InvalidApiKey,
                    _ => ProviderStatus::ApiError,
                }
            }
            Err(_) => ProviderStatus::ConnectionError,
        }
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn send(&self, prompt: &str) -> Result<String, RulegenError> {
        let api_key = self.api_key()?;

        let full_prompt = Self::full_prompt(prompt);
        let request_body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [TextPart { text: &full_prompt }],
            }],
            generation_config: GenerationConfig::default(),
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header(API_KEY_HEADER, api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| RulegenError::from_reqwest(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_error(status.as_u16(), &error_text));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RulegenError::from_reqwest(PROVIDER, e))?;

        Self::extract_text(body)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    fn parse(json: &str) -> GenerateResponse {
        serde_json::from_str(json).expect("response should parse")
    }

    #[test]
    fn test_request_uses_camel_case_generation_config() {
        let request = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [TextPart { text: "hi" }],
            }],
            generation_config: GenerationConfig::default(),
        };
        let json = serde_json::to_value(&request).expect("serializes");
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 4000);
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_full_prompt_prefixes_instruction() {
        let full = GeminiProvider::full_prompt("PROMPT");
        assert!(full.starts_with(SYSTEM_INSTRUCTION));
        assert!(full.ends_with("\n\nPROMPT"));
    }

    #[test]
    fn test_extract_joins_parts() {
        let body = parse(r##"{"candidates":[{"content":{"parts":[{"text":"# A"},{"text":"\nB"}]},"finishReason":"STOP"}]}"##);
        assert_eq!(GeminiProvider::extract_text(body).ok().as_deref(), Some("# A\nB"));
    }

    #[test]
    fn test_extract_without_candidates_is_empty_response() {
        let err = GeminiProvider::extract_text(parse("{}")).expect_err("no text");
        assert_eq!(err.kind(), ErrorKind::EmptyResponse);
    }

    #[test]
    fn test_extract_blocked_prompt_is_safety_rejection() {
        let body = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        let err = GeminiProvider::extract_text(body).expect_err("blocked");
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_extract_safety_finish_is_rejection() {
        let body = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        let err = GeminiProvider::extract_text(body).expect_err("blocked");
        assert_eq!(err.kind(), ErrorKind::UpstreamRejection);
    }

    #[test]
    fn test_classify_structured_invalid_key() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT","details":[{"@type":"type.googleapis.com/google.rpc.ErrorInfo","reason":"API_KEY_INVALID"}]}}"#;
        let err = classify_error(400, body);
        assert_eq!(err.status_code(), 401);
        assert!(err.to_string().contains("API key not valid"));
    }

    #[test]
    fn test_classify_permission_denied() {
        let body = r#"{"error":{"code":403,"message":"Your API key was reported as leaked.","status":"PERMISSION_DENIED"}}"#;
        let err = classify_error(403, body);
        assert_eq!(err.kind(), ErrorKind::UpstreamRejection);
        assert_eq!(err.status_code(), 401);
        assert_eq!(classify_error(403, "Forbidden").status_code(), 401);
    }

    #[test]
    fn test_classify_resource_exhausted() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(classify_error(429, body).status_code(), 429);
    }

    #[test]
    fn test_classify_falls_back_to_substrings() {
        assert_eq!(classify_error(500, "QUOTA_EXCEEDED for project").status_code(), 429);
        assert_eq!(classify_error(500, "blocked: SAFETY").status_code(), 400);
        assert_eq!(classify_error(500, "upstream exploded").kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_classify_message() {
        assert_eq!(
            classify_message("code=API_KEY_INVALID"),
            Some(RejectionReason::InvalidCredential)
        );
        assert_eq!(classify_message("fine"), None);
    }
}
