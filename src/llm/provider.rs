use crate::utils::error::RulegenError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Persona sent as the system message to chat-style providers.
pub const SYSTEM_PERSONA: &str = "You are an expert software architect and technical writer specializing in creating comprehensive development guidelines and rulesets for AI coding assistants.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// The fixed set of supported backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Ollama,
    HuggingFace,
    Gemini,
}

impl ProviderKind {
    pub const ALL: [Self; 4] = [Self::OpenAi, Self::Ollama, Self::HuggingFace, Self::Gemini];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
            Self::HuggingFace => "huggingface",
            Self::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = RulegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RulegenError::unsupported_provider(s))
    }
}

/// Capability shared by every backend: turn a prompt into generated text.
///
/// Implementations never return empty text as success; an unusable payload
/// is reported as [`RulegenError::EmptyResponse`].
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn send(&self, prompt: &str) -> Result<String, RulegenError>;

    fn kind(&self) -> ProviderKind;

    fn model(&self) -> &str;
}

/// Reject blank generated text.
pub(crate) fn non_empty(provider: ProviderKind, text: String) -> Result<String, RulegenError> {
    if text.trim().is_empty() {
        Err(RulegenError::empty_response(provider.as_str()))
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("Gemini".parse::<ProviderKind>().ok(), Some(ProviderKind::Gemini));
        assert_eq!(
            " huggingface ".parse::<ProviderKind>().ok(),
            Some(ProviderKind::HuggingFace)
        );
        let err = "anthropic".parse::<ProviderKind>().expect_err("unsupported");
        assert!(err.to_string().contains("anthropic"));
    }

    #[test]
    fn test_non_empty_rejects_whitespace() {
        assert!(non_empty(ProviderKind::Ollama, " \n".to_string()).is_err());
        assert_eq!(
            non_empty(ProviderKind::Ollama, "ok".to_string()).ok().as_deref(),
            Some("ok")
        );
    }
}
