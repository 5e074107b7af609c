//! Provider configuration.
//!
//! Built once at process start (see [`crate::cli::config`]) and handed to
//! [`crate::llm::router::ProviderRouter`] by reference. Nothing in the
//! generation path reads the environment directly.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Selected provider identifier: openai, ollama, huggingface or gemini.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Upper bound for a single provider call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub openai: OpenAIConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            timeout_secs: default_timeout_secs(),
            openai: OpenAIConfig::default(),
            ollama: OllamaConfig::default(),
            huggingface: HuggingFaceConfig::default(),
            gemini: GeminiConfig::default(),
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Model name for the selected provider, if the selector is recognised.
    pub fn selected_model(&self) -> Option<&str> {
        match self.provider.parse().ok()? {
            super::ProviderKind::OpenAi => Some(&self.openai.model),
            super::ProviderKind::Ollama => Some(&self.ollama.model),
            super::ProviderKind::HuggingFace => Some(&self.huggingface.model),
            super::ProviderKind::Gemini => Some(&self.gemini.model),
        }
    }

    pub fn selected_model_mut(&mut self) -> Option<&mut String> {
        match self.provider.parse().ok()? {
            super::ProviderKind::OpenAi => Some(&mut self.openai.model),
            super::ProviderKind::Ollama => Some(&mut self.ollama.model),
            super::ProviderKind::HuggingFace => Some(&mut self.huggingface.model),
            super::ProviderKind::Gemini => Some(&mut self.gemini.model),
        }
    }
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Hosted chat-completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default = "default_openai_max_tokens")]
    pub max_tokens: usize,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_openai_model(),
            base_url: default_openai_base_url(),
            max_tokens: default_openai_max_tokens(),
        }
    }
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_max_tokens() -> usize {
    2000
}

/// Local self-hosted inference server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_base_url")]
    pub base_url: String,
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_base_url(),
            model: default_ollama_model(),
        }
    }
}

fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2".to_string()
}

/// Hosted inference endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_huggingface_model")]
    pub model: String,
    #[serde(default = "default_huggingface_base_url")]
    pub base_url: String,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_huggingface_model(),
            base_url: default_huggingface_base_url(),
        }
    }
}

fn default_huggingface_model() -> String {
    "microsoft/DialoGPT-large".to_string()
}

fn default_huggingface_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

/// Hosted generative-content service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
