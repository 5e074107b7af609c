// Copyright (c) 2025-2026 the rulegen contributors
// SPDX-License-Identifier: Apache-2.0

pub mod gemini;
pub mod huggingface;
pub mod ollama;
pub mod openai;

use crate::llm::config::ProviderConfig;
use crate::llm::provider::{LLMProvider, ProviderKind};
use crate::utils::error::RulegenError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub use gemini::GeminiProvider;
pub use huggingface::HuggingFaceProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;

/// Build the shared HTTP client with the per-call timeout applied.
pub fn http_client(timeout: Duration) -> Result<Client, RulegenError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("rulegen/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| RulegenError::Config(format!("Failed to create HTTP client: {e}")))
}

/// One of the four concrete backends, selected once from configuration.
pub enum ProviderClient {
    OpenAi(OpenAIProvider),
    Ollama(OllamaProvider),
    HuggingFace(HuggingFaceProvider),
    Gemini(GeminiProvider),
}

impl ProviderClient {
    pub fn for_kind(kind: ProviderKind, config: &ProviderConfig, client: Client) -> Self {
        match kind {
            ProviderKind::OpenAi => Self::OpenAi(OpenAIProvider::new(&config.openai, client)),
            ProviderKind::Ollama => Self::Ollama(OllamaProvider::new(&config.ollama, client)),
            ProviderKind::HuggingFace => {
                Self::HuggingFace(HuggingFaceProvider::new(&config.huggingface, client))
            }
            ProviderKind::Gemini => Self::Gemini(GeminiProvider::new(&config.gemini, client)),
        }
    }
}

#[async_trait]
impl LLMProvider for ProviderClient {
    async fn send(&self, prompt: &str) -> Result<String, RulegenError> {
        match self {
            Self::OpenAi(p) => p.send(prompt).await,
            Self::Ollama(p) => p.send(prompt).await,
            Self::HuggingFace(p) => p.send(prompt).await,
            Self::Gemini(p) => p.send(prompt).await,
        }
    }

    fn kind(&self) -> ProviderKind {
        match self {
            Self::OpenAi(_) => ProviderKind::OpenAi,
            Self::Ollama(_) => ProviderKind::Ollama,
            Self::HuggingFace(_) => ProviderKind::HuggingFace,
            Self::Gemini(_) => ProviderKind::Gemini,
        }
    }

    fn model(&self) -> &str {
        match self {
            Self::OpenAi(p) => p.model(),
            Self::Ollama(p) => p.model(),
            Self::HuggingFace(p) => p.model(),
            Self::Gemini(p) => p.model(),
        }
    }
}
