use crate::llm::config::ProviderConfig;
use crate::llm::health::{HealthReport, check_health};
use crate::llm::provider::{LLMProvider, ProviderKind};
use crate::llm::providers::{ProviderClient, http_client};
use crate::utils::error::RulegenError;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Fixed prompt used by [`ProviderRouter::smoke_test`].
pub const SMOKE_TEST_PROMPT: &str = "Create a simple Hello World example for Python FastAPI.";

const PREVIEW_CHARS: usize = 200;

/// Outcome of a successful round trip with a fixed prompt.
#[derive(Debug, Clone, Serialize)]
pub struct SmokeTestReport {
    pub status: &'static str,
    pub provider: String,
    pub model_used: String,
    pub test_prompt: &'static str,
    pub response_preview: String,
    pub full_response_length: usize,
}

/// First 200 characters, with `...` appended when the text was cut.
fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Single entry point from prompt to generated text.
///
/// Holds the process configuration by reference and one shared HTTP
/// client. Each call makes exactly one attempt against exactly one provider;
/// nothing is retried.
pub struct ProviderRouter<'a> {
    config: &'a ProviderConfig,
    http: Client,
}

impl<'a> ProviderRouter<'a> {
    pub fn new(config: &'a ProviderConfig) -> Result<Self, RulegenError> {
        Ok(Self {
            config,
            http: http_client(config.timeout())?,
        })
    }

    pub fn config(&self) -> &ProviderConfig {
        self.config
    }

    /// Resolve the configured provider selector into a client.
    ///
    /// An unrecognised selector is a configuration error and no request is made.
    pub fn select(&self) -> Result<ProviderClient, RulegenError> {
        let kind: ProviderKind = self.config.provider.parse()?;
        Ok(ProviderClient::for_kind(kind, self.config, self.http.clone()))
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, RulegenError> {
        let client = self.select()?;
        let kind = client.kind();

        info!(provider = %kind, model = client.model(), "Dispatching prompt");
        debug!(prompt_chars = prompt.len(), "Prompt size");

        match client.send(prompt).await {
            Ok(text) => {
                debug!(provider = %kind, response_chars = text.len(), "Provider responded");
                Ok(text)
            }
            Err(err) => {
                let err = into_provider_error(kind, err);
                warn!(
                    provider = %kind,
                    kind = ?err.kind(),
                    status = err.status_code(),
                    "Provider call failed"
                );
                Err(err)
            }
        }
    }

    /// Send [`SMOKE_TEST_PROMPT`] to the selected provider.
    ///
    /// Unlike [`Self::health`] this spends real generation quota.
    pub async fn smoke_test(&self) -> Result<SmokeTestReport, RulegenError> {
        let response = self.generate(SMOKE_TEST_PROMPT).await?;
        Ok(SmokeTestReport {
            status: "success",
            provider: self.config.provider.clone(),
            model_used: self.config.selected_model().unwrap_or_default().to_string(),
            test_prompt: SMOKE_TEST_PROMPT,
            response_preview: preview(&response),
            full_response_length: response.chars().count(),
        })
    }

    pub async fn health(&self) -> HealthReport {
        check_health(self.config, &self.http).await
    }
}

/// Keep provider-level kinds; anything else becomes a transport failure
/// carrying the original message.
fn into_provider_error(kind: ProviderKind, err: RulegenError) -> RulegenError {
    match err {
        RulegenError::Config(_)
        | RulegenError::Transport { .. }
        | RulegenError::EmptyResponse { .. }
        | RulegenError::Rejected { .. } => err,
        RulegenError::ValidationError { .. }
        | RulegenError::ParseError { .. }
        | RulegenError::FileSystem(_) => RulegenError::Transport {
            provider: kind.to_string(),
            message: err.to_string(),
            status: None,
            timed_out: false,
            source: Some(Box::new(err)),
        },
    }
}
