//! Provider health reporting.
//!
//! Health never fails: every probe outcome, including an unknown provider
//! selector, becomes a [`ProviderStatus`] in the report.

use crate::llm::config::ProviderConfig;
use crate::llm::provider::ProviderKind;
use crate::llm::providers::ProviderClient;
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    Connected,
    Disconnected,
    Configured,
    NotConfigured,
    InvalidApiKey,
    ConnectionError,
    ApiError,
    UnsupportedProvider,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub ai_provider: String,
    pub ai_status: ProviderStatus,
    #[serde(flatten)]
    pub details: BTreeMap<String, String>,
}

fn has_key(key: Option<&str>) -> bool {
    key.is_some_and(|k| !k.trim().is_empty())
}

const fn configured(present: bool) -> ProviderStatus {
    if present {
        ProviderStatus::Configured
    } else {
        ProviderStatus::NotConfigured
    }
}

/// Probe the selected provider.
pub async fn check_health(config: &ProviderConfig, http: &Client) -> HealthReport {
    let mut details = BTreeMap::new();

    let ai_status = match config.provider.parse::<ProviderKind>() {
        Err(_) => ProviderStatus::UnsupportedProvider,
        Ok(kind) => match ProviderClient::for_kind(kind, config, http.clone()) {
            ProviderClient::Ollama(provider) => {
                details.insert("ollama_url".to_string(), config.ollama.base_url.clone());
                details.insert("ollama_model".to_string(), config.ollama.model.clone());
                if provider.ping().await {
                    ProviderStatus::Connected
                } else {
                    ProviderStatus::Disconnected
                }
            }
            ProviderClient::Gemini(provider) => {
                details.insert("gemini_model".to_string(), config.gemini.model.clone());
                provider.check().await
            }
            ProviderClient::OpenAi(_) => configured(has_key(config.openai.api_key.as_deref())),
            ProviderClient::HuggingFace(_) => {
                configured(has_key(config.huggingface.api_key.as_deref()))
            }
        },
    };

    tracing::debug!(provider = %config.provider, status = ?ai_status, "Health probe finished");

    HealthReport {
        status: "healthy",
        ai_provider: config.provider.clone(),
        ai_status,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_provider_reports_unsupported() {
        let config = ProviderConfig {
            provider: "bogus".to_string(),
            ..ProviderConfig::default()
        };
        let report = check_health(&config, &Client::new()).await;
        assert_eq!(report.ai_status, ProviderStatus::UnsupportedProvider);
        assert_eq!(report.status, "healthy");
    }

    #[tokio::test]
    async fn test_key_presence_for_openai() {
        let mut config = ProviderConfig {
            provider: "openai".to_string(),
            ..ProviderConfig::default()
        };
        let report = check_health(&config, &Client::new()).await;
        assert_eq!(report.ai_status, ProviderStatus::NotConfigured);

        config.openai.api_key = Some("sk-test".to_string());
        let report = check_health(&config, &Client::new()).await;
        assert_eq!(report.ai_status, ProviderStatus::Configured);
    }

    #[tokio::test]
    async fn test_gemini_without_key_is_not_configured() {
        let config = ProviderConfig::default();
        let report = check_health(&config, &Client::new()).await;
        assert_eq!(report.ai_status, ProviderStatus::NotConfigured);
        assert_eq!(
            report.details.get("gemini_model").map(String::as_str),
            Some("gemini-1.5-flash")
        );
    }

    #[test]
    fn test_report_serializes_flat_details() {
        let mut details = BTreeMap::new();
        details.insert("ollama_url".to_string(), "http://localhost:11434".to_string());
        let report = HealthReport {
            status: "healthy",
            ai_provider: "ollama".to_string(),
            ai_status: ProviderStatus::Disconnected,
            details,
        };
        let json = serde_json::to_value(&report).expect("serializes");
        assert_eq!(json["ai_status"], "disconnected");
        assert_eq!(json["ollama_url"], "http://localhost:11434");
    }
}
