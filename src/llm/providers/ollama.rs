use crate::llm::config::OllamaConfig;
use crate::llm::provider::{LLMProvider, Message, ProviderKind, non_empty};
use crate::utils::error::RulegenError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROVIDER: &str = "ollama";
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;
const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Persona for the local server; asks explicitly for markdown output.
const OLLAMA_PERSONA: &str = "You are an expert software architect and technical writer specializing in creating comprehensive development guidelines and rulesets for AI coding assistants. Provide detailed, actionable guidelines in markdown format.";

/// Local inference server client (native `/api/chat` endpoint, non-streaming).
pub struct OllamaProvider {
    base_url: String,
    model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    options: SamplingOptions,
}

#[derive(Debug, Serialize)]
struct SamplingOptions {
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OllamaProvider {
    pub fn new(config: &OllamaConfig, client: Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn unreachable(&self, err: reqwest::Error) -> RulegenError {
        RulegenError::Transport {
            provider: PROVIDER.to_string(),
            message: format!(
                "Cannot connect to the Ollama server at {}. The service is not running or unreachable; start it with `ollama serve` (install: https://ollama.ai)",
                self.base_url
            ),
            status: None,
            timed_out: false,
            source: Some(Box::new(err)),
        }
    }

    /// Whether the server answers `GET /api/tags` with 200 within five seconds.
    pub async fn ping(&self) -> bool {
        self.client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(PING_TIMEOUT)
            .send()
            .await
            .is_ok_and(|r| r.status().is_success())
    }
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    async fn send(&self, prompt: &str) -> Result<String, RulegenError> {
        let messages = [Message::system(OLLAMA_PERSONA), Message::user(prompt)];
        let request_body = ChatRequest {
            model: &self.model,
            messages: &messages,
            stream: false,
            options: SamplingOptions {
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                // A connect attempt that times out also reports is_connect
                if e.is_connect() && !e.is_timeout() {
                    self.unreachable(e)
                } else {
                    RulegenError::from_reqwest(PROVIDER, e)
                }
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RulegenError::http_status(
                PROVIDER,
                status.as_u16(),
                &error_text,
            ));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| RulegenError::from_reqwest(PROVIDER, e))?;

        let content = body
            .message
            .and_then(|m| m.content)
            .unwrap_or_default();

        non_empty(ProviderKind::Ollama, content)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    fn model(&self) -> &str {
        &self.model
    }
}
