// Copyright (c) 2025-2026 the rulegen contributors
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy shared by every stage of ruleset generation.
//!
//! Provider failures collapse into four kinds (configuration, transport,
//! empty response, upstream rejection). Each error knows the HTTP-style
//! status a service boundary should answer with, see [`RulegenError::status_code`].

use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Compiled regex patterns for redacting secrets from provider messages.
///
/// The patterns are literals covered by tests, so `expect` cannot fire on
/// runtime input.
static REDACTION_PATTERNS: LazyLock<[(regex::Regex, &'static str); 5]> = LazyLock::new(|| {
    [
        (
            regex::Regex::new(r"(api[_-]?key[=:\s]+)[^\s&]+")
                .expect("api_key redaction pattern is invalid"),
            "${1}[REDACTED]",
        ),
        (
            regex::Regex::new(r"([?&]key=)[^\s&]+").expect("query key redaction pattern is invalid"),
            "${1}[REDACTED]",
        ),
        (
            regex::Regex::new(r"(?i)(bearer\s+)[^\s]+")
                .expect("bearer redaction pattern is invalid"),
            "${1}[REDACTED]",
        ),
        (
            regex::Regex::new(r"(sk-[a-zA-Z0-9_-]{8,})").expect("sk-key redaction pattern is invalid"),
            "[REDACTED]",
        ),
        (
            regex::Regex::new(r"(AIza[0-9A-Za-z_-]{20,})")
                .expect("google key redaction pattern is invalid"),
            "[REDACTED]",
        ),
    ]
});

/// Why an upstream provider refused to serve a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    InvalidCredential,
    QuotaExceeded,
    SafetyBlocked,
}

impl RejectionReason {
    /// Caller-facing status: unauthorized, rate-limited, bad-request.
    pub const fn status_code(self) -> u16 {
        match self {
            Self::InvalidCredential => 401,
            Self::QuotaExceeded => 429,
            Self::SafetyBlocked => 400,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidCredential => "invalid credential",
            Self::QuotaExceeded => "quota exceeded",
            Self::SafetyBlocked => "blocked by safety filter",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse error kind, stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    Transport,
    EmptyResponse,
    UpstreamRejection,
    Validation,
    Parse,
    FileSystem,
}

#[derive(Debug, Error)]
pub enum RulegenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{provider} request failed: {}", redact_sensitive_data(message))]
    Transport {
        provider: String,
        message: String,
        /// Upstream HTTP status, when the provider answered at all.
        status: Option<u16>,
        timed_out: bool,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{provider} returned an empty response")]
    EmptyResponse { provider: String },

    #[error("{provider} rejected the request ({reason}): {}", redact_sensitive_data(message))]
    Rejected {
        provider: String,
        reason: RejectionReason,
        message: String,
    },

    #[error("Validation error: {message}\nSuggestion: {suggestion}")]
    ValidationError { message: String, suggestion: String },

    #[error("Parse error: {message}")]
    ParseError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),
}

/// Redact sensitive information from error messages.
pub(crate) fn redact_sensitive_data(message: &str) -> String {
    let mut result = message.to_string();
    for (pattern, replacement) in REDACTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, *replacement).to_string();
    }
    result
}

impl RulegenError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::EmptyResponse { .. } => ErrorKind::EmptyResponse,
            Self::Rejected { .. } => ErrorKind::UpstreamRejection,
            Self::ValidationError { .. } => ErrorKind::Validation,
            Self::ParseError { .. } => ErrorKind::Parse,
            Self::FileSystem(_) => ErrorKind::FileSystem,
        }
    }

    /// HTTP-style status a service boundary should answer with.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Config(_) | Self::FileSystem(_) => 500,
            Self::Transport {
                timed_out: true, ..
            } => 504,
            Self::Transport { .. } | Self::EmptyResponse { .. } => 502,
            Self::Rejected { reason, .. } => reason.status_code(),
            Self::ValidationError { .. } => 422,
            Self::ParseError { .. } => 400,
        }
    }

    pub fn missing_api_key(provider: &str, env_var: &str) -> Self {
        RulegenError::Config(format!(
            "API key not configured for provider '{provider}'. Set the {env_var} environment variable or add api_key to [llm.{provider}] in rulegen.toml"
        ))
    }

    pub fn unsupported_provider(provider: &str) -> Self {
        RulegenError::Config(format!(
            "Unsupported AI provider: '{provider}'. Valid providers are: openai, ollama, huggingface, gemini"
        ))
    }

    pub fn invalid_category(category: &str) -> Self {
        RulegenError::ValidationError {
            message: format!("Invalid project category: '{category}'"),
            suggestion: "Valid categories are: frontend, backend, fullstack".to_string(),
        }
    }

    /// Transport failure for a non-success HTTP status, carrying the raw body.
    pub fn http_status(provider: &str, status: u16, body: &str) -> Self {
        RulegenError::Transport {
            provider: provider.to_string(),
            message: format!("HTTP {status}: {body}"),
            status: Some(status),
            timed_out: false,
            source: None,
        }
    }

    pub fn rejected(provider: &str, reason: RejectionReason, message: impl Into<String>) -> Self {
        RulegenError::Rejected {
            provider: provider.to_string(),
            reason,
            message: message.into(),
        }
    }

    pub fn empty_response(provider: &str) -> Self {
        RulegenError::EmptyResponse {
            provider: provider.to_string(),
        }
    }

    /// Wrap a `reqwest` failure as a transport error for `provider`.
    pub fn from_reqwest(provider: &str, err: reqwest::Error) -> Self {
        let timed_out = err.is_timeout();
        let message = if timed_out {
            "Request timed out. Check your network connection.".to_string()
        } else if err.is_connect() {
            "Failed to connect to server. Check your network connection.".to_string()
        } else if err.is_decode() {
            "Response body could not be decoded".to_string()
        } else if let Some(status) = err.status() {
            format!("HTTP error: {status}")
        } else {
            "Network request failed".to_string()
        };

        RulegenError::Transport {
            provider: provider.to_string(),
            message,
            status: err.status().map(|s| s.as_u16()),
            timed_out,
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for RulegenError {
    fn from(err: serde_json::Error) -> Self {
        RulegenError::ParseError {
            message: format!("Failed to parse JSON: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

/// Structured error shape handed back across a service boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub status: u16,
    pub message: String,
}

impl From<&RulegenError> for ErrorBody {
    fn from(err: &RulegenError) -> Self {
        Self {
            kind: err.kind(),
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}

/// Render an error for terminal output.
pub fn format_error(error: &RulegenError, verbose: bool) -> String {
    let mut out = format!(
        "\n{} [{} / {}]\n{}",
        console::style("\u{26a0} Error").red().bold(),
        console::style(format!("{:?}", error.kind())).yellow(),
        error.status_code(),
        error
    );

    if verbose {
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            out.push_str(&format!("\n\u{2514}\u{2500} {cause}"));
            source = cause.source();
        }
    }

    out
}
