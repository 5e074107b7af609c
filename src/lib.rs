//! # rulegen
//!
//! rulegen turns a structured description of a software project into a
//! ruleset document for AI coding assistants. One generation runs three
//! steps:
//!
//! 1. **Prompt** - [`generator::build_ruleset_prompt`] renders the project
//!    description into a deterministic instruction text
//! 2. **Route** - [`llm::ProviderRouter`] sends the prompt to the configured
//!    provider (OpenAI, Ollama, Hugging Face or Gemini) exactly once
//! 3. **Assemble** - [`generator::assemble`] pairs the returned markdown with
//!    the original description and a UTC timestamp
//!
//! ## Configuration
//!
//! Configuration follows hierarchical precedence (see [`cli::config`]):
//! 1. User config (~/.config/rulegen/config.toml)
//! 2. Current directory (rulegen.toml)
//! 3. Explicit --config path
//! 4. Environment variables (RULEGEN_*, then GEMINI_API_KEY and friends)
//! 5. CLI flags (highest precedence)
//!
//! The resolved [`llm::ProviderConfig`] is built once and only read afterwards.

pub mod cli;
pub mod generator;
pub mod llm;
pub mod output;
pub mod project;
pub mod utils;

use generator::RulesetResult;
use llm::{ProviderConfig, ProviderRouter};
use project::ProjectInfo;
use tracing_subscriber::EnvFilter;
use utils::error::RulegenError;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise verbosity maps 0..=3 to
/// WARN/INFO/DEBUG/TRACE and `quiet` forces ERROR. Output goes to stderr.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // A subscriber may already be installed (tests, embedding applications).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Generate a ruleset for `info` with the provider selected in `config`.
///
/// Exactly one provider call is made; its failure is returned unchanged.
pub async fn generate_ruleset(
    config: &ProviderConfig,
    info: &ProjectInfo,
) -> Result<RulesetResult, RulegenError> {
    let prompt = generator::build_ruleset_prompt(info);
    tracing::debug!(
        category = %info.project_category,
        project_type = %info.project_type,
        "Built ruleset prompt"
    );

    let markdown = ProviderRouter::new(config)?.generate(&prompt).await?;
    Ok(generator::assemble(info, &markdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectCategory;
    use crate::utils::error::ErrorKind;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(0, false);
        init_logging(3, true);
    }

    #[tokio::test]
    async fn test_generate_ruleset_missing_key_fails_before_network() {
        let config = ProviderConfig::default();
        let info = ProjectInfo::new(ProjectCategory::Frontend, "SPA");
        let err = generate_ruleset(&config, &info)
            .await
            .expect_err("gemini without a key cannot generate");
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.status_code(), 500);
    }
}
