//! Configuration management using the `config` crate for hierarchical discovery and merging.
//!
//! ## Configuration Sources (in merge order, later overrides earlier):
//! 1. `~/.config/rulegen/config.toml` (user config directory)
//! 2. `./rulegen.toml` in the current directory
//! 3. Explicit `--config` path (must exist)
//! 4. `RULEGEN_*` environment variables, `__` between nested keys
//!    (e.g. `RULEGEN_LLM__GEMINI__MODEL`)
//! 5. Conventional provider variables such as `GEMINI_API_KEY` and `AI_PROVIDER`
//! 6. CLI flags
//!
//! ## Usage:
//! ```no_run
//! use rulegen::cli::{args, config};
//!
//! let args = args::parse();
//! let config = config::load(&args)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::cli::args::Args;
use crate::llm::config::ProviderConfig;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG: &str = "rulegen.toml";

/// Conventional environment variables and the config keys they populate.
const ENV_ALIASES: &[(&str, &str)] = &[
    ("AI_PROVIDER", "llm.provider"),
    ("OPENAI_API_KEY", "llm.openai.api_key"),
    ("OLLAMA_BASE_URL", "llm.ollama.base_url"),
    ("OLLAMA_MODEL", "llm.ollama.model"),
    ("HUGGINGFACE_API_KEY", "llm.huggingface.api_key"),
    ("GEMINI_API_KEY", "llm.gemini.api_key"),
    ("GEMINI_MODEL", "llm.gemini.model"),
];

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: ProviderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output directory and format configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_formats")]
    pub formats: Vec<OutputFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            formats: default_formats(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_formats() -> Vec<OutputFormat> {
    vec![OutputFormat::Markdown, OutputFormat::Json]
}

fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|config_dir| config_dir.join("rulegen").join("config.toml"))
        .filter(|path| path.exists())
}

fn discover_config_paths(explicit: Option<&Path>) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    if let Some(user_config) = get_user_config_path() {
        paths.push(user_config);
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        paths.push(local);
    }

    if let Some(explicit) = explicit {
        if !explicit.exists() {
            anyhow::bail!("Config file not found: {}", explicit.display());
        }
        paths.push(explicit.to_path_buf());
    }

    Ok(paths)
}

/// Load configuration from discovered files, the process environment and CLI flags.
pub fn load(args: &Args) -> Result<Config> {
    let env: HashMap<String, String> = std::env::vars().collect();
    let files = discover_config_paths(args.config.as_deref())?;
    load_from(&files, &env, args)
}

/// Load configuration from explicit sources.
///
/// `env` stands in for the process environment so the merge order can be
/// exercised without touching global state.
pub fn load_from(files: &[PathBuf], env: &HashMap<String, String>, args: &Args) -> Result<Config> {
    let mut builder = config::Config::builder();

    for path in files {
        tracing::debug!(path = %path.display(), "Loading config file");
        builder = builder.add_source(config::File::from(path.as_path()));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("RULEGEN")
            .prefix_separator("_")
            .separator("__")
            .source(Some(env.clone())),
    );

    for (var, key) in ENV_ALIASES {
        let value = env.get(*var).filter(|v| !v.trim().is_empty()).cloned();
        builder = builder
            .set_override_option(*key, value)
            .with_context(|| format!("Failed to apply {var}"))?;
    }

    builder = builder
        .set_override_option("llm.provider", args.provider.clone())
        .context("Failed to apply --provider")?;

    let settings = builder.build().context("Failed to build configuration")?;
    let mut config: Config = settings
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    if let Some(model) = &args.model {
        match config.llm.selected_model_mut() {
            Some(slot) => slot.clone_from(model),
            None => tracing::warn!(provider = %config.llm.provider, "Ignoring --model for unknown provider"),
        }
    }

    Ok(config)
}
