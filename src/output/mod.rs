//! Writes generated rulesets to disk.
//!
//! - `RULESET.md` holds the markdown as returned by the provider
//! - `ruleset.json` holds the structured record, pretty-printed

use crate::generator::ruleset::RulesetResult;
use crate::utils::error::RulegenError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MARKDOWN_FILE: &str = "RULESET.md";
pub const JSON_FILE: &str = "ruleset.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Json,
}

impl OutputFormat {
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Markdown => MARKDOWN_FILE,
            Self::Json => JSON_FILE,
        }
    }

    fn render(self, result: &RulesetResult) -> Result<String, RulegenError> {
        match self {
            Self::Markdown => Ok(result.markdown.clone()),
            Self::Json => Ok(serde_json::to_string_pretty(&result.structured)?),
        }
    }
}

/// Options for controlling output file writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Directory the files are written into; created when missing
    pub dir: PathBuf,
    pub formats: Vec<OutputFormat>,
    /// Overwrite existing files
    pub force: bool,
}

impl WriteOptions {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            formats: vec![OutputFormat::Markdown, OutputFormat::Json],
            force: false,
        }
    }

    pub fn with_formats(mut self, formats: Vec<OutputFormat>) -> Self {
        self.formats = formats;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

fn check_writable(path: &Path, force: bool) -> Result<(), RulegenError> {
    if path.exists() && !force {
        return Err(RulegenError::ValidationError {
            message: format!("Output file already exists: {}", path.display()),
            suggestion: "Use --force to overwrite or choose another --output-dir".to_string(),
        });
    }
    Ok(())
}

/// Write every requested format and return the paths written.
///
/// All target paths are checked before anything is written, so a conflict
/// leaves the directory untouched.
pub fn write_outputs(
    result: &RulesetResult,
    options: &WriteOptions,
) -> Result<Vec<PathBuf>, RulegenError> {
    let mut formats: Vec<OutputFormat> = Vec::with_capacity(options.formats.len());
    for format in &options.formats {
        if !formats.contains(format) {
            formats.push(*format);
        }
    }

    for format in &formats {
        check_writable(&options.dir.join(format.file_name()), options.force)?;
    }

    std::fs::create_dir_all(&options.dir)?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let path = options.dir.join(format.file_name());
        std::fs::write(&path, format.render(result)?)?;
        tracing::debug!(path = %path.display(), "Wrote output file");
        written.push(path);
    }

    Ok(written)
}
