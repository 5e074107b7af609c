// Copyright (c) 2025-2026 the rulegen contributors
// SPDX-License-Identifier: Apache-2.0

use crate::project::ProjectInfo;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Structured record of one generation: every input field plus the output.
///
/// Unset optional fields serialize as explicit `null`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredRuleset {
    #[serde(flatten)]
    pub project: ProjectInfo,
    pub generated_ruleset: String,
    /// RFC 3339 / ISO-8601 UTC timestamp.
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesetResult {
    pub markdown: String,
    pub structured: StructuredRuleset,
}

/// Combine a project description and generated text, stamped with the current time.
pub fn assemble(info: &ProjectInfo, text: &str) -> RulesetResult {
    assemble_at(info, text, Utc::now())
}

/// Same as [`assemble`] with an explicit timestamp.
pub fn assemble_at(info: &ProjectInfo, text: &str, at: DateTime<Utc>) -> RulesetResult {
    RulesetResult {
        markdown: text.to_string(),
        structured: StructuredRuleset {
            project: info.clone(),
            generated_ruleset: text.to_string(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, true),
        },
    }
}
