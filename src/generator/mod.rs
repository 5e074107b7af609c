//! Ruleset generation building blocks.
//!
//! This module provides:
//! - Prompt construction from a project description
//! - Assembly of the final structured ruleset record

pub mod prompts;
pub mod ruleset;

pub use prompts::{build_ruleset_prompt, sections_for};
pub use ruleset::{RulesetResult, StructuredRuleset, assemble, assemble_at};
