// Copyright (c) 2025-2026 the rulegen contributors
// SPDX-License-Identifier: Apache-2.0

//! Typed project description supplied by the caller.
//!
//! Only `project_category` is constrained. Every other field is free text
//! and is never checked against the suggested vocabulary in [`catalog`].

pub mod catalog;

use crate::utils::error::RulegenError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Project category; selects the prompt branch.
///
/// Decoding goes through [`FromStr`](std::str::FromStr), so `"Frontend"` and
/// `" backend "` are accepted the same way everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Frontend,
    Backend,
    Fullstack,
}

impl ProjectCategory {
    pub const ALL: [Self; 3] = [Self::Frontend, Self::Backend, Self::Fullstack];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Fullstack => "fullstack",
        }
    }
}

impl fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectCategory {
    type Err = RulegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frontend" => Ok(Self::Frontend),
            "backend" => Ok(Self::Backend),
            "fullstack" => Ok(Self::Fullstack),
            _ => Err(RulegenError::invalid_category(s)),
        }
    }
}

impl<'de> Deserialize<'de> for ProjectCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Immutable description of one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub project_category: ProjectCategory,
    pub project_type: String,

    // Frontend stack
    #[serde(default)]
    pub frontend_framework: Option<String>,
    #[serde(default)]
    pub styling_approach: Option<String>,
    #[serde(default)]
    pub state_management: Option<String>,
    #[serde(default)]
    pub http_client: Option<String>,
    #[serde(default)]
    pub ui_library: Option<String>,
    #[serde(default)]
    pub build_tool: Option<String>,
    #[serde(default)]
    pub testing_framework: Option<String>,

    // Backend stack
    #[serde(default)]
    pub backend_language: Option<String>,
    #[serde(default)]
    pub backend_framework: Option<String>,
    #[serde(default)]
    pub database_type: Option<String>,
    #[serde(default)]
    pub auth_method: Option<String>,
    #[serde(default)]
    pub api_style: Option<String>,
    #[serde(default)]
    pub orm_tool: Option<String>,

    // Common
    #[serde(default)]
    pub code_style: Option<String>,
    #[serde(default)]
    pub testing_requirement: bool,
    #[serde(default)]
    pub deployment_platform: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub additional_requirements: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// `null` and a missing list both mean "no additional requirements".
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Shape used only to give an unknown category a precise error.
#[derive(Deserialize)]
struct CategoryProbe {
    project_category: Option<serde_json::Value>,
}

impl ProjectInfo {
    /// A project with only the required fields set.
    pub fn new(project_category: ProjectCategory, project_type: impl Into<String>) -> Self {
        Self {
            project_category,
            project_type: project_type.into(),
            frontend_framework: None,
            styling_approach: None,
            state_management: None,
            http_client: None,
            ui_library: None,
            build_tool: None,
            testing_framework: None,
            backend_language: None,
            backend_framework: None,
            database_type: None,
            auth_method: None,
            api_style: None,
            orm_tool: None,
            code_style: None,
            testing_requirement: false,
            deployment_platform: None,
            additional_requirements: Vec::new(),
            notes: None,
        }
    }

    /// Decode a project description from JSON.
    ///
    /// An unrecognised `project_category` is reported as a validation error
    /// listing the valid categories; any other malformed input is a parse error.
    pub fn from_json(input: &str) -> Result<Self, RulegenError> {
        match serde_json::from_str::<Self>(input) {
            Ok(info) => Ok(info),
            Err(err) => {
                if let Ok(CategoryProbe {
                    project_category: Some(serde_json::Value::String(category)),
                }) = serde_json::from_str::<CategoryProbe>(input)
                {
                    category.parse::<ProjectCategory>()?;
                }
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    #[test]
    fn test_minimal_document_defaults() {
        let info = ProjectInfo::from_json(r#"{"project_category":"backend","project_type":"API"}"#)
            .expect("minimal document should decode");
        assert_eq!(info, ProjectInfo::new(ProjectCategory::Backend, "API"));
        assert!(!info.testing_requirement);
        assert!(info.additional_requirements.is_empty());
    }

    #[test]
    fn test_null_additional_requirements() {
        let info = ProjectInfo::from_json(
            r#"{"project_category":"frontend","project_type":"SPA","additional_requirements":null}"#,
        )
        .expect("null list should decode");
        assert!(info.additional_requirements.is_empty());
    }

    #[test]
    fn test_free_text_outside_catalog_is_accepted() {
        let info = ProjectInfo::from_json(
            r#"{"project_category":"frontend","project_type":"Kiosk","frontend_framework":"SolidStart"}"#,
        )
        .expect("free text should decode");
        assert_eq!(info.frontend_framework.as_deref(), Some("SolidStart"));
    }

    #[test]
    fn test_unknown_category_is_validation_error() {
        let err = ProjectInfo::from_json(r#"{"project_category":"mobile","project_type":"App"}"#)
            .expect_err("unknown category must fail");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("mobile"));
    }

    #[test]
    fn test_missing_project_type_is_parse_error() {
        let err = ProjectInfo::from_json(r#"{"project_category":"backend"}"#)
            .expect_err("project_type is required");
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_capitalised_category_is_accepted() {
        let info = ProjectInfo::from_json(r#"{"project_category":"Frontend","project_type":"SPA"}"#)
            .expect("category matching ignores case");
        assert_eq!(info.project_category, ProjectCategory::Frontend);

        let json = serde_json::to_value(&info).expect("serializes");
        assert_eq!(json["project_category"], "frontend");
    }

    #[test]
    fn test_non_string_category_is_parse_error() {
        let err = ProjectInfo::from_json(r#"{"project_category":3,"project_type":"SPA"}"#)
            .expect_err("category must be a string");
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "Fullstack".parse::<ProjectCategory>().ok(),
            Some(ProjectCategory::Fullstack)
        );
        assert!("desktop".parse::<ProjectCategory>().is_err());
    }
}
