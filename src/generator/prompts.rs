// Copyright (c) 2025-2026 the rulegen contributors
// SPDX-License-Identifier: Apache-2.0

//! Prompt construction for ruleset generation.
//!
//! The prompt is a pure function of a [`ProjectInfo`]:
//! - a fixed preamble naming the category and project type
//! - a category-specific technology stack block
//! - the ordered list of section headings the ruleset must contain
//! - a common block (code style, testing, deployment, requirements, notes)
//! - a fixed closing style guide
//!
//! Missing or blank optional fields render as readable placeholders, so
//! building a prompt never fails.
//!
//! # Example
//!
//! ```
//! use rulegen::generator::prompts::build_ruleset_prompt;
//! use rulegen::project::{ProjectCategory, ProjectInfo};
//!
//! let info = ProjectInfo::new(ProjectCategory::Backend, "REST API");
//! let prompt = build_ruleset_prompt(&info);
//! assert!(prompt.contains("BACKEND TECHNOLOGY STACK"));
//! ```

use crate::project::{ProjectCategory, ProjectInfo};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Rendered for an empty additional-requirements list and absent notes.
pub const NONE_TOKEN: &str = "None";

const NOT_SPECIFIED: &str = "Not specified";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern is invalid")
});

/// Load the ruleset prompt template.
pub fn ruleset_template() -> &'static str {
    include_str!("../../prompts/ruleset.md")
}

/// Load the closing style guide.
pub fn style_guide() -> &'static str {
    include_str!("../../prompts/style_guide.md")
}

/// A heading the generated ruleset must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub description: &'static str,
}

const fn section(title: &'static str, description: &'static str) -> Section {
    Section { title, description }
}

pub const FRONTEND_SECTIONS: [Section; 12] = [
    section(
        "Agent Role Definition",
        "Frontend developer persona for AI assistants",
    ),
    section(
        "Technology Stack",
        "Specific frontend technologies and their usage patterns",
    ),
    section(
        "Component Architecture",
        "Component structure, atomic design, file organization",
    ),
    section(
        "Styling Guidelines",
        "CSS/SCSS/Styled-components best practices",
    ),
    section("State Management", "How to handle local and global state"),
    section("API Integration", "HTTP client usage, data fetching patterns"),
    section(
        "Performance Optimization",
        "Bundle size, lazy loading, memoization",
    ),
    section(
        "Accessibility Standards",
        "A11Y guidelines and semantic HTML",
    ),
    section(
        "Testing Strategy",
        "Unit, integration, and E2E testing approaches",
    ),
    section("Code Organization", "File structure, naming conventions"),
    section(
        "Development Workflow",
        "Git workflow, PR guidelines, code review",
    ),
    section(
        "Build and Deployment",
        "Bundling, optimization, deployment strategies",
    ),
];

pub const BACKEND_SECTIONS: [Section; 12] = [
    section(
        "Agent Role Definition",
        "Backend developer persona for AI assistants",
    ),
    section(
        "Technology Stack",
        "Specific backend technologies and frameworks",
    ),
    section("API Design Principles", "RESTful/GraphQL design patterns"),
    section("Database Design", "Schema design, migrations, queries"),
    section(
        "Authentication & Authorization",
        "Security patterns and implementations",
    ),
    section("Error Handling", "Exception management and error responses"),
    section("Testing Strategy", "Unit, integration, and API testing"),
    section(
        "Performance & Optimization",
        "Caching, indexing, query optimization",
    ),
    section(
        "Security Guidelines",
        "Input validation, SQL injection prevention",
    ),
    section("Code Architecture", "Clean architecture, SOLID principles"),
    section(
        "Documentation Standards",
        "API documentation, code comments",
    ),
    section("Deployment & DevOps", "Containerization, CI/CD, monitoring"),
];

pub const FULLSTACK_SECTIONS: [Section; 12] = [
    section(
        "Agent Role Definition",
        "Fullstack developer persona for AI assistants",
    ),
    section(
        "Technology Stack",
        "Complete frontend and backend technologies",
    ),
    section(
        "Project Architecture",
        "Monorepo vs separate repos, folder structure",
    ),
    section(
        "Frontend Guidelines",
        "Component architecture, styling, state management",
    ),
    section(
        "Backend Guidelines",
        "API design, database patterns, authentication",
    ),
    section(
        "API Integration",
        "Frontend-backend communication patterns",
    ),
    section(
        "Shared Standards",
        "TypeScript types, validation schemas, error handling",
    ),
    section(
        "Testing Strategy",
        "Comprehensive testing across the stack",
    ),
    section("Development Workflow", "Full-stack development patterns"),
    section(
        "Performance Optimization",
        "End-to-end performance considerations",
    ),
    section(
        "Security & Authentication",
        "Full-stack security implementation",
    ),
    section(
        "Deployment Strategy",
        "Coordinated frontend-backend deployment",
    ),
];

/// Section headings required for `category`, in order.
pub const fn sections_for(category: ProjectCategory) -> &'static [Section] {
    match category {
        ProjectCategory::Frontend => &FRONTEND_SECTIONS,
        ProjectCategory::Backend => &BACKEND_SECTIONS,
        ProjectCategory::Fullstack => &FULLSTACK_SECTIONS,
    }
}

/// Optional field value, or `fallback` when absent or blank.
fn or_placeholder<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
}

fn stack_lines(lines: &[(&str, Option<&str>, &str)]) -> String {
    lines
        .iter()
        .map(|&(label, value, fallback)| format!("- {label}: {}", or_placeholder(value, fallback)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn frontend_lines(info: &ProjectInfo) -> String {
    stack_lines(&[
        ("Framework", info.frontend_framework.as_deref(), NOT_SPECIFIED),
        (
            "Styling Approach",
            info.styling_approach.as_deref(),
            "Standard CSS",
        ),
        (
            "State Management",
            info.state_management.as_deref(),
            "Component state",
        ),
        ("HTTP Client", info.http_client.as_deref(), "Fetch API"),
        ("UI Library", info.ui_library.as_deref(), "None"),
        ("Build Tool", info.build_tool.as_deref(), "Standard bundler"),
        (
            "Testing Framework",
            info.testing_framework.as_deref(),
            NOT_SPECIFIED,
        ),
    ])
}

fn backend_lines(info: &ProjectInfo) -> String {
    stack_lines(&[
        ("Language", info.backend_language.as_deref(), NOT_SPECIFIED),
        ("Framework", info.backend_framework.as_deref(), NOT_SPECIFIED),
        ("Database", info.database_type.as_deref(), NOT_SPECIFIED),
        ("Authentication", info.auth_method.as_deref(), "Basic auth"),
        ("API Style", info.api_style.as_deref(), "REST"),
        (
            "ORM/Database Tool",
            info.orm_tool.as_deref(),
            "Native queries",
        ),
    ])
}

/// Build the category-specific technology stack block.
pub fn build_tech_stack(info: &ProjectInfo) -> String {
    match info.project_category {
        ProjectCategory::Frontend => {
            format!("FRONTEND TECHNOLOGY STACK:\n{}", frontend_lines(info))
        }
        ProjectCategory::Backend => {
            format!("BACKEND TECHNOLOGY STACK:\n{}", backend_lines(info))
        }
        ProjectCategory::Fullstack => {
            let frontend = stack_lines(&[
                ("Framework", info.frontend_framework.as_deref(), NOT_SPECIFIED),
                ("Styling", info.styling_approach.as_deref(), "Standard CSS"),
                (
                    "State Management",
                    info.state_management.as_deref(),
                    "Component state",
                ),
                ("HTTP Client", info.http_client.as_deref(), "Fetch API"),
            ]);
            let backend = stack_lines(&[
                ("Language", info.backend_language.as_deref(), NOT_SPECIFIED),
                ("Framework", info.backend_framework.as_deref(), NOT_SPECIFIED),
                ("Database", info.database_type.as_deref(), NOT_SPECIFIED),
                ("API Style", info.api_style.as_deref(), "REST"),
            ]);
            format!("FULLSTACK TECHNOLOGY STACK:\nFrontend:\n{frontend}\n\nBackend:\n{backend}")
        }
    }
}

/// Render the numbered list of required section headings.
pub fn build_sections(category: ProjectCategory) -> String {
    sections_for(category)
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. **{}** - {}", i + 1, s.title, s.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join additional requirements with `", "`, or [`NONE_TOKEN`] when empty.
pub fn format_requirements(requirements: &[String]) -> String {
    if requirements.is_empty() {
        NONE_TOKEN.to_string()
    } else {
        requirements.join(", ")
    }
}

/// Build the full ruleset prompt for a project.
pub fn build_ruleset_prompt(info: &ProjectInfo) -> String {
    let category = info.project_category.as_str().to_uppercase();
    let project_type = or_placeholder(Some(info.project_type.as_str()), NOT_SPECIFIED);
    let tech_stack = build_tech_stack(info);
    let sections = build_sections(info.project_category);
    let code_style = or_placeholder(info.code_style.as_deref(), "Standard");
    let testing_required = if info.testing_requirement { "Yes" } else { "No" };
    let deployment = or_placeholder(info.deployment_platform.as_deref(), NOT_SPECIFIED);
    let requirements = format_requirements(&info.additional_requirements);
    let notes = or_placeholder(info.notes.as_deref(), NONE_TOKEN);

    // Single pass: substituted values are never re-scanned for placeholders.
    PLACEHOLDER
        .replace_all(ruleset_template(), |caps: &Captures<'_>| {
            match &caps[1] {
                "category" => category.as_str(),
                "project_type" => project_type,
                "tech_stack" => tech_stack.as_str(),
                "sections" => sections.as_str(),
                "code_style" => code_style,
                "testing_required" => testing_required,
                "deployment_platform" => deployment,
                "additional_requirements" => requirements.as_str(),
                "notes" => notes,
                "style_guide" => style_guide().trim_end(),
                _ => caps.get(0).map_or("", |m| m.as_str()),
            }
            .to_string()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common_block(prompt: &str) -> &str {
        let start = prompt.find("ADDITIONAL DETAILS:").expect("common block present");
        &prompt[start..]
    }

    #[test]
    fn test_frontend_prompt_has_frontend_headings_only() {
        let prompt = build_ruleset_prompt(&ProjectInfo::new(ProjectCategory::Frontend, "SPA"));
        for s in &FRONTEND_SECTIONS {
            assert!(prompt.contains(s.title), "missing heading {}", s.title);
        }
        for s in BACKEND_SECTIONS
            .iter()
            .filter(|s| !FRONTEND_SECTIONS.iter().any(|f| f.title == s.title))
        {
            assert!(!prompt.contains(s.title), "unexpected heading {}", s.title);
        }
        assert!(prompt.contains("FRONTEND TECHNOLOGY STACK"));
    }

    #[test]
    fn test_backend_prompt_has_backend_headings_only() {
        let prompt = build_ruleset_prompt(&ProjectInfo::new(ProjectCategory::Backend, "API"));
        for s in &BACKEND_SECTIONS {
            assert!(prompt.contains(s.title), "missing heading {}", s.title);
        }
        for s in FRONTEND_SECTIONS
            .iter()
            .filter(|s| !BACKEND_SECTIONS.iter().any(|b| b.title == s.title))
        {
            assert!(!prompt.contains(s.title), "unexpected heading {}", s.title);
        }
    }

    #[test]
    fn test_fullstack_prompt_has_fullstack_headings() {
        let prompt = build_ruleset_prompt(&ProjectInfo::new(ProjectCategory::Fullstack, "SaaS"));
        for s in &FULLSTACK_SECTIONS {
            assert!(prompt.contains(s.title), "missing heading {}", s.title);
        }
        assert!(prompt.contains("Frontend:\n- Framework: Not specified"));
        assert!(prompt.contains("Backend:\n- Language: Not specified"));
        assert!(!prompt.contains("Database Design"));
    }

    #[test]
    fn test_unset_fields_render_placeholders() {
        for category in ProjectCategory::ALL {
            let prompt = build_ruleset_prompt(&ProjectInfo::new(category, "Tool"));
            assert!(!prompt.is_empty());
            assert!(!prompt.contains("null"), "{category}: null literal leaked");
            assert!(!prompt.contains("{{"), "{category}: unrendered placeholder");
            assert!(prompt.contains("- Code Style: Standard"));
            assert!(prompt.contains("- Testing Required: No"));
            assert!(prompt.contains("- Notes: None"));
        }
    }

    #[test]
    fn test_blank_fields_treated_as_absent() {
        let mut info = ProjectInfo::new(ProjectCategory::Backend, "API");
        info.backend_language = Some("   ".to_string());
        info.api_style = Some(String::new());
        let prompt = build_ruleset_prompt(&info);
        assert!(prompt.contains("- Language: Not specified"));
        assert!(prompt.contains("- API Style: REST"));
    }

    #[test]
    fn test_requirements_rendering() {
        let mut info = ProjectInfo::new(ProjectCategory::Frontend, "SPA");
        let prompt = build_ruleset_prompt(&info);
        assert!(common_block(&prompt).contains("- Additional Requirements: None\n"));

        info.additional_requirements = vec!["a".to_string(), "b".to_string()];
        let prompt = build_ruleset_prompt(&info);
        assert!(common_block(&prompt).contains("- Additional Requirements: a, b\n"));
    }

    #[test]
    fn test_user_text_is_not_treated_as_placeholder() {
        let mut info = ProjectInfo::new(ProjectCategory::Backend, "{{sections}}");
        info.notes = Some("keep {{notes}} literal".to_string());
        let prompt = build_ruleset_prompt(&info);
        assert!(prompt.contains("PROJECT TYPE: {{sections}}"));
        assert!(prompt.contains("- Notes: keep {{notes}} literal"));
    }

    #[test]
    fn test_prompt_ends_with_style_guide() {
        let mut info = ProjectInfo::new(ProjectCategory::Frontend, "SPA");
        info.testing_requirement = true;
        info.frontend_framework = Some("React".to_string());
        let prompt = build_ruleset_prompt(&info);
        assert!(prompt.contains("- Framework: React"));
        assert!(prompt.contains("- Testing Required: Yes"));
        assert!(prompt.contains("Definition of Done"));
        assert!(prompt.contains("bilingual"));
        assert!(prompt.find("ADDITIONAL DETAILS:") < prompt.find("The ruleset should be:"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let info = ProjectInfo::new(ProjectCategory::Fullstack, "SaaS");
        assert_eq!(build_ruleset_prompt(&info), build_ruleset_prompt(&info));
    }
}
