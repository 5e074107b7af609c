// Copyright (c) 2025-2026 the rulegen contributors
// SPDX-License-Identifier: Apache-2.0

//! Suggested vocabulary for project descriptions.
//!
//! Purely advisory: front ends use it to populate pickers. Nothing in the
//! generation pipeline reads it.

use crate::project::ProjectCategory;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FrontendOptions {
    pub frameworks: &'static [&'static str],
    pub styling_approaches: &'static [&'static str],
    pub state_management: &'static [&'static str],
    pub http_clients: &'static [&'static str],
    pub ui_libraries: &'static [&'static str],
    pub build_tools: &'static [&'static str],
    pub testing_frameworks: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct BackendOptions {
    pub languages: &'static [&'static str],
    pub frameworks: &'static [&'static str],
    pub databases: &'static [&'static str],
    pub auth_methods: &'static [&'static str],
    pub api_styles: &'static [&'static str],
    pub orm_tools: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct CommonOptions {
    pub project_types: &'static [&'static str],
    pub deployment_platforms: &'static [&'static str],
    pub code_styles: &'static [&'static str],
}

/// One entry of the Gemini model catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub best_for: &'static str,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectOptions {
    pub categories: [ProjectCategory; 3],
    pub frontend_options: FrontendOptions,
    pub backend_options: BackendOptions,
    pub common_options: CommonOptions,
    pub gemini_models: &'static [ModelInfo],
}

pub const FRONTEND: FrontendOptions = FrontendOptions {
    frameworks: &[
        "React",
        "Vue.js",
        "Angular",
        "Svelte",
        "Next.js",
        "Nuxt.js",
        "Vanilla JS",
    ],
    styling_approaches: &[
        "CSS",
        "SCSS/SASS",
        "Styled Components",
        "Tailwind CSS",
        "CSS Modules",
        "Emotion",
    ],
    state_management: &[
        "useState/useReducer",
        "Zustand",
        "Redux Toolkit",
        "TanStack Query",
        "Context API",
        "Valtio",
    ],
    http_clients: &["Fetch API", "Axios", "TanStack Query", "SWR", "Apollo Client"],
    ui_libraries: &[
        "None",
        "Material-UI",
        "Ant Design",
        "Chakra UI",
        "Mantine",
        "React Bootstrap",
    ],
    build_tools: &["Vite", "Webpack", "Next.js", "Create React App", "Parcel"],
    testing_frameworks: &[
        "Jest",
        "Vitest",
        "Cypress",
        "Playwright",
        "React Testing Library",
    ],
};

pub const BACKEND: BackendOptions = BackendOptions {
    languages: &[
        "Python",
        "JavaScript/Node.js",
        "Java",
        "C#",
        "Go",
        "Rust",
        "PHP",
        "Ruby",
    ],
    frameworks: &[
        "FastAPI",
        "Django",
        "Flask",
        "Express.js",
        "Spring Boot",
        "ASP.NET Core",
        "Gin",
        "Laravel",
    ],
    databases: &[
        "PostgreSQL",
        "MySQL",
        "MongoDB",
        "Redis",
        "SQLite",
        "Firebase",
        "Supabase",
    ],
    auth_methods: &[
        "JWT",
        "Session-based",
        "OAuth 2.0",
        "Passport.js",
        "Auth0",
        "Firebase Auth",
    ],
    api_styles: &["REST", "GraphQL", "gRPC", "SOAP", "WebSocket"],
    orm_tools: &[
        "Prisma",
        "TypeORM",
        "Sequelize",
        "Mongoose",
        "SQLAlchemy",
        "Hibernate",
    ],
};

pub const COMMON: CommonOptions = CommonOptions {
    project_types: &[
        "Web Application",
        "Mobile App",
        "Desktop Application",
        "API/Microservice",
        "CLI Tool",
        "Library/Package",
    ],
    deployment_platforms: &[
        "AWS",
        "Google Cloud",
        "Azure",
        "Vercel",
        "Netlify",
        "Heroku",
        "Docker",
        "Railway",
    ],
    code_styles: &["Standard", "Prettier", "ESLint", "Airbnb", "Google", "PEP8"],
};

pub const GEMINI_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "gemini-1.5-flash",
        name: "Gemini 1.5 Flash",
        best_for: "Fast answers, simple tasks",
        max_tokens: 8192,
    },
    ModelInfo {
        id: "gemini-1.5-pro",
        name: "Gemini 1.5 Pro",
        best_for: "Code generation, technical guides, analysis",
        max_tokens: 32768,
    },
    ModelInfo {
        id: "gemini-pro",
        name: "Gemini Pro",
        best_for: "General purpose use",
        max_tokens: 4096,
    },
];

/// The full option catalog.
pub fn project_options() -> ProjectOptions {
    ProjectOptions {
        categories: ProjectCategory::ALL,
        frontend_options: FRONTEND,
        backend_options: BACKEND,
        common_options: COMMON,
        gemini_models: GEMINI_MODELS,
    }
}
