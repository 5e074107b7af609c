//! Common test utilities and fixtures for integration tests.

#![allow(dead_code)]

use rulegen::llm::ProviderConfig;
use rulegen::project::{ProjectCategory, ProjectInfo};

/// URL of a local port that was free a moment ago, for connection-refused scenarios.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local address");
    drop(listener);
    format!("http://{addr}")
}

/// Provider configuration with every base URL pointed at `url`.
pub fn config_for(provider: &str, url: &str) -> ProviderConfig {
    let mut config = ProviderConfig {
        provider: provider.to_string(),
        timeout_secs: 5,
        ..ProviderConfig::default()
    };
    config.openai.base_url = url.to_string();
    config.openai.api_key = Some("sk-test-openai".to_string());
    config.ollama.base_url = url.to_string();
    config.huggingface.base_url = url.to_string();
    config.huggingface.api_key = Some("hf_test".to_string());
    config.gemini.base_url = url.to_string();
    config.gemini.api_key = Some("gemini-test-key".to_string());
    config
}

/// A small fully-populated backend description.
pub fn backend_project() -> ProjectInfo {
    let mut info = ProjectInfo::new(ProjectCategory::Backend, "REST API");
    info.backend_language = Some("Python".to_string());
    info.backend_framework = Some("FastAPI".to_string());
    info.database_type = Some("PostgreSQL".to_string());
    info.additional_requirements = vec!["Audit logging".to_string(), "GDPR".to_string()];
    info
}

/// Path of the Gemini generation endpoint for the default model.
pub fn gemini_generate_path() -> String {
    format!("/models/{}:generateContent", ProviderConfig::default().gemini.model)
}
