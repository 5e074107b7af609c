pub mod config;
pub mod health;
pub mod provider;
pub mod providers;
pub mod router;

pub use config::ProviderConfig;
pub use health::{HealthReport, ProviderStatus};
pub use provider::{LLMProvider, Message, ProviderKind};
pub use router::{ProviderRouter, SmokeTestReport};
