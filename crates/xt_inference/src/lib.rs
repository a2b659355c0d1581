pub mod bullets;
pub mod models;
pub mod prompt;

pub const DEFAULT_MODEL_NAME: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    /// Overrides the generative API endpoint, mainly for tests.
    pub base_url: Option<String>,
}

impl Config {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            ..Self::default()
        }
    }

    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_MODEL_NAME)
    }
}

pub mod prelude {
    pub use super::bullets::{parse_bullets, parse_summary};
    pub use super::models::create_model;
    pub use super::Config;
    pub use xt_core::{Error, Result, SummaryModel, SummaryRequest, SummaryResult};
}

pub use bullets::{parse_bullets, parse_summary};
pub use models::create_model;

