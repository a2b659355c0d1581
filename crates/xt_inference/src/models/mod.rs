use std::sync::Arc;
use xt_core::{Error, Result, SummaryModel};
use crate::Config;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

pub const AVAILABLE_PROVIDERS: [&str; 2] = ["gemini", "dummy"];

/// Build the summary model for a provider name.
pub fn create_model(provider: &str, config: Config) -> Result<Arc<dyn SummaryModel>> {
    match provider.to_lowercase().as_str() {
        "gemini" => Ok(Arc::new(GeminiModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Configuration(format!(
            "Unknown model provider '{}'. Available providers: {}",
            other,
            AVAILABLE_PROVIDERS.join(", ")
        ))),
    }
}
