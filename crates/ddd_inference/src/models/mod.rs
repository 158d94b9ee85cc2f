use std::sync::Arc;
use ddd_core::{ContentGenerator, Result};
use crate::{Config, Provider};

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// Builds the generator selected by `config.provider`.
///
/// Rebuild it whenever the credential changes; the generator keeps no other state.
pub fn create_model(config: &Config) -> Result<Arc<dyn ContentGenerator>> {
    let model: Arc<dyn ContentGenerator> = match config.provider {
        Provider::Gemini => Arc::new(GeminiModel::new(config)?),
        Provider::Dummy => Arc::new(DummyModel::new()),
    };
    tracing::debug!("Created {} content generator", model.name());
    Ok(model)
}
