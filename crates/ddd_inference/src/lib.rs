use std::fmt;
use std::time::Duration;

pub mod extract;
pub mod fallback;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod preferences;
pub mod prompts;

/// Which content generator backs the pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Provider {
    #[default]
    Gemini,
    /// Offline generator; every request falls through to the bundled content.
    Dummy,
}

#[derive(Clone, Default)]
pub struct Config {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout: Option<Duration>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    /// Reads `GEMINI_API_KEY` (or `API_KEY`), `DDD_PROVIDER`, `DDD_MODEL` and
    /// `DDD_GEMINI_BASE_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let provider = match non_empty("DDD_PROVIDER").as_deref() {
            Some("dummy") | Some("offline") => Provider::Dummy,
            Some("gemini") | None => Provider::Gemini,
            Some(other) => {
                tracing::warn!("Unknown DDD_PROVIDER {:?}, using gemini", other);
                Provider::Gemini
            }
        };

        Self {
            provider,
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            model_name: non_empty("DDD_MODEL"),
            base_url: non_empty("DDD_GEMINI_BASE_URL"),
            request_timeout: None,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.trim().is_empty())
    }
}

pub mod prelude {
    pub use super::{Config, Provider};
    pub use super::models::create_model;
    pub use super::pipeline::Pipeline;
    pub use ddd_core::{Article, DigestConfig, Error, Result, UserPreferences};
}

pub use models::create_model;
pub use pipeline::Pipeline;
