use std::sync::Arc;
use ddd_core::{Article, ContentGenerator, DigestConfig, Result, UserPreferences};
use tracing::{error, info};
use crate::{fallback, preferences};

pub mod chain;
pub mod digest;
pub mod analysis;

pub use chain::{FallbackChain, Strategy, Usable};

/// Entry point for digest generation and URL analysis.
///
/// Holds no mutable state; concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct Pipeline {
    generator: Arc<dyn ContentGenerator>,
}

impl Pipeline {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    /// Never returns an empty list. The only error is `Error::Authorization`.
    pub async fn generate_digest(&self, config: &DigestConfig, prefs: Option<&UserPreferences>) -> Result<Vec<Article>> {
        info!(
            "Generating digest ({}, {}, {} topics)",
            config.level,
            config.date_range,
            config.topics().len()
        );
        let context = preferences::build_context(prefs);

        digest::chain(config, &context)
            .run_or_else(self.generator.as_ref(), || {
                error!("All generation tiers failed, serving bundled articles");
                fallback::fallback_articles()
            })
            .await
    }

    /// Always yields a renderable article for `url`. The only error is `Error::Authorization`.
    pub async fn analyze_url(&self, url: &str) -> Result<Article> {
        info!("Analyzing {}", url);

        analysis::chain(url)
            .run_or_else(self.generator.as_ref(), || {
                error!("All analysis tiers failed for {}", url);
                fallback::unavailable_article(url)
            })
            .await
    }
}
