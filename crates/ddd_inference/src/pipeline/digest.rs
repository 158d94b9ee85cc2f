//! Tiers of the digest pipeline.

use async_trait::async_trait;
use ddd_core::{Article, ContentGenerator, DigestConfig, GenerationRequest, Result};
use tracing::debug;
use super::chain::{FallbackChain, Strategy};
use crate::{extract, normalize, prompts};

async fn request_articles(generator: &dyn ContentGenerator, request: GenerationRequest) -> Result<Vec<Article>> {
    let text = generator.generate(&request).await?;
    debug!("Received {} bytes of digest output", text.len());
    let value = extract::parse_json_payload(&text)?;
    normalize::normalize_articles(&value)
}

/// Fresh content honouring the date range, grounded in live search.
pub struct StrictSearch {
    prompt: String,
}

impl StrictSearch {
    pub fn new(config: &DigestConfig, preference_context: &str) -> Self {
        Self {
            prompt: prompts::strict_digest(config, preference_context),
        }
    }
}

#[async_trait]
impl Strategy<Vec<Article>> for StrictSearch {
    fn name(&self) -> &str {
        "grounded strict search"
    }

    async fn attempt(&self, generator: &dyn ContentGenerator) -> Result<Vec<Article>> {
        request_articles(generator, GenerationRequest::new(self.prompt.clone()).grounded()).await
    }
}

/// Timeless content with no date constraint, still grounded so links are real.
pub struct BroadSearch {
    prompt: String,
}

impl BroadSearch {
    pub fn new(config: &DigestConfig, preference_context: &str) -> Self {
        Self {
            prompt: prompts::broad_digest(config, preference_context),
        }
    }
}

#[async_trait]
impl Strategy<Vec<Article>> for BroadSearch {
    fn name(&self) -> &str {
        "grounded broad search"
    }

    async fn attempt(&self, generator: &dyn ContentGenerator) -> Result<Vec<Article>> {
        request_articles(generator, GenerationRequest::new(self.prompt.clone()).grounded()).await
    }
}

pub fn chain(config: &DigestConfig, preference_context: &str) -> FallbackChain<Vec<Article>> {
    FallbackChain::new()
        .then(StrictSearch::new(config, preference_context))
        .then(BroadSearch::new(config, preference_context))
}
