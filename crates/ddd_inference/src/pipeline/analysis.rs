//! Tiers of the URL analysis pipeline.

use async_trait::async_trait;
use ddd_core::{Article, ContentGenerator, GenerationRequest, Result, INFERENCE_SOURCE};
use tracing::debug;
use super::chain::{FallbackChain, Strategy};
use crate::{extract, normalize, prompts};

async fn request_article(generator: &dyn ContentGenerator, request: GenerationRequest, url: &str) -> Result<Article> {
    let text = generator.generate(&request).await?;
    debug!("Received {} bytes of analysis output for {}", text.len(), url);
    let value = extract::parse_json_payload(&text)?;
    normalize::normalize_article(&value, Some(url))
}

/// Reads the page through live search.
pub struct GroundedAnalysis {
    url: String,
}

impl GroundedAnalysis {
    pub fn new(url: &str) -> Self {
        Self { url: url.to_string() }
    }
}

#[async_trait]
impl Strategy<Article> for GroundedAnalysis {
    fn name(&self) -> &str {
        "grounded analysis"
    }

    async fn attempt(&self, generator: &dyn ContentGenerator) -> Result<Article> {
        let request = GenerationRequest::new(prompts::grounded_analysis(&self.url)).grounded();
        request_article(generator, request, &self.url).await
    }
}

/// Guesses the content from the address alone.
///
/// The source is always relabelled as inferred, whatever the model wrote. No
/// search tool is involved, so the answer can be held to the response schema.
pub struct InferredAnalysis {
    url: String,
}

impl InferredAnalysis {
    pub fn new(url: &str) -> Self {
        Self { url: url.to_string() }
    }
}

#[async_trait]
impl Strategy<Article> for InferredAnalysis {
    fn name(&self) -> &str {
        "inferred analysis"
    }

    async fn attempt(&self, generator: &dyn ContentGenerator) -> Result<Article> {
        let request = GenerationRequest::new(prompts::inference_analysis(&self.url))
            .with_schema(prompts::article_schema());
        let mut article = request_article(generator, request, &self.url).await?;
        article.source = INFERENCE_SOURCE.to_string();
        Ok(article)
    }
}

pub fn chain(url: &str) -> FallbackChain<Article> {
    FallbackChain::new()
        .then(GroundedAnalysis::new(url))
        .then(InferredAnalysis::new(url))
}
