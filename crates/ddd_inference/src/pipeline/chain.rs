//! Ordered fallback strategies and the driver that walks them.

use async_trait::async_trait;
use ddd_core::{Article, ContentGenerator, Result};
use tracing::{error, info, warn};

/// Whether a strategy's result is good enough to stop the chain.
pub trait Usable {
    fn is_usable(&self) -> bool;
}

impl Usable for Vec<Article> {
    fn is_usable(&self) -> bool {
        !self.is_empty()
    }
}

impl Usable for Article {
    fn is_usable(&self) -> bool {
        true
    }
}

#[async_trait]
pub trait Strategy<T: Send>: Send + Sync {
    fn name(&self) -> &str;

    async fn attempt(&self, generator: &dyn ContentGenerator) -> Result<T>;
}

/// Tries each strategy in turn until one yields a usable result.
///
/// Authorization errors stop the chain and are returned as-is; every other
/// failure is logged and the next strategy runs.
pub struct FallbackChain<T: Send> {
    strategies: Vec<Box<dyn Strategy<T>>>,
}

impl<T: Usable + Send> FallbackChain<T> {
    pub fn new() -> Self {
        Self { strategies: Vec::new() }
    }

    pub fn then(mut self, strategy: impl Strategy<T> + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// `Ok(None)` when every strategy failed or came back empty.
    pub async fn run(&self, generator: &dyn ContentGenerator) -> Result<Option<T>> {
        let total = self.strategies.len();
        for (index, strategy) in self.strategies.iter().enumerate() {
            let tier = index + 1;
            match strategy.attempt(generator).await {
                Ok(value) if value.is_usable() => {
                    info!("Tier {}/{} ({}) succeeded", tier, total, strategy.name());
                    return Ok(Some(value));
                }
                Ok(_) => warn!("Tier {}/{} ({}) returned nothing usable", tier, total, strategy.name()),
                Err(e) if e.is_authorization() => {
                    error!("Tier {}/{} ({}) was not authorized: {}", tier, total, strategy.name(), e);
                    return Err(e);
                }
                Err(e) => warn!("Tier {}/{} ({}) failed: {}", tier, total, strategy.name(), e),
            }
        }
        Ok(None)
    }

    /// Like `run`, resolving exhaustion with `terminal` instead of `None`.
    pub async fn run_or_else(&self, generator: &dyn ContentGenerator, terminal: impl FnOnce() -> T) -> Result<T> {
        match self.run(generator).await? {
            Some(value) => Ok(value),
            None => Ok(terminal()),
        }
    }
}

impl<T: Usable + Send> Default for FallbackChain<T> {
    fn default() -> Self {
        Self::new()
    }
}
