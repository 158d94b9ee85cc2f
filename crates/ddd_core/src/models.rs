use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use crate::Result;

/// One call to the content-retrieval capability.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Ask the capability to ground its answer in live web search results.
    pub grounded: bool,
    /// Constrain the answer to this JSON schema (structured-output mode).
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            grounded: false,
            response_schema: None,
        }
    }

    pub fn grounded(mut self) -> Self {
        self.grounded = true;
        self
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

#[async_trait]
pub trait ContentGenerator: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Returns the raw text of the model answer.
    ///
    /// Credential problems must surface as `Error::Authorization`, every other
    /// service failure as `Error::Retrieval` or `Error::Http`.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}
