use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No JSON payload in model output: {0}")]
    Extraction(String),

    #[error("Article does not match the expected shape: {}", .problems.join("; "))]
    Schema { problems: Vec<String> },

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    pub fn schema(problem: impl Into<String>) -> Self {
        Self::Schema { problems: vec![problem.into()] }
    }

    /// Credential problems are never recovered by falling back to weaker content.
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
