pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::{ContentGenerator, GenerationRequest};
pub use storage::{ListKey, ListStore};
pub use types::*;
