use ddd_core::{ListStore, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

pub mod backends;
pub mod credentials;
pub mod library;

pub use backends::*;
pub use library::Library;

const DATA_DIR_ENV: &str = "DDD_DATA_DIR";
const DEFAULT_DATA_DIR: &str = ".ddd";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StorageKind {
    Memory,
    #[default]
    File,
}

/// `DDD_DATA_DIR` when set, otherwise `./.ddd`.
pub fn default_data_dir() -> PathBuf {
    std::env::var(DATA_DIR_ENV)
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

pub async fn create_storage(kind: StorageKind, data_dir: Option<&Path>) -> Result<Arc<dyn ListStore>> {
    match kind {
        StorageKind::Memory => {
            info!("💾 Using in-memory storage, nothing will be persisted");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageKind::File => {
            let dir = data_dir.map(Path::to_path_buf).unwrap_or_else(default_data_dir);
            let storage = FileStorage::new(&dir).await?;
            info!("💾 Using file storage in {}", storage.dir().display());
            Ok(Arc::new(storage))
        }
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::credentials::{clear_api_key, load_api_key, save_api_key};
    pub use super::{create_storage, default_data_dir, Library, StorageKind};
}
