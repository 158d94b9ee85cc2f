//! The Gemini API key kept next to the lists in the data directory.

use ddd_core::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const KEY_FILE: &str = "ddd_api_key";

fn key_path(data_dir: &Path) -> PathBuf {
    data_dir.join(KEY_FILE)
}

/// The stored key, or `None` when none was saved or the file is blank.
pub async fn load_api_key(data_dir: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(key_path(data_dir)).await {
        Ok(contents) => {
            let key = contents.trim();
            Ok((!key.is_empty()).then(|| key.to_string()))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::Io(e)),
    }
}

pub async fn save_api_key(data_dir: &Path, key: &str) -> Result<()> {
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::Authorization("API key must not be empty".to_string()));
    }
    tokio::fs::create_dir_all(data_dir).await?;
    tokio::fs::write(key_path(data_dir), key).await?;
    Ok(())
}

/// Forgets the stored key. Clearing an absent key is not an error.
pub async fn clear_api_key(data_dir: &Path) -> Result<()> {
    match tokio::fs::remove_file(key_path(data_dir)).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Io(e)),
    }
}
