use async_trait::async_trait;
use ddd_core::{Error, ListKey, ListStore, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One `ddd_<list>.json` file per list inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub async fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| Error::Storage(format!("Failed to create data directory {}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: ListKey) -> PathBuf {
        self.dir.join(format!("ddd_{}.json", key))
    }
}

#[async_trait]
impl ListStore for FileStorage {
    async fn load(&self, key: ListKey) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    async fn save(&self, key: ListKey, contents: String) -> Result<()> {
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, contents).await?;
        tokio::fs::rename(&staging, &path).await?;
        Ok(())
    }
}
