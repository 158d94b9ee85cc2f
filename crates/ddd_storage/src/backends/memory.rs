use async_trait::async_trait;
use ddd_core::{ListKey, ListStore, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local store; everything is lost on exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    lists: Arc<RwLock<HashMap<ListKey, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListStore for MemoryStorage {
    async fn load(&self, key: ListKey) -> Result<Option<String>> {
        let lists = self.lists.read().await;
        Ok(lists.get(&key).cloned())
    }

    async fn save(&self, key: ListKey, contents: String) -> Result<()> {
        let mut lists = self.lists.write().await;
        lists.insert(key, contents);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert!(storage.load(ListKey::Saved).await.unwrap().is_none());

        storage.save(ListKey::Saved, "[]".to_string()).await.unwrap();
        storage.save(ListKey::Saved, "[1]".to_string()).await.unwrap();

        assert_eq!(storage.load(ListKey::Saved).await.unwrap().as_deref(), Some("[1]"));
        assert!(storage.load(ListKey::Liked).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.save(ListKey::History, "[]".to_string()).await.unwrap();
        assert!(other.load(ListKey::History).await.unwrap().is_some());
    }
}
