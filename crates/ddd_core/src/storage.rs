use async_trait::async_trait;
use std::fmt;
use crate::Result;

/// The four persisted lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKey {
    History,
    Saved,
    Liked,
    Disliked,
}

impl ListKey {
    pub const ALL: [ListKey; 4] = [ListKey::History, ListKey::Saved, ListKey::Liked, ListKey::Disliked];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Saved => "saved",
            Self::Liked => "liked",
            Self::Disliked => "disliked",
        }
    }
}

impl fmt::Display for ListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[async_trait]
pub trait ListStore: Send + Sync {
    /// Load the serialized list, `None` when nothing was ever saved under `key`.
    async fn load(&self, key: ListKey) -> Result<Option<String>>;

    /// Replace the serialized list stored under `key`.
    async fn save(&self, key: ListKey, contents: String) -> Result<()>;
}
