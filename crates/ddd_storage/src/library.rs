//! History and preference lists kept on top of a `ListStore`.

use ddd_core::{Article, DigestConfig, DigestHistoryItem, ListKey, ListStore, Rating, Result, UserPreferences};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Every list is ordered most recent first and keyed by article url.
pub struct Library {
    store: Arc<dyn ListStore>,
    // Serializes read-modify-write cycles on the lists.
    write_lock: Mutex<()>,
}

impl Library {
    pub fn new(store: Arc<dyn ListStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Corrupt data reads as an empty list; a failing store is an error.
    async fn read_list<T: DeserializeOwned>(&self, key: ListKey) -> Result<Vec<T>> {
        match self.store.load(key).await? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(items) => Ok(items),
                Err(e) => {
                    warn!("Ignoring corrupt {} list: {}", key, e);
                    Ok(Vec::new())
                }
            },
            None => Ok(Vec::new()),
        }
    }

    /// Like `read_list`, but an unreadable list also comes back empty. Only
    /// for reads that never write back.
    async fn load_list<T: DeserializeOwned>(&self, key: ListKey) -> Vec<T> {
        self.read_list(key).await.unwrap_or_else(|e| {
            warn!("Failed to load {} list: {}", key, e);
            Vec::new()
        })
    }

    async fn save_list<T: Serialize>(&self, key: ListKey, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        debug!("Saving {} {} entries", items.len(), key);
        self.store.save(key, raw).await
    }

    pub async fn history(&self) -> Vec<DigestHistoryItem> {
        self.load_list(ListKey::History).await
    }

    pub async fn find_history(&self, id: &str) -> Option<DigestHistoryItem> {
        self.history().await.into_iter().find(|item| item.id() == id)
    }

    pub async fn record_digest(&self, config: &DigestConfig, articles: &[Article]) -> Result<DigestHistoryItem> {
        self.record(DigestHistoryItem::feed(config.clone(), articles.to_vec())).await
    }

    pub async fn record_analysis(&self, article: &Article) -> Result<DigestHistoryItem> {
        self.record(DigestHistoryItem::url(article.clone())).await
    }

    async fn record(&self, item: DigestHistoryItem) -> Result<DigestHistoryItem> {
        let _guard = self.write_lock.lock().await;
        let mut history: Vec<DigestHistoryItem> = self.read_list(ListKey::History).await?;
        history.insert(0, item.clone());
        self.save_list(ListKey::History, &history).await?;
        Ok(item)
    }

    pub async fn saved(&self) -> Vec<Article> {
        self.load_list(ListKey::Saved).await
    }

    pub async fn liked(&self) -> Vec<Article> {
        self.load_list(ListKey::Liked).await
    }

    pub async fn disliked(&self) -> Vec<Article> {
        self.load_list(ListKey::Disliked).await
    }

    pub async fn preferences(&self) -> UserPreferences {
        UserPreferences {
            liked: self.liked().await,
            disliked: self.disliked().await,
        }
    }

    /// Saves the article, or removes it when it was already saved. Returns whether
    /// it is now saved.
    pub async fn toggle_save(&self, article: &Article) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut saved: Vec<Article> = self.read_list(ListKey::Saved).await?;

        let now_saved = if saved.iter().any(|a| a.url == article.url) {
            saved.retain(|a| a.url != article.url);
            false
        } else {
            saved.insert(0, article.clone());
            true
        };

        self.save_list(ListKey::Saved, &saved).await?;
        Ok(now_saved)
    }

    /// Moves the article to the liked or disliked list, or clears its rating with `None`.
    pub async fn rate(&self, article: &Article, rating: Option<Rating>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut liked: Vec<Article> = self.read_list(ListKey::Liked).await?;
        let mut disliked: Vec<Article> = self.read_list(ListKey::Disliked).await?;

        liked.retain(|a| a.url != article.url);
        disliked.retain(|a| a.url != article.url);

        // The list losing the article is always written first.
        match rating {
            Some(Rating::Up) => {
                liked.insert(0, article.clone());
                self.save_list(ListKey::Disliked, &disliked).await?;
                self.save_list(ListKey::Liked, &liked).await
            }
            Some(Rating::Down) => {
                disliked.insert(0, article.clone());
                self.save_list(ListKey::Liked, &liked).await?;
                self.save_list(ListKey::Disliked, &disliked).await
            }
            None => {
                self.save_list(ListKey::Liked, &liked).await?;
                self.save_list(ListKey::Disliked, &disliked).await
            }
        }
    }

    pub async fn rating(&self, url: &str) -> Option<Rating> {
        if self.liked().await.iter().any(|a| a.url == url) {
            Some(Rating::Up)
        } else if self.disliked().await.iter().any(|a| a.url == url) {
            Some(Rating::Down)
        } else {
            None
        }
    }

    pub async fn is_saved(&self, url: &str) -> bool {
        self.saved().await.iter().any(|a| a.url == url)
    }

    /// Looks an article up by url in history first, then in the saved list.
    pub async fn find_article(&self, url: &str) -> Option<Article> {
        let from_history = self
            .history()
            .await
            .into_iter()
            .flat_map(|item| item.articles().to_vec())
            .find(|a| a.url == url);

        match from_history {
            Some(article) => Some(article),
            None => self.saved().await.into_iter().find(|a| a.url == url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryStorage;
    use async_trait::async_trait;
    use ddd_core::{ArticleType, DateRange, DigestOrigin, Error, ExperienceLevel, Topic};
    use std::sync::Mutex as StdMutex;

    /// Memory store whose loads or saves can be made to fail.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_loads: StdMutex<bool>,
        fail_save_of: StdMutex<Option<ListKey>>,
    }

    #[async_trait]
    impl ListStore for FlakyStorage {
        async fn load(&self, key: ListKey) -> Result<Option<String>> {
            if *self.fail_loads.lock().unwrap() {
                return Err(Error::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")));
            }
            self.inner.load(key).await
        }

        async fn save(&self, key: ListKey, contents: String) -> Result<()> {
            if *self.fail_save_of.lock().unwrap() == Some(key) {
                return Err(Error::Storage(format!("{} is read-only", key)));
            }
            self.inner.save(key, contents).await
        }
    }

    fn article(url: &str) -> Article {
        Article {
            id: url.to_string(),
            title: format!("Title for {}", url),
            author: "Author".to_string(),
            source: "Source".to_string(),
            kind: ArticleType::Article,
            category: "Research".to_string(),
            url: url.to_string(),
            summary: vec!["Summary.".to_string()],
            insights: vec![],
            application_tips: vec![],
            tweet_draft: None,
        }
    }

    fn library() -> (MemoryStorage, Library) {
        let storage = MemoryStorage::new();
        let library = Library::new(Arc::new(storage.clone()));
        (storage, library)
    }

    #[tokio::test]
    async fn test_history_is_most_recent_first() {
        let (_, library) = library();
        let config = DigestConfig::new(ExperienceLevel::Junior, [Topic::Research], DateRange::AnyTime);

        let first = library.record_digest(&config, &[article("https://a.test/1")]).await.unwrap();
        let second = library.record_analysis(&article("https://a.test/2")).await.unwrap();

        let history = library.history().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id(), second.id());
        assert_eq!(history[0].origin(), DigestOrigin::Url);
        assert_eq!(history[1].id(), first.id());
        assert_eq!(history[1].config(), Some(&config));

        assert_eq!(library.find_history(first.id()).await, Some(first));
        assert!(library.find_history("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_toggle_save_adds_then_removes() {
        let (_, library) = library();
        let a = article("https://a.test/1");
        let b = article("https://a.test/2");

        assert!(library.toggle_save(&a).await.unwrap());
        assert!(library.toggle_save(&b).await.unwrap());
        let urls: Vec<String> = library.saved().await.into_iter().map(|a| a.url).collect();
        assert_eq!(urls, vec!["https://a.test/2", "https://a.test/1"]);

        let mut same_url = a.clone();
        same_url.id = "different-id".to_string();
        assert!(!library.toggle_save(&same_url).await.unwrap());
        assert!(!library.is_saved(&a.url).await);
        assert!(library.is_saved(&b.url).await);
    }

    #[tokio::test]
    async fn test_rating_moves_between_lists() {
        let (_, library) = library();
        let a = article("https://a.test/1");

        library.rate(&a, Some(Rating::Up)).await.unwrap();
        assert_eq!(library.rating(&a.url).await, Some(Rating::Up));

        library.rate(&a, Some(Rating::Down)).await.unwrap();
        assert_eq!(library.rating(&a.url).await, Some(Rating::Down));
        assert!(library.liked().await.is_empty());

        library.rate(&a, None).await.unwrap();
        assert_eq!(library.rating(&a.url).await, None);
        assert!(library.preferences().await.is_empty());
    }

    #[tokio::test]
    async fn test_preferences_are_most_recent_first() {
        let (_, library) = library();
        library.rate(&article("https://a.test/old"), Some(Rating::Up)).await.unwrap();
        library.rate(&article("https://a.test/new"), Some(Rating::Up)).await.unwrap();

        let prefs = library.preferences().await;
        assert_eq!(prefs.liked[0].url, "https://a.test/new");
        assert_eq!(prefs.liked[1].url, "https://a.test/old");
    }

    #[tokio::test]
    async fn test_corrupt_list_loads_as_empty() {
        let (storage, library) = library();
        storage.save(ListKey::History, "{not json".to_string()).await.unwrap();
        storage.save(ListKey::Saved, "{\"an\": \"object\"}".to_string()).await.unwrap();

        assert!(library.history().await.is_empty());
        assert!(library.saved().await.is_empty());

        library.record_analysis(&article("https://a.test/1")).await.unwrap();
        assert_eq!(library.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_find_article_searches_history_then_saved() {
        let (_, library) = library();
        library.record_analysis(&article("https://a.test/seen")).await.unwrap();
        library.toggle_save(&article("https://a.test/kept")).await.unwrap();

        assert!(library.find_article("https://a.test/seen").await.is_some());
        assert!(library.find_article("https://a.test/kept").await.is_some());
        assert!(library.find_article("https://a.test/never").await.is_none());
    }

    #[tokio::test]
    async fn test_unreadable_store_does_not_overwrite_lists() {
        let storage = Arc::new(FlakyStorage::default());
        let library = Library::new(storage.clone());
        for i in 0..3 {
            library.record_analysis(&article(&format!("https://a.test/{}", i))).await.unwrap();
        }
        library.toggle_save(&article("https://a.test/0")).await.unwrap();
        library.rate(&article("https://a.test/1"), Some(Rating::Up)).await.unwrap();

        *storage.fail_loads.lock().unwrap() = true;
        assert!(library.history().await.is_empty());
        assert!(library.record_analysis(&article("https://a.test/new")).await.is_err());
        assert!(library.toggle_save(&article("https://a.test/new")).await.is_err());
        assert!(library.rate(&article("https://a.test/new"), Some(Rating::Down)).await.is_err());

        *storage.fail_loads.lock().unwrap() = false;
        assert_eq!(library.history().await.len(), 3);
        assert_eq!(library.saved().await.len(), 1);
        assert_eq!(library.liked().await.len(), 1);
        assert!(library.disliked().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_rating_never_leaves_article_in_both_lists() {
        let storage = Arc::new(FlakyStorage::default());
        let library = Library::new(storage.clone());
        let a = article("https://a.test/1");
        library.rate(&a, Some(Rating::Up)).await.unwrap();

        *storage.fail_save_of.lock().unwrap() = Some(ListKey::Disliked);
        assert!(library.rate(&a, Some(Rating::Down)).await.is_err());
        assert!(library.liked().await.is_empty());
        assert!(library.disliked().await.is_empty());

        *storage.fail_save_of.lock().unwrap() = None;
        library.rate(&a, Some(Rating::Down)).await.unwrap();
        *storage.fail_save_of.lock().unwrap() = Some(ListKey::Liked);
        assert!(library.rate(&a, Some(Rating::Up)).await.is_err());
        assert_eq!(library.rating(&a.url).await, None);
    }
}
