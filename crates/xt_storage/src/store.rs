use std::sync::Arc;
use tracing::info;
use xt_core::{BookmarkRecord, BookmarkStorage, Result};

/// Ordered, url-keyed bookmark list on top of a storage backend.
///
/// Every operation is a read-modify-write of the whole persisted sequence.
/// Callers are expected to serialize operations, as UI event handlers are.
#[derive(Clone)]
pub struct BookmarkStore {
    storage: Arc<dyn BookmarkStorage>,
}

impl BookmarkStore {
    pub fn new(storage: Arc<dyn BookmarkStorage>) -> Self {
        Self { storage }
    }

    pub async fn list(&self) -> Result<Vec<BookmarkRecord>> {
        self.storage.load().await
    }

    pub async fn len(&self) -> Result<usize> {
        Ok(self.list().await?.len())
    }

    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    pub async fn contains(&self, url: &str) -> Result<bool> {
        Ok(self.list().await?.iter().any(|b| b.url == url))
    }

    /// Prepend the record unless its url is already saved. Returns whether it was added.
    pub async fn add(&self, record: BookmarkRecord) -> Result<bool> {
        let mut bookmarks = self.list().await?;
        if bookmarks.iter().any(|b| b.url == record.url) {
            return Ok(false);
        }
        info!("Bookmarking {}", record.url);
        bookmarks.insert(0, record);
        self.storage.save(&bookmarks).await?;
        Ok(true)
    }

    /// Drop every record with this url. Returns whether anything was removed.
    pub async fn remove(&self, url: &str) -> Result<bool> {
        let bookmarks = self.list().await?;
        let before = bookmarks.len();
        let remaining: Vec<_> = bookmarks.into_iter().filter(|b| b.url != url).collect();
        if remaining.len() == before {
            return Ok(false);
        }
        info!("Removing bookmark {}", url);
        self.storage.save(&remaining).await?;
        Ok(true)
    }

    /// Add when absent, remove when present. Returns whether the url is now bookmarked.
    pub async fn toggle(&self, record: BookmarkRecord) -> Result<bool> {
        if self.contains(&record.url).await? {
            self.remove(&record.url).await?;
            Ok(false)
        } else {
            self.add(record).await
        }
    }

    pub async fn clear(&self) -> Result<()> {
        info!("Clearing all bookmarks");
        self.storage.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryStorage;
    use chrono::Utc;

    fn record(url: &str) -> BookmarkRecord {
        BookmarkRecord {
            title: format!("Story at {}", url),
            description: "Something happened".to_string(),
            image_url: None,
            url: url.to_string(),
            author: Some("Reporter".to_string()),
            date: Some(Utc::now()),
            source: Some("Wire".to_string()),
        }
    }

    fn urls(records: &[BookmarkRecord]) -> Vec<&str> {
        records.iter().map(|b| b.url.as_str()).collect()
    }

    #[tokio::test]
    async fn test_add_prepends() {
        let store = BookmarkStore::new(Arc::new(MemoryStorage::new()));
        assert!(store.add(record("https://a.test")).await.unwrap());
        assert!(store.add(record("https://b.test")).await.unwrap());

        let list = store.list().await.unwrap();
        assert_eq!(urls(&list), vec!["https://b.test", "https://a.test"]);
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let store = BookmarkStore::new(Arc::new(MemoryStorage::new()));
        assert!(store.add(record("https://a.test")).await.unwrap());
        assert!(!store.add(record("https://a.test")).await.unwrap());

        let list = store.list().await.unwrap();
        assert_eq!(list.iter().filter(|b| b.url == "https://a.test").count(), 1);
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let storage = Arc::new(MemoryStorage::new());
        let store = BookmarkStore::new(storage.clone());
        store.add(record("https://a.test")).await.unwrap();
        store.add(record("https://b.test")).await.unwrap();
        let before = store.list().await.unwrap();

        assert!(!store.remove("https://missing.test").await.unwrap());
        assert_eq!(store.list().await.unwrap(), before);

        assert!(store.remove("https://a.test").await.unwrap());
        assert_eq!(urls(&store.list().await.unwrap()), vec!["https://b.test"]);
    }

    #[tokio::test]
    async fn test_toggle_and_contains() {
        let store = BookmarkStore::new(Arc::new(MemoryStorage::new()));
        assert!(!store.contains("https://a.test").await.unwrap());
        assert!(store.toggle(record("https://a.test")).await.unwrap());
        assert!(store.contains("https://a.test").await.unwrap());
        assert!(!store.toggle(record("https://a.test")).await.unwrap());
        assert!(store.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_drops_entry() {
        let storage = Arc::new(MemoryStorage::new());
        let store = BookmarkStore::new(storage.clone());
        store.add(record("https://a.test")).await.unwrap();
        assert!(storage.is_persisted().await);

        store.clear().await.unwrap();
        assert!(!storage.is_persisted().await);
        assert_eq!(store.len().await.unwrap(), 0);
    }
}
