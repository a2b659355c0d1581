use async_trait::async_trait;
use tokio::sync::RwLock;
use xt_core::{BookmarkRecord, BookmarkStorage, Result};

/// Volatile storage, `None` until something is saved.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entry: RwLock<Option<Vec<BookmarkRecord>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_persisted(&self) -> bool {
        self.entry.read().await.is_some()
    }
}

#[async_trait]
impl BookmarkStorage for MemoryStorage {
    async fn load(&self) -> Result<Vec<BookmarkRecord>> {
        Ok(self.entry.read().await.clone().unwrap_or_default())
    }

    async fn save(&self, bookmarks: &[BookmarkRecord]) -> Result<()> {
        *self.entry.write().await = Some(bookmarks.to_vec());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.entry.write().await = None;
        Ok(())
    }
}
