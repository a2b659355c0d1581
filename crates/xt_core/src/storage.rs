use async_trait::async_trait;
use crate::types::BookmarkRecord;
use crate::Result;

/// Read-all/write-all access to the persisted, ordered bookmark sequence.
#[async_trait]
pub trait BookmarkStorage: Send + Sync {
    /// Load the stored sequence, empty if nothing was ever saved
    async fn load(&self) -> Result<Vec<BookmarkRecord>>;

    /// Replace the stored sequence
    async fn save(&self, bookmarks: &[BookmarkRecord]) -> Result<()>;

    /// Drop the persisted entry entirely
    async fn clear(&self) -> Result<()>;
}
