use std::path::PathBuf;
use std::sync::Arc;
use xt_core::{BookmarkStorage, Error, Result};

pub mod backends;
pub mod store;

pub use backends::*;
pub use store::BookmarkStore;

/// Storage key the bookmark sequence is persisted under.
pub const BOOKMARKS_KEY: &str = "x-times-bookmarks";

/// Build a bookmark backend by name: `memory`, or `file` rooted at `path`.
pub fn create_storage(kind: &str, path: Option<PathBuf>) -> Result<Arc<dyn BookmarkStorage>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryStorage::new())),
        "file" => {
            let path = path.ok_or_else(|| {
                Error::Configuration("file storage requires a path".to_string())
            })?;
            Ok(Arc::new(FileStorage::new(path)))
        }
        other => Err(Error::Configuration(format!(
            "Unknown storage backend '{}'. Available backends: memory, file",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::store::BookmarkStore;
    pub use super::create_storage;
}
