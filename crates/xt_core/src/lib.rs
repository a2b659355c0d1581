pub mod error;
pub mod models;
pub mod sources;
pub mod storage;
pub mod types;

pub use error::Error;
pub use models::SummaryModel;
pub use sources::HeadlinesSource;
pub use storage::BookmarkStorage;
pub use types::{
    Article, BookmarkRecord, NewsPage, NewsQuery, SummaryRequest, SummaryResult, User,
};

pub type Result<T> = std::result::Result<T, Error>;
