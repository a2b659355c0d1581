//! Browser-side behavior of X-Times: talking to the backend, infinite-scroll
//! pagination, the summary panel and the sign-in session.

pub mod api;
pub mod auth;
pub mod pagination;
pub mod summary;

pub use api::{BackendClient, NewsFeed, Summarizer, DEFAULT_BACKEND_URL};
pub use auth::{AuthSession, IdentityProvider};
pub use pagination::{FeedState, Pagination};
pub use summary::{SummaryPanel, SummaryState};

pub mod prelude {
    pub use super::api::{BackendClient, NewsFeed, Summarizer};
    pub use super::auth::{AuthSession, IdentityProvider};
    pub use super::pagination::{FeedState, Pagination};
    pub use super::summary::{SummaryPanel, SummaryState};
    pub use xt_core::{Article, Error, NewsPage, NewsQuery, Result, SummaryRequest, SummaryResult, User};
}
