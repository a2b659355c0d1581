use tracing::{debug, error};
use xt_core::{Article, Error, NewsQuery};
use crate::api::NewsFeed;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Idle,
    LoadingFirstPage,
    Ready,
    LoadingMore,
    /// First page failed; `unreachable` separates a dead backend from a failed request.
    Failed { message: String, unreachable: bool },
}

/// Holds `state` at a loading value for the duration of a request and puts
/// it back to `settled` when dropped, including when the request future is
/// abandoned mid-await.
struct LoadingGuard<'a> {
    state: &'a mut FeedState,
    settled: Option<FeedState>,
}

impl<'a> LoadingGuard<'a> {
    fn enter(state: &'a mut FeedState, loading: FeedState, settled: FeedState) -> Self {
        *state = loading;
        Self {
            state,
            settled: Some(settled),
        }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Some(settled) = self.settled.take() {
            *self.state = settled;
        }
    }
}

/// Infinite-scroll article list for one category at a time.
///
/// Pages are appended in arrival order. `&mut self` on every loader keeps
/// calls on one list sequential.
pub struct Pagination<F> {
    feed: F,
    category: String,
    country: String,
    page_size: u32,
    articles: Vec<Article>,
    page: u32,
    total_results: u64,
    state: FeedState,
}

impl<F: NewsFeed> Pagination<F> {
    pub fn new(feed: F, country: impl Into<String>, page_size: u32) -> Self {
        Self {
            feed,
            category: NewsQuery::default().category,
            country: country.into(),
            page_size,
            articles: Vec::new(),
            page: 0,
            total_results: 0,
            state: FeedState::Idle,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Last successfully loaded page, 0 before the first load.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    pub fn has_more(&self) -> bool {
        (self.articles.len() as u64) < self.total_results
    }

    fn query(&self, page: u32) -> NewsQuery {
        NewsQuery {
            category: self.category.clone(),
            country: self.country.clone(),
            page,
            page_size: self.page_size,
        }
    }

    /// Switch category, discarding whatever was loaded.
    pub async fn select_category(&mut self, category: impl Into<String>) -> &FeedState {
        self.category = category.into();
        self.load_first_page().await
    }

    /// Re-request page 1 of the current category.
    pub async fn retry(&mut self) -> &FeedState {
        self.load_first_page().await
    }

    async fn load_first_page(&mut self) -> &FeedState {
        self.articles.clear();
        self.total_results = 0;
        self.page = 0;

        let query = self.query(1);
        let result = {
            let _loading =
                LoadingGuard::enter(&mut self.state, FeedState::LoadingFirstPage, FeedState::Idle);
            self.feed.fetch_news(&query).await
        };

        match result {
            Ok(page) => {
                debug!(
                    "Loaded {} of {} {} articles",
                    page.articles.len(),
                    page.total_results,
                    self.category
                );
                self.articles = page.articles;
                self.total_results = page.total_results;
                self.page = 1;
                self.state = FeedState::Ready;
            }
            Err(e) => {
                self.state = FeedState::Failed {
                    unreachable: matches!(e, Error::Network(_)),
                    message: e.to_string(),
                };
            }
        }
        &self.state
    }

    /// Append the next page. Failures are logged and leave the list untouched.
    ///
    /// Returns whether anything was appended.
    pub async fn load_more(&mut self) -> bool {
        if self.state != FeedState::Ready || !self.has_more() {
            return false;
        }
        let next_page = self.page + 1;
        let query = self.query(next_page);
        let result = {
            let _loading =
                LoadingGuard::enter(&mut self.state, FeedState::LoadingMore, FeedState::Ready);
            self.feed.fetch_news(&query).await
        };

        match result {
            Ok(page) if !page.articles.is_empty() => {
                self.articles.extend(page.articles);
                self.page = next_page;
                self.total_results = page.total_results;
                true
            }
            Ok(_) => false,
            Err(e) => {
                error!("Failed to load page {} of {}: {}", next_page, self.category, e);
                false
            }
        }
    }
}
