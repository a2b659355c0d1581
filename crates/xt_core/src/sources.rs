use async_trait::async_trait;
use crate::types::{NewsPage, NewsQuery};
use crate::Result;

#[async_trait]
pub trait HeadlinesSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch one page of articles for the given query
    async fn fetch_page(&self, query: &NewsQuery) -> Result<NewsPage>;
}
