use std::sync::Arc;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;
use xt_core::{Error, NewsPage, NewsQuery, Result, SummaryRequest, SummaryResult};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

#[async_trait]
pub trait NewsFeed: Send + Sync {
    async fn fetch_news(&self, query: &NewsQuery) -> Result<NewsPage>;
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn request_summary(&self, request: &SummaryRequest) -> Result<SummaryResult>;
}

#[async_trait]
impl<T: NewsFeed + ?Sized> NewsFeed for Arc<T> {
    async fn fetch_news(&self, query: &NewsQuery) -> Result<NewsPage> {
        (**self).fetch_news(query).await
    }
}

#[async_trait]
impl<T: Summarizer + ?Sized> Summarizer for Arc<T> {
    async fn request_summary(&self, request: &SummaryRequest) -> Result<SummaryResult> {
        (**self).request_summary(request).await
    }
}

/// HTTP client for the X-Times backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| {
            Error::Configuration(format!("Invalid backend URL '{}': {}", base_url, e))
        })?;
        // Keep any path prefix when joining endpoints.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Configuration(format!("Invalid backend path '{}': {}", path, e)))
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_connect() || err.is_timeout() {
            Error::Network(format!(
                "Cannot reach backend at {}. Check that the backend URL points at a running server.",
                self.base_url
            ))
        } else {
            Error::Http(err)
        }
    }

    /// Decode a 2xx body, or turn the `{ error }` envelope into an upstream error.
    async fn decode<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} ({})", fallback, status.as_u16()));
        Err(Error::upstream(status.as_u16(), message))
    }
}

#[async_trait]
impl NewsFeed for BackendClient {
    async fn fetch_news(&self, query: &NewsQuery) -> Result<NewsPage> {
        let response = self
            .client
            .get(self.endpoint("api/news")?)
            .query(&[
                ("category", query.category.clone()),
                ("country", query.country.clone()),
                ("page", query.page.to_string()),
                ("pageSize", query.page_size.to_string()),
            ])
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::decode(response, "Server error").await
    }
}

#[async_trait]
impl Summarizer for BackendClient {
    async fn request_summary(&self, request: &SummaryRequest) -> Result<SummaryResult> {
        let response = self
            .client
            .post(self.endpoint("api/summarize")?)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let result: SummaryResult = Self::decode(response, "Request failed").await?;
        if result.bullets.is_empty() {
            return Err(Error::EmptyResponse(
                "No summary returned. Please try again.".to_string(),
            ));
        }
        Ok(result)
    }
}
