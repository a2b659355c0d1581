use std::fmt;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use xt_core::{Error, HeadlinesSource, NewsPage, NewsQuery, Result};
use crate::normalize::{normalize_page, Envelope};

const NEWSAPI_BASE_URL: &str = "https://newsapi.org/v2";
const SEARCH_TERM: &str = "anime";
const USER_AGENT: &str = concat!("x-times/", env!("CARGO_PKG_VERSION"));

/// Endpoint and query parameters for one upstream call.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub endpoint: &'static str,
    pub params: Vec<(&'static str, String)>,
}

impl UpstreamRequest {
    /// The search category goes to full-text search and ignores the country.
    pub fn for_query(query: &NewsQuery) -> Self {
        let paging = [
            ("page", query.page.to_string()),
            ("pageSize", query.page_size.to_string()),
        ];

        if query.is_search() {
            let mut params = vec![("q", SEARCH_TERM.to_string())];
            params.extend(paging);
            return Self {
                endpoint: "everything",
                params,
            };
        }

        let mut params = vec![
            ("country", query.country.clone()),
            ("category", query.category.clone()),
        ];
        params.extend(paging);
        Self {
            endpoint: "top-headlines",
            params,
        }
    }
}

pub struct NewsApiSource {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsApiSource {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.is_empty()),
            base_url: NEWSAPI_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for NewsApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiSource")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl HeadlinesSource for NewsApiSource {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch_page(&self, query: &NewsQuery) -> Result<NewsPage> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::Configuration("News API key not configured on server".to_string())
        })?;

        let request = UpstreamRequest::for_query(query);
        debug!("Fetching {} with {:?}", request.endpoint, request.params);

        let response = self
            .client
            .get(format!("{}/{}", self.base_url.trim_end_matches('/'), request.endpoint))
            .header("X-Api-Key", api_key)
            .query(&request.params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let envelope: Envelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => Envelope::default(),
            Err(e) => return Err(e.into()),
        };

        if !status.is_success() || envelope.is_error() {
            // An error envelope on a 2xx still counts as a failed upstream call.
            let code = if status.is_success() { 502 } else { status.as_u16() };
            let message = envelope
                .message
                .unwrap_or_else(|| format!("News API error ({})", status.as_u16()));
            warn!(
                "News API request failed with {} ({}): {}",
                code,
                envelope.code.as_deref().unwrap_or("unknown"),
                message
            );
            return Err(Error::upstream(code, message));
        }

        Ok(normalize_page(envelope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn source(base_url: String) -> NewsApiSource {
        NewsApiSource::new(Some("news-key".to_string()))
            .unwrap()
            .with_base_url(base_url)
    }

    #[test]
    fn test_search_category_ignores_country() {
        let mut query = NewsQuery::new("anime").with_page(3);
        query.country = "jp".to_string();
        let request = UpstreamRequest::for_query(&query);

        assert_eq!(request.endpoint, "everything");
        assert_eq!(
            request.params,
            vec![
                ("q", "anime".to_string()),
                ("page", "3".to_string()),
                ("pageSize", "12".to_string()),
            ]
        );
    }

    #[test]
    fn test_top_headlines_query() {
        let request = UpstreamRequest::for_query(&NewsQuery::new("business"));
        assert_eq!(request.endpoint, "top-headlines");
        assert!(request.params.contains(&("country", "us".to_string())));
        assert!(request.params.contains(&("category", "business".to_string())));
    }

    #[tokio::test]
    async fn test_fetch_page() {
        let router = Router::new().route(
            "/top-headlines",
            get(|headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(headers["x-api-key"], "news-key");
                assert_eq!(params["category"], "science");
                Json(json!({
                    "status": "ok",
                    "totalResults": 2,
                    "articles": [
                        { "title": "Comet spotted", "url": "https://news.test/comet", "source": { "name": "Sky" } },
                        { "title": "No url" }
                    ]
                }))
            }),
        );
        let base_url = spawn_upstream(router).await;

        let page = source(base_url).fetch_page(&NewsQuery::new("science")).await.unwrap();
        assert_eq!(page.total_results, 2);
        assert_eq!(page.articles.len(), 1);
        assert_eq!(page.articles[0].source_name, "Sky");
    }

    #[tokio::test]
    async fn test_upstream_error_envelope() {
        let router = Router::new().route(
            "/top-headlines",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid." })),
                )
            }),
        );
        let base_url = spawn_upstream(router).await;

        match source(base_url).fetch_page(&NewsQuery::default()).await {
            Err(Error::Upstream { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Your API key is invalid.");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_envelope_on_success_status() {
        let router = Router::new().route(
            "/everything",
            get(|| async { Json(json!({ "status": "error", "message": "rate limited" })) }),
        );
        let base_url = spawn_upstream(router).await;

        match source(base_url).fetch_page(&NewsQuery::new("anime")).await {
            Err(Error::Upstream { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "rate limited");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_key() {
        let source = NewsApiSource::new(None).unwrap();
        let result = source.fetch_page(&NewsQuery::default()).await;
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
