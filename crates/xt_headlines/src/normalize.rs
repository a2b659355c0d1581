//! Upstream NewsAPI payloads and their conversion into [`Article`]s.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use xt_core::{Article, NewsPage};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status: Option<String>,
    pub total_results: Option<u64>,
    pub articles: Option<Vec<UpstreamArticle>>,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl Envelope {
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamArticle {
    pub source: Option<UpstreamSource>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpstreamSource {
    pub id: Option<String>,
    pub name: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Articles without a url cannot be keyed and are dropped.
pub fn normalize_article(article: UpstreamArticle) -> Option<Article> {
    let url = non_empty(article.url)?;
    Some(Article {
        title: non_empty(article.title).unwrap_or_else(|| "Untitled".to_string()),
        description: non_empty(article.description).unwrap_or_default(),
        image_url: non_empty(article.url_to_image),
        url,
        author: non_empty(article.author).unwrap_or_else(|| "Unknown".to_string()),
        published_date: article.published_at.as_deref().and_then(parse_timestamp),
        source_name: non_empty(article.source.and_then(|s| s.name))
            .unwrap_or_else(|| "Unknown".to_string()),
    })
}

pub fn normalize_page(envelope: Envelope) -> NewsPage {
    NewsPage {
        articles: envelope
            .articles
            .unwrap_or_default()
            .into_iter()
            .filter_map(normalize_article)
            .collect(),
        total_results: envelope.total_results.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_normalize_full_article() {
        let envelope: Envelope = serde_json::from_str(
            r#"{
                "status": "ok",
                "totalResults": 38,
                "articles": [{
                    "source": { "id": "wire", "name": "Wire Service" },
                    "author": "Jane Doe",
                    "title": "Rates held steady",
                    "description": "The central bank paused.",
                    "url": "https://news.test/rates",
                    "urlToImage": "https://news.test/rates.jpg",
                    "publishedAt": "2024-03-20T18:00:00Z",
                    "content": "..."
                }]
            }"#,
        )
        .unwrap();

        let page = normalize_page(envelope);
        assert_eq!(page.total_results, 38);
        let article = &page.articles[0];
        assert_eq!(article.title, "Rates held steady");
        assert_eq!(article.author, "Jane Doe");
        assert_eq!(article.source_name, "Wire Service");
        assert_eq!(article.image_url.as_deref(), Some("https://news.test/rates.jpg"));
        assert_eq!(
            article.published_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 20, 18, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_normalize_defaults() {
        let article = normalize_article(UpstreamArticle {
            url: Some("https://news.test/a".to_string()),
            author: Some("  ".to_string()),
            published_at: Some("yesterday".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(article.title, "Untitled");
        assert_eq!(article.description, "");
        assert_eq!(article.author, "Unknown");
        assert_eq!(article.source_name, "Unknown");
        assert_eq!(article.image_url, None);
        assert_eq!(article.published_date, None);
    }

    #[test]
    fn test_article_without_url_is_dropped() {
        assert!(normalize_article(UpstreamArticle {
            title: Some("No link".to_string()),
            ..Default::default()
        })
        .is_none());
    }

    #[test]
    fn test_missing_fields_default_to_empty_page() {
        let page = normalize_page(serde_json::from_str(r#"{"status":"ok"}"#).unwrap());
        assert_eq!(page, NewsPage::default());
    }
}
