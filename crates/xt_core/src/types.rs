use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

pub const DEFAULT_CATEGORY: &str = "general";
pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Category routed to full-text search instead of top headlines.
pub const SEARCH_CATEGORY: &str = "anime";

/// Shortest article text worth sending to the model.
/// Minimum article text length, in UTF-16 code units.
pub const MIN_SUMMARY_TEXT_LEN: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub url: String,
    pub author: String,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
    pub source_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPage {
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub total_results: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsQuery {
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            category: default_category(),
            country: default_country(),
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl NewsQuery {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Search queries ignore the country filter.
    pub fn is_search(&self) -> bool {
        self.category == SEARCH_CATEGORY
    }

    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(Error::Validation("category must not be empty".to_string()));
        }
        if self.page == 0 {
            return Err(Error::Validation("page must be at least 1".to_string()));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::Validation(format!(
                "pageSize must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub url: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Option<String>,
}

impl From<&Article> for BookmarkRecord {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            description: article.description.clone(),
            image_url: article.image_url.clone(),
            url: article.url.clone(),
            author: Some(article.author.clone()),
            date: article.published_date,
            source: Some(article.source_name.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SummaryRequest {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: Some(title.into()),
            description,
        }
    }

    /// Title and description joined with ". ", rejected when too short to summarize.
    pub fn article_text(&self) -> Result<String> {
        let title = match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => return Err(Error::Validation("title is required".to_string())),
        };

        let mut parts = vec![title];
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            parts.push(description);
        }
        let text = parts.join(". ").trim().to_string();

        if text.encode_utf16().count() < MIN_SUMMARY_TEXT_LEN {
            return Err(Error::Validation(
                "Not enough content to summarize".to_string(),
            ));
        }
        Ok(text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: Option<String>,
}
