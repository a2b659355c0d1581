use tracing::warn;
use xt_core::{Article, Error, SummaryRequest};
use crate::api::Summarizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryState {
    Loading,
    Failed { message: String, unreachable: bool },
    Ready(Vec<String>),
}

/// Bullet summary for one article, regenerated on demand.
pub struct SummaryPanel<S> {
    summarizer: S,
    request: SummaryRequest,
    state: SummaryState,
}

impl<S: Summarizer> SummaryPanel<S> {
    pub fn new(summarizer: S, article: &Article) -> Self {
        let description = Some(article.description.clone()).filter(|d| !d.is_empty());
        Self::for_request(summarizer, SummaryRequest::new(article.title.clone(), description))
    }

    pub fn for_request(summarizer: S, request: SummaryRequest) -> Self {
        Self {
            summarizer,
            request,
            state: SummaryState::Loading,
        }
    }

    pub fn state(&self) -> &SummaryState {
        &self.state
    }

    /// Request a fresh summary, replacing any previous result.
    pub async fn generate(&mut self) -> &SummaryState {
        self.state = match self.summarizer.request_summary(&self.request).await {
            Ok(result) => SummaryState::Ready(result.bullets),
            Err(e) => {
                warn!("Summary request failed: {}", e);
                SummaryState::Failed {
                    unreachable: matches!(e, Error::Network(_)),
                    message: e.to_string(),
                }
            }
        };
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use xt_core::{Result, SummaryResult};

    #[derive(Default)]
    struct FlakySummarizer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Summarizer for FlakySummarizer {
        async fn request_summary(&self, request: &SummaryRequest) -> Result<SummaryResult> {
            assert_eq!(request.description, None);
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(Error::Network("Cannot reach backend".to_string()));
            }
            Ok(SummaryResult {
                bullets: vec!["First".to_string(), "Second".to_string()],
            })
        }
    }

    #[tokio::test]
    async fn test_generate_and_retry() {
        let summarizer = Arc::new(FlakySummarizer::default());
        let article = Article {
            title: "City council approves new transit budget".to_string(),
            description: String::new(),
            image_url: None,
            url: "https://news.test/budget".to_string(),
            author: "Unknown".to_string(),
            published_date: None,
            source_name: "Wire".to_string(),
        };
        let mut panel = SummaryPanel::new(summarizer.clone(), &article);
        assert_eq!(panel.state(), &SummaryState::Loading);

        assert!(matches!(
            panel.generate().await,
            SummaryState::Failed { unreachable: true, .. }
        ));
        assert_eq!(
            panel.generate().await,
            &SummaryState::Ready(vec!["First".to_string(), "Second".to_string()])
        );
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 2);
    }
}
