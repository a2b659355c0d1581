use xt_core::{Result, SummaryModel, SummaryRequest, SummaryResult};
use crate::bullets::parse_summary;

/// Offline model that turns the first sentences of the article into bullets.
#[derive(Debug, Default)]
pub struct DummyModel;

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl SummaryModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult> {
        let text = request.article_text()?;
        let raw = text
            .split(|c: char| c == '.' || c == '!' || c == '?')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(3)
            .map(|s| format!("• {}.", s))
            .collect::<Vec<_>>()
            .join("\n");
        tracing::debug!("Generated dummy summary: {}", raw);
        Ok(parse_summary(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xt_core::Error;

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new();
        let request = SummaryRequest::new(
            "Council approves new budget",
            Some("Spending rises four percent. Transit gets the largest share! Vote was close. Taxes unchanged".to_string()),
        );

        let result = model.summarize(&request).await.unwrap();
        assert_eq!(
            result.bullets,
            vec![
                "Council approves new budget.",
                "Spending rises four percent.",
                "Transit gets the largest share.",
            ]
        );
    }

    #[tokio::test]
    async fn test_dummy_model_validates() {
        let model = DummyModel::new();
        let result = model.summarize(&SummaryRequest::new("Too short", None)).await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
