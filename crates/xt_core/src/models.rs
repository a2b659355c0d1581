use async_trait::async_trait;
use crate::types::{SummaryRequest, SummaryResult};
use crate::Result;

#[async_trait]
pub trait SummaryModel: Send + Sync {
    fn name(&self) -> &str;

    /// Summarize an already validated article into bullet points
    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult>;
}
