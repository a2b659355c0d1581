use std::fmt;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use xt_core::{Error, Result, SummaryModel, SummaryRequest, SummaryResult};
use crate::bullets::parse_summary;
use crate::prompt::summary_prompt;
use crate::Config;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const TEMPERATURE: f32 = 0.3;
const MAX_OUTPUT_TOKENS: u32 = 200;

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn new(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate, if any.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

pub struct GeminiModel {
    client: Client,
    api_key: Option<String>,
    model_name: String,
    base_url: String,
}

impl GeminiModel {
    pub fn new(config: Config) -> Result<Self> {
        let model_name = config.model_name().to_string();
        Ok(Self {
            client: Client::new(),
            api_key: config.api_key.filter(|key| !key.is_empty()),
            model_name,
            base_url: config
                .base_url
                .unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model_name
        )
    }
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl SummaryModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult> {
        let text = request.article_text()?;
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::Configuration("Gemini API key not configured on server".to_string())
        })?;

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&GenerateRequest::new(summary_prompt(&text)))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Gemini error ({})", status.as_u16()));
            warn!("Gemini request failed with {}: {}", status, message);
            return Err(Error::upstream(status.as_u16(), message));
        }

        let raw = response
            .json::<GenerateResponse>()
            .await?
            .first_text()
            .unwrap_or_default();
        if raw.is_empty() {
            return Err(Error::EmptyResponse(
                "Gemini returned empty response".to_string(),
            ));
        }

        debug!("Gemini returned {} bytes of summary text", raw.len());
        Ok(parse_summary(&raw))
    }
}
