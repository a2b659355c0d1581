//! Per-request origin allow/deny decision.
//!
//! Browsers enforce CORS; this gate only decides which origins get the
//! headers and which get turned away with an error.

use std::sync::Arc;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

/// Suffix of preview deployment hosts that are always trusted.
pub const TRUSTED_SUFFIX: &str = ".vercel.app";

#[derive(Debug, Clone, Default)]
pub struct OriginGate {
    allowed: Vec<String>,
}

impl OriginGate {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed
                .into_iter()
                .map(Into::into)
                .map(|o| o.trim().trim_end_matches('/').to_string())
                .filter(|o| !o.is_empty())
                .collect(),
        }
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed
    }

    /// An absent origin means a non-browser caller.
    pub fn allows(&self, origin: Option<&str>) -> bool {
        let Some(origin) = origin else {
            return true;
        };
        origin.contains("localhost")
            || origin.ends_with(TRUSTED_SUFFIX)
            || self.allowed.iter().any(|allowed| allowed == origin)
    }

    /// CORS headers for allowed origins only.
    pub fn cors_layer(&self) -> CorsLayer {
        let gate = self.clone();
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
                gate.allows(origin.to_str().ok())
            }))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// Reject requests whose Origin header the gate does not allow.
pub async fn enforce_origin(
    State(gate): State<Arc<OriginGate>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .map(|value| value.to_str().unwrap_or_default().to_string());

    if gate.allows(origin.as_deref()) {
        return next.run(request).await;
    }

    warn!("CORS blocked origin: {}", origin.as_deref().unwrap_or_default());
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "error": "Not allowed by CORS" })),
    )
        .into_response()
}
