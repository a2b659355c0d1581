use std::sync::Arc;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;
use xt_core::{Error, NewsPage, NewsQuery, SummaryRequest, SummaryResult};
use crate::error::ApiResult;
use crate::AppState;

pub const AVAILABLE_ROUTES: [&str; 3] = ["GET /", "GET /api/news", "POST /api/summarize"];

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "X-Times backend is running",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn news(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NewsQuery>, QueryRejection>,
) -> ApiResult<Json<NewsPage>> {
    let Query(query) = query.map_err(|e| Error::Validation(e.body_text()))?;
    query.validate()?;

    info!(
        "Fetching {} page {} from {}",
        query.category,
        query.page,
        state.headlines.name()
    );
    let page = state.headlines.fetch_page(&query).await?;
    Ok(Json(page))
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> ApiResult<Json<SummaryResult>> {
    let Json(request) = payload.map_err(|e| Error::Validation(e.body_text()))?;
    // Reject bad input before anything reaches the model.
    request.article_text()?;

    let result = state.summary_model.summarize(&request).await?;
    info!(
        "Summarized with {} into {} bullets",
        state.summary_model.name(),
        result.bullets.len()
    );
    Ok(Json(result))
}

pub async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": format!("Route {} {} not found", method, uri.path()),
            "availableRoutes": AVAILABLE_ROUTES,
        })),
    )
}
