use std::sync::Arc;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;
use xt_core::Result;
use xt_headlines::NewsApiSource;

pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod state;

pub use config::ServerConfig;
pub use cors::OriginGate;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let gate = Arc::new(state.origin_gate.clone());
    let cors = state.origin_gate.cors_layer();

    Router::new()
        .route("/", get(handlers::health).fallback(handlers::not_found))
        .route("/api/news", get(handlers::news).fallback(handlers::not_found))
        .route(
            "/api/summarize",
            post(handlers::summarize).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
        .layer(cors)
        // Wraps the CORS layer so blocked preflights reach the gate.
        .layer(middleware::from_fn_with_state(gate, cors::enforce_origin))
        .layer(TraceLayer::new_for_http())
}

/// Wire the upstream clients from configuration; `provider` picks the summary model.
pub fn state_from_config(config: &ServerConfig, provider: &str) -> Result<AppState> {
    let inference = xt_inference::Config {
        api_key: config.gemini_api_key.clone(),
        model_name: config.gemini_model.clone(),
        base_url: None,
    };
    Ok(AppState {
        summary_model: xt_inference::create_model(provider, inference)?,
        headlines: Arc::new(NewsApiSource::new(config.news_api_key.clone())?),
        origin_gate: OriginGate::new(config.allowed_origins.clone()),
    })
}

pub async fn serve(config: ServerConfig, state: AppState) -> Result<()> {
    if config.news_api_key.is_none() {
        tracing::warn!("NEWS_API_KEY is not set; /api/news will fail");
    }
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; /api/summarize will fail");
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("X-Times backend running on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, state_from_config, AppState, OriginGate, ServerConfig};
    pub use xt_core::{Error, Result};
}
