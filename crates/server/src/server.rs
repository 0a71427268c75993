use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use labelwise_ocr::{AnalysisPipeline, OcrBackend};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::routes;

pub type SharedPipeline = Arc<AnalysisPipeline<Box<dyn OcrBackend>>>;

/// State shared by every route. The pipeline, and the ingredient reference
/// inside it, is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: SharedPipeline,
}

impl AppState {
    pub fn new(pipeline: AnalysisPipeline<Box<dyn OcrBackend>>) -> Self {
        Self { pipeline: Arc::new(pipeline) }
    }
}

/// Oversized bodies surface as a `JsonRejection` in the handler, so they get
/// the same `{"detail": ...}` shape as every other error.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let front_end = config.static_dir.is_some();
    let mut router = Router::new()
        .route("/", get(move || routes::root(front_end)))
        .route("/health", get(routes::health))
        .route("/analyze", post(routes::analyze));

    if let Some(dir) = &config.static_dir {
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.bind` and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let app = build_router(state, config);

    let listener = TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "Label analysis server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
    }
}
