use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use labelwise_core::Category;
use labelwise_ocr::{AnalysisReport, LabelAnalysis};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, instrument, Span};
use uuid::Uuid;

use crate::error::ApiError;
use crate::server::AppState;

/// Body of `POST /analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Base64 image, optionally prefixed with a `data:image/...;base64,` header.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReferenceCounts {
    pub harmful: usize,
    pub beneficial: usize,
    pub ayurvedic: usize,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub reference: ReferenceCounts,
}

/// `GET /`. Points at the browser front-end only when one is mounted.
pub async fn root(front_end: bool) -> Json<Value> {
    let message = if front_end {
        "Use /static/index.html to access the app"
    } else {
        "POST a base64 label image to /analyze"
    };
    Json(json!({ "message": message }))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let reference = state.pipeline.reference();
    Json(HealthReport {
        status: "ok",
        reference: ReferenceCounts {
            harmful: reference.len(Category::Harmful),
            beneficial: reference.len(Category::Beneficial),
            ayurvedic: reference.len(Category::Ayurvedic),
        },
    })
}

/// `POST /analyze`
///
/// The image field is validated before any decoding; OCR runs on the
/// blocking pool so a slow engine does not stall the runtime.
#[instrument(skip_all, fields(analysis_id = %Uuid::new_v4()))]
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let Json(request) = payload?;
    let image = request.image.ok_or(ApiError::MissingImage)?;

    let pipeline = state.pipeline.clone();
    let span = Span::current();
    let analysis =
        tokio::task::spawn_blocking(move || span.in_scope(|| pipeline.analyze_payload(&image)))
            .await??;

    match &analysis {
        LabelAnalysis::NoText => info!("No text detected in label image"),
        LabelAnalysis::Classified { result, .. } => info!(
            harmful = result.harmful.len(),
            beneficial = result.beneficial.len(),
            ayurvedic = result.ayurvedic.len(),
            "Label classified"
        ),
    }

    Ok(Json(AnalysisReport::from(analysis)))
}
