use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use labelwise_classify::Tokenizer;
use labelwise_core::{Category, IngredientReference};
use labelwise_ocr::{build_backend, AnalysisPipeline};
use labelwise_server::{serve, telemetry, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.log);

    // A missing or malformed reference is fatal: nothing can be classified without it.
    let reference = IngredientReference::load(&config.reference_path).with_context(|| {
        format!("Failed to load ingredient reference from {}", config.reference_path.display())
    })?;
    info!(
        harmful = reference.len(Category::Harmful),
        beneficial = reference.len(Category::Beneficial),
        ayurvedic = reference.len(Category::Ayurvedic),
        "Loaded ingredient reference"
    );

    let backend = build_backend(&config.ocr).context("Failed to initialise OCR backend")?;
    info!(backend = ?config.ocr.backend, language = %config.ocr.language, "OCR backend ready");

    let pipeline = AnalysisPipeline::new(
        backend,
        Arc::new(reference),
        Tokenizer::new(config.tokenizer.segmentation),
    );

    serve(&config, AppState::new(pipeline)).await
}
