use image::DynamicImage;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use labelwise_classify::{classify, Tokenizer};
use labelwise_core::IngredientReference;

use crate::payload::{self, DecodeError};
use crate::preprocess::{self, PreprocessError};
use crate::recognizer::{OcrBackend, OcrError};
use crate::types::LabelAnalysis;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("image decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("image preprocessing failed: {0}")]
    Encode(#[from] PreprocessError),
    #[error("recognition processing failed: {0}")]
    Recognition(#[from] OcrError),
}

/// Orchestrates: decode → preprocess → OCR → tokenize → classify.
///
/// Holds no per-request state; one instance serves every request.
pub struct AnalysisPipeline<R: OcrBackend> {
    recognizer: R,
    reference: Arc<IngredientReference>,
    tokenizer: Tokenizer,
}

impl<R: OcrBackend> AnalysisPipeline<R> {
    pub fn new(recognizer: R, reference: Arc<IngredientReference>, tokenizer: Tokenizer) -> Self {
        Self { recognizer, reference, tokenizer }
    }

    pub fn reference(&self) -> &IngredientReference {
        &self.reference
    }

    /// Analyze a base64 image payload, optionally data-URI prefixed.
    pub fn analyze_payload(&self, payload: &str) -> Result<LabelAnalysis, AnalysisError> {
        let img = payload::decode_image(payload)?;
        self.analyze_image(&img)
    }

    /// Analyze an already decoded image.
    pub fn analyze_image(&self, img: &DynamicImage) -> Result<LabelAnalysis, AnalysisError> {
        debug!(width = img.width(), height = img.height(), "Preprocessing label image");
        let prepared = preprocess::prepare_for_ocr(img);
        let png = preprocess::encode_png(&prepared)?;

        let text = self.recognizer.recognize(&png)?;
        debug!(chars = text.chars().count(), "Recognition finished");

        Ok(self.classify_text(text))
    }

    /// Classify recognized text. Whitespace-only text is reported as
    /// [`LabelAnalysis::NoText`].
    pub fn classify_text(&self, text: String) -> LabelAnalysis {
        if text.trim().is_empty() {
            return LabelAnalysis::NoText;
        }

        let tokens = self.tokenizer.tokenize(&text);
        let result = classify(&self.reference, &tokens);
        debug!(tokens = tokens.len(), matches = result.total(), "Classified label text");

        LabelAnalysis::Classified { text, result }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
