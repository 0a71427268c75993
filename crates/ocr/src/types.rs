use labelwise_core::{AyurvedicIngredient, BeneficialCompound, ClassificationResult};
use serde::{Deserialize, Serialize};

/// Fixed label carried by every report.
pub const REPORT_CATEGORY: &str = "Ingredients Analysis";
pub const NO_TEXT_MESSAGE: &str = "No text detected in image";
/// Upper bound, in characters, on the diagnostic text echoed back to clients.
pub const EXTRACTED_TEXT_LIMIT: usize = 500;

/// Outcome of analyzing one label image.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelAnalysis {
    /// Recognition succeeded but produced nothing but whitespace.
    NoText,
    Classified {
        /// Raw recognized text, untruncated.
        text: String,
        result: ClassificationResult,
    },
}

/// Response body for a successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub category: String,
    pub harmful: Vec<String>,
    pub beneficial: Vec<BeneficialCompound>,
    pub ayurvedic: Vec<AyurvedicIngredient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<LabelAnalysis> for AnalysisReport {
    fn from(analysis: LabelAnalysis) -> Self {
        match analysis {
            LabelAnalysis::NoText => AnalysisReport {
                category: REPORT_CATEGORY.to_string(),
                harmful: vec![],
                beneficial: vec![],
                ayurvedic: vec![],
                extracted_text: None,
                message: Some(NO_TEXT_MESSAGE.to_string()),
            },
            LabelAnalysis::Classified { text, result } => AnalysisReport {
                category: REPORT_CATEGORY.to_string(),
                harmful: result.harmful,
                beneficial: result.beneficial,
                ayurvedic: result.ayurvedic,
                extracted_text: Some(truncate_chars(&text, EXTRACTED_TEXT_LIMIT)),
                message: None,
            },
        }
    }
}

/// First `limit` characters of `text`; never splits a multi-byte character.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
