use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Tesseract language pack used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "eng";

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available — build with `tesseract` feature")]
    NotAvailable,
}

/// Abstraction over an OCR backend.
/// Implementations accept PNG/JPEG image bytes and return all recognized text
/// as one string, using the engine's own line and word joining.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

impl<T: OcrBackend + ?Sized> OcrBackend for Box<T> {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
        (**self).recognize(image_bytes)
    }
}

impl<T: OcrBackend + ?Sized> OcrBackend for Arc<T> {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
        (**self).recognize(image_bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Tesseract,
    Mock,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tesseract" => Ok(BackendKind::Tesseract),
            "mock" => Ok(BackendKind::Mock),
            other => Err(format!("Unknown OCR backend: '{other}'")),
        }
    }
}

/// Recognition settings, usually read from the `[ocr]` config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    pub backend: BackendKind,
    /// Tesseract language code, e.g. `eng`.
    pub language: String,
    /// Directory holding `tessdata`; `None` uses the engine's default lookup.
    pub data_path: Option<String>,
    /// Text returned by the `mock` backend.
    pub mock_text: String,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            data_path: None,
            mock_text: String::new(),
        }
    }
}

/// Construct the backend selected by `settings`.
pub fn build_backend(settings: &OcrSettings) -> Result<Box<dyn OcrBackend>, OcrError> {
    match settings.backend {
        BackendKind::Mock => Ok(Box::new(MockRecognizer::new(settings.mock_text.clone()))),
        #[cfg(feature = "tesseract")]
        BackendKind::Tesseract => Ok(Box::new(tesseract_backend::TesseractRecognizer::new(
            settings.data_path.clone(),
            &settings.language,
        ))),
        #[cfg(not(feature = "tesseract"))]
        BackendKind::Tesseract => Err(OcrError::NotAvailable),
    }
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string — useful for exercising the analysis pipeline
/// without requiring Tesseract to be installed.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use leptess::LepTess;

    /// One engine instance per call; `LepTess` is not `Sync`.
    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_returns_preset_text() {
        let r = MockRecognizer::new("INGREDIENTS: AQUA, GLYCERIN\nMETHYLPARABEN");
        assert_eq!(
            r.recognize(b"fake image data").unwrap(),
            "INGREDIENTS: AQUA, GLYCERIN\nMETHYLPARABEN"
        );
    }

    #[test]
    fn mock_ignores_image_content() {
        let r = MockRecognizer::new("hello");
        assert_eq!(r.recognize(b"anything").unwrap(), "hello");
        assert_eq!(r.recognize(b"").unwrap(), "hello");
    }

    #[test]
    fn boxed_and_shared_backends_delegate() {
        let boxed: Box<dyn OcrBackend> = Box::new(MockRecognizer::new("boxed"));
        assert_eq!(boxed.recognize(b"").unwrap(), "boxed");
        let shared: Arc<dyn OcrBackend> = Arc::new(MockRecognizer::new("shared"));
        assert_eq!(shared.recognize(b"").unwrap(), "shared");
    }

    #[test]
    fn build_mock_backend_from_settings() {
        let settings = OcrSettings {
            backend: BackendKind::Mock,
            mock_text: "Neem".into(),
            ..OcrSettings::default()
        };
        let backend = build_backend(&settings).unwrap();
        assert_eq!(backend.recognize(b"").unwrap(), "Neem");
    }

    #[cfg(not(feature = "tesseract"))]
    #[test]
    fn tesseract_without_feature_is_unavailable() {
        let err = build_backend(&OcrSettings::default()).err().unwrap();
        assert!(matches!(err, OcrError::NotAvailable));
    }

    #[test]
    fn default_settings_use_english() {
        let settings = OcrSettings::default();
        assert_eq!(settings.language, "eng");
        assert_eq!(settings.backend, BackendKind::Tesseract);
    }

    #[test]
    fn backend_kind_from_str() {
        use std::str::FromStr;
        assert_eq!(BackendKind::from_str("MOCK").unwrap(), BackendKind::Mock);
        assert!(BackendKind::from_str("easyocr").is_err());
    }
}
