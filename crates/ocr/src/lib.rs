pub mod payload;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod types;

pub use payload::{decode_image, decode_image_bytes, strip_data_uri, DecodeError};
pub use pipeline::{AnalysisError, AnalysisPipeline};
pub use preprocess::{encode_png, prepare_for_ocr, PreprocessError};
pub use recognizer::{build_backend, BackendKind, MockRecognizer, OcrBackend, OcrError, OcrSettings};
pub use types::{AnalysisReport, LabelAnalysis};
