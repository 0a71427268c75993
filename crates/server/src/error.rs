use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use labelwise_ocr::AnalysisError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Every way a request can fail, mapped to a status and a `{"detail": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing 'image' field in request")]
    MissingImage,
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error("analysis worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingImage => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Analysis(_) | ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Analysis request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "Rejected analysis request");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelwise_ocr::OcrError;

    #[test]
    fn missing_image_is_client_error() {
        assert_eq!(ApiError::MissingImage.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn analysis_failure_is_server_error_with_context() {
        let err = ApiError::from(AnalysisError::Recognition(OcrError::Engine("timeout".into())));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "recognition processing failed: OCR engine error: timeout"
        );
    }

    #[tokio::test]
    async fn response_body_carries_detail() {
        let response = ApiError::MissingImage.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "Missing 'image' field in request");
    }
}
