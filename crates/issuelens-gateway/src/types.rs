use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
/// Scan request body.
pub struct ScanRequest {
    #[serde(default)]
    pub repo: String,
}

#[derive(Debug, Deserialize)]
/// Analyze request body.
pub struct AnalyzeRequest {
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
/// Successful scan envelope.
pub struct ScanResponse {
    pub repo: String,
    pub issues_fetched: usize,
    pub cached_successfully: bool,
    pub cached_count: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
/// Successful analyze envelope. `analysis` may carry the scan-first guidance
/// string when nothing is cached for the repository.
pub struct AnalyzeResponse {
    pub repo: String,
    pub analysis: String,
    pub timestamp: String,
}

#[derive(Debug)]
/// Error taxonomy mapped to status codes: validation → 400, upstream service
/// failure → 502, everything else → 500.
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    pub fn upstream(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, code, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_type = if self.status.is_client_error() {
            "invalid_request_error"
        } else {
            "server_error"
        };
        (
            self.status,
            Json(json!({
                "error": {
                    "type": error_type,
                    "code": self.code,
                    "message": self.message,
                }
            })),
        )
            .into_response()
    }
}
