/// Error types for the yield dashboard API
use thiserror::Error;

/// Main error type for API operations
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request could not complete
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API reachable but returned a non-success status
    #[error("API returned status {status}: {detail}")]
    Status { status: u16, detail: String },

    /// Response body did not match the expected shape
    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Build a `Status` error from a non-success response body.
    pub fn from_status_body(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            detail: error_detail(body),
        }
    }
}

/// Extract the human-readable detail from an error response body.
///
/// FastAPI error bodies carry a `{"detail": ...}` field; fall back to the
/// raw body when it is absent or the body is not JSON.
pub fn error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("detail").cloned())
        .and_then(|detail| detail.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Type alias for Results using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod test {
    use super::ApiError;

    #[test]
    fn test_status_detail_extracted_from_json_body() {
        let err = ApiError::from_status_body(503, r#"{"detail": "Database temporarily unavailable (circuit open)."}"#);
        match err {
            ApiError::Status { status, detail } => {
                assert_eq!(status, 503);
                assert_eq!(detail, "Database temporarily unavailable (circuit open).");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_status_detail_falls_back_to_raw_body() {
        let err = ApiError::from_status_body(502, "Bad Gateway\n");
        match err {
            ApiError::Status { status, detail } => {
                assert_eq!(status, 502);
                assert_eq!(detail, "Bad Gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
