//! Error types for the dashboards
//!
//! Uses thiserror for ergonomic error definitions.
//! Backend failures collapse into a single [`ApiError`]; everything else the
//! worker can hit is a [`DashboardError`].

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Status reported for transport and parse failures
pub const TRANSPORT_STATUS: u16 = 0;

/// Message reported for transport and parse failures
pub const TRANSPORT_MESSAGE: &str = "parse or network failure";

/// Fallback when an error body carries no `error` field
pub const UNKNOWN_API_ERROR: &str = "Unknown API error";

/// A failed backend request.
///
/// `status` is the HTTP status for non-2xx responses and
/// [`TRANSPORT_STATUS`] when the request never produced a usable body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    /// Non-2xx response, with the server-provided message when there is one
    pub fn from_status(status: u16, server_message: Option<&str>) -> Self {
        let detail = server_message.unwrap_or(UNKNOWN_API_ERROR);
        Self {
            status,
            message: format!("API request failed with status {status}: {detail}"),
        }
    }

    /// Network failure or a body that is not the expected JSON
    pub fn transport() -> Self {
        Self {
            status: TRANSPORT_STATUS,
            message: TRANSPORT_MESSAGE.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        self.status == TRANSPORT_STATUS
    }
}

/// Dashboard worker errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend API errors
    #[error("Backend API error: {0}")]
    Api(#[from] ApiError),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Worker runtime errors
    #[error("Worker error: {0}")]
    Worker(String),
}

impl From<worker::Error> for DashboardError {
    fn from(err: worker::Error) -> Self {
        DashboardError::Worker(err.to_string())
    }
}

impl From<DashboardError> for worker::Error {
    fn from(err: DashboardError) -> Self {
        worker::Error::RustError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_uses_server_message() {
        let err = ApiError::from_status(404, Some("ticker not found"));
        assert_eq!(err.status, 404);
        assert_eq!(err.to_string(), "API request failed with status 404: ticker not found");
    }

    #[test]
    fn test_status_error_falls_back_to_generic_message() {
        let err = ApiError::from_status(500, None);
        assert_eq!(err.to_string(), "API request failed with status 500: Unknown API error");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_error() {
        let err = ApiError::transport();
        assert!(err.is_transport());
        assert_eq!(err.message, "parse or network failure");
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(matches!(err, DashboardError::Json(_)));

        let err: DashboardError = ApiError::transport().into();
        assert!(err.to_string().contains("parse or network failure"));
    }
}
