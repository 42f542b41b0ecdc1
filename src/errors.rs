//! # Structured Error Types
//!
//! Errors raised while loading the dashboard dataset. Every variant is `Clone + PartialEq`
//! so a failed load can be stored in a signal and compared across renders.
//!
//! Absent rows (for example no domain summary for the selected key) are not errors: the
//! view layer renders them as empty or zero. Superseded loads are not errors either; they
//! are discarded by the controller without surfacing anything.
//!
//! ## Example
//!
//! ```rust
//! use seo_dashboard::errors::DashboardError;
//!
//! let error = DashboardError::HttpStatus {
//!     endpoint: "competitors".to_string(),
//!     status: 503,
//! };
//! assert_eq!(error.to_string(), "HTTP 503 from endpoint 'competitors'");
//! assert!(error.is_transient());
//! ```

use thiserror::Error;

/// Errors produced by fetching, parsing or configuring the dashboard
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    /// Transport failures (DNS, connection reset, TLS)
    #[error("Network error on endpoint '{endpoint}': {message}")]
    Network { endpoint: String, message: String },

    /// The request did not complete within the configured timeout
    #[error("Request to endpoint '{endpoint}' timed out")]
    Timeout { endpoint: String },

    /// Non-success HTTP status
    #[error("HTTP {status} from endpoint '{endpoint}'")]
    HttpStatus { endpoint: String, status: u16 },

    /// The body was not JSON or did not carry the expected envelope
    #[error("Data parsing error on endpoint '{endpoint}': {message}")]
    DataParsing { endpoint: String, message: String },

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DashboardError {
    /// Name of the endpoint that failed, if the error came from a fetch
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            DashboardError::Network { endpoint, .. }
            | DashboardError::Timeout { endpoint }
            | DashboardError::HttpStatus { endpoint, .. }
            | DashboardError::DataParsing { endpoint, .. } => Some(endpoint),
            DashboardError::Configuration(_) => None,
        }
    }

    /// Whether a manual retry has a reasonable chance of succeeding
    pub fn is_transient(&self) -> bool {
        match self {
            DashboardError::Network { .. } | DashboardError::Timeout { .. } => true,
            DashboardError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            DashboardError::DataParsing { .. } | DashboardError::Configuration(_) => false,
        }
    }

    pub(crate) fn from_reqwest(endpoint: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return DashboardError::Timeout {
                endpoint: endpoint.to_string(),
            };
        }
        if let Some(status) = error.status() {
            return DashboardError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            };
        }
        if error.is_decode() {
            return DashboardError::DataParsing {
                endpoint: endpoint.to_string(),
                message: error.to_string(),
            };
        }
        DashboardError::Network {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        }
    }
}

/// Convenience type alias for Results with DashboardError
pub type DashboardResult<T> = Result<T, DashboardError>;

impl From<DashboardError> for String {
    fn from(error: DashboardError) -> Self {
        error.to_string()
    }
}
