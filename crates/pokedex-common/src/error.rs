//! Error types for catalog access

use thiserror::Error;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failure kinds of the remote catalog and the code built on top of it.
///
/// Variants carry owned strings only, so an error can be cloned into every
/// caller waiting on the same in-flight request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Caller input was rejected before any request was made
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Request exceeded the configured time bound
    #[error("Request timeout for '{endpoint}'")]
    Timeout { endpoint: String },

    /// Transport-level failure other than a timeout
    #[error("Network error for '{endpoint}': {message}")]
    NetworkUnavailable { endpoint: String, message: String },

    /// Server answered with a non-success status
    #[error("API request failed with status {status} for '{endpoint}'")]
    RemoteRejected { status: u16, endpoint: String },

    /// List entry whose reference URL carries no numeric id
    #[error("Malformed reference: {0}")]
    MalformedReference(String),

    /// Response body did not have the expected shape
    #[error("Malformed response from '{endpoint}': {message}")]
    MalformedResponse { endpoint: String, message: String },
}

impl CatalogError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn malformed_reference(reference: impl Into<String>) -> Self {
        Self::MalformedReference(reference.into())
    }

    /// Whether repeating the same request may succeed.
    ///
    /// 4xx responses and caller errors are final; 5xx, timeouts and
    /// transport failures are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::NetworkUnavailable { .. } => true,
            Self::RemoteRejected { status, .. } => *status >= 500,
            Self::InvalidArgument(_)
            | Self::MalformedReference(_)
            | Self::MalformedResponse { .. } => false,
        }
    }

    /// Short machine-readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Timeout { .. } => "timeout",
            Self::NetworkUnavailable { .. } => "network_unavailable",
            Self::RemoteRejected { .. } => "remote_rejected",
            Self::MalformedReference(_) => "malformed_reference",
            Self::MalformedResponse { .. } => "malformed_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_classification() {
        assert!(CatalogError::Timeout { endpoint: "/pokemon".into() }.is_retryable());
        assert!(CatalogError::NetworkUnavailable {
            endpoint: "/pokemon".into(),
            message: "connection refused".into(),
        }
        .is_retryable());
        assert!(CatalogError::RemoteRejected { status: 503, endpoint: "/pokemon".into() }
            .is_retryable());
        assert!(!CatalogError::RemoteRejected { status: 404, endpoint: "/pokemon".into() }
            .is_retryable());
        assert!(!CatalogError::invalid_argument("limit").is_retryable());
        assert!(!CatalogError::malformed_reference("x").is_retryable());
    }

    #[test]
    fn test_error_messages() {
        let err = CatalogError::RemoteRejected { status: 404, endpoint: "/pokemon/9999".into() };
        assert_eq!(err.to_string(), "API request failed with status 404 for '/pokemon/9999'");
        assert_eq!(err.kind(), "remote_rejected");

        let err = CatalogError::Timeout { endpoint: "/pokemon?limit=20&offset=0".into() };
        assert!(err.to_string().contains("timeout"));
    }
}
