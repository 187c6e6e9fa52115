//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the vocabulary service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered 401 or 403.
    #[error("authorization required (HTTP {status})")]
    Unauthorized { status: u16 },

    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The service returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}

impl ClientError {
    /// Returns `true` if retrying the same request cannot succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized { .. } | ClientError::NotFound(_)
        )
    }

    /// Returns `true` for authorization failures.
    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanence() {
        assert!(ClientError::Unauthorized { status: 401 }.is_permanent());
        assert!(ClientError::NotFound("/tests/x".into()).is_permanent());
        assert!(!ClientError::Timeout(30).is_permanent());
        assert!(!ClientError::Api {
            status: 500,
            message: "boom".into()
        }
        .is_permanent());
    }

    #[test]
    fn messages() {
        assert_eq!(
            ClientError::Unauthorized { status: 403 }.to_string(),
            "authorization required (HTTP 403)"
        );
        assert!(ClientError::Timeout(30).to_string().contains("30s"));
    }
}
