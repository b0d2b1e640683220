//! Error types shared by every API call.

use thiserror::Error;

/// Result alias used throughout the crate
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while building, sending or evaluating a request
#[derive(Debug, Error)]
pub enum ClientError {
    /// A parameter or option failed validation. No request was sent.
    #[error("{0}")]
    Validation(String),

    /// The transport itself failed (DNS, connection refused, ...)
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The remote service answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// A 2xx response whose body does not have the expected shape
    #[error("{0}")]
    MalformedResponse(String),

    /// URL construction failed
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Reading an upload file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    pub(crate) fn malformed(operation: &str) -> Self {
        ClientError::MalformedResponse(format!("{operation} response data is malformed"))
    }

    /// Returns true if the error was raised before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    /// HTTP status code of the remote error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_operation() {
        let err = ClientError::malformed("getSearchResults");
        assert_eq!(
            err.to_string(),
            "getSearchResults response data is malformed"
        );
    }

    #[test]
    fn test_http_error_display_and_status() {
        let err = ClientError::Http {
            status: 401,
            message: "You have supplied an invalid `key` or `autocomplete_key`.".to_string(),
        };

        assert_eq!(err.status(), Some(401));
        assert!(!err.is_validation());
        assert!(err.to_string().starts_with("HTTP 401: "));
    }

    #[test]
    fn test_validation_error_has_no_status() {
        let err = ClientError::validation("page must be a positive integer");
        assert!(err.is_validation());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "page must be a positive integer");
    }
}
