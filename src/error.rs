//! Error types for controller API calls
//!
//! Every failure a request can hit is kept distinct so callers can decide
//! how to react. Nothing in this crate terminates the process.

use std::fmt::Debug;
use thiserror::Error;

/// Errors returned by the controller client
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// HTTP 404 from the controller
    #[error("resource not found: {url}")]
    NotFound { url: String },

    /// HTTP 403 from the controller
    #[error("access denied: {url}")]
    Forbidden { url: String },

    /// Any other non-2xx response
    #[error("HTTP error {status} from {url}: {body}")]
    Http { status: u16, url: String, body: String },

    /// Connection, DNS, timeout or protocol failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not JSON or did not match the expected shape
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid client configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error with the given message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status code carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::NotFound { .. } => Some(404),
            Error::Forbidden { .. } => Some(403),
            Error::Http { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            Error::Decode { .. } | Error::Config(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// True for failures that never produced an HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

/// A cascading delete that stopped part way
///
/// `handle` still owns every child that was not deleted, so the cascade can
/// be retried from it.
#[derive(Debug, Error)]
#[error("cascading delete stopped: {error}")]
pub struct CascadeError<T: Debug> {
    pub handle: T,
    #[source]
    pub error: Error,
}

impl<T: Debug> CascadeError<T> {
    pub fn new(handle: T, error: Error) -> Self {
        Self { handle, error }
    }

    /// Take back the handle and the underlying error
    pub fn into_parts(self) -> (T, Error) {
        (self.handle, self.error)
    }
}

impl<T: Debug> From<CascadeError<T>> for Error {
    fn from(err: CascadeError<T>) -> Self {
        err.error
    }
}

/// Format a controller error for display
///
/// Keeps the message short and avoids echoing response bodies.
pub fn format_api_error(error: &Error) -> String {
    match error {
        Error::NotFound { .. } => "Resource not found.".to_string(),
        Error::Forbidden { .. } => "Access denied by the controller.".to_string(),
        Error::Http { status, .. } if *status >= 500 => {
            "Controller temporarily unavailable. Please try again.".to_string()
        }
        Error::Http { status: 409, .. } => {
            "Resource conflict. The resource may already exist or be in use.".to_string()
        }
        Error::Http { status, .. } => format!("Request rejected by the controller ({}).", status),
        Error::Transport(e) if e.is_timeout() => "Request to the controller timed out.".to_string(),
        Error::Transport(_) => {
            "Could not reach the controller. Check the host and your network connection."
                .to_string()
        }
        Error::Decode { .. } => "Unexpected response from the controller.".to_string(),
        Error::Config(msg) => format!("Invalid configuration: {}", msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        let not_found = Error::NotFound {
            url: "http://localhost:9999/api/tenants/blue/".to_string(),
        };
        assert_eq!(not_found.status(), Some(404));
        assert!(not_found.is_not_found());

        let forbidden = Error::Forbidden {
            url: "http://localhost:9999/api/tenants/".to_string(),
        };
        assert_eq!(forbidden.status(), Some(403));
        assert!(!forbidden.is_not_found());

        let other = Error::Http {
            status: 500,
            url: "http://localhost:9999/api/rules/".to_string(),
            body: "boom".to_string(),
        };
        assert_eq!(other.status(), Some(500));

        assert_eq!(Error::config("bad host").status(), None);
    }

    #[test]
    fn test_format_api_error_hides_body() {
        let err = Error::Http {
            status: 500,
            url: "http://localhost:9999/api/networks/blue:net1/".to_string(),
            body: "internal stack trace".to_string(),
        };
        let msg = format_api_error(&err);
        assert!(!msg.contains("stack trace"));
        assert!(msg.contains("unavailable"));
    }

    #[test]
    fn test_format_api_error_conflict_and_client_errors() {
        let conflict = Error::Http {
            status: 409,
            url: String::new(),
            body: String::new(),
        };
        assert!(format_api_error(&conflict).contains("conflict"));

        let bad_request = Error::Http {
            status: 400,
            url: String::new(),
            body: String::new(),
        };
        assert!(format_api_error(&bad_request).contains("400"));
    }

    #[test]
    fn test_cascade_error_keeps_handle() {
        let err = CascadeError::new(
            "blue".to_string(),
            Error::Forbidden {
                url: "http://localhost:9999/api/tenants/blue/".to_string(),
            },
        );
        assert!(err.to_string().starts_with("cascading delete stopped: access denied"));

        let (handle, inner) = err.into_parts();
        assert_eq!(handle, "blue");
        assert_eq!(inner.status(), Some(403));
    }

    #[test]
    fn test_display_includes_url() {
        let err = Error::NotFound {
            url: "http://localhost:9999/api/policys/blue:web/".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "resource not found: http://localhost:9999/api/policys/blue:web/"
        );
    }
}
