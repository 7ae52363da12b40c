//! API error types with failure classification

use std::fmt;

use thiserror::Error;

/// Broad class of an API failure, shown in the flow diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Request never got a response
    Transport,
    /// Server answered with a non-2xx status
    HttpStatus,
    /// Response body was not the expected JSON
    MalformedBody,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => f.write_str("transport"),
            FailureKind::HttpStatus => f.write_str("HTTP status"),
            FailureKind::MalformedBody => f.write_str("malformed body"),
        }
    }
}

/// Errors that can occur when calling the projects service
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset mid-request...
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success status code, with whatever body the server sent
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON body could not be parsed into the expected shape
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Transport(_) => FailureKind::Transport,
            ApiError::Status { .. } => FailureKind::HttpStatus,
            ApiError::Decode(_) => FailureKind::MalformedBody,
        }
    }

    /// Status code for HTTP status failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        assert_eq!(
            ApiError::Transport("refused".into()).kind(),
            FailureKind::Transport
        );
        assert_eq!(
            ApiError::Status {
                status: 500,
                body: String::new()
            }
            .kind(),
            FailureKind::HttpStatus
        );
        assert_eq!(
            ApiError::Decode("eof".into()).kind(),
            FailureKind::MalformedBody
        );
    }

    #[test]
    fn test_status() {
        let err = ApiError::Status {
            status: 404,
            body: "missing".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(ApiError::Decode("x".into()).status(), None);
    }

    #[test]
    fn test_display() {
        let err = ApiError::Status {
            status: 503,
            body: "unavailable".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: unavailable");

        let err = ApiError::Transport("connection refused".into());
        assert!(err.to_string().contains("connection refused"));

        assert_eq!(FailureKind::MalformedBody.to_string(), "malformed body");
    }
}
