use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Not authorized, check the configured token")]
    Unauthorized,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Server error: {status} - {message}")]
    Server { status: u16, message: String },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Build a `Server` error from a non-success response body.
    ///
    /// The service reports failures as `{"detail": "..."}`; anything else is
    /// kept verbatim.
    pub fn from_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct Detail {
            detail: serde_json::Value,
        }

        let message = match serde_json::from_str::<Detail>(body) {
            Ok(Detail {
                detail: serde_json::Value::String(s),
            }) => s,
            Ok(Detail { detail }) => detail.to_string(),
            Err(_) => body.trim().to_string(),
        };

        Self::Server { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_unwraps_detail() {
        let err = ApiError::from_body(400, r#"{"detail": "Deck not found"}"#);
        assert_eq!(err.to_string(), "Server error: 400 - Deck not found");
    }

    #[test]
    fn test_from_body_keeps_plain_text() {
        let err = ApiError::from_body(502, "Bad Gateway\n");
        assert_eq!(err.to_string(), "Server error: 502 - Bad Gateway");
    }

    #[test]
    fn test_from_body_validation_detail() {
        let err = ApiError::from_body(422, r#"{"detail": [{"loc": ["body"]}]}"#);
        match err {
            ApiError::Server { status, message } => {
                assert_eq!(status, 422);
                assert!(message.contains("loc"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
