//! Post API error taxonomy

use std::path::PathBuf;
use thiserror::Error;

use crate::constants::GENERIC_ERROR_MESSAGE;

/// A failed Post API call. Cloned across the actor channel, so payloads are owned strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-2xx response, with the server's `message` field when it sent one
    #[error("server responded with {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    /// The list response body was not a sequence of posts
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The image chosen for upload could not be read
    #[error("could not read image {}: {reason}", .path.display())]
    Image { path: PathBuf, reason: String },
}

impl ApiError {
    /// Text shown to the user: the server's message if it sent one, otherwise the generic fallback
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { message: Some(message), .. } => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Transport(format!("timed out: {}", e))
        } else if e.is_connect() {
            ApiError::Transport(format!("connection failed: {}", e))
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Pull a non-empty string `message` out of an error response body
pub fn extract_server_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    match json.get("message")? {
        serde_json::Value::String(message) if !message.is_empty() => Some(message.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_message_is_shown() {
        let err = ApiError::Server {
            status: 400,
            message: extract_server_message(r#"{"message":"Title already exists"}"#),
        };
        assert_eq!(err.user_message(), "Title already exists");
    }

    #[test]
    fn test_missing_or_empty_message_falls_back() {
        assert_eq!(extract_server_message(r#"{"error":"boom"}"#), None);
        assert_eq!(extract_server_message(r#"{"message":""}"#), None);
        assert_eq!(extract_server_message(r#"{"message":42}"#), None);
        assert_eq!(extract_server_message("<html>502 Bad Gateway</html>"), None);

        let err = ApiError::Server { status: 502, message: None };
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_non_server_errors_use_generic_text() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        let err = ApiError::Image {
            path: PathBuf::from("missing.png"),
            reason: "not found".into(),
        };
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert!(err.to_string().contains("missing.png"));
    }
}
