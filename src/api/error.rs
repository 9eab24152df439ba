//! API Errors

use thiserror::Error;

/// Failure talking to the todo API.
///
/// `Display` is the message shown in the error indicator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("Parse error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error from a reply body, falling back to the status text
    pub fn from_reply(status: u16, status_text: &str, body: &str) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            error: String,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if status_text.is_empty() {
                    "Request failed".to_string()
                } else {
                    status_text.to_string()
                }
            });
        ApiError::Status { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_message_prefers_body() {
        let err = ApiError::from_reply(500, "Internal Server Error", r#"{"error":"db down"}"#);
        assert_eq!(err.to_string(), "db down (HTTP 500)");
    }

    #[test]
    fn test_reply_message_falls_back_to_status_text() {
        let err = ApiError::from_reply(404, "Not Found", "<html>");
        assert_eq!(err, ApiError::Status { status: 404, message: "Not Found".into() });

        let err = ApiError::from_reply(502, "", "");
        assert_eq!(err.to_string(), "Request failed (HTTP 502)");
    }
}
