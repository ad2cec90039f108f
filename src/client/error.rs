//! Client-side failures, classified where they happen.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The proxy answered with a non-2xx status.
    #[error("HTTP error! status: {code}")]
    Status { code: u16 },

    /// The request never got an answer.
    #[error("transport error: {0}")]
    Transport(String),

    /// The answer was not the JSON we expected.
    #[error("invalid response: {0}")]
    Decode(String),

    /// Bad base URL or similar local misconfiguration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The service understood the request and refused it.
    #[error("{0}")]
    Rejected(String),
}

impl ClientError {
    /// Text shown to the user in toasts and error rows.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status { code } => {
                format!("HTTP {code}: the server could not provide the data.")
            }
            ClientError::Transport(_) => {
                "Network Error: Failed to fetch data. Check your internet connection and try again."
                    .to_string()
            }
            ClientError::Decode(detail) => format!("Error: unexpected response ({detail})"),
            ClientError::Config(detail) => format!("Configuration Error: {detail}"),
            ClientError::Rejected(reason) => format!("Error: {reason}"),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ClientError::Status {
                code: status.as_u16(),
            }
        } else if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else if e.is_builder() {
            ClientError::Config(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(e: url::ParseError) -> Self {
        ClientError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_by_category() {
        assert_eq!(
            ClientError::Status { code: 503 }.user_message(),
            "HTTP 503: the server could not provide the data."
        );
        assert!(ClientError::Transport("refused".into())
            .user_message()
            .starts_with("Network Error"));
        assert_eq!(
            ClientError::Rejected("duplicate".into()).user_message(),
            "Error: duplicate"
        );
    }

    #[test]
    fn test_status_display_matches_proxy_wording() {
        assert_eq!(
            ClientError::Status { code: 404 }.to_string(),
            "HTTP error! status: 404"
        );
    }
}
