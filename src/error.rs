//! Error types for the Yandex.Money client

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for Yandex.Money operations
pub type Result<T> = std::result::Result<T, YandexMoneyError>;

/// Main error type for Yandex.Money operations
#[derive(Error, Debug)]
pub enum YandexMoneyError {
    /// HTTP 400: the request parameters were malformed
    #[error("Format error")]
    Format,

    /// HTTP 401: the bearer token is missing, invalid or expired
    #[error("Token error")]
    Token,

    /// HTTP 403: the token lacks the permission scope for this call
    #[error("Scope error")]
    Scope,

    /// The request never produced an HTTP response (DNS, refused connection, timeout)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-JSON body on a non-error status, only raised when lenient parsing is off
    #[error("Malformed response (status {status}): {source}")]
    MalformedResponse {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    /// The payload did not match the typed view it was decoded into
    #[error("Decode error: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    /// The provider answered but reported a non-success `status`
    #[error("Request refused: {error}")]
    Refused { error: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl YandexMoneyError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a refused error from the provider's `error` code
    pub fn refused(error: impl Into<String>) -> Self {
        Self::Refused {
            error: error.into(),
        }
    }

    /// Map an HTTP status to one of the semantic error kinds.
    ///
    /// Returns `None` for every status other than 400, 401 and 403.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::BAD_REQUEST => Some(Self::Format),
            StatusCode::UNAUTHORIZED => Some(Self::Token),
            StatusCode::FORBIDDEN => Some(Self::Scope),
            _ => None,
        }
    }

    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::Format)
    }

    pub fn is_token_error(&self) -> bool {
        matches!(self, Self::Token)
    }

    pub fn is_scope_error(&self) -> bool {
        matches!(self, Self::Scope)
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(YandexMoneyError::from_status(StatusCode::BAD_REQUEST)
            .unwrap()
            .is_format_error());
        assert!(YandexMoneyError::from_status(StatusCode::UNAUTHORIZED)
            .unwrap()
            .is_token_error());
        assert!(YandexMoneyError::from_status(StatusCode::FORBIDDEN)
            .unwrap()
            .is_scope_error());
    }

    #[test]
    fn test_other_statuses_are_not_errors() {
        for status in [
            StatusCode::OK,
            StatusCode::NO_CONTENT,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            assert!(YandexMoneyError::from_status(status).is_none(), "{status}");
        }
    }
}
