//! Error types for the HTTP clients.

use thiserror::Error;

/// Errors returned by [`TradingApiClient`](crate::TradingApiClient) and
/// [`ProxyClient`](crate::ProxyClient).
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (connect, timeout, TLS...).
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The body could not be mapped to the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A search was attempted without a query.
    #[error("Search query is required")]
    MissingQuery,
}

impl ClientError {
    /// HTTP status of an API error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_and_status() {
        let err = ClientError::Api {
            status: 404,
            message: "Position not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error 404: Position not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(ClientError::MissingQuery.status(), None);
    }
}
