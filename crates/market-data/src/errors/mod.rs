//! Error types for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all market data operations
//! - [`ErrorKind`]: Input-vs-upstream classification used by the HTTP layer

mod kind;

pub use kind::ErrorKind;

use thiserror::Error;

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// A search was requested without a query.
    #[error("Search query is required")]
    MissingQuery,

    /// The provider does not know the requested resource (HTTP 404).
    #[error("Not found: {resource}")]
    NotFound {
        /// The path or identifier that was not found
        resource: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered with a body that could not be decoded.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that sent the body
        provider: String,
        /// Decoder message
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use memedex_market_data::errors::{ErrorKind, MarketDataError};
    ///
    /// assert_eq!(MarketDataError::MissingQuery.kind(), ErrorKind::InvalidInput);
    ///
    /// let error = MarketDataError::RateLimited { provider: "COINGECKO".to_string() };
    /// assert_eq!(error.kind(), ErrorKind::Upstream);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingQuery => ErrorKind::InvalidInput,
            Self::NotFound { .. }
            | Self::RateLimited { .. }
            | Self::Timeout { .. }
            | Self::ProviderError { .. }
            | Self::InvalidResponse { .. }
            | Self::Network(_) => ErrorKind::Upstream,
        }
    }

    /// True when the caller is at fault and no upstream call was made.
    pub fn is_client_error(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_query_is_client_error() {
        let error = MarketDataError::MissingQuery;
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert!(error.is_client_error());
    }

    #[test]
    fn test_not_found_is_upstream_failure() {
        let error = MarketDataError::NotFound {
            resource: "coins/nope".to_string(),
        };
        assert_eq!(error.kind(), ErrorKind::Upstream);
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_rate_limited_and_timeout_are_upstream_failures() {
        let limited = MarketDataError::RateLimited {
            provider: "COINGECKO".to_string(),
        };
        let timeout = MarketDataError::Timeout {
            provider: "COINGECKO".to_string(),
        };
        assert_eq!(limited.kind(), ErrorKind::Upstream);
        assert_eq!(timeout.kind(), ErrorKind::Upstream);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            MarketDataError::MissingQuery.to_string(),
            "Search query is required"
        );

        let error = MarketDataError::ProviderError {
            provider: "COINGECKO".to_string(),
            message: "HTTP 500".to_string(),
        };
        assert_eq!(error.to_string(), "Provider error: COINGECKO - HTTP 500");

        let error = MarketDataError::NotFound {
            resource: "coins/unknown".to_string(),
        };
        assert_eq!(error.to_string(), "Not found: coins/unknown");
    }
}
