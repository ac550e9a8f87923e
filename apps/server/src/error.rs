use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use memedex_market_data::MarketDataError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    /// Upstream failure, reported with a fixed per-route message.
    #[error("{message}")]
    Upstream {
        message: String,
        #[source]
        source: MarketDataError,
    },
}

impl ApiError {
    /// Map a market data error for a route whose failures read as `message`.
    ///
    /// Invalid input keeps its own message and becomes a 400; everything
    /// else collapses to a 500 carrying `message`.
    pub fn market(message: impl Into<String>) -> impl FnOnce(MarketDataError) -> ApiError {
        let message = message.into();
        move |source| {
            if source.is_client_error() {
                ApiError::BadRequest(source.to_string())
            } else {
                ApiError::Upstream { message, source }
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_query_is_bad_request() {
        let err = ApiError::market("Failed to search coins")(MarketDataError::MissingQuery);
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Search query is required"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_errors_use_route_message() {
        let err = ApiError::market("Failed to fetch coin info for pepe")(
            MarketDataError::NotFound {
                resource: "pepe".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Failed to fetch coin info for pepe");
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
