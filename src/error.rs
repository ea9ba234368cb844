//! Error taxonomy and JSON error envelopes.
//!
//! Every failure a request can hit is a variant of [`ApiError`], and the
//! `IntoResponse` impl is the single place errors become HTTP responses.
//! Handlers return `Result<_, ApiError>`, so no path can produce a non-JSON
//! body: a caller (including a browser frontend) can always parse what it
//! gets back.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::region;

/// Everything that can go wrong while serving a forecast.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller asked for a city outside the supported region table.
    #[error("unknown city: {input:?}")]
    InvalidCity { input: String },

    /// No upstream API key is configured. Operator fault, not caller fault.
    ///
    /// The message deliberately names the variable, never its value.
    #[error("server has no upstream API key configured (set CWA_API_KEY)")]
    MissingApiKey,

    /// The upstream answered with a non-success HTTP status.
    #[error("upstream returned status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    /// The network call itself failed (timeout, DNS, connection reset).
    ///
    /// Constructed from a reqwest error with the URL stripped, so the
    /// Authorization query parameter cannot leak through the error chain.
    #[error("upstream request failed: {0}")]
    UpstreamRequest(reqwest::Error),

    /// The upstream answered successfully but had no record for the region.
    #[error("upstream has no forecast data for {city}")]
    NoData { city: String },

    /// The upstream payload did not have the expected structure.
    #[error("unexpected upstream payload: {0}")]
    MalformedPayload(String),
}

impl ApiError {
    /// Machine-readable category for the error envelope.
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::InvalidCity { .. } => "validation_error",
            ApiError::MissingApiKey => "configuration_error",
            ApiError::UpstreamStatus { status: 401, .. } => "upstream_auth_error",
            ApiError::UpstreamStatus { .. } | ApiError::UpstreamRequest(_) => "upstream_error",
            ApiError::NoData { .. } => "not_found",
            ApiError::MalformedPayload(_) => "malformed_upstream_data",
        }
    }

    /// HTTP status for the error envelope.
    ///
    /// An upstream 401 is passed through so key problems are distinguishable
    /// from generic upstream failures; region-not-found maps to 404.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidCity { .. } => StatusCode::BAD_REQUEST,
            ApiError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UpstreamStatus { status: 401, .. } => StatusCode::UNAUTHORIZED,
            ApiError::UpstreamStatus { .. } | ApiError::UpstreamRequest(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NoData { .. } => StatusCode::NOT_FOUND,
            ApiError::MalformedPayload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let category = self.category();

        warn!(
            category,
            status = status.as_u16(),
            error = %self,
            "Request failed"
        );

        let mut body = json!({
            "success": false,
            "error": category,
            "message": self.to_string(),
        });

        // Validation errors list the accepted names so callers can self-correct
        if let ApiError::InvalidCity { .. } = &self {
            body["validCities"] = json!(region::REGIONS);
        }

        (status, Json(body)).into_response()
    }
}
