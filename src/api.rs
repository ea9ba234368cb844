//! HTTP API handlers and router assembly for Barometer.
//!
//! Every handler returns JSON — successes through the envelopes in
//! [`crate::model`], failures through [`ApiError`]'s `IntoResponse` — and the
//! router stamps `Cache-Control: no-store` plus wildcard CORS headers on each
//! response. Both header behaviors are deliberate requirements: forecasts
//! must never be cached by intermediaries, and browser frontends on any
//! origin must be able to call the API directly.

use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

use crate::error::ApiError;
use crate::model::{CitiesResponse, HealthResponse, WeatherResponse};
use crate::normalize::normalize;
use crate::region;
use crate::upstream::CwaClient;

/// Application state shared across handlers.
///
/// Everything here is read-only per request: the client is internally
/// ref-counted and the key is set once at startup. No lock is held across
/// the upstream await point because there is no lock at all.
#[derive(Clone)]
pub struct AppState {
    pub upstream: CwaClient,
    /// The upstream API key, if one was configured. Checked per request so a
    /// keyless process still starts and serves health/cities.
    pub api_key: Option<String>,
}

/// Assemble the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let no_store = SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    );

    // no_store is outermost so even a panic response carries the header
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .route("/api/cities", get(list_cities))
        .route("/api/weather/:city", get(get_weather))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(no_store)
        .with_state(state)
}

/// Last-resort handler for panics in the stack. Logs server-side and answers
/// with the same JSON envelope every other failure uses, never an HTML error
/// page or a raw backtrace.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(%detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": "internal_error",
            "message": "unexpected server error",
        })),
    )
        .into_response()
}

/// GET / - Service info.
async fn root() -> impl IntoResponse {
    Json(json!({
        "service": "barometer",
        "description": "36-hour weather forecast proxy",
        "endpoints": ["/api/health", "/api/cities", "/api/weather/:city"],
    }))
}

/// GET /api/health - Simple health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now(),
    })
}

/// GET /api/cities - List every region the weather endpoint accepts.
async fn list_cities() -> Json<CitiesResponse> {
    Json(CitiesResponse {
        success: true,
        cities: region::REGIONS.to_vec(),
    })
}

/// GET /api/weather/:city - Forecast for one region.
///
/// Pipeline: validate the city, check the key, one upstream call, pivot the
/// payload. The key check precedes the call, so an unconfigured server makes
/// zero outbound requests.
#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let region = region::validate(&city)?;
    let api_key = state.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;

    let payload = state.upstream.fetch(region, api_key).await?;
    let result = normalize(&payload, region)?;

    info!(
        city = %region,
        periods = result.forecasts.len(),
        update_time = %result.update_time,
        "Forecast served"
    );

    Ok(Json(WeatherResponse {
        success: true,
        data: result,
    }))
}

/// Fallback for unmatched paths and methods. JSON like everything else.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "not_found",
            "message": "no such endpoint",
        })),
    )
}
