//! Barometer - a minimal JSON proxy for Taiwan's 36-hour weather forecast.
//!
//! # API Endpoints
//!
//! - `GET /` - Service info
//! - `GET /api/health` - Health check
//! - `GET /api/cities` - List supported regions
//! - `GET /api/weather/:city` - Forecast for one region
//!
//! # Configuration
//!
//! - `CWA_API_KEY` - Upstream open-data API key. The server starts without
//!   one, but every weather lookup then answers with a configuration error.
//! - `BAROMETER_PORT` - Listen port (default 3000).

use std::env;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use barometer::api::{AppState, router};
use barometer::upstream::CwaClient;

/// Default port if not specified via environment variable.
const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with environment filter
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("barometer=info".parse()?))
        .init();

    // Load configuration from environment
    let port: u16 = env::var("BAROMETER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let api_key = env::var("CWA_API_KEY").ok().filter(|k| !k.is_empty());
    if api_key.is_none() {
        warn!("CWA_API_KEY is not set; weather lookups will answer with a configuration error");
    }

    info!(port, "Starting Barometer server");

    let state = AppState {
        upstream: CwaClient::new()?,
        api_key,
    };

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Barometer is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
