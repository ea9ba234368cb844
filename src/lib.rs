//! Barometer - a minimal JSON proxy for Taiwan's 36-hour weather forecast.
//!
//! # Overview
//!
//! Barometer sits in front of the Central Weather Administration's open-data
//! API and does exactly four things: validates a caller-supplied city name
//! against the fixed set of 22 administrative regions, makes one upstream
//! call with the configured API key, pivots the upstream's per-element time
//! series into per-period forecast records, and answers with a consistent
//! JSON envelope. Nothing is cached or persisted; every entity is built
//! fresh per request.
//!
//! # Modules
//!
//! - [`region`]: The fixed region table and city validation
//! - [`model`]: Raw upstream payload types and normalized output types
//! - [`error`]: Error taxonomy and JSON error envelopes
//! - [`upstream`]: Client for the upstream forecast dataset
//! - [`normalize`]: Pivoting the upstream layout into forecast periods
//! - [`api`]: HTTP handlers and router assembly

pub mod api;
pub mod error;
pub mod model;
pub mod normalize;
pub mod region;
pub mod upstream;
