//! Client for the upstream weather open-data API.
//!
//! The only dataset this service consumes is F-C0032-001, the 36-hour
//! city/county forecast. One invocation of [`CwaClient::fetch`] makes exactly
//! one outbound GET, parameterized by region name and API key; there are no
//! retries, so the client timeout is the only latency bound on a request.
//!
//! # API Reference
//!
//! See: <https://opendata.cwa.gov.tw/dist/opendata-swagger.html>

use std::time::Duration;

use crate::error::ApiError;
use crate::model::RawForecastPayload;

/// Base URL for the open-data datastore API.
const CWA_API_BASE: &str = "https://opendata.cwa.gov.tw/api/v1/rest/datastore";

/// Dataset identifier for the 36-hour city/county forecast.
pub const FORECAST_DATASET: &str = "F-C0032-001";

/// Outbound request timeout. The upstream normally answers well under a
/// second; anything past this is treated as a transport failure.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for querying the upstream forecast dataset.
#[derive(Clone)]
pub struct CwaClient {
    client: reqwest::Client,
    base_url: String,
}

impl CwaClient {
    /// Create a client against the production API.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_base_url(CWA_API_BASE)
    }

    /// Create a client with a custom base URL (for testing).
    pub fn with_base_url(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Fetch the raw 36-hour forecast payload for one region.
    ///
    /// The caller is responsible for having a key at all; this method assumes
    /// one and never checks the environment itself.
    ///
    /// # Errors
    ///
    /// - [`ApiError::UpstreamStatus`] when the upstream answers non-2xx, with
    ///   the upstream's status and body attached for diagnostics.
    /// - [`ApiError::UpstreamRequest`] when the call itself fails (timeout,
    ///   DNS, connection reset). The URL is stripped from the error so the
    ///   key in the query string never reaches a log line or response.
    /// - [`ApiError::MalformedPayload`] when the body is not decodable.
    /// - [`ApiError::NoData`] when the payload decodes but carries no record
    ///   for the requested region.
    pub async fn fetch(
        &self,
        region: &str,
        api_key: &str,
    ) -> Result<RawForecastPayload, ApiError> {
        let url = format!(
            "{}/{}?Authorization={}&locationName={}",
            self.base_url,
            FORECAST_DATASET,
            api_key,
            urlencoding::encode(region)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::UpstreamRequest(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable upstream error body".to_string());
            return Err(ApiError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        let payload = response
            .json::<RawForecastPayload>()
            .await
            .map_err(|e| ApiError::MalformedPayload(e.without_url().to_string()))?;

        if !payload
            .records
            .location
            .iter()
            .any(|l| l.location_name == region)
        {
            return Err(ApiError::NoData {
                city: region.to_string(),
            });
        }

        Ok(payload)
    }
}
