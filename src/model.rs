//! Data models for Barometer.
//!
//! Two families live here:
//!
//! - **Raw upstream types** (`Raw*`): the shape of the 36-hour forecast
//!   dataset as the weather API serves it — a list of locations, each
//!   carrying parallel per-element time series. Every field is
//!   `#[serde(default)]` so a partially-populated payload deserializes
//!   instead of failing; structural problems are caught by the normalizer,
//!   not the deserializer.
//!
//! - **Normalized output types**: the row-oriented forecast records and the
//!   response envelopes this service returns. Output objects have a stable
//!   shape — absent upstream values become empty strings, never missing keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Raw upstream payload
// ============================================================================

/// Top-level upstream response for the 36-hour forecast dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawForecastPayload {
    /// The records block containing the per-location forecasts.
    #[serde(default)]
    pub records: RawRecords,
}

/// The `records` block of the upstream payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecords {
    /// Human-readable dataset description.
    #[serde(default, rename = "datasetDescription")]
    pub dataset_description: String,

    /// Dataset-level update timestamp, when the product variant carries one.
    #[serde(default, rename = "datasetUpdateTime")]
    pub dataset_update_time: Option<String>,

    /// One entry per requested location.
    #[serde(default)]
    pub location: Vec<RawLocation>,
}

/// Forecast data for a single location.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    /// The administrative region name, e.g. "臺北市".
    #[serde(default, rename = "locationName")]
    pub location_name: String,

    /// Parallel time series, one per weather element (Wx, PoP, MinT, ...).
    #[serde(default, rename = "weatherElement")]
    pub weather_element: Vec<RawElementSeries>,
}

/// One named weather element and its time-windowed values.
///
/// Series for different elements usually share the same windows at the same
/// index positions, but the upstream contract does not guarantee equal
/// lengths; consumers must index defensively.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawElementSeries {
    /// Element name: "Wx", "PoP", "MinT", "MaxT", or "CI".
    #[serde(default, rename = "elementName")]
    pub element_name: String,

    /// Chronologically ordered time windows.
    #[serde(default)]
    pub time: Vec<RawTimeWindow>,
}

/// A single time window with its parameter value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTimeWindow {
    /// Window start, e.g. "2026-08-23 12:00:00".
    #[serde(default, rename = "startTime")]
    pub start_time: String,

    /// Window end.
    #[serde(default, rename = "endTime")]
    pub end_time: String,

    /// The element's value over this window.
    #[serde(default)]
    pub parameter: RawParameter,
}

/// An element value: a display name plus optional machine code and unit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawParameter {
    /// Display value, e.g. "多雲短暫雨", "30", "舒適".
    #[serde(default, rename = "parameterName")]
    pub parameter_name: String,

    /// Machine code where the element defines one (e.g. Wx condition codes).
    #[serde(default, rename = "parameterValue")]
    pub parameter_value: String,

    /// Unit for numeric elements, e.g. "百分比", "C".
    #[serde(default, rename = "parameterUnit")]
    pub parameter_unit: String,
}

// ============================================================================
// Normalized output
// ============================================================================

/// One forecast time window in row-oriented form.
///
/// All fields are strings (the upstream serves display values as strings) and
/// all keys are always present; an element missing at this index yields `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastPeriod {
    /// Window start time, verbatim from the upstream.
    #[serde(rename = "startTime")]
    pub start_time: String,

    /// Window end time, verbatim from the upstream.
    #[serde(rename = "endTime")]
    pub end_time: String,

    /// Weather description (upstream element "Wx").
    pub weather: String,

    /// Precipitation probability with a "%" suffix (upstream element "PoP").
    pub rain: String,

    /// Minimum temperature (upstream element "MinT").
    #[serde(rename = "minTemp")]
    pub min_temp: String,

    /// Maximum temperature (upstream element "MaxT").
    #[serde(rename = "maxTemp")]
    pub max_temp: String,

    /// Comfort index (upstream element "CI").
    pub comfort: String,
}

/// The normalized forecast for one region.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherResult {
    /// The region this forecast is for.
    pub city: String,

    /// When the upstream data was last updated.
    #[serde(rename = "updateTime")]
    pub update_time: String,

    /// Forecast periods in chronological order, matching the upstream.
    pub forecasts: Vec<ForecastPeriod>,
}

// ============================================================================
// Response envelopes
// ============================================================================

/// Success envelope for GET /api/weather/:city.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherResponse {
    /// Always `true`; failures use the error envelope instead.
    pub success: bool,

    /// The normalized forecast.
    pub data: WeatherResult,
}

/// Response for GET /api/cities.
#[derive(Debug, Clone, Serialize)]
pub struct CitiesResponse {
    /// Always `true`.
    pub success: bool,

    /// Every region name the weather endpoint accepts.
    pub cities: Vec<&'static str>,
}

/// Response for GET /api/health.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "OK" when the process is able to answer at all.
    pub status: &'static str,

    /// Server time when the probe was answered.
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_payload_tolerates_missing_fields() {
        // A bare records object must deserialize with defaults throughout
        let payload: RawForecastPayload = serde_json::from_str(r#"{"records":{}}"#).unwrap();
        assert!(payload.records.location.is_empty());
        assert!(payload.records.dataset_update_time.is_none());

        let payload: RawForecastPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.records.location.is_empty());
    }

    #[test]
    fn test_raw_payload_camel_case_renames() {
        let payload: RawForecastPayload = serde_json::from_str(
            r#"{
                "success": "true",
                "records": {
                    "datasetDescription": "三十六小時天氣預報",
                    "location": [{
                        "locationName": "臺北市",
                        "weatherElement": [{
                            "elementName": "Wx",
                            "time": [{
                                "startTime": "2026-08-23 12:00:00",
                                "endTime": "2026-08-24 00:00:00",
                                "parameter": {
                                    "parameterName": "多雲短暫雨",
                                    "parameterValue": "8"
                                }
                            }]
                        }]
                    }]
                }
            }"#,
        )
        .unwrap();

        let location = &payload.records.location[0];
        assert_eq!(location.location_name, "臺北市");
        let series = &location.weather_element[0];
        assert_eq!(series.element_name, "Wx");
        assert_eq!(series.time[0].parameter.parameter_name, "多雲短暫雨");
        assert_eq!(series.time[0].parameter.parameter_value, "8");
    }

    #[test]
    fn test_forecast_period_wire_names() {
        let period = ForecastPeriod {
            start_time: "2026-08-23 12:00:00".to_string(),
            end_time: "2026-08-24 00:00:00".to_string(),
            weather: "晴時多雲".to_string(),
            rain: "10%".to_string(),
            min_temp: "26".to_string(),
            max_temp: "33".to_string(),
            comfort: "悶熱".to_string(),
        };

        let value = serde_json::to_value(&period).unwrap();
        assert_eq!(value["startTime"], "2026-08-23 12:00:00");
        assert_eq!(value["endTime"], "2026-08-24 00:00:00");
        assert_eq!(value["minTemp"], "26");
        assert_eq!(value["maxTemp"], "33");
        assert_eq!(value["rain"], "10%");
    }
}
