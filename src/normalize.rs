//! Forecast normalization.
//!
//! The upstream serves each location as a set of parallel per-element time
//! series: one array of windows for "Wx", one for "PoP", and so on, aligned
//! by index. [`normalize`] pivots that column-oriented layout into
//! row-oriented [`ForecastPeriod`] records, one per time window.
//!
//! Normalization is a pure function of its input — no I/O, no clock except
//! as the last-resort update-time fallback.

use std::collections::HashMap;

use chrono::Utc;

use crate::error::ApiError;
use crate::model::{ForecastPeriod, RawForecastPayload, RawTimeWindow, WeatherResult};

/// Weather elements the normalizer recognizes. Anything else in the payload
/// is ignored.
const KNOWN_ELEMENTS: [&str; 5] = ["Wx", "PoP", "MinT", "MaxT", "CI"];

/// The element whose series determines the period count and time windows.
const REFERENCE_ELEMENT: &str = "Wx";

/// Pivot the raw payload for `region` into a [`WeatherResult`].
///
/// Policy decisions baked in here:
///
/// - Period count is **dynamic**: the length of the "Wx" series (the 36-hour
///   product serves 3, but that is not contractual), falling back to the
///   longest known series when "Wx" is absent.
/// - Every element is indexed **independently and defensively**: a series
///   shorter than the reference yields `""` for the missing indices rather
///   than failing.
/// - `rain` is the PoP value suffixed with `%`, left empty when PoP has no
///   value at that index (never a bare `"%"`).
/// - `updateTime` prefers the records-level update field, then the first
///   period's start time, then the current wall clock in RFC 3339.
///
/// # Errors
///
/// [`ApiError::MalformedPayload`] when the payload has no record for the
/// region (the fetcher checks this, so hitting it here means the payload
/// changed under us) or no known weather element at all.
pub fn normalize(raw: &RawForecastPayload, region: &str) -> Result<WeatherResult, ApiError> {
    let location = raw
        .records
        .location
        .iter()
        .find(|l| l.location_name == region)
        .ok_or_else(|| ApiError::MalformedPayload(format!("no location record for {region}")))?;

    // Single scan: element name -> its series. Unknown names are dropped.
    let mut series: HashMap<&str, &[RawTimeWindow]> = HashMap::new();
    for element in &location.weather_element {
        if KNOWN_ELEMENTS.contains(&element.element_name.as_str()) {
            series.insert(element.element_name.as_str(), &element.time);
        }
    }

    // Fallback scans in fixed element order so ties resolve deterministically
    let reference: &[RawTimeWindow] = series
        .get(REFERENCE_ELEMENT)
        .copied()
        .or_else(|| {
            KNOWN_ELEMENTS
                .iter()
                .filter_map(|name| series.get(name).copied())
                .max_by_key(|windows| windows.len())
        })
        .ok_or_else(|| {
            ApiError::MalformedPayload(format!("no known weather element for {region}"))
        })?;

    let mut forecasts = Vec::with_capacity(reference.len());
    for (index, window) in reference.iter().enumerate() {
        let rain = value_at(&series, "PoP", index);
        forecasts.push(ForecastPeriod {
            start_time: window.start_time.clone(),
            end_time: window.end_time.clone(),
            weather: value_at(&series, "Wx", index),
            rain: if rain.is_empty() {
                rain
            } else {
                format!("{rain}%")
            },
            min_temp: value_at(&series, "MinT", index),
            max_temp: value_at(&series, "MaxT", index),
            comfort: value_at(&series, "CI", index),
        });
    }

    let update_time = raw
        .records
        .dataset_update_time
        .clone()
        .filter(|t| !t.is_empty())
        .or_else(|| {
            forecasts
                .first()
                .map(|f| f.start_time.clone())
                .filter(|t| !t.is_empty())
        })
        .unwrap_or_else(|| Utc::now().to_rfc3339());

    Ok(WeatherResult {
        city: region.to_string(),
        update_time,
        forecasts,
    })
}

/// Read one element's display value at `index`, or `""` when the element is
/// absent or its series is too short.
fn value_at(series: &HashMap<&str, &[RawTimeWindow]>, element: &str, index: usize) -> String {
    series
        .get(element)
        .and_then(|windows| windows.get(index))
        .map(|window| window.parameter.parameter_name.clone())
        .unwrap_or_default()
}
