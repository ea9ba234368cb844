//! The fixed table of supported administrative regions and the city validator.
//!
//! The upstream 36-hour forecast dataset covers exactly the 22 city/county
//! divisions of Taiwan. The table is compile-time constant: it is never
//! mutated, reloaded, or extended at runtime, and every inbound city string
//! is checked against it before anything else happens.

use crate::error::ApiError;

/// All region names accepted by the weather endpoint, in the upstream's
/// customary order (special municipalities first, then cities and counties).
///
/// Membership is exact string equality. The common 台/臺 spelling variants
/// are not normalized; the upstream only recognizes the 臺 forms.
pub const REGIONS: [&str; 22] = [
    "臺北市",
    "新北市",
    "桃園市",
    "臺中市",
    "臺南市",
    "高雄市",
    "基隆市",
    "新竹市",
    "嘉義市",
    "新竹縣",
    "苗栗縣",
    "彰化縣",
    "南投縣",
    "雲林縣",
    "嘉義縣",
    "屏東縣",
    "宜蘭縣",
    "花蓮縣",
    "臺東縣",
    "澎湖縣",
    "金門縣",
    "連江縣",
];

/// Validate a caller-supplied, URL-decoded city string.
///
/// Rejection policy: empty input, the literal `"undefined"` (a frontend that
/// interpolates a missing variable sends exactly that), and anything not in
/// [`REGIONS`] all fail with [`ApiError::InvalidCity`]. The error response
/// lists the accepted names so callers can self-correct.
///
/// No side effects; the returned reference points into the static table.
pub fn validate(input: &str) -> Result<&'static str, ApiError> {
    if input.is_empty() || input == "undefined" {
        return Err(ApiError::InvalidCity {
            input: input.to_string(),
        });
    }

    REGIONS
        .iter()
        .find(|region| **region == input)
        .copied()
        .ok_or_else(|| ApiError::InvalidCity {
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_regions_validate() {
        for region in REGIONS {
            assert_eq!(validate(region).unwrap(), region);
        }
    }

    #[test]
    fn test_region_count() {
        assert_eq!(REGIONS.len(), 22);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(validate(""), Err(ApiError::InvalidCity { .. })));
    }

    #[test]
    fn test_literal_undefined_rejected() {
        assert!(matches!(
            validate("undefined"),
            Err(ApiError::InvalidCity { .. })
        ));
    }

    #[test]
    fn test_unknown_city_rejected() {
        for input in ["Atlantis", "taipei", "臺北", "臺北市 "] {
            assert!(
                matches!(validate(input), Err(ApiError::InvalidCity { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_spelling_variant_not_normalized() {
        // 台北市 (common variant) is not the upstream's 臺北市
        assert!(matches!(
            validate("台北市"),
            Err(ApiError::InvalidCity { .. })
        ));
    }
}
