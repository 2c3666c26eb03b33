//! # Payload Extraction
//!
//! Locate and decode the structured object inside free-form suggester text.
//! The text may carry prose or markdown fences around the object.

use serde_json::Value;

use crate::domain::{FanoutError, SuggestedRoute, Waypoint};

/// Slice from the first `{` to the last `}`, inclusive.
pub fn locate_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Decode suggester text into a route.
///
/// Fails with `UpstreamFormat` when no object is present, the object is not
/// valid JSON, or `stops` is present but not an array. Individual stops are
/// decoded leniently.
pub fn parse_suggestion(text: &str) -> Result<SuggestedRoute, FanoutError> {
    let payload = locate_json_object(text.trim()).ok_or_else(|| {
        FanoutError::UpstreamFormat("no JSON object found in suggester response".into())
    })?;

    let value: Value = serde_json::from_str(payload)
        .map_err(|e| FanoutError::UpstreamFormat(format!("invalid JSON payload: {e}")))?;

    let stops = match value.get("stops") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(Waypoint::from_value).collect(),
        Some(other) => {
            return Err(FanoutError::UpstreamFormat(format!(
                "stops is not a list: {other}"
            )))
        }
    };

    let route_description = value
        .get("route_description")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(SuggestedRoute {
        stops,
        route_description,
    })
}
