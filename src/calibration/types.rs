//! Type definitions for pressure-advance calibration profiles.

use serde::{Deserialize, Deserializer, Serialize};

/// Slot id used when a profile does not report one.
pub const UNASSIGNED_SLOT: i32 = -1;

/// A stored pressure-advance calibration result for one nozzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    pub name: String,
    /// Pressure-advance factor; unparseable values read as 0
    #[serde(default, deserialize_with = "deserialize_k_value")]
    pub k_value: f64,
    /// Nozzle the profile belongs to (0 = right/primary, 1 = left)
    #[serde(default)]
    pub extruder_id: i32,
    #[serde(default = "unassigned_slot")]
    pub slot_id: i32,
}

fn unassigned_slot() -> i32 {
    UNASSIGNED_SLOT
}

impl CalibrationProfile {
    pub fn new(name: impl Into<String>, k_value: f64, extruder_id: i32, slot_id: i32) -> Self {
        Self {
            name: name.into(),
            k_value,
            extruder_id,
            slot_id,
        }
    }
}

/// Which matching rule selected a calibration profile.
///
/// Variants are listed in evaluation order; `Manual` is a user override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// The tray's active K value equals the profile's within tolerance
    KValue,
    /// Name contains both the sub-brand and the color name
    SubBrandAndColor,
    /// Name contains the sub-brand
    SubBrand,
    /// Name contains the filament type (preferring "basic" variants)
    FilamentType,
    /// The catch-all default profile
    Default,
    /// Picked directly by the user
    Manual,
}

/// Parse a K value string. Blank, malformed, or non-finite input reads as 0.
pub fn parse_k_value(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|k| k.is_finite())
        .unwrap_or(0.0)
}

/// Serde adapter accepting a K value as a number, a numeric string, or null.
///
/// Printers and catalogs report K both ways; anything unusable becomes 0.
pub fn deserialize_k_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawK {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<RawK>::deserialize(deserializer)? {
        Some(RawK::Number(k)) if k.is_finite() => k,
        Some(RawK::Text(s)) => parse_k_value(&s),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_k_value() {
        assert_eq!(parse_k_value("0.020"), 0.020);
        assert_eq!(parse_k_value(" 0.035 "), 0.035);
        assert_eq!(parse_k_value(""), 0.0);
        assert_eq!(parse_k_value("abc"), 0.0);
        assert_eq!(parse_k_value("NaN"), 0.0);
        assert_eq!(parse_k_value("inf"), 0.0);
    }

    #[test]
    fn test_profile_deserialize_numeric_and_string_k() {
        let json = r#"[
            {"name": "A", "k_value": 0.02, "extruder_id": 0, "slot_id": 1},
            {"name": "B", "k_value": "0.035", "extruder_id": 1, "slot_id": 2},
            {"name": "C", "k_value": "n/a"},
            {"name": "D", "k_value": null},
            {"name": "E", "k_value": true},
            {"name": "F", "k_value": 1}
        ]"#;
        let profiles: Vec<CalibrationProfile> = serde_json::from_str(json).unwrap();
        assert_eq!(profiles[0].k_value, 0.02);
        assert_eq!(profiles[1].k_value, 0.035);
        assert_eq!(profiles[1].extruder_id, 1);
        assert_eq!(profiles[2].k_value, 0.0);
        assert_eq!(profiles[2].extruder_id, 0);
        assert_eq!(profiles[2].slot_id, UNASSIGNED_SLOT);
        assert_eq!(profiles[3].k_value, 0.0);
        assert_eq!(profiles[4].k_value, 0.0);
        assert_eq!(profiles[5].k_value, 1.0);
    }

    #[test]
    fn test_match_tier_serialize() {
        let json = serde_json::to_string(&MatchTier::SubBrandAndColor).unwrap();
        assert_eq!(json, r#""sub_brand_and_color""#);
        let tier: MatchTier = serde_json::from_str(r#""k_value""#).unwrap();
        assert_eq!(tier, MatchTier::KValue);
    }
}
