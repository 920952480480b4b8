use serde::{Deserialize, Serialize};

use super::color::{color_name_for_code, parse_rgba, Rgba};
use crate::calibration::deserialize_k_value;

/// Marker the printer reports for a slot with no filament loaded.
pub const EMPTY_TRAY_TYPE: &str = "NONE";

/// Length of a manufacturer spool UID in hex characters.
const SPOOL_UID_LEN: usize = 32;

/// A read-only snapshot of one AMS slot as reported by the printer.
///
/// RFID data is assumed to be decoded already; every field except the slot id
/// may be missing on a third-party or empty spool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraySnapshot {
    /// Slot identifier, stable per physical slot (0-3 within an AMS, 254/255 external)
    pub tray_id: i32,
    /// Filament family (e.g., "PLA", "PETG-CF"); empty or "NONE" for an empty slot
    #[serde(default)]
    pub filament_type: String,
    /// Sub-brand label (e.g., "PLA Basic")
    #[serde(default)]
    pub sub_brand: Option<String>,
    /// Color in RRGGBBAA hex format
    #[serde(default)]
    pub color_hex: Option<String>,
    /// 32-char hex UID on manufacturer-tagged spools, zero-filled otherwise
    #[serde(default)]
    pub spool_uid: Option<String>,
    /// Manufacturer color code, formatted "<series>-<code>" (e.g., "A00-Y2")
    #[serde(default)]
    pub color_code: Option<String>,
    /// Filament preset id the tag or printer reports (e.g., "GFA00")
    #[serde(default)]
    pub tray_info_idx: Option<String>,
    /// Active pressure-advance factor (0 = unset)
    #[serde(default, deserialize_with = "deserialize_k_value")]
    pub k_value: f64,
    #[serde(default)]
    pub nozzle_temp_min: i32,
    #[serde(default)]
    pub nozzle_temp_max: i32,
}

impl TraySnapshot {
    /// True if no filament is loaded in this slot.
    pub fn is_empty(&self) -> bool {
        self.filament_type.is_empty() || self.filament_type == EMPTY_TRAY_TYPE
    }

    /// True if the loaded spool carries a manufacturer RFID identity.
    pub fn is_vendor_spool(&self) -> bool {
        is_vendor_spool(self.spool_uid.as_deref())
    }

    /// Whether the user may change this slot's filament settings.
    ///
    /// Manufacturer-tagged spools are locked to their tag data; empty slots and
    /// third-party spools are editable.
    pub fn is_editable(&self) -> bool {
        self.is_empty() || !self.is_vendor_spool()
    }

    /// Filament type, or `None` for an empty slot.
    pub fn loaded_type(&self) -> Option<&str> {
        if self.is_empty() {
            None
        } else {
            Some(self.filament_type.as_str())
        }
    }

    /// Non-blank sub-brand label.
    pub fn sub_brand(&self) -> Option<&str> {
        self.sub_brand.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Human-readable color name from the manufacturer color code.
    pub fn color_name(&self) -> Option<&'static str> {
        self.color_code.as_deref().and_then(color_name_for_code)
    }

    /// Display color, mid-gray when missing or malformed.
    pub fn color(&self) -> Rgba {
        parse_rgba(self.color_hex.as_deref())
    }
}

/// Check whether a spool UID identifies a manufacturer-tagged spool.
///
/// Returns true only for exactly 32 hex characters that are not all zeros.
pub fn is_vendor_spool(uid: Option<&str>) -> bool {
    let Some(uid) = uid else {
        return false;
    };
    if uid.len() != SPOOL_UID_LEN {
        return false;
    }
    if uid.bytes().all(|b| b == b'0') {
        return false;
    }
    uid.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Free-function form of [`TraySnapshot::is_editable`].
pub fn is_editable(tray: &TraySnapshot) -> bool {
    tray.is_editable()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VENDOR_UID: &str = "A1B2C3D4E5F6A1B2C3D4E5F6A1B2C3D4";
    const ZERO_UID: &str = "00000000000000000000000000000000";

    fn tray(filament_type: &str, uid: Option<&str>) -> TraySnapshot {
        TraySnapshot {
            tray_id: 0,
            filament_type: filament_type.to_string(),
            spool_uid: uid.map(|s| s.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_vendor_uid_accepts_32_hex_chars() {
        assert!(is_vendor_spool(Some(VENDOR_UID)));
        assert!(is_vendor_spool(Some("a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4")));
        assert!(is_vendor_spool(Some("00000000000000000000000000000001")));
    }

    #[test]
    fn test_vendor_uid_rejects_missing_short_and_zero() {
        assert!(!is_vendor_spool(None));
        assert!(!is_vendor_spool(Some("")));
        assert!(!is_vendor_spool(Some("A1B2C3D4")));
        assert!(!is_vendor_spool(Some(ZERO_UID)));
        // 33 characters
        assert!(!is_vendor_spool(Some("A1B2C3D4E5F6A1B2C3D4E5F6A1B2C3D4E")));
    }

    #[test]
    fn test_vendor_uid_rejects_non_hex() {
        assert!(!is_vendor_spool(Some("G1B2C3D4E5F6A1B2C3D4E5F6A1B2C3D4")));
        assert!(!is_vendor_spool(Some("A1B2C3D4E5F6A1B2 3D4E5F6A1B2C3D4")));
    }

    #[test]
    fn test_empty_tray_detection() {
        assert!(tray("", None).is_empty());
        assert!(tray("NONE", None).is_empty());
        assert!(!tray("PLA", None).is_empty());
        assert_eq!(tray("NONE", None).loaded_type(), None);
        assert_eq!(tray("PETG-CF", None).loaded_type(), Some("PETG-CF"));
    }

    #[test]
    fn test_empty_tray_is_editable_regardless_of_uid() {
        for uid in [None, Some(VENDOR_UID), Some(ZERO_UID)] {
            assert!(tray("", uid).is_editable(), "uid {:?}", uid);
            assert!(tray("NONE", uid).is_editable(), "uid {:?}", uid);
        }
    }

    #[test]
    fn test_loaded_vendor_spool_is_locked() {
        assert!(!tray("PLA", Some(VENDOR_UID)).is_editable());
        assert!(is_editable(&tray("PLA", Some(ZERO_UID))));
        assert!(is_editable(&tray("PLA", None)));
    }

    #[test]
    fn test_blank_sub_brand_is_absent() {
        let mut t = tray("PLA", None);
        t.sub_brand = Some("   ".to_string());
        assert_eq!(t.sub_brand(), None);
        t.sub_brand = Some("PLA Basic".to_string());
        assert_eq!(t.sub_brand(), Some("PLA Basic"));
    }

    #[test]
    fn test_tray_deserialize_with_string_k_value() {
        let json = r#"{
            "tray_id": 2,
            "filament_type": "PLA",
            "sub_brand": "PLA Basic",
            "color_hex": "FFD00BFF",
            "spool_uid": "A1B2C3D4E5F6A1B2C3D4E5F6A1B2C3D4",
            "color_code": "A00-Y2",
            "k_value": "0.020",
            "nozzle_temp_min": 190,
            "nozzle_temp_max": 230
        }"#;
        let t: TraySnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(t.k_value, 0.020);
        assert_eq!(t.color_name(), Some("Sunflower Yellow"));
        assert_eq!(t.color().css(), "rgb(255,208,11)");
        assert!(!t.is_editable());
    }

    #[test]
    fn test_tray_deserialize_minimal() {
        let t: TraySnapshot = serde_json::from_str(r#"{"tray_id": 1}"#).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.k_value, 0.0);
        assert_eq!(t.color().css(), "rgb(128,128,128)");
    }
}
