//! Type definitions for a full slot resolution.
//!
//! Inputs are immutable snapshots supplied by the host on every call; outputs
//! are serialized back to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::calibration::{CalibrationProfile, MatchTier};
use crate::preset::FilamentPreset;
use crate::tray::TraySnapshot;

// =============================================================================
// INPUT TYPES
// =============================================================================

/// Which printer, AMS unit and nozzle the slot belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterContext {
    #[serde(default)]
    pub printer_id: Option<i64>,
    /// AMS unit (0-3), or 128 for a dual-nozzle printer's external holder
    #[serde(default)]
    pub ams_id: i32,
    /// Model code used for preset scope matching (e.g., "H2D", "X1C")
    #[serde(default)]
    pub printer_model: String,
    #[serde(default = "default_nozzle_diameter")]
    pub nozzle_diameter: f32,
    /// Active nozzle: 0 = right/primary, 1 = left
    #[serde(default)]
    pub extruder_id: i32,
}

fn default_nozzle_diameter() -> f32 {
    0.4
}

impl Default for PrinterContext {
    fn default() -> Self {
        Self {
            printer_id: None,
            ams_id: 0,
            printer_model: String::new(),
            nozzle_diameter: default_nozzle_diameter(),
            extruder_id: 0,
        }
    }
}

/// Unsaved edits made in the current configuration session.
///
/// Only honored for editable slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilamentEdits {
    #[serde(default)]
    pub preset_id: Option<String>,
    #[serde(default)]
    pub filament_type: Option<String>,
    #[serde(default)]
    pub color_hex: Option<String>,
    #[serde(default)]
    pub nozzle_temp_min: Option<i32>,
    #[serde(default)]
    pub nozzle_temp_max: Option<i32>,
}

impl FilamentEdits {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A user's remembered preset choice for one physical slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPresetMapping {
    pub printer_id: i64,
    pub ams_id: i32,
    pub tray_id: i32,
    pub preset_id: String,
}

impl SavedPresetMapping {
    /// True if this mapping was saved for the given slot.
    pub fn applies_to(&self, context: &PrinterContext, tray: &TraySnapshot) -> bool {
        context.printer_id == Some(self.printer_id)
            && context.ams_id == self.ams_id
            && tray.tray_id == self.tray_id
    }
}

/// Everything one resolution needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionInput {
    pub tray: TraySnapshot,
    #[serde(default)]
    pub presets: Vec<FilamentPreset>,
    #[serde(default)]
    pub profiles: Vec<CalibrationProfile>,
    #[serde(default)]
    pub context: PrinterContext,
    #[serde(default)]
    pub edits: FilamentEdits,
    #[serde(default)]
    pub saved_mapping: Option<SavedPresetMapping>,
}

impl ResolutionInput {
    /// The same input with all session edits discarded.
    pub fn without_edits(&self) -> Self {
        Self {
            edits: FilamentEdits::default(),
            ..self.clone()
        }
    }
}

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// Resolved values for one AMS slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResult {
    /// Whether the user may change the slot's filament settings
    pub is_editable: bool,
    /// Deduplicated presets for the selection list, sorted by base name
    pub ranked_presets: Vec<FilamentPreset>,
    /// Preset shown as the current choice
    pub selected_preset: Option<FilamentPreset>,
    /// Calibration profile for the active extruder, if any matched
    pub matched_calibration_profile: Option<CalibrationProfile>,
    /// Rule that selected the profile
    pub match_tier: Option<MatchTier>,
    /// K value to apply (0 when no profile matched)
    pub resolved_k: f64,
}

/// Filament settings to send to the printer for one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilamentSettingCommand {
    pub ams_id: i32,
    pub tray_id: i32,
    /// Filament preset id (e.g., "GFA00"); empty when unknown
    pub tray_info_idx: String,
    pub tray_type: String,
    pub tray_sub_brands: String,
    /// RRGGBBAA
    pub tray_color: String,
    pub nozzle_temp_min: i32,
    pub nozzle_temp_max: i32,
    pub k: f64,
}
