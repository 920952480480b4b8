//! Slot resolution engine.
//!
//! `FilamentResolver` combines the tray, preset and calibration rules into a
//! single `ResolutionResult`. It holds only configuration; every call
//! recomputes from the input it is given.

use tracing::{debug, info, warn};

use crate::calibration::{
    filter_by_extruder, select_profile, CalibrationProfile, MatchCriteria, MatchTier,
};
use crate::config::ResolverConfig;
use crate::error::ResolverError;
use crate::preset::{rank_presets, FilamentPreset};
use crate::tray::normalize_color_hex;

use super::types::*;

/// Printer-accepted nozzle temperature range (Celsius).
const NOZZLE_TEMP_MIN: i32 = 150;
const NOZZLE_TEMP_MAX: i32 = 350;

/// Highest AMS id the printer accepts (external holder on dual-nozzle models).
const MAX_AMS_ID: i32 = 128;

/// Highest tray id the filament-setting command accepts (trays within one AMS).
const MAX_TRAY_ID: i32 = 3;

/// The resolution engine.
#[derive(Debug, Clone, Default)]
pub struct FilamentResolver {
    config: ResolverConfig,
}

impl FilamentResolver {
    /// Create a resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve editability, preset list and calibration profile for one slot.
    ///
    /// Total over its input: missing data removes matching criteria and an
    /// empty catalog produces empty/`None` outputs.
    pub fn resolve(&self, input: &ResolutionInput) -> ResolutionResult {
        let tray = &input.tray;
        let is_editable = tray.is_editable();

        if !is_editable && !input.edits.is_empty() {
            debug!(
                "Ignoring session edits for vendor spool in tray {}",
                tray.tray_id
            );
        }

        let ranked = rank_presets(&input.presets, &input.context.printer_model);
        let selected = self.selected_preset(input, &ranked, is_editable);

        let candidates = filter_by_extruder(&input.profiles, input.context.extruder_id);
        let criteria = self.match_criteria(input, selected, is_editable);
        let profile_match = select_profile(&candidates, tray.k_value, &criteria, &self.config);

        match &profile_match {
            Some(m) => debug!(
                "Tray {} (extruder {}): matched {:?} via {:?}, K={}",
                tray.tray_id, input.context.extruder_id, m.profile.name, m.tier, m.k_value
            ),
            None => debug!(
                "Tray {} (extruder {}): no calibration profile among {} candidates",
                tray.tray_id,
                input.context.extruder_id,
                candidates.len()
            ),
        }

        ResolutionResult {
            is_editable,
            ranked_presets: ranked.into_iter().cloned().collect(),
            selected_preset: selected.cloned(),
            matched_calibration_profile: profile_match.map(|m| m.profile.clone()),
            match_tier: profile_match.map(|m| m.tier),
            resolved_k: profile_match.map_or(0.0, |m| m.k_value),
        }
    }

    /// Build the name-matching criteria for a slot.
    ///
    /// Vendor spools match on their tag data (sub-brand, type, color name).
    /// Editable slots match on the selected preset's clean name and the
    /// user-chosen type; color names only exist on tag data.
    pub fn match_criteria(
        &self,
        input: &ResolutionInput,
        selected: Option<&FilamentPreset>,
        is_editable: bool,
    ) -> MatchCriteria {
        let tray = &input.tray;
        if is_editable {
            let filament_type = non_blank(input.edits.filament_type.as_deref())
                .or_else(|| tray.loaded_type());
            MatchCriteria::new(selected.map(|p| p.clean_name()), filament_type, None)
        } else {
            MatchCriteria::new(tray.sub_brand(), tray.loaded_type(), tray.color_name())
        }
    }

    /// Calibration profiles the user may pick from for this slot.
    pub fn manual_candidates<'a>(
        &self,
        input: &'a ResolutionInput,
    ) -> Vec<&'a CalibrationProfile> {
        filter_by_extruder(&input.profiles, input.context.extruder_id)
    }

    /// Override the matched profile with one the user picked.
    ///
    /// `picked` is compared as a whole (name, K, extruder and slot), so
    /// same-named profiles in different slots stay distinct. Returns `None`
    /// if it is not a candidate for the active extruder; profiles of the
    /// other nozzle can never be applied.
    pub fn apply_manual_profile(
        &self,
        input: &ResolutionInput,
        result: &ResolutionResult,
        picked: &CalibrationProfile,
    ) -> Option<ResolutionResult> {
        let Some(profile) = self
            .manual_candidates(input)
            .into_iter()
            .find(|p| *p == picked)
        else {
            warn!(
                "Profile {:?} (slot {}) is not available for extruder {}",
                picked.name, picked.slot_id, input.context.extruder_id
            );
            return None;
        };

        info!(
            "Tray {}: manual profile {:?}, K={}",
            input.tray.tray_id, profile.name, profile.k_value
        );
        Some(ResolutionResult {
            matched_calibration_profile: Some(profile.clone()),
            match_tier: Some(MatchTier::Manual),
            resolved_k: profile.k_value,
            ..result.clone()
        })
    }

    /// Re-resolve against the tray's original snapshot, discarding session edits.
    pub fn reset(&self, input: &ResolutionInput) -> ResolutionResult {
        info!("Tray {}: resetting session edits", input.tray.tray_id);
        self.resolve(&input.without_edits())
    }

    /// Compute the settings tuple to send to the printer and validate it.
    pub fn build_setting_command(
        &self,
        input: &ResolutionInput,
        result: &ResolutionResult,
    ) -> Result<FilamentSettingCommand, ResolverError> {
        let tray = &input.tray;
        let selected = result.selected_preset.as_ref();

        let command = if result.is_editable {
            let edits = &input.edits;
            FilamentSettingCommand {
                ams_id: input.context.ams_id,
                tray_id: tray.tray_id,
                tray_info_idx: selected
                    .map(|p| p.id.clone())
                    .or_else(|| tray.tray_info_idx.clone())
                    .unwrap_or_default(),
                tray_type: non_blank(edits.filament_type.as_deref())
                    .or_else(|| tray.loaded_type())
                    .unwrap_or_default()
                    .to_string(),
                tray_sub_brands: selected
                    .map(|p| p.clean_name().to_string())
                    .unwrap_or_default(),
                tray_color: normalize_color_hex(
                    non_blank(edits.color_hex.as_deref()).or(tray.color_hex.as_deref()),
                ),
                nozzle_temp_min: edits.nozzle_temp_min.unwrap_or(tray.nozzle_temp_min),
                nozzle_temp_max: edits.nozzle_temp_max.unwrap_or(tray.nozzle_temp_max),
                k: result.resolved_k,
            }
        } else {
            FilamentSettingCommand {
                ams_id: input.context.ams_id,
                tray_id: tray.tray_id,
                tray_info_idx: tray
                    .tray_info_idx
                    .clone()
                    .or_else(|| selected.map(|p| p.id.clone()))
                    .unwrap_or_default(),
                tray_type: tray.filament_type.clone(),
                tray_sub_brands: tray.sub_brand().unwrap_or_default().to_string(),
                tray_color: normalize_color_hex(tray.color_hex.as_deref()),
                nozzle_temp_min: tray.nozzle_temp_min,
                nozzle_temp_max: tray.nozzle_temp_max,
                k: result.resolved_k,
            }
        };

        validate_command(&command)?;
        Ok(command)
    }

    fn selected_preset<'a>(
        &self,
        input: &'a ResolutionInput,
        ranked: &[&'a FilamentPreset],
        is_editable: bool,
    ) -> Option<&'a FilamentPreset> {
        let find = |id: &str| input.presets.iter().find(|p| p.id == id);

        if is_editable {
            if let Some(id) = input.edits.preset_id.as_deref() {
                return find(id);
            }
            return input
                .saved_mapping
                .as_ref()
                .filter(|m| m.applies_to(&input.context, &input.tray))
                .and_then(|m| find(&m.preset_id));
        }

        let tray = &input.tray;
        if let Some(preset) = tray.tray_info_idx.as_deref().and_then(find) {
            return Some(preset);
        }
        let sub_brand = tray.sub_brand()?.to_lowercase();
        ranked
            .iter()
            .copied()
            .find(|p| p.base_name().to_lowercase().contains(&sub_brand))
    }
}

/// Blank session edits count as "not edited".
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate_command(command: &FilamentSettingCommand) -> Result<(), ResolverError> {
    if command.tray_type.trim().is_empty() || command.tray_type == crate::tray::EMPTY_TRAY_TYPE {
        return Err(ResolverError::InvalidCommand(
            "filament type is required".to_string(),
        ));
    }
    if !(0..=MAX_AMS_ID).contains(&command.ams_id) {
        return Err(ResolverError::InvalidCommand(format!(
            "AMS id {} out of range (0-{})",
            command.ams_id, MAX_AMS_ID
        )));
    }
    if !(0..=MAX_TRAY_ID).contains(&command.tray_id) {
        return Err(ResolverError::InvalidCommand(format!(
            "tray id {} out of range (0-{})",
            command.tray_id, MAX_TRAY_ID
        )));
    }
    for (field, temp) in [
        ("nozzle_temp_min", command.nozzle_temp_min),
        ("nozzle_temp_max", command.nozzle_temp_max),
    ] {
        if !(NOZZLE_TEMP_MIN..=NOZZLE_TEMP_MAX).contains(&temp) {
            return Err(ResolverError::InvalidCommand(format!(
                "{} {}C out of range ({}-{}C)",
                field, temp, NOZZLE_TEMP_MIN, NOZZLE_TEMP_MAX
            )));
        }
    }
    if command.nozzle_temp_min > command.nozzle_temp_max {
        return Err(ResolverError::InvalidCommand(format!(
            "nozzle_temp_min {}C exceeds nozzle_temp_max {}C",
            command.nozzle_temp_min, command.nozzle_temp_max
        )));
    }
    if !(0.0..=1.0).contains(&command.k) {
        return Err(ResolverError::InvalidCommand(format!(
            "K value {} out of range (0-1)",
            command.k
        )));
    }
    Ok(())
}
