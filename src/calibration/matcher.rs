//! Calibration-profile selection for an AMS slot.
//!
//! Candidates are first restricted to the active extruder. A profile is then
//! chosen by one of two paths:
//!
//! - **K value**: the tray already reports a K value, and a candidate stores
//!   the same value (within tolerance). This reproduces an earlier choice.
//! - **Name**: an ordered list of name-matching steps, first hit wins:
//!   sub-brand + color, sub-brand, filament type, then the default profile.

use serde::Serialize;

use super::types::{CalibrationProfile, MatchTier};
use crate::config::ResolverConfig;

/// Attributes a profile name is matched against.
///
/// Blank strings are stored as `None`, which removes that step from the chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchCriteria {
    pub sub_brands: Option<String>,
    pub filament_type: Option<String>,
    pub color_name: Option<String>,
}

impl MatchCriteria {
    pub fn new(
        sub_brands: Option<&str>,
        filament_type: Option<&str>,
        color_name: Option<&str>,
    ) -> Self {
        Self {
            sub_brands: non_blank(sub_brands),
            filament_type: non_blank(filament_type),
            color_name: non_blank(color_name),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A selected profile together with the K value it resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileMatch<'a> {
    pub profile: &'a CalibrationProfile,
    pub tier: MatchTier,
    pub k_value: f64,
}

/// Profiles belonging to the given extruder, in catalog order.
pub fn filter_by_extruder(
    profiles: &[CalibrationProfile],
    extruder_id: i32,
) -> Vec<&CalibrationProfile> {
    profiles
        .iter()
        .filter(|p| p.extruder_id == extruder_id)
        .collect()
}

/// Find the first candidate whose K value is strictly within `tolerance` of
/// `tray_k`. A non-positive `tray_k` means "unset" and never matches.
pub fn match_by_k_value<'a>(
    candidates: &[&'a CalibrationProfile],
    tray_k: f64,
    tolerance: f64,
) -> Option<&'a CalibrationProfile> {
    if tray_k <= 0.0 {
        return None;
    }
    candidates
        .iter()
        .copied()
        .find(|p| (p.k_value - tray_k).abs() < tolerance)
}

type NameStep = for<'a> fn(
    &[&'a CalibrationProfile],
    &MatchCriteria,
    &ResolverConfig,
) -> Option<&'a CalibrationProfile>;

/// Name-matching steps in priority order.
const NAME_STEPS: [(MatchTier, NameStep); 4] = [
    (MatchTier::SubBrandAndColor, match_sub_brand_and_color),
    (MatchTier::SubBrand, match_sub_brand),
    (MatchTier::FilamentType, match_filament_type),
    (MatchTier::Default, match_default),
];

/// Run the name-matching steps in order and return the first hit.
pub fn match_by_name<'a>(
    candidates: &[&'a CalibrationProfile],
    criteria: &MatchCriteria,
    config: &ResolverConfig,
) -> Option<(MatchTier, &'a CalibrationProfile)> {
    NAME_STEPS
        .iter()
        .find_map(|(tier, step)| step(candidates, criteria, config).map(|p| (*tier, p)))
}

/// Choose a profile for a tray: K-value match first, name match as fallback.
///
/// `candidates` must already be restricted to the active extruder.
pub fn select_profile<'a>(
    candidates: &[&'a CalibrationProfile],
    tray_k: f64,
    criteria: &MatchCriteria,
    config: &ResolverConfig,
) -> Option<ProfileMatch<'a>> {
    if let Some(profile) = match_by_k_value(candidates, tray_k, config.k_tolerance) {
        return Some(ProfileMatch {
            profile,
            tier: MatchTier::KValue,
            // The tray's reading is authoritative, not the stored value
            k_value: tray_k,
        });
    }

    match_by_name(candidates, criteria, config).map(|(tier, profile)| ProfileMatch {
        profile,
        tier,
        k_value: profile.k_value,
    })
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn match_sub_brand_and_color<'a>(
    candidates: &[&'a CalibrationProfile],
    criteria: &MatchCriteria,
    _config: &ResolverConfig,
) -> Option<&'a CalibrationProfile> {
    let sub_brands = criteria.sub_brands.as_deref()?;
    let color = criteria.color_name.as_deref()?;
    candidates.iter().copied().find(|p| {
        contains_ignore_case(&p.name, sub_brands) && contains_ignore_case(&p.name, color)
    })
}

fn match_sub_brand<'a>(
    candidates: &[&'a CalibrationProfile],
    criteria: &MatchCriteria,
    _config: &ResolverConfig,
) -> Option<&'a CalibrationProfile> {
    let sub_brands = criteria.sub_brands.as_deref()?;
    candidates
        .iter()
        .copied()
        .find(|p| contains_ignore_case(&p.name, sub_brands))
}

fn match_filament_type<'a>(
    candidates: &[&'a CalibrationProfile],
    criteria: &MatchCriteria,
    _config: &ResolverConfig,
) -> Option<&'a CalibrationProfile> {
    let type_token = criteria.filament_type.as_deref()?.to_uppercase();
    let by_type: Vec<&CalibrationProfile> = candidates
        .iter()
        .copied()
        .filter(|p| p.name.to_uppercase().contains(&type_token))
        .collect();

    by_type
        .iter()
        .copied()
        .find(|p| contains_ignore_case(&p.name, "basic"))
        .or_else(|| by_type.first().copied())
}

fn match_default<'a>(
    candidates: &[&'a CalibrationProfile],
    _criteria: &MatchCriteria,
    config: &ResolverConfig,
) -> Option<&'a CalibrationProfile> {
    let default_name = config.default_profile_name.as_str();
    candidates
        .iter()
        .copied()
        .find(|p| p.name.eq_ignore_ascii_case(default_name) || p.slot_id == 0)
}
