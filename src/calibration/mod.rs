//! Pressure-advance ("K factor") calibration profiles and profile matching.

mod matcher;
mod types;

pub use matcher::{
    filter_by_extruder, match_by_k_value, match_by_name, select_profile, MatchCriteria,
    ProfileMatch,
};
pub use types::{
    deserialize_k_value, parse_k_value, CalibrationProfile, MatchTier, UNASSIGNED_SLOT,
};
