//! AMS slot resolution.
//!
//! Given one tray snapshot, the vendor preset catalog, the calibration
//! profiles and the printer context, decides what the user may edit, which
//! presets to offer, and which pressure-advance profile and K value apply.
//!
//! # Architecture
//!
//! - **Editability**: vendor-tagged spools are locked, everything else editable
//! - **Presets**: experimental entries dropped, model-scoped variants win dedup
//! - **Calibration**: restricted to the active extruder, then K-value match,
//!   then an ordered chain of name matches
//! - **Output**: a plain `ResolutionResult` plus the printer settings tuple
//!
//! # Example
//!
//! ```ignore
//! use filament_resolver::resolver::{FilamentResolver, ResolutionInput};
//!
//! let resolver = FilamentResolver::new(filament_resolver::config::load_or_default());
//! let result = resolver.resolve(&input);
//!
//! if let Some(profile) = &result.matched_calibration_profile {
//!     println!("{} -> K={}", profile.name, result.resolved_k);
//! }
//! let command = resolver.build_setting_command(&input, &result)?;
//! ```

mod engine;
mod types;

pub use engine::FilamentResolver;
pub use types::*;
