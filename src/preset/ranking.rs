//! Filament preset ranking for the slot configuration list.
//!
//! 1. Drop experimental presets (`"# "` prefix).
//! 2. Stable-partition presets scoped to the current printer model first.
//! 3. Deduplicate by normalized name, keeping the first occurrence. Step 2
//!    guarantees the kept entry is the model-scoped one when it exists.
//! 4. Sort alphabetically by base name.

use std::cmp::Ordering;
use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use super::types::FilamentPreset;

/// Matches presets whose `@` scope names a printer model as a whole word.
///
/// `"H2D"` matches `"@BBL H2D"`, `"@Bambu Lab H2D 0.4 nozzle"` and
/// `"@BBL H2D Pro"`, but not `"@BBL H2DPro"`.
#[derive(Debug, Clone)]
pub struct PrinterModelMatcher {
    pattern: Option<Regex>,
}

impl PrinterModelMatcher {
    pub fn new(printer_model: &str) -> Self {
        let model = printer_model.trim();
        if model.is_empty() {
            return Self { pattern: None };
        }

        let source = format!(r"@.*\b{}\b", regex::escape(model));
        let pattern = match RegexBuilder::new(&source).case_insensitive(true).build() {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Could not build model pattern for {:?}: {}", model, e);
                None
            }
        };
        Self { pattern }
    }

    pub fn matches(&self, display_name: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|re| re.is_match(display_name))
    }
}

/// Rank a preset catalog for presentation on the given printer model.
///
/// # Arguments
/// * `presets` - The full catalog snapshot, in catalog order
/// * `printer_model` - Model code such as `"H2D"`; blank disables model priority
///
/// # Returns
/// References into `presets`, one per normalized name, sorted by base name.
/// An empty catalog yields an empty list.
///
/// # Example
/// ```ignore
/// use filament_resolver::preset::{rank_presets, FilamentPreset};
///
/// let catalog = vec![
///     FilamentPreset::new("GFA00_X1C", "Bambu PLA Basic @BBL X1C"),
///     FilamentPreset::new("GFA00_H2D", "Bambu PLA Basic @BBL H2D"),
/// ];
/// let ranked = rank_presets(&catalog, "H2D");
/// assert_eq!(ranked[0].id, "GFA00_H2D");
/// ```
pub fn rank_presets<'a>(
    presets: &'a [FilamentPreset],
    printer_model: &str,
) -> Vec<&'a FilamentPreset> {
    let matcher = PrinterModelMatcher::new(printer_model);

    let (model_scoped, others): (Vec<&FilamentPreset>, Vec<&FilamentPreset>) = presets
        .iter()
        .filter(|p| !p.is_experimental())
        .partition(|p| matcher.matches(&p.display_name));

    let mut seen: HashSet<&str> = HashSet::new();
    let mut ranked: Vec<&FilamentPreset> = model_scoped
        .into_iter()
        .chain(others)
        .filter(|&p| seen.insert(p.normalized_name()))
        .collect();

    ranked.sort_by(|a, b| compare_names(a.base_name(), b.base_name()));

    debug!(
        "Ranked {} of {} presets for model {:?}",
        ranked.len(),
        presets.len(),
        printer_model
    );
    ranked
}

/// Case-insensitive alphabetical order, ties broken by exact bytes.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
