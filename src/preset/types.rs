use serde::{Deserialize, Serialize};

use super::names::{base_name, clean_name, is_experimental, normalized_name};

/// One vendor filament preset from the slicer catalog.
///
/// `display_name` is structured `[# ]<base name>[ @<scope>]`, e.g.
/// `"Bambu PLA Basic @BBL X1C"`. A leading `"# "` marks an internal preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilamentPreset {
    /// Catalog identifier (e.g., "GFA00")
    pub id: String,
    #[serde(alias = "name")]
    pub display_name: String,
}

impl FilamentPreset {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    pub fn base_name(&self) -> &str {
        base_name(&self.display_name)
    }

    pub fn normalized_name(&self) -> &str {
        normalized_name(&self.display_name)
    }

    pub fn clean_name(&self) -> &str {
        clean_name(&self.display_name)
    }

    pub fn is_experimental(&self) -> bool {
        is_experimental(&self.display_name)
    }
}
