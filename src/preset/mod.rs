pub mod names;
pub mod ranking;
pub mod types;

pub use names::{base_name, clean_name, is_experimental, normalized_name};
pub use ranking::{rank_presets, PrinterModelMatcher};
pub use types::FilamentPreset;
