//! Resolver configuration loaded from TOML.
//!
//! Provides three loading methods:
//! - `ResolverConfig::default()` - Embedded defaults compiled into the binary
//! - `load_config(path)` - A custom config file
//! - `load_or_default()` - The user's config file if present, else defaults

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ResolverError;

/// Default config embedded in the binary at compile time.
const DEFAULT_CONFIG: &str = include_str!("../config/resolver.toml");

const DEFAULT_K_TOLERANCE: f64 = 0.0001;
const DEFAULT_PROFILE_NAME: &str = "Default";

/// Tunables for calibration-profile matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Strict upper bound on |tray K - profile K| for a numeric K match
    #[serde(default = "default_k_tolerance")]
    pub k_tolerance: f64,
    /// Catch-all profile name used as the last matching tier
    #[serde(default = "default_profile_name")]
    pub default_profile_name: String,
}

fn default_k_tolerance() -> f64 {
    DEFAULT_K_TOLERANCE
}

fn default_profile_name() -> String {
    DEFAULT_PROFILE_NAME.to_string()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            warn!("Embedded resolver.toml is invalid ({}), using built-in values", e);
            Self {
                k_tolerance: DEFAULT_K_TOLERANCE,
                default_profile_name: DEFAULT_PROFILE_NAME.to_string(),
            }
        })
    }
}

impl ResolverConfig {
    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ResolverError> {
        let config: ResolverConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ResolverError> {
        if !self.k_tolerance.is_finite() || self.k_tolerance < 0.0 {
            return Err(ResolverError::Config(format!(
                "k_tolerance must be a non-negative number, got {}",
                self.k_tolerance
            )));
        }
        if self.default_profile_name.trim().is_empty() {
            return Err(ResolverError::Config(
                "default_profile_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load a config from a TOML file at the given path.
///
/// # Arguments
/// * `path` - Path to a TOML file; missing keys take the embedded defaults
///
/// # Returns
/// * `Ok(ResolverConfig)` - Parsed and validated configuration
/// * `Err` - If the file cannot be read, the TOML is invalid, or a value is
///   out of range
///
/// # Example
/// ```ignore
/// let config = load_config(Path::new("/path/to/resolver.toml"))?;
/// let resolver = FilamentResolver::new(config);
/// ```
pub fn load_config(path: &Path) -> Result<ResolverConfig, ResolverError> {
    let content = std::fs::read_to_string(path)?;
    let config = ResolverConfig::from_toml_str(&content)?;
    debug!("Loaded resolver config from {:?}: {:?}", path, config);
    Ok(config)
}

/// Location of the user's config file (e.g., ~/.config/bambumate/resolver.toml).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bambumate").join("resolver.toml"))
}

/// Load the user's config file, falling back to embedded defaults when the
/// file is missing or invalid.
pub fn load_or_default() -> ResolverConfig {
    let Some(path) = default_config_path() else {
        debug!("No config directory on this platform, using default resolver config");
        return ResolverConfig::default();
    };

    if !path.exists() {
        debug!("No resolver config at {:?}, using defaults", path);
        return ResolverConfig::default();
    }

    match load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Could not load resolver config {:?}: {}", path, e);
            ResolverConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_loads() {
        let config = ResolverConfig::default();
        assert_eq!(config.k_tolerance, 0.0001);
        assert_eq!(config.default_profile_name, "Default");
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config = ResolverConfig::from_toml_str("k_tolerance = 0.0005").unwrap();
        assert_eq!(config.k_tolerance, 0.0005);
        assert_eq!(config.default_profile_name, "Default");

        let config = ResolverConfig::from_toml_str("").unwrap();
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let result = ResolverConfig::from_toml_str("k_tolerance = -0.1");
        assert!(matches!(result, Err(ResolverError::Config(_))));
    }

    #[test]
    fn test_blank_profile_name_rejected() {
        let result = ResolverConfig::from_toml_str("default_profile_name = \"  \"");
        assert!(matches!(result, Err(ResolverError::Config(_))));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let result = ResolverConfig::from_toml_str("k_tolerance = ");
        assert!(matches!(result, Err(ResolverError::Toml(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "k_tolerance = 0.002").unwrap();
        writeln!(file, "default_profile_name = \"Fallback\"").unwrap();
        file.flush().unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.k_tolerance, 0.002);
        assert_eq!(config.default_profile_name, "Fallback");
    }

    #[test]
    fn test_load_config_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ResolverError::Io(_))));
    }

    #[test]
    fn test_default_config_path_shape() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("bambumate/resolver.toml"));
        }
    }
}
