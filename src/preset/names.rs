//! Name projections over raw preset display names.

/// Prefix marking experimental/internal presets.
pub const EXPERIMENTAL_PREFIX: &str = "# ";

/// Separator between the base name and the device/nozzle scope.
pub const SCOPE_SEPARATOR: &str = " @";

/// True if the preset is experimental/internal and must not be offered.
pub fn is_experimental(display_name: &str) -> bool {
    display_name.starts_with(EXPERIMENTAL_PREFIX)
}

/// Text before the first `" @"`, or the whole name if there is no scope.
pub fn base_name(display_name: &str) -> &str {
    display_name
        .split_once(SCOPE_SEPARATOR)
        .map_or(display_name, |(base, _)| base)
}

/// Identity used for deduplication: experimental prefix stripped, scope removed.
pub fn normalized_name(display_name: &str) -> &str {
    base_name(
        display_name
            .strip_prefix(EXPERIMENTAL_PREFIX)
            .unwrap_or(display_name),
    )
}

/// Name used as the sub-brand when matching calibration profiles.
pub fn clean_name(display_name: &str) -> &str {
    normalized_name(display_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("Bambu PLA Basic @BBL X1C"), "Bambu PLA Basic");
        assert_eq!(
            base_name("Bambu PLA Basic @Bambu Lab H2D 0.4 nozzle"),
            "Bambu PLA Basic"
        );
        assert_eq!(base_name("Generic PETG"), "Generic PETG");
        assert_eq!(base_name("# Bambu PLA Basic @BBL H2D"), "# Bambu PLA Basic");
    }

    #[test]
    fn test_base_name_splits_on_first_scope() {
        assert_eq!(base_name("A @B @C"), "A");
        // "@" without a leading space is part of the base name
        assert_eq!(base_name("Foo@Bar"), "Foo@Bar");
    }

    #[test]
    fn test_normalized_name_strips_experimental_prefix() {
        assert_eq!(normalized_name("# Bambu PLA Basic @BBL H2D"), "Bambu PLA Basic");
        assert_eq!(normalized_name("Bambu PLA Basic @BBL X1C"), "Bambu PLA Basic");
        assert_eq!(normalized_name("#Bambu PLA"), "#Bambu PLA");
    }

    #[test]
    fn test_clean_name_matches_normalized() {
        for name in ["# Generic ABS @BBL A1", "Generic ABS", "Overture PLA @BBL P1S 0.4 nozzle"] {
            assert_eq!(clean_name(name), normalized_name(name));
        }
    }

    #[test]
    fn test_is_experimental() {
        assert!(is_experimental("# Bambu PLA Basic @BBL H2D"));
        assert!(!is_experimental("#Bambu PLA Basic"));
        assert!(!is_experimental("Bambu PLA Basic # 2"));
    }
}
