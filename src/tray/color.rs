//! Tray color handling: hex parsing and manufacturer color-code names.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Manufacturer color-code table embedded in the binary at compile time.
const COLOR_CODES_TOML: &str = include_str!("../../config/color_codes.toml");

#[derive(Debug, Deserialize)]
struct ColorCodeTable {
    codes: HashMap<String, String>,
}

static COLOR_CODES: LazyLock<HashMap<String, String>> = LazyLock::new(|| {
    match toml::from_str::<ColorCodeTable>(COLOR_CODES_TOML) {
        Ok(table) => table.codes,
        Err(e) => {
            warn!("Embedded color_codes.toml is invalid: {}", e);
            HashMap::new()
        }
    }
});

/// Look up the human-readable color name for a tag color code.
///
/// `color_code` is formatted `"<series>-<code>"` (e.g. `"A00-Y2"`). Only the
/// segment after the first `-` is looked up, case-sensitively. Codes without
/// a `-` and unknown codes return `None`.
pub fn color_name_for_code(color_code: &str) -> Option<&'static str> {
    let (_, code) = color_code.split_once('-')?;
    COLOR_CODES.get(code).map(String::as_str)
}

/// An RGBA color decoded from a tray's hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Fallback for missing or unparseable colors.
pub const MID_GRAY: Rgba = Rgba {
    r: 128,
    g: 128,
    b: 128,
    a: 255,
};

impl Rgba {
    /// CSS `rgb(r,g,b)` form used by display surfaces.
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// Uppercase `RRGGBBAA`, the form the printer expects.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// Parse `RRGGBBAA` or `RRGGBB`, with or without a leading `#`.
///
/// Anything else (including `None`) yields [`MID_GRAY`].
pub fn parse_rgba(hex: Option<&str>) -> Rgba {
    hex.and_then(try_parse_rgba).unwrap_or(MID_GRAY)
}

fn try_parse_rgba(hex: &str) -> Option<Rgba> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match digits.len() {
        6 => Some(Rgba {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: 255,
        }),
        8 => Some(Rgba {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a: channel(6)?,
        }),
        _ => None,
    }
}

/// Normalize a user- or tray-supplied color to uppercase `RRGGBBAA`.
pub fn normalize_color_hex(hex: Option<&str>) -> String {
    parse_rgba(hex).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_code_lookup_uses_segment_after_dash() {
        assert_eq!(color_name_for_code("A00-Y2"), Some("Sunflower Yellow"));
        assert_eq!(color_name_for_code("A00-K0"), Some("Black"));
        assert_eq!(color_name_for_code("G02-B3"), Some("Cyan"));
    }

    #[test]
    fn test_color_code_lookup_is_case_sensitive() {
        assert_eq!(color_name_for_code("A00-y2"), None);
        assert_eq!(color_name_for_code("A00-k0"), None);
    }

    #[test]
    fn test_color_code_lookup_unknown_or_malformed() {
        assert_eq!(color_name_for_code("A00-ZZ"), None);
        assert_eq!(color_name_for_code("Y2"), None);
        assert_eq!(color_name_for_code(""), None);
        assert_eq!(color_name_for_code("A00-"), None);
    }

    #[test]
    fn test_color_code_lookup_splits_on_first_dash_only() {
        // "Y2-X" is not a code, so nothing matches
        assert_eq!(color_name_for_code("A00-Y2-X"), None);
    }

    #[test]
    fn test_parse_rgba_eight_digits() {
        let c = parse_rgba(Some("FF8000CC"));
        assert_eq!(
            c,
            Rgba {
                r: 255,
                g: 128,
                b: 0,
                a: 204
            }
        );
        assert_eq!(c.css(), "rgb(255,128,0)");
    }

    #[test]
    fn test_parse_rgba_six_digits_with_hash() {
        let c = parse_rgba(Some("#00ff00"));
        assert_eq!(
            c,
            Rgba {
                r: 0,
                g: 255,
                b: 0,
                a: 255
            }
        );
    }

    #[test]
    fn test_parse_rgba_falls_back_to_mid_gray() {
        assert_eq!(parse_rgba(None), MID_GRAY);
        assert_eq!(parse_rgba(Some("")), MID_GRAY);
        assert_eq!(parse_rgba(Some("GGGGGGGG")), MID_GRAY);
        assert_eq!(parse_rgba(Some("FFF")), MID_GRAY);
        assert_eq!(parse_rgba(Some("ÄÄÄ")), MID_GRAY);
        assert_eq!(MID_GRAY.css(), "rgb(128,128,128)");
    }

    #[test]
    fn test_normalize_color_hex() {
        assert_eq!(normalize_color_hex(Some("#ff0000")), "FF0000FF");
        assert_eq!(normalize_color_hex(Some("00ae42ff")), "00AE42FF");
        assert_eq!(normalize_color_hex(None), "808080FF");
    }
}
