pub mod color;
pub mod types;

pub use color::{color_name_for_code, normalize_color_hex, parse_rgba, Rgba, MID_GRAY};
pub use types::{is_editable, is_vendor_spool, TraySnapshot, EMPTY_TRAY_TYPE};
