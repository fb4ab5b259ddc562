pub mod bar_item;
pub mod click;
pub mod header;
pub mod status_line;

use std::fmt;

use serde::Serialize;

pub use bar_item::*;
pub use click::*;
pub use header::*;
pub use status_line::*;

/// Render a protocol value as indented json, used for debugging output
fn display_json<T: Serialize>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match serde_json::to_string_pretty(value) {
        Ok(s) => f.write_str(&s),
        Err(e) => write!(f, "{}", e),
    }
}
