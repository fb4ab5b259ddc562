use std::fmt::{self, Display};

use serde_derive::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::display_json;
use crate::error::Result;

#[derive(Debug, Default, Copy, Clone, Serialize_repr, Deserialize_repr, PartialEq, Eq)]
#[repr(u8)]
pub enum I3Button {
    #[default]
    Left = 1,
    Middle = 2,
    Right = 3,
    ScrollUp = 4,
    ScrollDown = 5,
    ScrollRight = 6,
    ScrollLeft = 7,
    // apparently the maximum number of mouse buttons is 24!
    // see: https://www.x.org/releases/current/doc/man/man4/mousedrv.4.xhtml
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum I3Modifier {
    Mod1,
    Mod2,
    Mod3,
    Mod4,
    Mod5,
    Shift,
    Control,
}

/// A click event sent by the bar when `click_events` is enabled in the header.
/// `name` and `instance` are echoed back from the clicked block.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct I3ClickEvent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub instance: Option<String>,
    pub button: I3Button,
    #[serde(default)]
    pub modifiers: Vec<I3Modifier>,
    pub x: usize,
    pub y: usize,
    #[serde(default)]
    pub relative_x: usize,
    #[serde(default)]
    pub relative_y: usize,
    #[serde(default)]
    pub output_x: usize,
    #[serde(default)]
    pub output_y: usize,
    #[serde(default)]
    pub width: usize,
    #[serde(default)]
    pub height: usize,
}

impl Display for I3ClickEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_json(self, f)
    }
}

/// Decode one line of the inbound click stream.
///
/// The bar sends its own endless array, one event per line, so the opening `[` yields `None`
/// and any leading `,` is skipped.
pub fn parse_click_line(line: &str) -> Result<Option<I3ClickEvent>> {
    let line = line.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    if line.trim_end().is_empty() || line.trim_end() == "[" {
        return Ok(None);
    }

    log::trace!("i3 click: {}", line);
    Ok(Some(serde_json::from_str::<I3ClickEvent>(line)?))
}
