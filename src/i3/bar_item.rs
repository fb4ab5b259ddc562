use std::fmt::{self, Display};

use hex_color::HexColor;
use serde_derive::{Deserialize, Serialize};

use super::display_json;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum I3Align {
    Center,
    Right,
    Left,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum I3Markup {
    None,
    Pango,
}

impl I3Markup {
    pub fn is_none(opt: &Option<Self>) -> bool {
        match opt {
            None => true,
            Some(inner) => matches!(inner, I3Markup::None),
        }
    }
}

/// Either a width in pixels, or a string whose rendered width is used as the minimum
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum I3MinWidth {
    Pixels(usize),
    String(String),
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Setters treat an empty string the same as not setting the field at all
fn non_empty(s: impl AsRef<str>) -> Option<String> {
    match s.as_ref() {
        "" => None,
        s => Some(s.into()),
    }
}

/// A single block of the status line
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct I3Item {
    full_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    short_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<HexColor>,
    #[serde(
        rename = "background",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    background_color: Option<HexColor>,
    #[serde(rename = "border", default, skip_serializing_if = "Option::is_none")]
    border_color: Option<HexColor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_width: Option<I3MinWidth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    align: Option<I3Align>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instance: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    urgent: bool,
    // always present on the wire
    #[serde(default)]
    separator: bool,
    #[serde(
        rename = "separator_block_width",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    separator_block_width_px: Option<usize>,

    #[serde(default, skip_serializing_if = "I3Markup::is_none")]
    markup: Option<I3Markup>,
}

macro_rules! impl_getters {
    ($($getter:ident => $field:ident: $ty:ty),+ $(,)?) => {
        impl I3Item {
            $(
                pub fn $getter(&self) -> Option<&$ty> {
                    self.$field.as_ref()
                }
            )+
        }
    };
}

impl I3Item {
    pub fn new(full_text: impl AsRef<str>) -> I3Item {
        I3Item {
            full_text: full_text.as_ref().into(),
            ..Default::default()
        }
    }

    pub fn empty() -> I3Item {
        I3Item::new("")
    }

    pub fn is_empty(&self) -> bool {
        self.full_text.is_empty()
    }

    pub fn get_full_text(&self) -> &str {
        &self.full_text
    }

    pub fn full_text(mut self, full_text: impl AsRef<str>) -> Self {
        self.full_text = full_text.as_ref().into();
        self
    }

    pub fn short_text(mut self, short_text: impl AsRef<str>) -> Self {
        self.short_text = non_empty(short_text);
        self
    }

    pub fn color(mut self, color: HexColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn background_color(mut self, background_color: HexColor) -> Self {
        self.background_color = Some(background_color);
        self
    }

    pub fn border_color(mut self, border_color: HexColor) -> Self {
        self.border_color = Some(border_color);
        self
    }

    pub fn min_width(mut self, min_width: I3MinWidth) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn align(mut self, align: I3Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn name(mut self, name: impl AsRef<str>) -> Self {
        self.name = non_empty(name);
        self
    }

    pub fn instance(mut self, instance: impl AsRef<str>) -> Self {
        self.instance = non_empty(instance);
        self
    }

    pub fn urgent(mut self, urgent: bool) -> Self {
        self.urgent = urgent;
        self
    }

    pub fn separator(mut self, separator: bool) -> Self {
        self.separator = separator;
        self
    }

    pub fn separator_block_width_px(mut self, separator_block_width_px: usize) -> Self {
        self.separator_block_width_px = Some(separator_block_width_px);
        self
    }

    pub fn markup(mut self, markup: I3Markup) -> Self {
        self.markup = Some(markup);
        self
    }

    pub fn get_urgent(&self) -> bool {
        self.urgent
    }

    pub fn get_separator(&self) -> bool {
        self.separator
    }

    pub fn get_separator_block_width_px(&self) -> Option<usize> {
        self.separator_block_width_px
    }

    pub fn get_markup(&self) -> Option<I3Markup> {
        self.markup
    }
}

impl_getters!(
    get_short_text => short_text: String,
    get_color => color: HexColor,
    get_background_color => background_color: HexColor,
    get_border_color => border_color: HexColor,
    get_min_width => min_width: I3MinWidth,
    get_align => align: I3Align,
    get_name => name: String,
    get_instance => instance: String,
);

impl Display for I3Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_json(self, f)
    }
}
