use std::fmt::{self, Display};
use std::ops::{Deref, DerefMut};

use serde_derive::{Deserialize, Serialize};

use super::{display_json, I3Item};

/// One snapshot of the bar, rendered left to right in the order of its items
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct I3StatusLine(Vec<I3Item>);

impl I3StatusLine {
    pub fn new() -> I3StatusLine {
        I3StatusLine(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> I3StatusLine {
        I3StatusLine(Vec::with_capacity(capacity))
    }

    /// A line made of a single block containing `text`
    pub fn text(text: impl AsRef<str>) -> I3StatusLine {
        I3StatusLine(vec![I3Item::new(text)])
    }

    pub fn into_inner(self) -> Vec<I3Item> {
        self.0
    }
}

impl Deref for I3StatusLine {
    type Target = Vec<I3Item>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for I3StatusLine {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<I3Item>> for I3StatusLine {
    fn from(value: Vec<I3Item>) -> Self {
        I3StatusLine(value)
    }
}

impl FromIterator<I3Item> for I3StatusLine {
    fn from_iter<T: IntoIterator<Item = I3Item>>(iter: T) -> Self {
        I3StatusLine(iter.into_iter().collect())
    }
}

impl IntoIterator for I3StatusLine {
    type Item = I3Item;
    type IntoIter = std::vec::IntoIter<I3Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for I3StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_json(self, f)
    }
}
