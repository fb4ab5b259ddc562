use std::fmt::{self, Display};

use serde_derive::{Deserialize, Serialize};

use super::display_json;

fn is_false(b: &bool) -> bool {
    !*b
}

fn default_version() -> usize {
    1
}

/// The preamble of the protocol, sent once before the status line array
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct I3BarHeader {
    #[serde(default = "default_version")]
    version: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stop_signal: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cont_signal: Option<i32>,
    #[serde(default, skip_serializing_if = "is_false")]
    click_events: bool,
}

impl Default for I3BarHeader {
    fn default() -> Self {
        I3BarHeader::new(default_version())
    }
}

impl I3BarHeader {
    pub fn new(version: usize) -> I3BarHeader {
        I3BarHeader {
            version,
            stop_signal: None,
            cont_signal: None,
            click_events: false,
        }
    }

    /// Signal the bar sends to pause the producer (i3bar defaults to `SIGSTOP`)
    pub fn stop_signal(mut self, signal: i32) -> Self {
        self.stop_signal = Some(signal);
        self
    }

    /// Signal the bar sends to resume the producer (i3bar defaults to `SIGCONT`)
    pub fn cont_signal(mut self, signal: i32) -> Self {
        self.cont_signal = Some(signal);
        self
    }

    pub fn click_events(mut self, click_events: bool) -> Self {
        self.click_events = click_events;
        self
    }

    pub fn get_version(&self) -> usize {
        self.version
    }

    pub fn get_stop_signal(&self) -> Option<i32> {
        self.stop_signal
    }

    pub fn get_cont_signal(&self) -> Option<i32> {
        self.cont_signal
    }

    pub fn get_click_events(&self) -> bool {
        self.click_events
    }
}

impl Display for I3BarHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_json(self, f)
    }
}
