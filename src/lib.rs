#[macro_use]
mod macros;

pub mod cli;
pub mod config;
pub mod error;
pub mod i3;
pub mod input;
pub mod protocol;
pub mod publisher;
pub mod signals;

pub use error::{Error, Result};
pub use i3::{I3BarHeader, I3ClickEvent, I3Item, I3StatusLine};
pub use protocol::{init, write_header, I3BarStream, StreamOptions, StreamingArrayEncoder};
pub use publisher::{Publisher, PublisherHandle};

#[cfg(test)]
pub mod test_utils;
