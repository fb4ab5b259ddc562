use std::path::PathBuf;

use clap::Parser;

/// Republish status lines read from STDIN as an i3bar JSON stream on STDOUT.
///
/// Each line on STDIN is either a JSON array of blocks, or plain text which becomes a single block.
#[derive(Debug, Default, Parser)]
#[clap(version, about)]
pub struct Cli {
    /// Path to the configuration file. The extension is optional, `.toml`, `.json`, `.yaml` and
    /// `.yml` are tried in that order. Defaults to `$XDG_CONFIG_HOME/i3barjson/config`.
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Ask the bar to send click events.
    #[clap(long)]
    pub click_events: bool,
    /// Signal the bar should send to pause output.
    #[clap(long)]
    pub stop_signal: Option<i32>,
    /// Signal the bar should send to resume output.
    #[clap(long)]
    pub cont_signal: Option<i32>,
    /// Write status lines back to back, without a newline after each one.
    #[clap(long)]
    pub compact: bool,
    /// Indent the header.
    #[clap(long)]
    pub pretty_header: bool,
    /// Maximum number of status lines waiting to be written.
    #[clap(long)]
    pub queue_capacity: Option<usize>,
}
