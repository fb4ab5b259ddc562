mod parse;

use std::path::PathBuf;

use serde_derive::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::Result;
use crate::i3::I3BarHeader;
use crate::protocol::StreamOptions;
use crate::publisher::DEFAULT_QUEUE_CAPACITY;

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional list of paths of other configuration files to include.
    /// The paths can be absolute or relative to the main configuration file's directory.
    #[serde(default)]
    include: Vec<PathBuf>,

    /// The header sent to the bar
    #[serde(default)]
    pub header: I3BarHeader,

    /// Layout of the status line stream
    #[serde(default)]
    pub stream: StreamOptions,

    /// Maximum number of status lines waiting to be written
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            include: vec![],
            header: I3BarHeader::default(),
            stream: StreamOptions::default(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Command line options take precedence over anything in the configuration files
    fn apply_cli(&mut self, args: &Cli) {
        if args.click_events {
            self.header = self.header.click_events(true);
        }
        if let Some(signal) = args.stop_signal {
            self.header = self.header.stop_signal(signal);
        }
        if let Some(signal) = args.cont_signal {
            self.header = self.header.cont_signal(signal);
        }
        if args.compact {
            self.stream.line_terminated = false;
        }
        if args.pretty_header {
            self.stream.pretty_header = true;
        }
        if let Some(capacity) = args.queue_capacity {
            self.queue_capacity = capacity;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.header.get_version() == 0 {
            bail!("header version must be at least 1");
        }

        if self.queue_capacity == 0 {
            bail!("queue_capacity must be greater than zero");
        }

        if let (Some(stop), Some(cont)) =
            (self.header.get_stop_signal(), self.header.get_cont_signal())
        {
            if stop == cont {
                bail!("stop_signal and cont_signal must differ, both are: {}", stop);
            }
        }

        for signal in [self.header.get_stop_signal(), self.header.get_cont_signal()]
            .into_iter()
            .flatten()
        {
            if signal <= 0 {
                bail!("invalid signal number: {}", signal);
            }
        }

        Ok(())
    }

    pub fn read(args: &Cli) -> Result<AppConfig> {
        let mut cfg = parse::parse(args)?;
        cfg.apply_cli(args);
        cfg.validate()?;

        log::debug!("config: {:?}", cfg);
        Ok(cfg)
    }
}
