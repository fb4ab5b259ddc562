use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The stream could not be set up, nothing has been written
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to read config: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("failed to serialise value: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The sink rejected a write (broken pipe, closed consumer, etc)
    #[error("failed to write to sink: {0}")]
    Write(#[from] io::Error),

    #[error("the header must be written before any status line")]
    HeaderMissing,

    #[error("the header has already been written")]
    HeaderAlreadyWritten,

    #[error("cannot write a header after the status line array has been opened")]
    HeaderAfterStream,

    /// A previous write failed partway through an element, the wire no longer holds valid json
    #[error("stream is corrupted after a partial write, no further status lines can be written")]
    StreamCorrupted,

    #[error("publisher is closed")]
    PublisherClosed,

    #[error("publisher worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl From<figment::Error> for Error {
    fn from(value: figment::Error) -> Self {
        Error::Config(Box::new(value))
    }
}

impl Error {
    /// Is this a failure of the underlying sink?
    pub fn is_write(&self) -> bool {
        matches!(self, Error::Write(_))
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Configuration(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Configuration(value.into())
    }
}
