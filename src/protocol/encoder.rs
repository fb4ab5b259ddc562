use std::io::{self, ErrorKind};

use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::header::encode_header;
use super::StreamOptions;
use crate::error::{Error, Result};
use crate::i3::{I3BarHeader, I3StatusLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderState {
    Pending,
    Written,
}

/// Where the encoder is within the never-ending status line array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayState {
    /// Nothing has been written, the next element opens the array
    Unopened,
    /// The last element was written completely
    Open,
    /// The delimiter of an element is on the wire, but none of its value
    AwaitingValue,
    /// A write failed partway through a value, or a flush failed and it's unknown what reached
    /// the wire
    Corrupted,
}

/// Streams an infinite json array of status lines to a sink, one element per call.
///
/// The array is opened with the first element and never closed. The encoder is the only
/// writer of its sink: use it directly from a single task (share it behind a lock if there are
/// several producers), or hand it to a `Publisher`.
#[derive(Debug)]
pub struct StreamingArrayEncoder<W> {
    sink: W,
    options: StreamOptions,
    header: HeaderState,
    state: ArrayState,
    elements: usize,
}

impl<W> StreamingArrayEncoder<W>
where
    W: AsyncWrite + Unpin,
{
    /// Create an encoder, `write_header` must be called before any status line is encoded
    pub fn new(sink: W) -> StreamingArrayEncoder<W> {
        StreamingArrayEncoder::with_options(sink, StreamOptions::default())
    }

    pub fn with_options(sink: W, options: StreamOptions) -> StreamingArrayEncoder<W> {
        StreamingArrayEncoder {
            sink,
            options,
            header: HeaderState::Pending,
            state: ArrayState::Unopened,
            elements: 0,
        }
    }

    /// Create an encoder for a sink whose header has already been written elsewhere
    pub fn headerless(sink: W, options: StreamOptions) -> StreamingArrayEncoder<W> {
        StreamingArrayEncoder {
            header: HeaderState::Written,
            ..StreamingArrayEncoder::with_options(sink, options)
        }
    }

    pub fn state(&self) -> ArrayState {
        self.state
    }

    pub fn options(&self) -> &StreamOptions {
        &self.options
    }

    pub fn header_written(&self) -> bool {
        self.header == HeaderState::Written
    }

    /// Number of status lines completely written to the sink
    pub fn elements_written(&self) -> usize {
        self.elements
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Write the protocol header. Only one header may be written, and only before the array is opened.
    pub async fn write_header(&mut self, header: &I3BarHeader) -> Result<()> {
        match (self.state, self.header) {
            (ArrayState::Corrupted, _) => return Err(Error::StreamCorrupted),
            (ArrayState::Open | ArrayState::AwaitingValue, _) => {
                return Err(Error::HeaderAfterStream)
            }
            (ArrayState::Unopened, HeaderState::Written) => {
                return Err(Error::HeaderAlreadyWritten)
            }
            (ArrayState::Unopened, HeaderState::Pending) => {}
        }

        let buf = encode_header(header, &self.options)?;
        let (written, result) = self.write_tracked(&buf).await;
        if let Err(e) = result {
            if written > 0 {
                self.state = ArrayState::Corrupted;
            }
            return Err(e.into());
        }

        if let Err(e) = self.sink.flush().await {
            self.state = ArrayState::Corrupted;
            return Err(e.into());
        }

        self.header = HeaderState::Written;
        log::debug!("wrote header: {}", String::from_utf8_lossy(&buf).trim_end());
        Ok(())
    }

    /// Write `line` as the next element of the array.
    ///
    /// The value is serialised before anything touches the sink. State only advances after the
    /// sink confirms the bytes and the flush, so a failed write never leads to the array being
    /// opened twice or a doubled delimiter.
    pub async fn encode(&mut self, line: &I3StatusLine) -> Result<()> {
        if self.state == ArrayState::Corrupted {
            return Err(Error::StreamCorrupted);
        }
        if self.header == HeaderState::Pending {
            return Err(Error::HeaderMissing);
        }

        let delimiter: &'static [u8] = match self.state {
            ArrayState::Unopened => b"[",
            ArrayState::Open => b",",
            ArrayState::AwaitingValue => b"",
            ArrayState::Corrupted => return Err(Error::StreamCorrupted),
        };

        let mut value = serde_json::to_vec(line)?;
        if self.options.line_terminated {
            value.push(b'\n');
        }

        if !delimiter.is_empty() {
            // the delimiter is a single byte, so it's either on the wire or it isn't
            let (_, result) = self.write_tracked(delimiter).await;
            result?;
            self.state = ArrayState::AwaitingValue;
        }

        let (written, result) = self.write_tracked(&value).await;
        if let Err(e) = result {
            if written > 0 {
                log::error!(
                    "partial write of status line ({} of {} bytes), stream is corrupted",
                    written,
                    value.len()
                );
                self.state = ArrayState::Corrupted;
            }
            return Err(e.into());
        }

        // a buffered sink may only report the failure here, the element may or may not be out
        if let Err(e) = self.sink.flush().await {
            log::error!("failed to flush status line, stream is corrupted: {}", e);
            self.state = ArrayState::Corrupted;
            return Err(e.into());
        }

        self.state = ArrayState::Open;
        self.elements += 1;
        log::trace!("wrote status line {}", self.elements);
        Ok(())
    }

    /// Same as `encode`, but takes anything that converts into a status line
    pub async fn publish(&mut self, line: impl Into<I3StatusLine>) -> Result<()> {
        self.encode(&line.into()).await
    }

    /// Like `write_all`, but reports how many bytes made it to the sink before a failure
    async fn write_tracked(&mut self, buf: &[u8]) -> (usize, io::Result<()>) {
        let mut written = 0;
        while written < buf.len() {
            match self.sink.write(&buf[written..]).await {
                Ok(0) => return (written, Err(ErrorKind::WriteZero.into())),
                Ok(n) => written += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return (written, Err(e)),
            }
        }

        (written, Ok(()))
    }
}
