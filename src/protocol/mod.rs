pub mod encoder;
pub mod header;

use serde_derive::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, Empty};

pub use self::encoder::{ArrayState, StreamingArrayEncoder};
pub use self::header::{encode_header, write_header};
use crate::error::Result;
use crate::i3::I3BarHeader;

fn default_true() -> bool {
    true
}

/// How the stream is laid out on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamOptions {
    /// Terminate each array element with a newline, so consumers reading line by line see one
    /// status line per line. When disabled, elements follow each other directly: `[[..],[..]`
    #[serde(default = "default_true")]
    pub line_terminated: bool,
    /// Indent the header object instead of writing it on a single line
    #[serde(default)]
    pub pretty_header: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        StreamOptions {
            line_terminated: true,
            pretty_header: false,
        }
    }
}

/// Write `header` to `sink` and return an encoder ready to stream status lines to it
pub async fn init<W>(header: &I3BarHeader, sink: W) -> Result<StreamingArrayEncoder<W>>
where
    W: AsyncWrite + Unpin,
{
    I3BarStream::builder()
        .header(*header)
        .sink(sink)
        .build()
        .await
        .map(I3BarStream::into_encoder)
}

/// An initialised stream: the header is on the wire and the encoder owns the output sink.
///
/// The optional input handle is the channel the bar sends click events on. It's not read here,
/// it's held for whichever component handles clicks (see `crate::i3::parse_click_line`).
#[derive(Debug)]
pub struct I3BarStream<W, R = Empty> {
    encoder: StreamingArrayEncoder<W>,
    input: Option<R>,
}

impl<W> I3BarStream<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn builder() -> StreamBuilder<W> {
        StreamBuilder::new()
    }
}

impl<W, R> I3BarStream<W, R>
where
    W: AsyncWrite + Unpin,
{
    pub fn encoder(&mut self) -> &mut StreamingArrayEncoder<W> {
        &mut self.encoder
    }

    pub fn take_input(&mut self) -> Option<R> {
        self.input.take()
    }

    pub fn into_encoder(self) -> StreamingArrayEncoder<W> {
        self.encoder
    }

    pub fn into_parts(self) -> (StreamingArrayEncoder<W>, Option<R>) {
        (self.encoder, self.input)
    }
}

#[derive(Debug)]
pub struct StreamBuilder<W, R = Empty> {
    header: I3BarHeader,
    options: StreamOptions,
    sink: Option<W>,
    input: Option<R>,
}

impl<W> StreamBuilder<W> {
    pub fn new() -> StreamBuilder<W> {
        StreamBuilder {
            header: I3BarHeader::default(),
            options: StreamOptions::default(),
            sink: None,
            input: None,
        }
    }
}

impl<W> Default for StreamBuilder<W> {
    fn default() -> Self {
        StreamBuilder::new()
    }
}

impl<W, R> StreamBuilder<W, R>
where
    W: AsyncWrite + Unpin,
{
    pub fn header(mut self, header: I3BarHeader) -> Self {
        self.header = header;
        self
    }

    pub fn options(mut self, options: StreamOptions) -> Self {
        self.options = options;
        self
    }

    pub fn sink(mut self, sink: W) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn input<R2>(self, input: R2) -> StreamBuilder<W, R2> {
        StreamBuilder {
            header: self.header,
            options: self.options,
            sink: self.sink,
            input: Some(input),
        }
    }

    /// Write the header and hand back the stream. Fails without writing anything if no sink was set.
    pub async fn build(self) -> Result<I3BarStream<W, R>> {
        let sink = match self.sink {
            Some(sink) => sink,
            None => bail!("no output sink was supplied"),
        };

        if self.header.get_click_events() && self.input.is_none() {
            log::debug!("click events are enabled, but no input handle was supplied");
        }

        let mut encoder = StreamingArrayEncoder::with_options(sink, self.options);
        encoder.write_header(&self.header).await?;

        Ok(I3BarStream {
            encoder,
            input: self.input,
        })
    }
}
