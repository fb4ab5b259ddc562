use std::collections::HashSet;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use tokio::io::AsyncWrite;

/// Shared view of everything a `TestSink` accepted
#[derive(Debug, Clone, Default)]
pub struct SinkOutput(Arc<Mutex<Vec<u8>>>);

impl SinkOutput {
    pub fn bytes(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }

    pub fn string(&self) -> String {
        String::from_utf8(self.bytes()).unwrap()
    }

    /// Everything after the first line (the header)
    pub fn body(&self) -> String {
        let s = self.string();
        match s.split_once('\n') {
            Some((_, body)) => body.to_owned(),
            None => String::new(),
        }
    }
}

/// An in-memory sink which can be scripted to fail specific calls to `poll_write` or `poll_flush`
#[derive(Debug, Default)]
pub struct TestSink {
    output: SinkOutput,
    /// 1-based indices of write calls that fail with `BrokenPipe`
    failing_calls: HashSet<usize>,
    /// 1-based indices of flush calls that fail with `BrokenPipe`
    failing_flushes: HashSet<usize>,
    /// Hold written bytes until the next flush, a failed flush discards them
    pending: Option<Vec<u8>>,
    /// Accept at most this many bytes per write call
    chunk_size: Option<usize>,
    /// Every write fails
    closed: bool,
    calls: usize,
    flushes: usize,
}

impl TestSink {
    pub fn new() -> (TestSink, SinkOutput) {
        let sink = TestSink::default();
        let output = sink.output.clone();
        (sink, output)
    }

    pub fn fail_calls(mut self, calls: impl IntoIterator<Item = usize>) -> Self {
        self.failing_calls.extend(calls);
        self
    }

    pub fn fail_flushes(mut self, flushes: impl IntoIterator<Item = usize>) -> Self {
        self.failing_flushes.extend(flushes);
        self
    }

    pub fn buffered(mut self) -> Self {
        self.pending = Some(Vec::new());
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn write_calls(&self) -> usize {
        self.calls
    }
}

impl AsyncWrite for TestSink {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        this.calls += 1;
        if this.closed || this.failing_calls.contains(&this.calls) {
            return Poll::Ready(Err(io::Error::from(io::ErrorKind::BrokenPipe)));
        }

        let len = this.chunk_size.map_or(buf.len(), |n| n.min(buf.len()));
        match this.pending.as_mut() {
            Some(pending) => pending.extend_from_slice(&buf[..len]),
            None => this.output.0.lock().unwrap().extend_from_slice(&buf[..len]),
        }
        Poll::Ready(Ok(len))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        this.flushes += 1;
        let failed = this.failing_flushes.contains(&this.flushes);
        if let Some(pending) = this.pending.as_mut() {
            let bytes = std::mem::take(pending);
            if !failed {
                this.output.0.lock().unwrap().extend_from_slice(&bytes);
            }
        }

        if failed {
            return Poll::Ready(Err(io::Error::from(io::ErrorKind::BrokenPipe)));
        }
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
