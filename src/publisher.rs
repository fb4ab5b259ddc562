use tokio::io::AsyncWrite;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};
use crate::i3::I3StatusLine;
use crate::protocol::StreamingArrayEncoder;

pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

#[derive(Debug)]
struct Submission {
    line: I3StatusLine,
    reply: oneshot::Sender<Result<()>>,
}

/// Cloneable producer side of a `Publisher`
#[derive(Debug, Clone)]
pub struct PublisherHandle {
    tx: mpsc::Sender<Submission>,
}

impl PublisherHandle {
    /// Queue `line` and wait until the worker has written it.
    ///
    /// Any error writing this particular line is returned here, and only here.
    pub async fn publish(&self, line: impl Into<I3StatusLine>) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        let submission = Submission {
            line: line.into(),
            reply,
        };

        if self.tx.send(submission).await.is_err() {
            return Err(Error::PublisherClosed);
        }

        match rx.await {
            Ok(result) => result,
            Err(_) => Err(Error::PublisherClosed),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Owns a `StreamingArrayEncoder` on a dedicated task, and writes status lines to it in the order
/// they were submitted, one at a time.
#[derive(Debug)]
pub struct Publisher<W> {
    handle: PublisherHandle,
    token: CancellationToken,
    worker: JoinHandle<StreamingArrayEncoder<W>>,
}

impl<W> Publisher<W>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// Move `encoder` onto a new task. `capacity` bounds the number of queued status lines, once
    /// full `publish` waits for room.
    pub fn spawn(encoder: StreamingArrayEncoder<W>, capacity: usize) -> Result<Publisher<W>> {
        if capacity == 0 {
            bail!("publisher queue capacity must be greater than zero");
        }

        let (tx, rx) = mpsc::channel(capacity);
        let token = CancellationToken::new();
        let worker = tokio::spawn(run_worker(encoder, rx, token.clone()));

        Ok(Publisher {
            handle: PublisherHandle { tx },
            token,
            worker,
        })
    }

    pub fn handle(&self) -> PublisherHandle {
        self.handle.clone()
    }

    pub async fn publish(&self, line: impl Into<I3StatusLine>) -> Result<()> {
        self.handle.publish(line).await
    }

    /// A token which closes the publisher when cancelled
    pub fn close_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Stop accepting status lines, wait for all queued lines to be written, and return the encoder.
    /// Publishing through any outstanding handle fails with `Error::PublisherClosed` afterwards.
    pub async fn close(self) -> Result<StreamingArrayEncoder<W>> {
        self.token.cancel();
        drop(self.handle);
        Ok(self.worker.await?)
    }
}

async fn run_worker<W>(
    mut encoder: StreamingArrayEncoder<W>,
    mut rx: mpsc::Receiver<Submission>,
    token: CancellationToken,
) -> StreamingArrayEncoder<W>
where
    W: AsyncWrite + Unpin,
{
    let mut closing = false;
    loop {
        let submission = tokio::select! {
            biased;
            _ = token.cancelled(), if !closing => {
                log::debug!("publisher closing, draining queued status lines");
                closing = true;
                // no more sends are accepted, but anything already buffered is still received
                rx.close();
                continue;
            }
            submission = rx.recv() => submission,
        };

        let Some(Submission { line, reply }) = submission else {
            break;
        };

        let result = encoder.encode(&line).await;
        if let Err(Err(e)) = reply.send(result) {
            // nobody is waiting on this result anymore
            log::error!("failed to write status line: {}", e);
        }
    }

    log::debug!(
        "publisher finished, {} status lines written",
        encoder.elements_written()
    );
    encoder
}
