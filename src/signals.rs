use libc::{SIGINT, SIGTERM};
use signal_hook_tokio::{Handle, Signals};
use tokio_util::sync::CancellationToken;

use crate::error::Result;

/// Cancel `token` when the process is asked to terminate.
///
/// When i3 kills its status_command it sends SIGTERM; instead of exiting straight away the owner
/// of `token` gets the chance to drain any queued status lines first.
pub fn handle_signals(token: CancellationToken) -> Result<Handle> {
    let mut signals = match Signals::new([SIGTERM, SIGINT]) {
        Ok(signals) => signals,
        Err(e) => bail!("failed to register signal handlers: {}", e),
    };
    let handle = signals.handle();
    tokio::spawn(async move {
        use futures::stream::StreamExt;

        match signals.next().await {
            Some(signal) => {
                log::info!("received signal {}, shutting down", signal);
                token.cancel();
            }
            None => log::debug!("signal stream closed"),
        }
    });

    Ok(handle)
}
