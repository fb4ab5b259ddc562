use std::error::Error;

use clap::Parser;
use i3barjson::cli::Cli;
use i3barjson::config::AppConfig;
use i3barjson::input::parse_status_line;
use i3barjson::signals::handle_signals;
use i3barjson::{I3BarStream, Publisher};
use tokio::io::{stdin, stdout, AsyncBufReadExt, BufReader};

fn main() -> Result<(), Box<dyn Error>> {
    // logs go to STDERR, STDOUT belongs to the bar
    pretty_env_logger::try_init()?;

    let args = Cli::parse();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(async_main(args));
    // a pending read of STDIN holds a blocking thread that can't be interrupted
    runtime.shutdown_background();
    result
}

async fn async_main(args: Cli) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::read(&args)?;

    let stream = I3BarStream::builder()
        .header(config.header)
        .options(config.stream)
        .sink(stdout())
        .build()
        .await?;

    let publisher = Publisher::spawn(stream.into_encoder(), config.queue_capacity)?;
    let token = publisher.close_token();
    let signals = handle_signals(token.clone())?;

    let handle = publisher.handle();
    let mut lines = BufReader::new(stdin()).lines();
    let result: Result<(), Box<dyn Error>> = loop {
        let line = tokio::select! {
            _ = token.cancelled() => break Ok(()),
            line = lines.next_line() => line,
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                log::info!("STDIN was closed, exiting");
                break Ok(());
            }
            Err(e) => break Err(e.into()),
        };

        let status_line = match parse_status_line(&line) {
            Ok(Some(status_line)) => status_line,
            Ok(None) => continue,
            Err(e) => {
                log::warn!("ignoring invalid status line: {}, error: {}", line, e);
                continue;
            }
        };

        // a write failure means the bar has gone away, there's no point continuing
        match handle.publish(status_line).await {
            Ok(()) => {}
            // closed by a signal while this line was waiting for room in the queue
            Err(i3barjson::Error::PublisherClosed) if token.is_cancelled() => break Ok(()),
            Err(e) => {
                log::error!("failed to publish status line: {}", e);
                break Err(e.into());
            }
        }
    };

    signals.close();
    drop(handle);
    let encoder = publisher.close().await?;
    log::debug!("wrote {} status lines", encoder.elements_written());

    result
}
