use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::StreamOptions;
use crate::error::Result;
use crate::i3::I3BarHeader;

/// Serialise the header as a single line of json, including the line terminator
pub fn encode_header(header: &I3BarHeader, options: &StreamOptions) -> Result<Vec<u8>> {
    let mut buf = if options.pretty_header {
        serde_json::to_vec_pretty(header)?
    } else {
        serde_json::to_vec(header)?
    };

    buf.push(b'\n');
    Ok(buf)
}

/// Write the protocol header to `sink`.
///
/// This must be the first thing written to the sink. Prefer `StreamingArrayEncoder::write_header`
/// which refuses to write a second header or one after status lines.
pub async fn write_header<W>(sink: &mut W, header: &I3BarHeader, options: &StreamOptions) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let buf = encode_header(header, options)?;
    sink.write_all(&buf).await?;
    sink.flush().await?;
    Ok(())
}
