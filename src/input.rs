use crate::error::Result;
use crate::i3::{I3Item, I3StatusLine};

/// Turn one line of producer input into a status line.
///
/// - a JSON array is a whole status line
/// - a JSON object is a single block
/// - anything else is plain text for a single block
///
/// Blank lines produce `None`. A leading `,` is ignored, so lines copied out of an existing
/// status line array are accepted as is.
pub fn parse_status_line(line: &str) -> Result<Option<I3StatusLine>> {
    let line = line.trim();
    let line = line.strip_prefix(',').map_or(line, str::trim_start);
    if line.is_empty() {
        return Ok(None);
    }

    let status_line = match line.as_bytes()[0] {
        b'[' => serde_json::from_str::<I3StatusLine>(line)?,
        b'{' => I3StatusLine::from(vec![serde_json::from_str::<I3Item>(line)?]),
        _ => I3StatusLine::text(line),
    };

    Ok(Some(status_line))
}
