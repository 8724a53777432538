//! Text renderings of resolved entries.

use crate::record::Record;
use crate::value::Value;

use super::error::{VfsError, VfsResult};

/// Render a value: scalars as plain text, composites as JSON.
pub fn render_value(value: &Value, pretty: bool) -> VfsResult<String> {
    if value.is_scalar() {
        return Ok(value.to_text());
    }
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.map_err(|e| VfsError::other(format!("render failed: {e}")))
}

/// Render records as CSV: one header line, then one line per record.
///
/// Cells are emitted in header order; a record missing a header field gets
/// an empty cell. Lines end with `\n`.
pub fn render_table<'a, I>(headers: &[String], records: I) -> VfsResult<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    if headers.is_empty() {
        return Ok(String::new());
    }
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(headers).map_err(csv_err)?;
    for record in records {
        wtr.write_record(headers.iter().map(|h| record.get(h).unwrap_or("")))
            .map_err(csv_err)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| VfsError::other(format!("render failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| VfsError::other(format!("render failed: {e}")))
}

fn csv_err(e: csv::Error) -> VfsError {
    VfsError::other(format!("render failed: {e}"))
}
