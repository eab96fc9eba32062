//! JSON Lines (JSONL) record export.
//!
//! One record per line, suitable for streaming into other tools.

use std::fs::File;
use std::io::{BufWriter, Write};

use super::json_writer::ExportRecord;
use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::Result;

/// Writes records to a file, one JSON object per line.
///
/// # Format
/// ```text
/// {"sender":"Alice","body":"Hello"}
/// {"sender":"Bob","body":"Hi"}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(messages, &mut writer, config)?;
    writer.flush()?;
    Ok(())
}

/// Same as [`write_jsonl`], returned as a string.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(messages, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<W: Write>(messages: &[Message], sink: &mut W, config: &OutputConfig) -> Result<()> {
    for msg in config.select(messages) {
        serde_json::to_writer(&mut *sink, &ExportRecord::new(msg, config))?;
        sink.write_all(b"\n")?;
    }
    Ok(())
}
