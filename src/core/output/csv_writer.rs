//! CSV record export.

use std::fs::File;
use std::io::Write;

use crate::Message;
use crate::core::models::{CSV_TIMESTAMP, OutputConfig};
use crate::error::Result;

/// Writes records to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Sender`, `Body`, prefixed by `Timestamp` when enabled
/// - System records use the sender `group_notification`
/// - Encoding: UTF-8
pub fn write_csv(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(messages, file, config)
}

/// Same as [`write_csv`], returned as a string.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(messages, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(messages: &[Message], sink: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    if config.include_timestamps {
        writer.write_record(["Timestamp", "Sender", "Body"])?;
    } else {
        writer.write_record(["Sender", "Body"])?;
    }

    for msg in config.select(messages) {
        match config.timestamp(msg.timestamp, CSV_TIMESTAMP) {
            Some(ts) => writer.write_record([ts.as_str(), msg.sender.as_str(), msg.body.as_str()])?,
            None => writer.write_record([msg.sender.as_str(), msg.body.as_str()])?,
        }
    }

    writer.flush()?;
    Ok(())
}
