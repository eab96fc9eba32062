//! JSON record and report export.

use std::fs::File;
use std::io::Write;

use serde::Serialize;

use crate::Message;
use crate::core::analyzer::Report;
use crate::core::models::{JSON_TIMESTAMP, OutputConfig};
use crate::error::Result;

/// Record shape shared by the JSON and JSONL writers.
#[derive(Serialize)]
pub(super) struct ExportRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    sender: &'a str,
    body: &'a str,
}

impl<'a> ExportRecord<'a> {
    pub(super) fn new(msg: &'a Message, config: &OutputConfig) -> Self {
        Self {
            timestamp: config.timestamp(msg.timestamp, JSON_TIMESTAMP),
            sender: msg.sender.as_str(),
            body: &msg.body,
        }
    }
}

/// Writes records to a file as a pretty-printed JSON array.
///
/// # Format
/// ```json
/// [
///   {"sender": "Alice", "body": "Hello"},
///   {"sender": "Bob", "body": "Hi"}
/// ]
/// ```
pub fn write_json(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Same as [`write_json`], returned as a string.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let records: Vec<ExportRecord<'_>> = config
        .select(messages)
        .map(|m| ExportRecord::new(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}

/// Serializes a [`Report`] as pretty-printed JSON.
pub fn report_to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes a [`Report`] to a file as pretty-printed JSON.
pub fn write_report_json(report: &Report, output_path: &str) -> Result<()> {
    let json = report_to_json(report)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
