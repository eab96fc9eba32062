//! Export format selection.
//!
//! [`OutputFormat`] names a record export format independently of the CLI.
//! [`write_to_format`] and [`to_format_string`] hand records to the writer
//! for that format in [`core::output`](crate::core::output).
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatlens::Result<()> {
//! use chatlens::format::{OutputFormat, to_format_string};
//! use chatlens::core::models::OutputConfig;
//! use chatlens::WhatsAppParser;
//!
//! let messages = WhatsAppParser::new().parse_str("1/1/24, 10:00 - Alice: Hello")?;
//!
//! let format = OutputFormat::from_path("chat.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//!
//! let jsonl = to_format_string(&messages, format, &OutputConfig::new())?;
//! assert!(jsonl.contains("Alice"));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::{ChatlensError, Result};

/// Names accepted by [`OutputFormat::from_name`], also used as extensions.
const NAMES: &[(&str, OutputFormat)] = &[
    ("csv", OutputFormat::Csv),
    ("json", OutputFormat::Json),
    ("jsonl", OutputFormat::Jsonl),
    ("ndjson", OutputFormat::Jsonl),
];

/// Record export format.
///
/// ```rust
/// use chatlens::format::OutputFormat;
///
/// let format: OutputFormat = "NDJSON".parse().unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Semicolon-delimited CSV
    #[default]
    Csv,

    /// Pretty-printed JSON array
    Json,

    /// One JSON object per line
    Jsonl,
}

impl OutputFormat {
    /// Looks up a format by name or alias, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        NAMES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|&(_, format)| format)
    }

    /// Picks the format from the extension of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidFormat`] when the extension is missing
    /// or unknown.
    pub fn from_path(path: &str) -> Result<Self> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        Self::from_name(ext).ok_or_else(|| {
            ChatlensError::invalid_format(
                "output",
                format!("cannot infer an export format from '.{ext}' (use csv, json or jsonl)"),
            )
        })
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Cargo feature that compiles in the writer for this format.
    pub fn required_feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    fn disabled(self) -> ChatlensError {
        ChatlensError::invalid_format(
            "output",
            format!("{self} export needs the '{}' feature", self.required_feature()),
        )
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            let names: Vec<&str> = NAMES.iter().map(|(name, _)| *name).collect();
            format!("unknown export format '{s}', expected one of: {}", names.join(", "))
        })
    }
}

/// Writes records to `path` with the writer for `format`.
///
/// # Errors
///
/// Fails if the writer's feature is disabled or the file cannot be written.
#[allow(unused_variables)]
pub fn write_to_format(
    messages: &[Message],
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    use crate::core::output as out;

    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => out::write_csv(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => out::write_json(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => out::write_jsonl(messages, path, config),
        #[allow(unreachable_patterns)]
        other => Err(other.disabled()),
    }
}

/// Renders records with the writer for `format` and returns the text.
#[allow(unused_variables)]
pub fn to_format_string(
    messages: &[Message],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    use crate::core::output as out;

    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => out::to_csv(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => out::to_json(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => out::to_jsonl(messages, config),
        #[allow(unreachable_patterns)]
        other => Err(other.disabled()),
    }
}
