//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure, plus conversions into the library's
//!   configuration types
//! - [`ReportFormat`] - How the report is rendered
//! - [`ExportFormat`], [`DateOrderArg`], [`LayoutArg`] - clap-facing mirrors
//!   of library enums
//!
//! ```rust
//! use chatlens::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatlens", "chat.txt", "-u", "Alice", "--after", "2024-01-01"]);
//! let filter = args.filter_config().unwrap();
//! assert_eq!(filter.sender.as_deref(), Some("Alice"));
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, CustomFormat, ParserConfig, StopWords};
use crate::core::filter::FilterConfig;
use crate::core::models::OutputConfig;
use crate::error::Result;
use crate::format::OutputFormat;
use crate::parsing::{DateFormat, DateOrder};

/// Analyze a WhatsApp chat export: message counts, timelines, activity
/// maps, busiest users, common words and emoji.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens chat.txt
    chatlens chat.txt -u Alice --after 2024-01-01
    chatlens chat.txt --format json -o report.json
    chatlens chat.txt --export records.csv --timestamps
    chatlens chat.txt --list-users")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: String,

    /// Analyze one user ("Overall" for the whole chat)
    #[arg(short, long, value_name = "USER", default_value = "Overall")]
    pub user: String,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Also export the parsed records to this file
    #[arg(long, value_name = "PATH")]
    pub export: Option<String>,

    /// Record export format (default: from the --export extension)
    #[arg(long, value_enum, requires = "export")]
    pub export_format: Option<ExportFormat>,

    /// Include timestamps in the record export
    #[arg(short = 't', long, requires = "export")]
    pub timestamps: bool,

    /// Leave system notifications out of the record export
    #[arg(long, requires = "export")]
    pub no_system: bool,

    /// Stop-word list, one word per line (default: built-in English list)
    #[arg(long, value_name = "PATH")]
    pub stop_words: Option<PathBuf>,

    /// Number of entries in the common-words list
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub top_words: usize,

    /// Number of entries in the busiest-users list
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub top_users: usize,

    /// How to read ambiguous dates like 03/04/24
    #[arg(long, value_enum, default_value = "auto")]
    pub date_order: DateOrderArg,

    /// Force a built-in timestamp layout instead of detecting it
    #[arg(long, value_enum, conflicts_with = "pattern")]
    pub layout: Option<LayoutArg>,

    /// Custom boundary regex with named groups `date` and `time`
    #[arg(long, value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Print the users found in the chat and exit
    #[arg(long)]
    pub list_users: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Args {
    pub fn parser_config(&self) -> ParserConfig {
        let mut config = ParserConfig::new().with_date_order(self.date_order.into());
        if let Some(ref pattern) = self.pattern {
            config = config.with_custom_format(CustomFormat::new(pattern.clone()));
        } else if let Some(layout) = self.layout {
            config = config.with_format(layout.into());
        }
        config
    }

    /// Loads stop words from `--stop-words`, degrading to an empty list if
    /// the file is unreadable.
    pub fn analysis_config(&self) -> AnalysisConfig {
        let stop_words = match self.stop_words {
            Some(ref path) => StopWords::load_or_empty(path),
            None => StopWords::english(),
        };
        AnalysisConfig::new()
            .with_stop_words(stop_words)
            .with_top_words(self.top_words)
            .with_top_users(self.top_users)
    }

    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::for_selection(&self.user);
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        Ok(filter)
    }

    pub fn output_config(&self) -> OutputConfig {
        let mut config = OutputConfig::new();
        if self.timestamps {
            config = config.with_timestamps();
        }
        if self.no_system {
            config = config.without_system();
        }
        config
    }

    /// The export target and its format, if `--export` was given.
    pub fn export_target(&self) -> Result<Option<(&str, OutputFormat)>> {
        let Some(ref path) = self.export else {
            return Ok(None);
        };
        let format = match self.export_format {
            Some(format) => format.into(),
            None => OutputFormat::from_path(path)?,
        };
        Ok(Some((path.as_str(), format)))
    }
}

/// How the report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable tables
    #[default]
    Text,

    /// Pretty-printed JSON
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "JSON"),
        }
    }
}

/// Record export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ExportFormat {
    /// CSV with semicolon delimiter
    Csv,

    /// JSON array of records
    Json,

    /// JSON Lines - one record per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl From<ExportFormat> for OutputFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Csv => OutputFormat::Csv,
            ExportFormat::Json => OutputFormat::Json,
            ExportFormat::Jsonl => OutputFormat::Jsonl,
        }
    }
}

/// Date component order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum DateOrderArg {
    /// Decide from the data
    #[default]
    Auto,

    /// DD/MM/YY
    DayFirst,

    /// MM/DD/YY
    MonthFirst,
}

impl From<DateOrderArg> for DateOrder {
    fn from(order: DateOrderArg) -> Self {
        match order {
            DateOrderArg::Auto => DateOrder::Auto,
            DateOrderArg::DayFirst => DateOrder::DayFirst,
            DateOrderArg::MonthFirst => DateOrder::MonthFirst,
        }
    }
}

/// Built-in timestamp layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum LayoutArg {
    /// `1/15/24, 10:30 - `
    Android,

    /// `[1/15/24, 10:30:45 AM] `
    #[value(alias = "ios")]
    IosBracketed,

    /// `[15.01.24, 10:30:45] `
    DotBracketed,

    /// `26.10.2025, 20:40 - `
    DotDashed,
}

impl From<LayoutArg> for DateFormat {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Android => DateFormat::Android,
            LayoutArg::IosBracketed => DateFormat::IosBracketed,
            LayoutArg::DotBracketed => DateFormat::DotBracketed,
            LayoutArg::DotDashed => DateFormat::DotDashed,
        }
    }
}
