//! # Chatlens
//!
//! A Rust library for parsing WhatsApp chat exports and computing the
//! statistics behind a chat dashboard: message counts, timelines, activity
//! maps, busiest users, common words and emoji.
//!
//! ## Overview
//!
//! Work happens in two steps:
//! 1. **Parse**: [`WhatsAppParser`] turns the exported text into an ordered
//!    list of [`Message`] records. Multi-line messages are reassembled and
//!    group notifications become system records.
//! 2. **Aggregate**: [`Analyzer`](core::Analyzer) computes views over the
//!    records, optionally restricted to one sender or a date range through
//!    a [`FilterConfig`](core::FilterConfig).
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let export = "\
//! 1/1/24, 10:00 - Alice: Hello there
//! 1/1/24, 10:05 - Bob: <Media omitted>
//! 1/1/24, 10:06 - Alice: Check this http://example.com
//! ";
//!     let messages = WhatsAppParser::new().parse_str(export)?;
//!     assert_eq!(messages.len(), 3);
//!
//!     let config = AnalysisConfig::default();
//!     let analyzer = Analyzer::new(&messages, &config);
//!     let overall = FilterConfig::new();
//!
//!     let busy = analyzer.most_busy_users(&overall).unwrap();
//!     assert_eq!(busy[0].sender, "Alice");
//!     assert_eq!(analyzer.monthly_timeline(&overall)[0].label, "Jan 2024");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`WhatsAppParser`], the entry point for parsing
//! - [`parsing`] - Boundary patterns, timestamp layouts and line helpers
//! - [`config`] - [`ParserConfig`](config::ParserConfig),
//!   [`AnalysisConfig`](config::AnalysisConfig), [`StopWords`](config::StopWords)
//! - [`core`] - Filtering, the individual views, [`Analyzer`](core::Analyzer)
//!   and [`Report`](core::Report), plus record and report writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and format dispatch
//! - [`message`] - [`Message`] and [`Sender`]
//! - [`error`] - [`ChatlensError`] and [`Result`]
//! - [`prelude`] - Convenient re-exports
//!
//! ## Features
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `csv-output` | CSV record export |
//! | `json-output` | JSON / JSONL record export and JSON reports |
//! | `cli` | The `chatlens` binary, [`cli`] and [`logging`] |
//! | `gen-test` | The `gen_test` synthetic export generator |

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
#[cfg(feature = "cli")]
pub mod logging;
pub mod message;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use message::{Message, Sender};
pub use parser::WhatsAppParser;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Message, Sender};

    pub use crate::error::{ChatlensError, Result};

    pub use crate::parser::WhatsAppParser;
    pub use crate::parsing::{DateFormat, DateOrder};

    pub use crate::config::{AnalysisConfig, CustomFormat, FormatSelection, ParserConfig, StopWords};

    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::OutputConfig;
    pub use crate::core::{Analyzer, Report};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{
        report_to_json, to_json, to_jsonl, write_json, write_jsonl, write_report_json,
    };

    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
