//! Record and report export.
//!
//! Record writers turn parsed records back into flat files:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of records - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one record per line - requires `json-output` feature
//!
//! Report writers serialize a full [`Report`](crate::core::Report):
//! - [`write_report_json`] / [`report_to_json`] - requires `json-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::output::{write_csv, write_jsonl, to_json};
//! use chatlens::core::models::OutputConfig;
//! use chatlens::WhatsAppParser;
//!
//! let messages = WhatsAppParser::new().parse("chat.txt".as_ref())?;
//! let config = OutputConfig::new().with_timestamps();
//!
//! write_csv(&messages, "chat.csv", &config)?;
//! write_jsonl(&messages, "chat.jsonl", &config)?;
//! let json = to_json(&messages, &config)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{report_to_json, to_json, write_json, write_report_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
