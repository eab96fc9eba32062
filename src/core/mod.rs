//! Aggregation over parsed records.
//!
//! This module contains:
//! - [`filter`] - Sender and date selection
//! - [`analyzer`] - [`Analyzer`] and the bundled [`Report`]
//! - [`stats`], [`timeline`], [`activity`], [`users`], [`words`], [`emoji`] - the individual views
//! - [`models`] - Export settings
//! - [`output`] - Record and report writers (CSV, JSON, JSONL)
//!
//! Every view is also a free function over `&[&Message]`, so callers that
//! filter records themselves can skip the [`Analyzer`].
//!
//! # Quick Start
//!
//! ```rust
//! use chatlens::core::{Analyzer, FilterConfig};
//! use chatlens::config::AnalysisConfig;
//! use chatlens::WhatsAppParser;
//!
//! let messages = WhatsAppParser::new()
//!     .parse_str("1/1/24, 10:00 - Alice: Hello there")
//!     .unwrap();
//! let config = AnalysisConfig::default();
//! let report = Analyzer::new(&messages, &config).report(&FilterConfig::new());
//! assert_eq!(report.stats.messages, 1);
//! ```

pub mod activity;
pub mod analyzer;
mod counter;
pub mod emoji;
pub mod filter;
pub mod models;
pub mod output;
pub mod stats;
pub mod timeline;
pub mod users;
pub mod words;

pub use activity::{
    ActivityHeatmap, MonthActivity, WeekActivity, activity_heatmap, month_activity, week_activity,
};
pub use analyzer::{Analyzer, Report};
pub use emoji::{EmojiCount, emoji_usage};
pub use filter::{FilterConfig, OVERALL, apply_filters};
pub use models::OutputConfig;
pub use stats::{MessageStats, message_stats};
pub use timeline::{DailyBucket, MonthlyBucket, daily_timeline, monthly_timeline};
pub use users::{UserActivity, most_busy_users, user_list};
pub use words::{WordCount, most_common_words};

pub use crate::Message;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{report_to_json, to_json, to_jsonl, write_json, write_jsonl, write_report_json};
