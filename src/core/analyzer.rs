//! The aggregation entry point.
//!
//! [`Analyzer`] borrows a parsed record slice and an [`AnalysisConfig`] and
//! computes each view for a given [`FilterConfig`]. Nothing is cached: every
//! call filters and recomputes, so views are always consistent with their
//! filter.
//!
//! # Example
//!
//! ```
//! use chatlens::WhatsAppParser;
//! use chatlens::config::AnalysisConfig;
//! use chatlens::core::{Analyzer, FilterConfig};
//!
//! let export = "1/1/24, 10:00 - Alice: Hello there\n\
//!               1/1/24, 10:05 - Bob: <Media omitted>\n\
//!               1/1/24, 10:06 - Alice: Check this http://example.com\n";
//! let messages = WhatsAppParser::new().parse_str(export).unwrap();
//!
//! let config = AnalysisConfig::default();
//! let analyzer = Analyzer::new(&messages, &config);
//! let stats = analyzer.stats(&FilterConfig::new());
//!
//! assert_eq!(stats.messages, 3);
//! assert_eq!(stats.words, 4);
//! assert_eq!(stats.media, 1);
//! assert_eq!(stats.links, 1);
//! ```

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use super::activity::{self, ActivityHeatmap, MonthActivity, WeekActivity};
use super::emoji::{self, EmojiCount};
use super::filter::{FilterConfig, apply_filters};
use super::stats::{self, MessageStats};
use super::timeline::{self, DailyBucket, MonthlyBucket};
use super::users::{self, UserActivity};
use super::words::{self, WordCount};
use crate::Message;
use crate::config::AnalysisConfig;

/// Computes aggregate views over a parsed chat.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    messages: &'a [Message],
    config: &'a AnalysisConfig,
}

impl<'a> Analyzer<'a> {
    pub fn new(messages: &'a [Message], config: &'a AnalysisConfig) -> Self {
        Self { messages, config }
    }

    /// All records, unfiltered.
    pub fn messages(&self) -> &'a [Message] {
        self.messages
    }

    pub fn config(&self) -> &'a AnalysisConfig {
        self.config
    }

    /// Records passing `filter`, in source order.
    pub fn select(&self, filter: &FilterConfig) -> Vec<&'a Message> {
        apply_filters(self.messages, filter)
    }

    pub fn stats(&self, filter: &FilterConfig) -> MessageStats {
        stats::message_stats(&self.select(filter), self.config)
    }

    pub fn monthly_timeline(&self, filter: &FilterConfig) -> Vec<MonthlyBucket> {
        timeline::monthly_timeline(&self.select(filter))
    }

    pub fn daily_timeline(&self, filter: &FilterConfig) -> Vec<DailyBucket> {
        timeline::daily_timeline(&self.select(filter))
    }

    pub fn week_activity(&self, filter: &FilterConfig) -> WeekActivity {
        activity::week_activity(&self.select(filter))
    }

    pub fn month_activity(&self, filter: &FilterConfig) -> MonthActivity {
        activity::month_activity(&self.select(filter))
    }

    pub fn activity_heatmap(&self, filter: &FilterConfig) -> ActivityHeatmap {
        activity::activity_heatmap(&self.select(filter))
    }

    /// Sender ranking. `None` when `filter` selects a single sender, since
    /// the ranking only makes sense for the whole group.
    pub fn most_busy_users(&self, filter: &FilterConfig) -> Option<Vec<UserActivity>> {
        if filter.has_user_filter() {
            return None;
        }
        Some(users::most_busy_users(&self.select(filter), self.config.top_users))
    }

    pub fn most_common_words(&self, filter: &FilterConfig) -> Vec<WordCount> {
        words::most_common_words(&self.select(filter), self.config)
    }

    pub fn emoji_usage(&self, filter: &FilterConfig) -> Vec<EmojiCount> {
        emoji::emoji_usage(&self.select(filter))
    }

    /// Sorted user names, without the system sender.
    pub fn users(&self) -> Vec<String> {
        users::user_list(self.messages)
    }

    /// Computes every view for `filter` in one pass over the selection.
    pub fn report(&self, filter: &FilterConfig) -> Report {
        let selected = self.select(filter);
        debug!(
            selection = filter.selection(),
            total = self.messages.len(),
            selected = selected.len(),
            "building report"
        );

        let most_busy_users = if filter.has_user_filter() {
            None
        } else {
            Some(users::most_busy_users(&selected, self.config.top_users))
        };

        Report {
            selection: filter.selection().to_string(),
            first_message: selected.first().map(|m| m.timestamp),
            last_message: selected.last().map(|m| m.timestamp),
            stats: stats::message_stats(&selected, self.config),
            monthly_timeline: timeline::monthly_timeline(&selected),
            daily_timeline: timeline::daily_timeline(&selected),
            week_activity: activity::week_activity(&selected),
            month_activity: activity::month_activity(&selected),
            activity_heatmap: activity::activity_heatmap(&selected),
            most_busy_users,
            most_common_words: words::most_common_words(&selected, self.config),
            emoji_usage: emoji::emoji_usage(&selected),
        }
    }
}

/// Every view for one filter, ready for presentation or JSON export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// The sender name, or `Overall`.
    pub selection: String,
    pub first_message: Option<NaiveDateTime>,
    pub last_message: Option<NaiveDateTime>,
    pub stats: MessageStats,
    pub monthly_timeline: Vec<MonthlyBucket>,
    pub daily_timeline: Vec<DailyBucket>,
    pub week_activity: WeekActivity,
    pub month_activity: MonthActivity,
    pub activity_heatmap: ActivityHeatmap,
    pub most_busy_users: Option<Vec<UserActivity>>,
    pub most_common_words: Vec<WordCount>,
    pub emoji_usage: Vec<EmojiCount>,
}

impl Report {
    /// Returns `true` when the selection contained no records.
    pub fn is_empty(&self) -> bool {
        self.stats.messages == 0
    }
}
