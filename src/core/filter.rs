//! Restrict the record set before computing a view.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for selecting the matching records.
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Messages from one user |
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//!
//! # Example
//!
//! ```
//! use chatlens::core::filter::{FilterConfig, apply_filters};
//! use chatlens::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let messages = vec![
//!     Message::new(ts, "Alice", "Hello"),
//!     Message::new(ts, "Bob", "Hi there"),
//!     Message::new(ts, "Alice", "How are you?"),
//! ];
//!
//! // Case-insensitive sender matching
//! let filtered = apply_filters(&messages, &FilterConfig::new().with_sender("alice"));
//! assert_eq!(filtered.len(), 2);
//!
//! // "Overall" means no sender filter
//! let overall = apply_filters(&messages, &FilterConfig::for_selection("Overall"));
//! assert_eq!(overall.len(), 3);
//! ```
//!
//! # Behavior Notes
//!
//! - Sender matching is case-insensitive for ASCII characters
//! - System records never match a sender filter
//! - Date bounds are inclusive
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::ChatlensError;

/// The selection label for "no sender filter".
pub const OVERALL: &str = "Overall";

/// Configuration for filtering messages by sender and date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Include only messages from this user (case-insensitive).
    pub sender: Option<String>,

    /// Include only messages on or after this date.
    pub after: Option<NaiveDate>,

    /// Include only messages on or before this date.
    pub before: Option<NaiveDate>,
}

impl FilterConfig {
    /// Creates the "Overall" filter: every record passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter from a user selection, where [`OVERALL`] means all
    /// senders.
    pub fn for_selection(selection: &str) -> Self {
        if selection.eq_ignore_ascii_case(OVERALL) {
            Self::new()
        } else {
            Self::new().with_sender(selection)
        }
    }

    /// Sets the sender filter.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.after = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatlensError> {
        self.before = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the start date directly.
    #[must_use]
    pub fn with_after(mut self, date: NaiveDate) -> Self {
        self.after = Some(date);
        self
    }

    /// Sets the end date directly.
    #[must_use]
    pub fn with_before(mut self, date: NaiveDate) -> Self {
        self.before = Some(date);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.sender.is_some() || self.has_date_filter()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if a sender is selected (not "Overall").
    pub fn has_user_filter(&self) -> bool {
        self.sender.is_some()
    }

    /// The selection label: the sender name or [`OVERALL`].
    pub fn selection(&self) -> &str {
        self.sender.as_deref().unwrap_or(OVERALL)
    }

    /// Returns `true` if the message passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        if let Some(ref sender) = self.sender {
            if !msg.is_from(sender) {
                return false;
            }
        }

        let date = msg.date();
        if self.after.is_some_and(|after| date < after) {
            return false;
        }
        if self.before.is_some_and(|before| date > before) {
            return false;
        }

        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatlensError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatlensError::invalid_date(date_str))
}

/// Selects the messages matching all active filters, in source order.
pub fn apply_filters<'a>(messages: &'a [Message], config: &FilterConfig) -> Vec<&'a Message> {
    messages.iter().filter(|msg| config.matches(msg)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_msg(sender: &str, body: &str, date: &str) -> Message {
        let ts = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Message::new(ts, sender, body)
    }

    #[test]
    fn test_filter_by_sender() {
        let messages = vec![
            make_msg("Alice", "Hello", "2024-01-01"),
            make_msg("Bob", "Hi", "2024-01-01"),
            make_msg("alice", "Bye", "2024-01-01"), // lowercase
        ];

        let filtered = apply_filters(&messages, &FilterConfig::new().with_sender("Alice"));

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|m| m.is_from("Alice")));
    }

    #[test]
    fn test_system_never_matches_sender() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let messages = vec![Message::system(ts, "Alice left")];

        let config = FilterConfig::new().with_sender(crate::message::SYSTEM_SENDER);
        assert!(apply_filters(&messages, &config).is_empty());
    }

    #[test]
    fn test_unknown_sender_is_empty() {
        let messages = vec![make_msg("Alice", "Hello", "2024-01-01")];
        let filtered = apply_filters(&messages, &FilterConfig::new().with_sender("Zed"));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_for_selection() {
        assert!(!FilterConfig::for_selection("Overall").is_active());
        assert!(!FilterConfig::for_selection("overall").is_active());

        let config = FilterConfig::for_selection("Alice");
        assert_eq!(config.sender.as_deref(), Some("Alice"));
        assert_eq!(config.selection(), "Alice");
        assert_eq!(FilterConfig::new().selection(), OVERALL);
    }

    #[test]
    fn test_filter_by_date_range() {
        let messages = vec![
            make_msg("Alice", "Old", "2024-01-01"),
            make_msg("Alice", "Edge", "2024-06-01"),
            make_msg("Alice", "New", "2024-06-15"),
        ];

        let config = FilterConfig::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_date_to("2024-06-10")
            .unwrap();
        let filtered = apply_filters(&messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].body, "Edge");
    }

    #[test]
    fn test_invalid_date_format() {
        let result = FilterConfig::new().with_date_from("01-01-2024");
        assert!(matches!(result, Err(ChatlensError::InvalidDate { .. })));
    }

    #[test]
    fn test_combined_filters() {
        let messages = vec![
            make_msg("Alice", "Old Alice", "2024-01-01"),
            make_msg("Alice", "New Alice", "2024-06-15"),
            make_msg("Bob", "New Bob", "2024-06-15"),
        ];

        let config = FilterConfig::new()
            .with_date_from("2024-06-01")
            .unwrap()
            .with_sender("Alice");

        let filtered = apply_filters(&messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].body, "New Alice");
    }

    #[test]
    fn test_is_active() {
        assert!(!FilterConfig::new().is_active());
        assert!(FilterConfig::new().with_sender("Alice").is_active());
        assert!(
            FilterConfig::new()
                .with_after(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
                .has_date_filter()
        );
    }
}
