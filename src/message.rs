//! Message records produced by the parser.
//!
//! This module provides [`Message`], the structured representation of one
//! entry in a chat export, and [`Sender`], which distinguishes real authors
//! from group notifications.
//!
//! # Examples
//!
//! ```
//! use chatlens::{Message, Sender};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//!
//! let msg = Message::new(ts, "Alice", "Hello there");
//! assert_eq!(msg.sender(), &Sender::user("Alice"));
//! assert_eq!(msg.hour(), 10);
//! assert!(!msg.is_system());
//!
//! let notice = Message::system(ts, "Bob joined using this group's invite link");
//! assert!(notice.is_system());
//! ```

use std::fmt;

use chrono::{Datelike, Month, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Name under which system records are rendered and serialized.
pub const SYSTEM_SENDER: &str = "group_notification";

/// Author of a message.
///
/// Serializes as a plain string: the user's display name, or
/// [`SYSTEM_SENDER`] for notifications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sender {
    /// A participant, identified by display name. Never empty.
    User(String),
    /// Group notification with no individual author.
    System,
}

impl Sender {
    /// Creates a user sender; blank names collapse to [`Sender::System`].
    pub fn user(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Sender::System
        } else if trimmed.len() == name.len() {
            Sender::User(name)
        } else {
            Sender::User(trimmed.to_string())
        }
    }

    /// Returns the display name, or `None` for system records.
    pub fn name(&self) -> Option<&str> {
        match self {
            Sender::User(name) => Some(name),
            Sender::System => None,
        }
    }

    /// Returns the name as rendered in tables.
    pub fn as_str(&self) -> &str {
        match self {
            Sender::User(name) => name,
            Sender::System => SYSTEM_SENDER,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Sender::System)
    }
}

impl From<String> for Sender {
    fn from(value: String) -> Self {
        if value == SYSTEM_SENDER {
            Sender::System
        } else {
            Sender::user(value)
        }
    }
}

impl From<&str> for Sender {
    fn from(value: &str) -> Self {
        Sender::from(value.to_string())
    }
}

impl From<Sender> for String {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User(name) => name,
            Sender::System => SYSTEM_SENDER.to_string(),
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured entry of a chat export.
///
/// Media and system flags are not stored: [`is_system`](Self::is_system)
/// looks at the sender, and media detection depends on the placeholder list
/// configured in [`AnalysisConfig`](crate::config::AnalysisConfig).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent, in the exporter's local time.
    pub timestamp: NaiveDateTime,

    /// Author of the message.
    pub sender: Sender,

    /// Message text. May contain newlines for multiline messages and may be
    /// empty.
    pub body: String,
}

impl Message {
    /// Creates a message from a user.
    ///
    /// A blank `sender` produces a system record.
    pub fn new(timestamp: NaiveDateTime, sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: Sender::user(sender),
            body: body.into(),
        }
    }

    /// Creates a group notification record.
    pub fn system(timestamp: NaiveDateTime, body: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: Sender::System,
            body: body.into(),
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_system(&self) -> bool {
        self.sender.is_system()
    }

    /// Returns `true` if the sender is the given user (ASCII case-insensitive).
    pub fn is_from(&self, name: &str) -> bool {
        self.sender
            .name()
            .is_some_and(|sender| sender.eq_ignore_ascii_case(name))
    }

    // =========================================================================
    // Calendar accessors
    // =========================================================================

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// Month number, 1-12.
    pub fn month_number(&self) -> u32 {
        self.timestamp.month()
    }

    pub fn month(&self) -> Month {
        Month::try_from(self.timestamp.month() as u8).unwrap_or(Month::January)
    }

    pub fn weekday(&self) -> Weekday {
        self.timestamp.weekday()
    }

    /// Hour of day, 0-23.
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// The (date, hour) bucket this message falls into.
    pub fn period(&self) -> ActivityPeriod {
        ActivityPeriod {
            date: self.date(),
            hour: self.hour(),
        }
    }
}

/// A one-hour slot on a given calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActivityPeriod {
    pub date: NaiveDate,
    pub hour: u32,
}

impl ActivityPeriod {
    /// Label of the hour slot, e.g. `"10-11"`; the last slot is `"23-00"`.
    pub fn label(&self) -> String {
        hour_label(self.hour)
    }
}

/// Formats the hour slot starting at `hour` as `"HH-HH"`.
pub fn hour_label(hour: u32) -> String {
    format!("{:02}-{:02}", hour, (hour + 1) % 24)
}
