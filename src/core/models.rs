//! Export settings for record writers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Message;

/// Timestamp layout used in CSV exports.
pub(crate) const CSV_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp layout used in JSON and JSONL exports.
pub(crate) const JSON_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S";

/// Controls which records and columns an export contains.
///
/// By default timestamps are left out and system records are written.
///
/// # Example
///
/// ```rust
/// use chatlens::core::models::OutputConfig;
///
/// let config = OutputConfig::new().with_timestamps().without_system();
/// assert!(config.include_timestamps);
/// assert!(config.skip_system);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Include the timestamp column
    pub include_timestamps: bool,
    /// Leave out system records
    pub skip_system: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn without_system(mut self) -> Self {
        self.skip_system = true;
        self
    }

    /// The records an export writes, in order.
    pub fn select<'a>(&self, messages: &'a [Message]) -> impl Iterator<Item = &'a Message> + use<'a> {
        let skip_system = self.skip_system;
        messages.iter().filter(move |m| !(skip_system && m.is_system()))
    }

    pub(crate) fn timestamp(&self, ts: NaiveDateTime, layout: &str) -> Option<String> {
        self.include_timestamps.then(|| ts.format(layout).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_select_skips_system_when_asked() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let messages = vec![Message::system(ts, "created"), Message::new(ts, "Alice", "hi")];

        assert_eq!(OutputConfig::new().select(&messages).count(), 2);
        assert_eq!(OutputConfig::new().without_system().select(&messages).count(), 1);
    }

    #[test]
    fn test_timestamp_toggle() {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();

        assert_eq!(OutputConfig::new().timestamp(ts, CSV_TIMESTAMP), None);
        assert_eq!(
            OutputConfig::new().with_timestamps().timestamp(ts, CSV_TIMESTAMP).as_deref(),
            Some("2024-06-15 12:30:00")
        );
    }
}
