//! Per-sender activity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::counter::OrderedCounter;
use crate::Message;

/// One row of the most-busy-users ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActivity {
    pub sender: String,
    pub count: usize,
    /// Share of all user messages in the set, in percent, two decimals.
    ///
    /// The denominator counts every non-system message, including senders
    /// outside the ranking, so the ranked rows sum to less than 100 when
    /// the chat has more senders than the ranking keeps.
    pub percentage: f64,
}

/// Ranks senders by message count.
///
/// System records are ignored. Ties keep the order in which senders first
/// appear. Percentages are relative to every user message in `messages`,
/// not just the returned top `limit`.
pub fn most_busy_users(messages: &[&Message], limit: usize) -> Vec<UserActivity> {
    let mut counter = OrderedCounter::new();
    counter.extend(messages.iter().filter_map(|m| m.sender.name()));

    let total: usize = messages.iter().filter(|m| !m.is_system()).count();
    if total == 0 {
        return Vec::new();
    }

    counter
        .most_common(Some(limit))
        .into_iter()
        .map(|(sender, count)| UserActivity {
            sender: sender.to_string(),
            count,
            percentage: round2(count as f64 * 100.0 / total as f64),
        })
        .collect()
}

/// Distinct user senders, sorted, without the system sender.
pub fn user_list(messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .filter_map(|m| m.sender.name())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
