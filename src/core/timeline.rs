//! Message counts over calendar time.

use std::collections::BTreeMap;

use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::Message;

/// Message count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub year: i32,
    /// Month number, 1-12.
    pub month: u32,
    /// Display label such as `Jan 2024`.
    pub label: String,
    pub count: usize,
}

/// Message count for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub count: usize,
}

/// Formats a month label like `Jan 2024`.
pub fn month_label(year: i32, month: u32) -> String {
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("???", |m| &m.name()[..3]);
    format!("{name} {year}")
}

/// Groups records by (year, month). Buckets are chronological and only
/// months with at least one record appear.
pub fn monthly_timeline(messages: &[&Message]) -> Vec<MonthlyBucket> {
    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for msg in messages {
        *counts.entry((msg.year(), msg.month_number())).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((year, month), count)| MonthlyBucket {
            year,
            month,
            label: month_label(year, month),
            count,
        })
        .collect()
}

/// Groups records by calendar date, chronologically.
pub fn daily_timeline(messages: &[&Message]) -> Vec<DailyBucket> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for msg in messages {
        *counts.entry(msg.date()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(date, count)| DailyBucket { date, count })
        .collect()
}
