//! Distribution of messages over the week, the year and the day.
//!
//! All three views are zero-filled: every weekday, month and hour slot
//! is present even when no message falls into it.

use chrono::{Datelike, Month, Timelike, Weekday};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::Message;
use crate::message::hour_label;

/// Weekdays in display order, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Months in calendar order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Full English weekday name.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Message counts per weekday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekActivity {
    counts: [usize; 7],
}

impl WeekActivity {
    pub fn get(&self, day: Weekday) -> usize {
        self.counts[day.num_days_from_monday() as usize]
    }

    /// Iterates Monday through Sunday.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, usize)> + '_ {
        WEEKDAYS.iter().copied().zip(self.counts.iter().copied())
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// The weekday with the most messages; the earliest in the week wins ties.
    pub fn busiest(&self) -> Option<Weekday> {
        busiest(self.iter())
    }
}

impl Serialize for WeekActivity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7))?;
        for (day, count) in self.iter() {
            map.serialize_entry(weekday_name(day), &count)?;
        }
        map.end()
    }
}

/// Message counts per calendar month, across all years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthActivity {
    counts: [usize; 12],
}

impl MonthActivity {
    pub fn get(&self, month: Month) -> usize {
        self.counts[month.number_from_month() as usize - 1]
    }

    /// Iterates January through December.
    pub fn iter(&self) -> impl Iterator<Item = (Month, usize)> + '_ {
        MONTHS.iter().copied().zip(self.counts.iter().copied())
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn busiest(&self) -> Option<Month> {
        busiest(self.iter())
    }
}

impl Serialize for MonthActivity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(12))?;
        for (month, count) in self.iter() {
            map.serialize_entry(month.name(), &count)?;
        }
        map.end()
    }
}

/// A 7 x 24 grid of message counts: weekday rows, hour-period columns.
///
/// Column `h` is the period labelled by [`hour_label`], e.g. `14-15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityHeatmap {
    cells: [[usize; 24]; 7],
}

impl Default for ActivityHeatmap {
    fn default() -> Self {
        Self {
            cells: [[0; 24]; 7],
        }
    }
}

impl ActivityHeatmap {
    /// Count for a weekday and hour. Hours past 23 read as zero.
    pub fn get(&self, day: Weekday, hour: u32) -> usize {
        self.row(day).get(hour as usize).copied().unwrap_or(0)
    }

    pub fn row(&self, day: Weekday) -> &[usize; 24] {
        &self.cells[day.num_days_from_monday() as usize]
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    /// Column labels, `00-01` through `23-00`.
    pub fn labels() -> Vec<String> {
        (0..24).map(hour_label).collect()
    }

    /// The busiest (weekday, hour) cell, if any message exists.
    pub fn peak(&self) -> Option<(Weekday, u32)> {
        let mut best: Option<(Weekday, u32, usize)> = None;
        for day in WEEKDAYS {
            for (hour, &count) in self.row(day).iter().enumerate() {
                if count > 0 && best.is_none_or(|(_, _, c)| count > c) {
                    best = Some((day, hour as u32, count));
                }
            }
        }
        best.map(|(day, hour, _)| (day, hour))
    }
}

impl Serialize for ActivityHeatmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let days: Vec<&str> = WEEKDAYS.iter().map(|d| weekday_name(*d)).collect();
        let mut state = serializer.serialize_struct("ActivityHeatmap", 3)?;
        state.serialize_field("days", &days)?;
        state.serialize_field("periods", &Self::labels())?;
        state.serialize_field("counts", &self.cells)?;
        state.end()
    }
}

fn busiest<T>(iter: impl Iterator<Item = (T, usize)>) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    for (key, count) in iter {
        if count > 0 && best.as_ref().is_none_or(|(_, c)| count > *c) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key)
}

/// Counts records per weekday.
pub fn week_activity(messages: &[&Message]) -> WeekActivity {
    let mut activity = WeekActivity::default();
    for msg in messages {
        activity.counts[msg.weekday().num_days_from_monday() as usize] += 1;
    }
    activity
}

/// Counts records per calendar month.
pub fn month_activity(messages: &[&Message]) -> MonthActivity {
    let mut activity = MonthActivity::default();
    for msg in messages {
        activity.counts[msg.timestamp.month0() as usize] += 1;
    }
    activity
}

/// Counts records per (weekday, hour).
pub fn activity_heatmap(messages: &[&Message]) -> ActivityHeatmap {
    let mut heatmap = ActivityHeatmap::default();
    for msg in messages {
        let row = msg.weekday().num_days_from_monday() as usize;
        heatmap.cells[row][msg.timestamp.hour() as usize] += 1;
    }
    heatmap
}
