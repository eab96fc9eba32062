//! WhatsApp export layout utilities.
//!
//! Exports vary by platform and locale. Every layout starts a message with a
//! date/time stamp followed by a separator; this module knows the stamps,
//! detects which one a file uses, and turns matched stamps into timestamps.

use chrono::NaiveDateTime;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::{ChatlensError, Result};
use crate::message::Sender;

/// Built-in timestamp layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateFormat {
    /// Android export, slashes and a dash separator.
    /// Example: `1/15/24, 10:30 - Sender: Message` or `15/01/2024, 10:30 pm - ...`
    Android,
    /// iOS export with brackets.
    /// Example: `[1/15/24, 10:30:45 AM] Sender: Message`
    IosBracketed,
    /// Dotted date in brackets.
    /// Example: `[15.01.24, 10:30:45] Sender: Message`
    DotBracketed,
    /// Dotted date with a dash separator.
    /// Example: `26.10.2025, 20:40 - Sender: Message`
    DotDashed,
}

const TIME: &str = r"\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap]\.?\s?[Mm]\.?)?";

impl DateFormat {
    /// Returns the boundary pattern for this layout.
    ///
    /// The pattern is anchored at line start and exposes the named groups
    /// `date` and `time`; the match ends where the sender (or notification
    /// text) begins.
    pub fn pattern(self) -> String {
        match self {
            DateFormat::Android => {
                format!(r"^(?P<date>\d{{1,2}}/\d{{1,2}}/\d{{2,4}}),?\s+(?P<time>{TIME})\s+[-–]\s")
            }
            DateFormat::IosBracketed => {
                format!(r"^\[(?P<date>\d{{1,2}}/\d{{1,2}}/\d{{2,4}}),?\s+(?P<time>{TIME})\]\s")
            }
            DateFormat::DotBracketed => {
                format!(r"^\[(?P<date>\d{{1,2}}\.\d{{1,2}}\.\d{{2,4}}),?\s+(?P<time>{TIME})\]\s")
            }
            DateFormat::DotDashed => {
                format!(r"^(?P<date>\d{{1,2}}\.\d{{1,2}}\.\d{{2,4}}),?\s+(?P<time>{TIME})\s+[-–]\s")
            }
        }
    }

    /// Day/month order assumed when the data gives no evidence either way.
    pub fn conventional_order(self) -> DateOrder {
        match self {
            DateFormat::IosBracketed => DateOrder::MonthFirst,
            DateFormat::Android | DateFormat::DotBracketed | DateFormat::DotDashed => {
                DateOrder::DayFirst
            }
        }
    }

    /// Returns all format variants, in detection priority order.
    pub fn all() -> &'static [DateFormat] {
        &[
            DateFormat::Android,
            DateFormat::IosBracketed,
            DateFormat::DotBracketed,
            DateFormat::DotDashed,
        ]
    }
}

impl std::fmt::Display for DateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateFormat::Android => write!(f, "Android"),
            DateFormat::IosBracketed => write!(f, "iOS (bracketed)"),
            DateFormat::DotBracketed => write!(f, "dotted (bracketed)"),
            DateFormat::DotDashed => write!(f, "dotted (dashed)"),
        }
    }
}

/// Order of the day and month components in a stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrder {
    /// Decide from the data, falling back to the layout's convention.
    #[default]
    Auto,
    /// `DD/MM/YY`
    DayFirst,
    /// `MM/DD/YY`
    MonthFirst,
}

/// A compiled boundary pattern: the regex plus how to read its captures.
#[derive(Debug, Clone)]
pub struct Boundary {
    regex: Regex,
    datetime_formats: Vec<String>,
    fallback_order: DateOrder,
}

impl Boundary {
    /// Compiles a built-in layout.
    pub fn builtin(format: DateFormat) -> Self {
        Self {
            regex: Regex::new(&format.pattern()).expect("built-in boundary patterns are valid"),
            datetime_formats: Vec::new(),
            fallback_order: format.conventional_order(),
        }
    }

    /// Compiles a user-supplied pattern.
    ///
    /// The pattern must contain the named groups `date` and `time`. When
    /// `datetime_formats` is empty the built-in date/time formats are tried.
    pub fn custom(pattern: &str, datetime_formats: &[String]) -> Result<Self> {
        let anchored = if pattern.starts_with('^') {
            pattern.to_string()
        } else {
            format!("^(?:{pattern})")
        };
        let regex = Regex::new(&anchored).map_err(|e| ChatlensError::invalid_pattern(pattern, e))?;

        for group in ["date", "time"] {
            if !regex.capture_names().flatten().any(|name| name == group) {
                return Err(ChatlensError::invalid_pattern(
                    pattern,
                    format!("missing named group '{group}'"),
                ));
            }
        }

        Ok(Self {
            regex,
            datetime_formats: datetime_formats.to_vec(),
            fallback_order: DateOrder::DayFirst,
        })
    }

    /// Returns the regex used to find message boundaries.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Matches a line against the boundary, returning the raw stamp and the
    /// byte offset where the rest of the line begins.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<Stamp<'a>> {
        let caps: Captures<'a> = self.regex.captures(line)?;
        let date = caps.name("date")?.as_str();
        let time = caps.name("time")?.as_str();
        let end = caps.get(0)?.end();
        Some(Stamp { date, time, end })
    }

    /// Resolves [`DateOrder::Auto`] against this boundary's fallback.
    pub fn resolve_order(&self, order: DateOrder, votes: OrderVotes) -> DateOrder {
        match order {
            DateOrder::Auto => votes.decide().unwrap_or(self.fallback_order),
            fixed => fixed,
        }
    }

    /// Parses a matched stamp into a timestamp.
    pub fn parse_timestamp(&self, stamp: &Stamp<'_>, order: DateOrder) -> Option<NaiveDateTime> {
        if self.datetime_formats.is_empty() {
            parse_whatsapp_timestamp(stamp.date, stamp.time, order)
        } else {
            let joined = format!("{} {}", stamp.date, normalize_time(stamp.time));
            self.datetime_formats
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(&joined, fmt).ok())
        }
    }
}

/// The date and time text captured at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp<'a> {
    pub date: &'a str,
    pub time: &'a str,
    /// Byte offset just past the boundary.
    pub end: usize,
}

/// Evidence collected for day-first versus month-first dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderVotes {
    pub day_first: usize,
    pub month_first: usize,
}

impl OrderVotes {
    /// Records the evidence carried by one date string.
    pub fn observe(&mut self, date: &str) {
        let mut parts = date.split(['/', '.', '-']).map(|p| p.parse::<u32>().unwrap_or(0));
        let first = parts.next().unwrap_or(0);
        let second = parts.next().unwrap_or(0);

        if first > 12 {
            self.day_first += 1;
        } else if second > 12 {
            self.month_first += 1;
        }
    }

    /// Returns the winning order, or `None` without evidence.
    pub fn decide(self) -> Option<DateOrder> {
        match (self.day_first, self.month_first) {
            (0, 0) => None,
            (d, m) if d >= m => Some(DateOrder::DayFirst),
            _ => Some(DateOrder::MonthFirst),
        }
    }
}

/// Upper-cases the meridiem and puts a single space before it.
///
/// `10:30pm`, `10:30 p.m.` and `10:30 PM` all become `10:30 PM`.
fn normalize_time(time: &str) -> String {
    let compact: String = time.chars().filter(|c| *c != '.').collect();
    let lower = compact.to_ascii_lowercase();

    for (suffix, meridiem) in [("am", "AM"), ("pm", "PM")] {
        if let Some(clock) = lower.strip_suffix(suffix) {
            return format!("{} {meridiem}", clock.trim_end());
        }
    }

    compact.trim().to_string()
}

/// Parses a WhatsApp date and time pair.
///
/// Dates may use `/`, `.` or `-` separators and 2- or 4-digit years; times
/// may use a 12-hour or 24-hour clock, with or without seconds.
/// [`DateOrder::Auto`] is treated as day-first.
pub fn parse_whatsapp_timestamp(date: &str, time: &str, order: DateOrder) -> Option<NaiveDateTime> {
    let date = date.replace(['.', '-'], "/");
    let datetime_str = format!("{date} {}", normalize_time(time));

    let date_formats: &[&str] = match order {
        DateOrder::MonthFirst => &["%m/%d/%y", "%m/%d/%Y"],
        DateOrder::DayFirst | DateOrder::Auto => &["%d/%m/%y", "%d/%m/%Y"],
    };
    let time_formats = ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M:%S %p"];

    date_formats.iter().find_map(|date_fmt| {
        time_formats.iter().find_map(|time_fmt| {
            NaiveDateTime::parse_from_str(&datetime_str, &format!("{date_fmt} {time_fmt}")).ok()
        })
    })
}

/// Counts, for every layout in [`DateFormat::all`], how many of `lines`
/// start with one of its message boundaries.
pub fn score_whatsapp_formats(lines: &[&str]) -> Vec<(DateFormat, usize)> {
    let detectors: Vec<(DateFormat, Boundary)> = DateFormat::all()
        .iter()
        .map(|&f| (f, Boundary::builtin(f)))
        .collect();

    let mut scores = vec![0usize; detectors.len()];

    for line in lines {
        for (i, (_, boundary)) in detectors.iter().enumerate() {
            if boundary.regex().is_match(line) {
                scores[i] += 1;
            }
        }
    }

    detectors
        .into_iter()
        .map(|(format, _)| format)
        .zip(scores)
        .collect()
}

/// Auto-detect the layout by analyzing sample lines.
///
/// Returns the format matching the most lines, ties going to the earlier
/// entry of [`DateFormat::all`]. Returns `None` if no format matches.
pub fn detect_whatsapp_format(lines: &[&str]) -> Option<DateFormat> {
    best_format(&score_whatsapp_formats(lines))
}

/// Picks the highest non-zero score, first entry winning ties.
pub fn best_format(scores: &[(DateFormat, usize)]) -> Option<DateFormat> {
    let max_score = scores.iter().map(|&(_, score)| score).max()?;
    if max_score == 0 {
        return None;
    }

    scores
        .iter()
        .find(|&&(_, score)| score == max_score)
        .map(|&(format, _)| format)
}

/// Cleans up the invisible characters exports are littered with.
///
/// Strips a BOM, unifies line endings, turns (narrow) no-break spaces into
/// plain spaces and drops zero-width spaces and direction marks.
pub fn normalize_export(content: &str) -> String {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let content = content.replace("\r\n", "\n").replace('\r', "\n");

    content
        .chars()
        .filter(|c| !matches!(c, '\u{200b}' | '\u{200e}' | '\u{200f}'))
        .map(|c| match c {
            '\u{202f}' | '\u{a0}' => ' ',
            other => other,
        })
        .collect()
}

/// Phrases that mark a line as a group notification.
const NOTIFICATION_PHRASES: &[&str] = &[
    "Messages and calls are end-to-end encrypted",
    "created group",
    "changed the subject",
    "changed this group's",
    "changed the group",
    "deleted this group's",
    "changed their phone number",
    "changed to",
    "joined using this group's invite link",
    "security code changed",
    "You're now an admin",
    "is now an admin",
    "no longer an admin",
    "pinned a message",
    "turned on disappearing messages",
    "turned off disappearing messages",
    "changed the settings",
];

/// Verbs that mark a notification when they follow the actor's name.
const NOTIFICATION_VERBS: &[&str] = &["added", "removed", "left", "joined"];

/// Returns `true` if `text` reads like a group notification, e.g.
/// `Bob changed the subject from "a" to "b"` or `Alice added Carol`.
pub fn is_notification(text: &str) -> bool {
    NOTIFICATION_PHRASES.iter().any(|phrase| text.contains(phrase))
        || text
            .split_whitespace()
            .skip(1)
            .any(|word| NOTIFICATION_VERBS.contains(&word))
}

/// Splits the text after a boundary into sender and body.
///
/// The sender ends at the first colon that is followed by whitespace or the
/// end of the line. Without such a colon, with a blank name, or when the
/// text before the colon reads like a notification, the line is a
/// notification: the sender is [`Sender::System`] and the whole remainder
/// is the body.
pub fn split_sender(rest: &str) -> (Sender, &str) {
    for (idx, _) in rest.match_indices(':') {
        let after = &rest[idx + 1..];
        if after.is_empty() || after.starts_with(char::is_whitespace) {
            let name = rest[..idx].trim();
            if name.is_empty() || is_notification(name) {
                break;
            }
            return (Sender::User(name.to_string()), after.trim_start());
        }
    }

    (Sender::System, rest.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike};

    #[test]
    fn test_detect_format_android() {
        let lines = vec![
            "1/1/24, 10:00 - Alice: Hello there",
            "1/1/24, 10:05 - Bob: <Media omitted>",
        ];
        assert_eq!(detect_whatsapp_format(&lines), Some(DateFormat::Android));
    }

    #[test]
    fn test_detect_format_android_12h() {
        let lines = vec![
            "15/01/2024, 10:30 pm - Alice: Hello",
            "15/01/2024, 10:31 PM - Bob: Hi there",
        ];
        assert_eq!(detect_whatsapp_format(&lines), Some(DateFormat::Android));
    }

    #[test]
    fn test_detect_format_ios() {
        let lines = vec![
            "[1/15/24, 10:30:45 AM] Alice: Hello",
            "[1/15/24, 10:31:00 AM] Bob: Hi there",
        ];
        assert_eq!(detect_whatsapp_format(&lines), Some(DateFormat::IosBracketed));
    }

    #[test]
    fn test_detect_format_dot_bracketed() {
        let lines = vec![
            "[15.01.24, 10:30:45] Alice: Hello",
            "[15.01.24, 10:31:00] Bob: Hi there",
        ];
        assert_eq!(detect_whatsapp_format(&lines), Some(DateFormat::DotBracketed));
    }

    #[test]
    fn test_detect_format_dot_dashed() {
        let lines = vec![
            "26.10.2025, 20:40 - Alice: Hello",
            "26.10.2025, 20:41 - Bob: Hi there",
        ];
        assert_eq!(detect_whatsapp_format(&lines), Some(DateFormat::DotDashed));
    }

    #[test]
    fn test_detect_format_none() {
        let lines = vec!["just some text", "more text"];
        assert_eq!(detect_whatsapp_format(&lines), None);
    }

    #[test]
    fn test_score_formats_mixed_lines() {
        let lines = vec![
            "1/1/24, 10:00 - Alice: see below",
            "[1/15/24, 10:30:45 AM] Bob: quoted",
            "[1/15/24, 10:31:00 AM] Bob: quoted",
            "1/1/24, 10:01 - Alice: that was it",
            "1/1/24, 10:02 - Alice: bye",
        ];
        let scores = score_whatsapp_formats(&lines);
        assert_eq!(
            scores,
            vec![
                (DateFormat::Android, 3),
                (DateFormat::IosBracketed, 2),
                (DateFormat::DotBracketed, 0),
                (DateFormat::DotDashed, 0),
            ]
        );
        assert_eq!(best_format(&scores), Some(DateFormat::Android));
        assert_eq!(best_format(&scores[2..]), None);
    }

    #[test]
    fn test_parse_timestamp_24h() {
        let ts = parse_whatsapp_timestamp("15/01/2024", "10:30", DateOrder::DayFirst).unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(ts.hour(), 10);
        assert_eq!(ts.minute(), 30);
    }

    #[test]
    fn test_parse_timestamp_12h_variants() {
        for time in ["10:30 pm", "10:30pm", "10:30 PM", "10:30 p.m."] {
            let ts = parse_whatsapp_timestamp("1/15/24", time, DateOrder::MonthFirst).unwrap();
            assert_eq!(ts.hour(), 22, "failed for {time}");
        }
    }

    #[test]
    fn test_parse_timestamp_seconds() {
        let ts = parse_whatsapp_timestamp("15.01.24", "10:30:45", DateOrder::DayFirst).unwrap();
        assert_eq!(ts.second(), 45);
        assert_eq!(ts.year(), 2024);
    }

    #[test]
    fn test_parse_timestamp_order() {
        let day_first = parse_whatsapp_timestamp("3/4/24", "10:00", DateOrder::DayFirst).unwrap();
        assert_eq!(day_first.month(), 4);

        let month_first =
            parse_whatsapp_timestamp("3/4/24", "10:00", DateOrder::MonthFirst).unwrap();
        assert_eq!(month_first.month(), 3);
    }

    #[test]
    fn test_parse_timestamp_invalid_date() {
        assert!(parse_whatsapp_timestamp("31/02/2024", "10:00", DateOrder::DayFirst).is_none());
        assert!(parse_whatsapp_timestamp("15/01/2024", "25:00", DateOrder::DayFirst).is_none());
    }

    #[test]
    fn test_order_votes() {
        let mut votes = OrderVotes::default();
        assert_eq!(votes.decide(), None);

        votes.observe("1/1/24");
        assert_eq!(votes.decide(), None);

        votes.observe("25/12/24");
        assert_eq!(votes.decide(), Some(DateOrder::DayFirst));

        let mut votes = OrderVotes::default();
        votes.observe("12/25/24");
        assert_eq!(votes.decide(), Some(DateOrder::MonthFirst));
    }

    #[test]
    fn test_boundary_match_line() {
        let boundary = Boundary::builtin(DateFormat::Android);
        let line = "1/1/24, 10:00 - Alice: Hello there";
        let stamp = boundary.match_line(line).unwrap();
        assert_eq!(stamp.date, "1/1/24");
        assert_eq!(stamp.time, "10:00");
        assert_eq!(&line[stamp.end..], "Alice: Hello there");

        assert!(boundary.match_line("Hello there").is_none());
    }

    #[test]
    fn test_boundary_custom() {
        let boundary = Boundary::custom(
            r"(?P<date>\d{4}-\d{2}-\d{2}) (?P<time>\d{2}:\d{2}) \| ",
            &["%Y-%m-%d %H:%M".to_string()],
        )
        .unwrap();

        let line = "2024-03-05 08:15 | Alice: Morning";
        let stamp = boundary.match_line(line).unwrap();
        let ts = boundary.parse_timestamp(&stamp, DateOrder::Auto).unwrap();
        assert_eq!(ts.month(), 3);
        assert_eq!(ts.hour(), 8);
        assert_eq!(&line[stamp.end..], "Alice: Morning");
    }

    #[test]
    fn test_boundary_custom_missing_group() {
        let err = Boundary::custom(r"(?P<date>\d+) ", &[]).unwrap_err();
        assert!(err.is_invalid_format());
        assert!(err.to_string().contains("time"));
    }

    #[test]
    fn test_boundary_custom_bad_regex() {
        let err = Boundary::custom(r"(?P<date>\d+", &[]).unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_split_sender() {
        let (sender, body) = split_sender("Alice: Hello there");
        assert_eq!(sender, Sender::User("Alice".into()));
        assert_eq!(body, "Hello there");

        let (sender, body) = split_sender("Alice: Check http://example.com");
        assert_eq!(sender, Sender::User("Alice".into()));
        assert_eq!(body, "Check http://example.com");

        let (sender, body) = split_sender("Alice: time is 10:30: ok");
        assert_eq!(sender, Sender::User("Alice".into()));
        assert_eq!(body, "time is 10:30: ok");
    }

    #[test]
    fn test_split_sender_system() {
        let (sender, body) = split_sender("Bob joined using this group's invite link");
        assert_eq!(sender, Sender::System);
        assert_eq!(body, "Bob joined using this group's invite link");

        let (sender, _) = split_sender(": nobody");
        assert_eq!(sender, Sender::System);
    }

    #[test]
    fn test_split_sender_notification_with_colon() {
        let line = "Bob changed the subject from \"a\" to \"Plans: weekend\"";
        let (sender, body) = split_sender(line);
        assert_eq!(sender, Sender::System);
        assert_eq!(body, line);

        let (sender, _) = split_sender("Alice added Carol: welcome");
        assert_eq!(sender, Sender::System);

        let (sender, _) = split_sender("Bob changed this group's description: rules");
        assert_eq!(sender, Sender::System);
    }

    #[test]
    fn test_is_notification() {
        assert!(is_notification("Alice left"));
        assert!(is_notification("You added Bob"));
        assert!(is_notification("Carol created group \"Trip\""));
        assert!(!is_notification("Alice"));
        assert!(!is_notification("Carol Smith"));
        assert!(!is_notification("Left Hand"));
        assert!(!is_notification("+1 555 0100"));
    }

    #[test]
    fn test_split_sender_empty_body() {
        let (sender, body) = split_sender("Alice:");
        assert_eq!(sender, Sender::User("Alice".into()));
        assert_eq!(body, "");
    }

    #[test]
    fn test_normalize_export() {
        let raw = "\u{feff}1/1/24, 10:00\u{202f}AM - Alice: Hi\r\nnext\u{200e} line\u{a0}here";
        let clean = normalize_export(raw);
        assert_eq!(clean, "1/1/24, 10:00 AM - Alice: Hi\nnext line here");
    }
}
