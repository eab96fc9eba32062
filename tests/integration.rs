//! Integration tests for chatlens.
//!
//! These tests run the whole library pipeline: export text in, records
//! out, then views over the records.

use chatlens::config::{AnalysisConfig, CustomFormat, ParserConfig, StopWords};
use chatlens::core::{Analyzer, FilterConfig, apply_filters};
use chatlens::parsing::{DateFormat, DateOrder};
use chatlens::{Message, Sender, WhatsAppParser};
use chrono::{Month, NaiveDate, Weekday};

// =========================================================================
// Fixtures
// =========================================================================

const SMALL_CHAT: &str = "\
1/1/24, 10:00 - Alice: Hello there
1/1/24, 10:05 - Bob: <Media omitted>
1/1/24, 10:06 - Alice: Check this http://example.com
";

const GROUP_CHAT: &str = "\
Messages and calls are end-to-end encrypted.
12/03/2024, 09:15 - Alice created group \"Weekend\"
12/03/2024, 09:16 - Alice: Pizza tonight? 🍕
12/03/2024, 09:20 - Bob: Yes! pizza pizza
and beer 🍺
12/03/2024, 21:05 - Carol Smith: <Media omitted>
13/03/2024, 23:59 - Bob: see www.pizza.example/menu
14/04/2024, 00:01 - Carol Smith: carol loves pizza 😂😂
14/04/2024, 00:02 - Bob left
";

fn parse(text: &str) -> Vec<Message> {
    WhatsAppParser::new().parse_str(text).unwrap()
}

fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

// =========================================================================
// Parsing
// =========================================================================

#[test]
fn test_small_chat_records() {
    let messages = parse(SMALL_CHAT);

    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].timestamp, ts(2024, 1, 1, 10, 0));
    assert_eq!(messages[0].sender, Sender::user("Alice"));
    assert_eq!(messages[0].body, "Hello there");
    assert_eq!(messages[1].body, "<Media omitted>");
    assert_eq!(messages[2].body, "Check this http://example.com");
}

#[test]
fn test_group_chat_records() {
    let messages = parse(GROUP_CHAT);

    assert_eq!(messages.len(), 7);

    // the encryption notice precedes any boundary and is dropped
    assert!(messages[0].is_system());
    assert_eq!(messages[0].body, "Alice created group \"Weekend\"");

    assert_eq!(messages[2].body, "Yes! pizza pizza\nand beer 🍺");
    assert_eq!(messages[3].sender.name(), Some("Carol Smith"));
    assert_eq!(messages[4].timestamp, ts(2024, 3, 13, 23, 59));
    assert!(messages[6].is_system());
    assert_eq!(messages[6].body, "Bob left");
}

#[test]
fn test_records_keep_source_order() {
    let messages = parse(GROUP_CHAT);
    let sorted = messages.windows(2).all(|w| w[0].timestamp <= w[1].timestamp);
    assert!(sorted);
}

#[test]
fn test_ios_export() {
    let export = "\
[1/15/24, 10:30:45 AM] Alice: Morning
[1/15/24, 1:05:00 PM] Bob: Afternoon
second line
[2/3/24, 9:00:00 PM] Alice: Evening";
    let messages = parse(export);

    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].timestamp, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(10, 30, 45).unwrap());
    assert_eq!(messages[1].timestamp, ts(2024, 1, 15, 13, 5));
    assert_eq!(messages[1].body, "Afternoon\nsecond line");
    // no component above 12 in the last stamp, resolved by the majority
    assert_eq!(messages[2].timestamp, ts(2024, 2, 3, 21, 0));
}

#[test]
fn test_dotted_exports() {
    let bracketed = parse("[15.01.24, 10:30:45] Alice: Hi\n[16.01.24, 08:00:00] Bob: Hey");
    assert_eq!(bracketed.len(), 2);
    assert_eq!(bracketed[1].timestamp, ts(2024, 1, 16, 8, 0));

    let dashed = parse("26.10.2025, 20:40 - Alice: Привет\n26.10.2025, 20:41 - Иван: Здравствуй");
    assert_eq!(dashed.len(), 2);
    assert_eq!(dashed[1].sender.name(), Some("Иван"));
}

#[test]
fn test_fixed_date_order_overrides_votes() {
    let export = "3/4/24, 10:00 - Alice: hi";

    let day_first = WhatsAppParser::with_config(ParserConfig::new().with_date_order(DateOrder::DayFirst));
    assert_eq!(day_first.parse_str(export).unwrap()[0].timestamp, ts(2024, 4, 3, 10, 0));

    let month_first =
        WhatsAppParser::with_config(ParserConfig::new().with_date_order(DateOrder::MonthFirst));
    assert_eq!(month_first.parse_str(export).unwrap()[0].timestamp, ts(2024, 3, 4, 10, 0));
}

#[test]
fn test_fixed_layout_ignores_other_lines() {
    let parser = WhatsAppParser::with_config(ParserConfig::new().with_format(DateFormat::DotDashed));
    let messages = parser.parse_str(SMALL_CHAT).unwrap();
    assert!(messages.is_empty());
}

#[test]
fn test_custom_pattern() {
    let custom = CustomFormat::new(r"(?P<date>\d{4}-\d{2}-\d{2}) (?P<time>\d{2}:\d{2}) \| ")
        .with_datetime_format("%Y-%m-%d %H:%M");
    let parser = WhatsAppParser::with_config(ParserConfig::new().with_custom_format(custom));

    let messages = parser
        .parse_str("2024-05-01 08:00 | Alice: one\n2024-05-01 08:01 | Bob: two\nmore")
        .unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].body, "two\nmore");
}

#[test]
fn test_parse_file_and_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    std::fs::write(&path, format!("\u{feff}{}", SMALL_CHAT.replace('\n', "\r\n"))).unwrap();

    let from_file = WhatsAppParser::new().parse(&path).unwrap();
    assert_eq!(from_file, parse(SMALL_CHAT));

    let err = WhatsAppParser::new().parse(&dir.path().join("missing.txt")).unwrap_err();
    assert!(err.is_io());

    let err = WhatsAppParser::new().parse_bytes(&[0x31, 0xff, 0xfe]).unwrap_err();
    assert!(err.is_decode());
}

// =========================================================================
// Aggregation
// =========================================================================

#[test]
fn test_small_chat_views() {
    let messages = parse(SMALL_CHAT);
    let config = AnalysisConfig::default();
    let analyzer = Analyzer::new(&messages, &config);
    let overall = FilterConfig::new();

    let stats = analyzer.stats(&overall);
    assert_eq!((stats.messages, stats.words, stats.media, stats.links), (3, 4, 1, 1));

    let timeline = analyzer.monthly_timeline(&overall);
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].label, "Jan 2024");
    assert_eq!(timeline[0].count, 3);

    let busy: Vec<(String, usize)> = analyzer
        .most_busy_users(&overall)
        .unwrap()
        .into_iter()
        .map(|u| (u.sender, u.count))
        .collect();
    assert_eq!(busy, vec![("Alice".to_string(), 2), ("Bob".to_string(), 1)]);
}

#[test]
fn test_view_sums_match_filtered_count() {
    let messages = parse(GROUP_CHAT);
    let config = AnalysisConfig::default();
    let analyzer = Analyzer::new(&messages, &config);

    for filter in [
        FilterConfig::new(),
        FilterConfig::for_selection("Bob"),
        FilterConfig::new().with_date_from("2024-04-01").unwrap(),
    ] {
        let expected = analyzer.select(&filter).len();

        let monthly: usize = analyzer.monthly_timeline(&filter).iter().map(|b| b.count).sum();
        let daily: usize = analyzer.daily_timeline(&filter).iter().map(|b| b.count).sum();
        assert_eq!(monthly, expected);
        assert_eq!(daily, expected);
        assert_eq!(analyzer.week_activity(&filter).total(), expected);
        assert_eq!(analyzer.month_activity(&filter).total(), expected);
        assert_eq!(analyzer.activity_heatmap(&filter).total(), expected);
        assert_eq!(analyzer.stats(&filter).messages, expected);
    }
}

#[test]
fn test_group_chat_views() {
    let messages = parse(GROUP_CHAT);
    let config = AnalysisConfig::new().with_stop_words(StopWords::english());
    let analyzer = Analyzer::new(&messages, &config);
    let overall = FilterConfig::new();

    let stats = analyzer.stats(&overall);
    assert_eq!(stats.messages, 7);
    assert_eq!(stats.media, 1);
    assert_eq!(stats.links, 1);

    let timeline = analyzer.monthly_timeline(&overall);
    let labels: Vec<&str> = timeline.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Mar 2024", "Apr 2024"]);

    let week = analyzer.week_activity(&overall);
    // 12/03/2024 is a Tuesday
    assert_eq!(week.get(Weekday::Tue), 4);
    assert_eq!(week.get(Weekday::Sun), 2);

    assert_eq!(analyzer.month_activity(&overall).get(Month::March), 5);
    assert_eq!(analyzer.activity_heatmap(&overall).get(Weekday::Wed, 23), 1);

    let words = analyzer.most_common_words(&overall);
    assert_eq!(words[0].word, "pizza");
    assert_eq!(words[0].count, 4);
    // Carol's own name is not counted in her message
    assert!(words.iter().all(|w| w.word != "carol"));

    let emoji = analyzer.emoji_usage(&overall);
    assert_eq!(emoji[0].emoji, "😂");
    assert_eq!(emoji[0].count, 2);

    let busy = analyzer.most_busy_users(&overall).unwrap();
    assert_eq!(busy[0].sender, "Bob");
    assert_eq!(busy[0].count, 2);
    let total: f64 = busy.iter().map(|u| u.percentage).sum();
    assert!((total - 100.0).abs() < 0.05);

    assert_eq!(analyzer.users(), vec!["Alice", "Bob", "Carol Smith"]);
}

#[test]
fn test_sender_filter_is_case_insensitive() {
    let messages = parse(GROUP_CHAT);
    let config = AnalysisConfig::default();
    let analyzer = Analyzer::new(&messages, &config);

    let carol = FilterConfig::for_selection("carol smith");
    assert_eq!(analyzer.stats(&carol).messages, 2);
    assert!(analyzer.most_busy_users(&carol).is_none());
    assert!(analyzer.select(&carol).iter().all(|m| !m.is_system()));
}

#[test]
fn test_unknown_sender_yields_empty_views() {
    let messages = parse(GROUP_CHAT);
    let config = AnalysisConfig::default();
    let analyzer = Analyzer::new(&messages, &config);
    let nobody = FilterConfig::for_selection("Nobody");

    assert_eq!(analyzer.stats(&nobody).messages, 0);
    assert!(analyzer.monthly_timeline(&nobody).is_empty());
    assert!(analyzer.daily_timeline(&nobody).is_empty());
    assert_eq!(analyzer.week_activity(&nobody).total(), 0);
    assert!(analyzer.most_common_words(&nobody).is_empty());
    assert!(analyzer.emoji_usage(&nobody).is_empty());
    assert!(analyzer.most_busy_users(&nobody).is_none());
}

#[test]
fn test_views_are_idempotent() {
    let messages = parse(GROUP_CHAT);
    let config = AnalysisConfig::default();
    let analyzer = Analyzer::new(&messages, &config);
    let overall = FilterConfig::new();

    assert_eq!(analyzer.report(&overall), analyzer.report(&overall));
    assert_eq!(
        analyzer.most_common_words(&overall),
        analyzer.most_common_words(&overall)
    );
}

#[test]
fn test_stop_words_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stop.txt");
    std::fs::write(&path, "# custom list\nPIZZA\n\nbeer\n").unwrap();

    let stop_words = StopWords::load(&path).unwrap();
    let messages = parse(GROUP_CHAT);
    let config = AnalysisConfig::new().with_stop_words(stop_words);
    let words = Analyzer::new(&messages, &config).most_common_words(&FilterConfig::new());

    assert!(words.iter().all(|w| w.word != "pizza" && w.word != "beer"));

    let missing = StopWords::load_or_empty(&dir.path().join("nope.txt"));
    assert!(missing.is_empty());
}

#[test]
fn test_free_functions_match_analyzer() {
    let messages = parse(GROUP_CHAT);
    let config = AnalysisConfig::default();
    let analyzer = Analyzer::new(&messages, &config);
    let filter = FilterConfig::for_selection("Bob");

    let selected = apply_filters(&messages, &filter);
    assert_eq!(
        chatlens::core::message_stats(&selected, &config),
        analyzer.stats(&filter)
    );
    assert_eq!(chatlens::core::monthly_timeline(&selected), analyzer.monthly_timeline(&filter));
    assert_eq!(chatlens::core::emoji_usage(&selected), analyzer.emoji_usage(&filter));
}
