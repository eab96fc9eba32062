//! # chatlens CLI
//!
//! Command-line front end for the chatlens library.

use std::fmt::{self, Write as _};
use std::fs;
use std::io;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::{info, warn};

use chatlens::cli::{Args, ReportFormat};
use chatlens::core::activity::{WEEKDAYS, weekday_name};
use chatlens::core::output::report_to_json;
use chatlens::core::{ActivityHeatmap, Analyzer, Report, user_list};
use chatlens::format::write_to_format;
use chatlens::logging::setup_logging;
use chatlens::{ChatlensError, WhatsAppParser};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

fn main() {
    let args = <Args as ClapParser>::parse();
    setup_logging(&args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    // validate filters before touching the input
    let filter = args.filter_config()?;
    let export = args.export_target()?;

    let parse_start = Instant::now();
    let parser = WhatsAppParser::with_config(args.parser_config());
    let messages = parser.parse(Path::new(&args.input))?;
    info!(
        input = %args.input,
        messages = messages.len(),
        elapsed_ms = parse_start.elapsed().as_millis() as u64,
        "loaded export"
    );

    if args.list_users {
        for user in user_list(&messages) {
            println!("{user}");
        }
        return Ok(());
    }

    if messages.is_empty() {
        warn!(input = %args.input, "no messages recognized");
        eprintln!("⚠️  No messages found in {}", args.input);
    }

    if let Some((path, format)) = export {
        write_to_format(&messages, path, format, &args.output_config())?;
        eprintln!("💾 Exported {} records to {} ({})", messages.len(), path, format);
    }

    let config = args.analysis_config();
    let report = Analyzer::new(&messages, &config).report(&filter);

    let rendered = match args.format {
        ReportFormat::Text => {
            render_text(&report).map_err(|e| ChatlensError::Io(io::Error::other(e)))?
        }
        ReportFormat::Json => report_to_json(&report)? + "\n",
    };

    match args.output {
        Some(ref path) => {
            fs::write(path, rendered)?;
            eprintln!("✅ Report saved to {}", path);
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

fn render_text(report: &Report) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let stats = &report.stats;

    writeln!(out, "📊 chatlens v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "👤 User:      {}", report.selection)?;
    if let (Some(first), Some(last)) = (report.first_message, report.last_message) {
        writeln!(
            out,
            "📅 Range:     {} → {}",
            first.format("%Y-%m-%d %H:%M"),
            last.format("%Y-%m-%d %H:%M")
        )?;
    }
    writeln!(out, "💬 Messages:  {}", stats.messages)?;
    writeln!(out, "📝 Words:     {}", stats.words)?;
    writeln!(out, "🖼️  Media:     {}", stats.media)?;
    writeln!(out, "🔗 Links:     {}", stats.links)?;

    if report.is_empty() {
        return Ok(out);
    }

    section(&mut out, "📈 Monthly timeline")?;
    for bucket in &report.monthly_timeline {
        writeln!(out, "   {:<10} {:>6}", bucket.label, bucket.count)?;
    }

    section(&mut out, "📆 Daily timeline")?;
    for bucket in &report.daily_timeline {
        writeln!(out, "   {:<10} {:>6}", bucket.date.to_string(), bucket.count)?;
    }

    section(&mut out, "🗓️  Week activity")?;
    for (day, count) in report.week_activity.iter() {
        writeln!(out, "   {:<10} {:>6}", weekday_name(day), count)?;
    }

    section(&mut out, "🗓️  Month activity")?;
    for (month, count) in report.month_activity.iter() {
        writeln!(out, "   {:<10} {:>6}", month.name(), count)?;
    }

    section(&mut out, "🔥 Activity heatmap")?;
    render_heatmap(&mut out, &report.activity_heatmap)?;

    if let Some(ref users) = report.most_busy_users {
        section(&mut out, "👥 Most busy users")?;
        for user in users {
            writeln!(
                out,
                "   {:<20} {:>6} {:>7.2}%",
                user.sender, user.count, user.percentage
            )?;
        }
    }

    section(&mut out, "🔤 Most common words")?;
    if report.most_common_words.is_empty() {
        writeln!(out, "   (none)")?;
    }
    for entry in &report.most_common_words {
        writeln!(out, "   {:<20} {:>6}", entry.word, entry.count)?;
    }

    section(&mut out, "😀 Emoji")?;
    if report.emoji_usage.is_empty() {
        writeln!(out, "   (none)")?;
    }
    for entry in &report.emoji_usage {
        writeln!(out, "   {}  {:>6}", entry.emoji, entry.count)?;
    }

    Ok(out)
}

fn section(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{title}")
}

fn render_heatmap(out: &mut String, heatmap: &ActivityHeatmap) -> fmt::Result {
    write!(out, "      ")?;
    for hour in 0..24 {
        write!(out, "{hour:>4}")?;
    }
    writeln!(out)?;

    for day in WEEKDAYS {
        write!(out, "   {}", &weekday_name(day)[..3])?;
        for count in heatmap.row(day) {
            write!(out, "{count:>4}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlens::config::AnalysisConfig;
    use chatlens::core::FilterConfig;

    fn report_for(text: &str) -> Report {
        let messages = WhatsAppParser::new().parse_str(text).unwrap();
        let config = AnalysisConfig::default();
        Analyzer::new(&messages, &config).report(&FilterConfig::new())
    }

    #[test]
    fn test_render_text_empty_report() {
        let text = render_text(&report_for("")).unwrap();
        assert!(text.contains("Messages:  0"));
        assert!(!text.contains("Activity heatmap"));
    }

    #[test]
    fn test_render_text_sections() {
        let text = render_text(&report_for(
            "1/1/24, 10:00 - Alice: hello there 🎉\n1/2/24, 11:00 - Bob: hello",
        ))
        .unwrap();
        assert!(text.contains("Messages:  2"));
        assert!(text.contains("Activity heatmap"));
        assert!(text.contains("   Mon"));
        assert!(text.contains("Most busy users"));
        assert!(text.contains("🎉"));
        assert!(text.ends_with('\n'));
    }
}
