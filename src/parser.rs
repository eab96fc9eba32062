//! WhatsApp TXT export parser.
//!
//! Exports vary by platform and locale. Unless configured otherwise, the
//! parser auto-detects the layout by analyzing the first 20 lines.
//!
//! Supported layouts:
//! - Android: `1/15/24, 10:30 - Sender: Message` (12h or 24h clock)
//! - iOS: `[1/15/24, 10:30:45 AM] Sender: Message`
//! - Dotted: `[15.01.24, 10:30:45] Sender: Message`
//! - Dotted, dashed: `15.01.2024, 10:30 - Sender: Message`
//! - Any caller-supplied pattern, see [`CustomFormat`](crate::config::CustomFormat)
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::WhatsAppParser;
//!
//! let export = "\
//! 1/1/24, 10:00 - Alice: Hello there
//! 1/1/24, 10:05 - Bob: <Media omitted>
//! 1/1/24, 10:06 - Alice: Check this http://example.com";
//!
//! let messages = WhatsAppParser::new().parse_str(export)?;
//! assert_eq!(messages.len(), 3);
//! assert_eq!(messages[0].body, "Hello there");
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::Message;
use crate::config::{FormatSelection, ParserConfig};
use crate::error::{ChatlensError, Result};
use crate::parsing::{
    Boundary, DateOrder, OrderVotes, best_format, detect_whatsapp_format, normalize_export,
    score_whatsapp_formats, split_sender,
};

/// Parser for WhatsApp TXT exports.
pub struct WhatsAppParser {
    config: ParserConfig,
}

impl WhatsAppParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads and parses an export file.
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let bytes = fs::read(path)?;
        self.parse_bytes(&bytes)
    }

    /// Decodes raw bytes as UTF-8 and parses them.
    ///
    /// Undecodable input is rejected with [`ChatlensError::Utf8`].
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Vec<Message>> {
        let content =
            std::str::from_utf8(bytes).map_err(|e| ChatlensError::decode("chat export", e))?;
        self.parse_str(content)
    }

    /// Parses export text into records.
    ///
    /// Text without any recognizable message line yields an empty vector.
    /// The only error is an invalid custom boundary pattern.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        let content = normalize_export(content);
        let lines: Vec<&str> = content.lines().collect();

        if lines.iter().all(|line| line.trim().is_empty()) {
            debug!("empty export");
            return Ok(vec![]);
        }

        // Step 1: Resolve the boundary pattern
        let Some(boundary) = self.resolve_boundary(&lines)? else {
            info!(lines = lines.len(), "no message lines recognized");
            return Ok(vec![]);
        };

        // Step 2: Resolve day/month order from all stamps
        let order = match self.config.date_order {
            DateOrder::Auto => {
                let mut votes = OrderVotes::default();
                for stamp in lines.iter().filter_map(|line| boundary.match_line(line)) {
                    votes.observe(stamp.date);
                }
                boundary.resolve_order(DateOrder::Auto, votes)
            }
            fixed => fixed,
        };
        debug!(?order, "date order resolved");

        // Step 3: Single pass, appending continuation lines to the open record
        let mut messages: Vec<Message> = Vec::new();
        let mut discarded = 0usize;

        for line in &lines {
            let opened = boundary.match_line(line).and_then(|stamp| {
                boundary
                    .parse_timestamp(&stamp, order)
                    .map(|timestamp| (timestamp, &line[stamp.end..]))
            });

            if let Some((timestamp, rest)) = opened {
                let (sender, body) = split_sender(rest);
                messages.push(Message {
                    timestamp,
                    sender,
                    body: body.to_string(),
                });
            } else if let Some(open) = messages.last_mut() {
                open.body.push('\n');
                open.body.push_str(line);
            } else if !line.trim().is_empty() {
                discarded += 1;
            }
        }

        for msg in &mut messages {
            let trimmed_len = msg.body.trim_end().len();
            msg.body.truncate(trimmed_len);
        }

        if discarded > 0 {
            debug!(discarded, "dropped lines before the first message");
        }
        info!(messages = messages.len(), "parsed export");

        Ok(messages)
    }

    fn resolve_boundary(&self, lines: &[&str]) -> Result<Option<Boundary>> {
        match &self.config.format {
            FormatSelection::Fixed(format) => Ok(Some(Boundary::builtin(*format))),
            FormatSelection::Custom(custom) => {
                Boundary::custom(&custom.pattern, &custom.datetime_formats).map(Some)
            }
            FormatSelection::Auto => {
                let sample_size = std::cmp::min(self.config.sample_size, lines.len());
                let sample = score_whatsapp_formats(&lines[..sample_size]);
                let matched = sample.iter().filter(|&&(_, score)| score > 0).count();

                // quoted stamps of another layout make the sample ambiguous
                let detected = if matched == 1 {
                    best_format(&sample)
                } else {
                    debug!(matched, "sample inconclusive, scoring every line");
                    detect_whatsapp_format(lines)
                };

                if let Some(format) = detected {
                    debug!(%format, "detected export layout");
                }
                Ok(detected.map(Boundary::builtin))
            }
        }
    }
}

impl Default for WhatsAppParser {
    fn default() -> Self {
        Self::new()
    }
}
