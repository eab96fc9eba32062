//! Top-level message statistics.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::config::AnalysisConfig;

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>"']+"#).expect("URL pattern is valid")
});

/// Returns every URL-like substring of `text`, sentence punctuation trimmed.
pub fn find_links(text: &str) -> impl Iterator<Item = &str> {
    URL_REGEX.find_iter(text).map(|m| trim_link(m.as_str()))
}

/// Strips trailing `.,;:!?` and any `)` without an opening partner.
fn trim_link(link: &str) -> &str {
    let mut end = link.len();
    loop {
        let head = &link[..end];
        match head.chars().next_back() {
            Some('.' | ',' | ';' | ':' | '!' | '?') => end -= 1,
            Some(')') if head.matches(')').count() > head.matches('(').count() => end -= 1,
            _ => return head,
        }
    }
}

/// Returns `true` if a whitespace-delimited token contains a URL.
pub fn is_link(token: &str) -> bool {
    URL_REGEX.is_match(token)
}

/// Headline numbers for a set of messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageStats {
    /// Number of records, system records included.
    pub messages: usize,
    /// Whitespace-separated tokens of user text, links excluded.
    pub words: usize,
    /// Records whose body is a media placeholder.
    pub media: usize,
    /// URLs found across all bodies.
    pub links: usize,
}

/// Computes [`MessageStats`] over the given records.
///
/// Words are counted only for user messages that are not media
/// placeholders; links are counted in every body.
pub fn message_stats(messages: &[&Message], config: &AnalysisConfig) -> MessageStats {
    let mut stats = MessageStats {
        messages: messages.len(),
        ..MessageStats::default()
    };

    for msg in messages {
        stats.links += find_links(&msg.body).count();

        if config.is_media(msg) {
            stats.media += 1;
            continue;
        }
        if msg.is_system() {
            continue;
        }

        stats.words += msg
            .body
            .split_whitespace()
            .filter(|token| !is_link(token))
            .count();
    }

    stats
}
