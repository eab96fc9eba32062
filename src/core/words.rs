//! Word frequency.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::counter::OrderedCounter;
use super::stats::is_link;
use crate::Message;
use crate::config::AnalysisConfig;

/// One word and how often it appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Splits `text` into lowercase words.
///
/// Whitespace tokens that contain a URL are skipped; the rest are split into
/// maximal runs of alphabetic characters.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .filter(|token| !is_link(token))
        .flat_map(|token| token.split(|c: char| !c.is_alphabetic()))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

/// Most frequent words in user messages.
///
/// System records and media placeholders are skipped. Words shorter than
/// `min_word_length`, stop words and the words of the sender's own name are
/// dropped. Returns at most `top_words` entries.
pub fn most_common_words(messages: &[&Message], config: &AnalysisConfig) -> Vec<WordCount> {
    let mut own_names: HashMap<&str, HashSet<String>> = HashMap::new();
    let mut counter = OrderedCounter::new();

    for msg in messages {
        let Some(name) = msg.sender.name() else {
            continue;
        };
        if config.is_media(msg) {
            continue;
        }

        let name_words = own_names
            .entry(name)
            .or_insert_with(|| tokenize(name).collect());

        counter.extend(tokenize(&msg.body).filter(|word| {
            word.chars().count() >= config.min_word_length
                && !config.stop_words.contains(word)
                && !name_words.contains(word)
        }));
    }

    counter
        .most_common(Some(config.top_words))
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect()
}
