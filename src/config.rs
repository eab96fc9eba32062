//! Configuration types for parsing and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - how export lines are recognized
//! - [`AnalysisConfig`] - stop words, media placeholders and list sizes
//! - [`StopWords`] - the word list excluded from word frequency
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{AnalysisConfig, ParserConfig, StopWords};
//! use chatlens::parsing::{DateFormat, DateOrder};
//!
//! let parser_config = ParserConfig::new()
//!     .with_format(DateFormat::Android)
//!     .with_date_order(DateOrder::DayFirst);
//!
//! let analysis_config = AnalysisConfig::new()
//!     .with_stop_words(StopWords::from_list("the\nand\n"))
//!     .with_top_words(10);
//!
//! assert_eq!(analysis_config.top_words, 10);
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::message::Message;
use crate::parsing::{DateFormat, DateOrder};

/// Body strings the exporter substitutes for omitted attachments.
pub const DEFAULT_MEDIA_PLACEHOLDERS: &[&str] = &[
    "<Media omitted>",
    "<media omitted>",
    "image omitted",
    "video omitted",
    "audio omitted",
    "sticker omitted",
    "GIF omitted",
    "<attached media>",
];

/// Which boundary pattern the parser uses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatSelection {
    /// Detect the layout from the first lines of the export.
    #[default]
    Auto,
    /// Always use one built-in layout.
    Fixed(DateFormat),
    /// Use a caller-supplied pattern.
    Custom(CustomFormat),
}

/// A caller-supplied boundary pattern.
///
/// `pattern` is a regex anchored at line start with the named groups `date`
/// and `time`. `datetime_formats` are chrono format strings applied to
/// `"{date} {time}"`; when empty, the built-in formats are tried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFormat {
    pub pattern: String,
    #[serde(default)]
    pub datetime_formats: Vec<String>,
}

impl CustomFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            datetime_formats: Vec::new(),
        }
    }

    /// Adds a chrono format string for the captured date and time.
    #[must_use]
    pub fn with_datetime_format(mut self, format: impl Into<String>) -> Self {
        self.datetime_formats.push(format.into());
        self
    }
}

/// Configuration for export parsing.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParserConfig;
/// use chatlens::parsing::DateOrder;
///
/// let config = ParserConfig::new().with_date_order(DateOrder::MonthFirst);
/// assert_eq!(config.date_order, DateOrder::MonthFirst);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Boundary pattern selection (default: auto-detect)
    pub format: FormatSelection,

    /// Day/month order of stamps (default: auto)
    pub date_order: DateOrder,

    /// Number of leading lines used for layout detection (default: 20)
    pub sample_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            format: FormatSelection::Auto,
            date_order: DateOrder::Auto,
            sample_size: 20,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the parser to one built-in layout.
    #[must_use]
    pub fn with_format(mut self, format: DateFormat) -> Self {
        self.format = FormatSelection::Fixed(format);
        self
    }

    /// Uses a caller-supplied boundary pattern.
    #[must_use]
    pub fn with_custom_format(mut self, custom: CustomFormat) -> Self {
        self.format = FormatSelection::Custom(custom);
        self
    }

    /// Sets the day/month order.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Sets how many leading lines are sampled for layout detection.
    #[must_use]
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size.max(1);
        self
    }
}

static ENGLISH_STOP_WORDS: LazyLock<StopWords> =
    LazyLock::new(|| StopWords::from_list(include_str!("../data/stop_words_en.txt")));

/// Words excluded from word frequency.
///
/// Words are stored lowercased; lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a flat list, one word per line.
    ///
    /// Lines are trimmed and lowercased; blank lines and lines starting
    /// with `#` are ignored.
    pub fn from_list(list: &str) -> Self {
        let words = list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();
        Self { words }
    }

    /// Reads a list from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let words = Self::from_list(&content);
        debug!(path = %path.display(), count = words.len(), "loaded stop words");
        Ok(words)
    }

    /// Reads a list from a file, falling back to an empty list when the file
    /// cannot be read.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(words) => words,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "stop word list unavailable, using empty list");
                Self::new()
            }
        }
    }

    /// The built-in English list.
    pub fn english() -> Self {
        ENGLISH_STOP_WORDS.clone()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word) || self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(|w| w.into().to_lowercase()).collect(),
        }
    }
}

/// Configuration for the aggregation views.
///
/// # Example
///
/// ```rust
/// use chatlens::config::AnalysisConfig;
///
/// let config = AnalysisConfig::new().with_top_users(5);
/// assert_eq!(config.top_users, 5);
/// assert_eq!(config.top_words, 20);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Words excluded from word frequency (default: empty)
    pub stop_words: StopWords,

    /// Bodies counted as media messages (default: [`DEFAULT_MEDIA_PLACEHOLDERS`])
    pub media_placeholders: Vec<String>,

    /// Length of the word frequency list (default: 20)
    pub top_words: usize,

    /// Length of the most-busy users list (default: 10)
    pub top_users: usize,

    /// Shortest word, in characters, kept by word frequency (default: 3)
    pub min_word_length: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stop_words: StopWords::new(),
            media_placeholders: DEFAULT_MEDIA_PLACEHOLDERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            top_words: 20,
            top_users: 10,
            min_word_length: 3,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Replaces the media placeholder list.
    #[must_use]
    pub fn with_media_placeholders<I, S>(mut self, placeholders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media_placeholders = placeholders.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    #[must_use]
    pub fn with_top_users(mut self, n: usize) -> Self {
        self.top_users = n;
        self
    }

    #[must_use]
    pub fn with_min_word_length(mut self, len: usize) -> Self {
        self.min_word_length = len;
        self
    }

    /// Returns `true` if the message body is a media placeholder.
    pub fn is_media(&self, msg: &Message) -> bool {
        let body = msg.body.trim();
        self.media_placeholders.iter().any(|p| p == body)
    }
}
