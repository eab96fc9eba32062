//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers every
//! failure the library can report. Most conditions in chat analysis are not
//! errors at all: an export without recognizable lines parses to an empty
//! record set, and an unknown sender filter produces empty views. What is
//! left is input rejection (I/O, undecodable bytes), invalid configuration
//! (a bad boundary pattern, a bad filter date) and writer failures.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The export file doesn't exist
    /// - Permission denied
    /// - The output file cannot be created
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input bytes are not valid UTF-8.
    ///
    /// Exports are rejected as a whole; there is no lossy fallback.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::str::Utf8Error,
    },

    /// A format description is invalid.
    ///
    /// This occurs when:
    /// - A custom boundary pattern fails to compile
    /// - A custom boundary pattern lacks the `date` or `time` group
    /// - An output path has an unknown extension
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was being configured
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date in a filter configuration.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: "output conversion".to_string(),
            source: err.utf8_error(),
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a decode error for raw input bytes.
    pub fn decode(context: impl Into<String>, source: std::str::Utf8Error) -> Self {
        ChatlensError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid pattern error for a custom boundary regex.
    pub fn invalid_pattern(pattern: &str, reason: impl std::fmt::Display) -> Self {
        ChatlensError::InvalidFormat {
            format: "boundary pattern",
            message: format!("'{pattern}': {reason}"),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if the input could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, ChatlensError::Utf8 { .. })
    }

    /// Returns `true` if this is a format configuration error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatlensError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date parsing error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }
}
