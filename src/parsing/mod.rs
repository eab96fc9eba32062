//! Shared parsing utilities.
//!
//! Layout detection, timestamp parsing and text normalization used by
//! [`WhatsAppParser`](crate::parser::WhatsAppParser).

pub mod whatsapp;

pub use whatsapp::{
    Boundary, DateFormat, DateOrder, OrderVotes, Stamp, best_format, detect_whatsapp_format,
    is_notification, normalize_export, parse_whatsapp_timestamp, score_whatsapp_formats,
    split_sender,
};
