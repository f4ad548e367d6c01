//! Stream Event Parser (C1, §4.1).
//!
//! Converts a worker's stdout/stderr lines, one newline-delimited JSON
//! record at a time, into the typed [`conductor_protocol::stream_event::StreamEvent`]
//! union the rest of the system consumes. Never aborts ingestion: a
//! malformed or unrecognized line degrades to a `System { subtype: "raw" }`
//! event rather than an error.

pub mod content;
pub mod line;
pub mod truncate;

pub use line::parse_line;
