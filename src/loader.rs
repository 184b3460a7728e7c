//! Loading message exports into memory.
//!
//! The whole document is parsed before any computation starts. A load either
//! yields every message or fails; there is no partial or best-effort result.
//!
//! # Example
//!
//! ```rust
//! use chatstats::loader::parse_messages;
//!
//! # fn main() -> chatstats::Result<()> {
//! let json = r#"[
//!   {"content": "hello", "timestamp": "2024-01-15T10:30:00Z",
//!    "author": {"id": "1", "username": "alice", "global_name": "Alice"}}
//! ]"#;
//!
//! let messages = parse_messages(json)?;
//! assert_eq!(messages.len(), 1);
//! assert_eq!(messages[0].author.display_name, "Alice");
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::Message;
use crate::error::ChatstatsError;
use crate::parsing::{RawMessage, convert_raw_message};

const FORMAT: &str = "message export";

/// Reads and parses a message export file.
///
/// # Errors
///
/// Returns [`ChatstatsError`] if:
/// - The file cannot be read ([`ChatstatsError::Io`])
/// - The content is not valid JSON or a record doesn't match the schema
///   ([`ChatstatsError::Parse`], carrying the path)
/// - The top-level value is not an array ([`ChatstatsError::InvalidFormat`])
/// - A timestamp cannot be parsed ([`ChatstatsError::InvalidTimestamp`])
pub fn load_messages(path: &Path) -> Result<Vec<Message>, ChatstatsError> {
    let content = fs::read_to_string(path)?;
    match parse_messages(&content) {
        Err(ChatstatsError::Parse { format, source, .. }) => Err(ChatstatsError::Parse {
            format,
            source,
            path: Some(path.to_path_buf()),
        }),
        other => other,
    }
}

/// Parses a message export from a string.
///
/// Useful for inline data and for hosts without file system access.
pub fn parse_messages(content: &str) -> Result<Vec<Message>, ChatstatsError> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| ChatstatsError::export_parse(e, None))?;

    let Value::Array(records) = document else {
        return Err(ChatstatsError::invalid_format(
            FORMAT,
            format!("expected a top-level array, found {}", value_kind(&document)),
        ));
    };

    let mut messages = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let raw: RawMessage =
            serde_json::from_value(record).map_err(|e| ChatstatsError::export_parse(e, None))?;
        messages.push(convert_raw_message(index, raw)?);
    }

    debug!(count = messages.len(), "loaded message export");
    Ok(messages)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
