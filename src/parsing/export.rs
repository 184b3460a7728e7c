//! Raw export records and their conversion into [`Message`].
//!
//! The export is a Discord-style array of message objects:
//!
//! ```json
//! [
//!   {
//!     "content": "hey <@2>",
//!     "timestamp": "2024-01-15T10:30:00.000000+00:00",
//!     "author": {"id": "1", "username": "alice", "global_name": "Alice"},
//!     "attachments": [],
//!     "mentions": [{"id": "2", "username": "bob", "global_name": "Bob"}]
//!   }
//! ]
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::ChatstatsError;
use crate::message::{Message, User};

/// Raw message structure for deserialization.
#[derive(Debug, Deserialize)]
pub struct RawMessage {
    pub content: String,
    pub timestamp: String,
    pub author: RawUser,
    pub attachments: Option<Vec<String>>,
    pub mentions: Option<Vec<RawUser>>,
}

/// Raw user structure.
///
/// `global_name` is `null` for accounts that never set one.
#[derive(Debug, Deserialize)]
pub struct RawUser {
    pub id: String,
    pub username: String,
    #[serde(alias = "display_name")]
    pub global_name: Option<String>,
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        // Fall back to the handle when no display name was set
        let display_name = raw
            .global_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| raw.username.clone());
        User::new(raw.id, raw.username, display_name)
    }
}

/// Converts a raw record into a [`Message`].
///
/// `index` is the record's position in the export, used for error reporting.
/// Missing `attachments` / `mentions` become empty sequences.
pub fn convert_raw_message(index: usize, raw: RawMessage) -> Result<Message, ChatstatsError> {
    let timestamp = parse_timestamp(&raw.timestamp)
        .ok_or_else(|| ChatstatsError::invalid_timestamp(index, raw.timestamp.as_str()))?;

    Ok(Message {
        content: raw.content,
        timestamp,
        author: raw.author.into(),
        attachments: raw.attachments.unwrap_or_default(),
        mentions: raw
            .mentions
            .unwrap_or_default()
            .into_iter()
            .map(User::from)
            .collect(),
    })
}

/// Parses an ISO-8601 timestamp into UTC.
///
/// Accepts, in order:
/// - RFC 3339 with offset (`2024-01-15T10:30:00+00:00`, `2024-01-15T10:30:00Z`)
/// - naive date-time, read as UTC (`2024-01-15T10:30:00`, `2024-01-15 10:30:00.123`)
/// - bare date, read as UTC midnight (`2024-01-15`)
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.to_utc());
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
