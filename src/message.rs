//! Message and user types for loaded message logs.
//!
//! A [`Message`] is immutable once loaded: filtering, aggregation and
//! rendering only ever borrow it. Authors and mentioned users are stored by
//! value as [`User`], and identity is by [`User::id`], so two messages from
//! the same person carry equal (but distinct) `User` values.
//!
//! # Examples
//!
//! ```
//! use chatstats::{Message, User};
//! use chrono::{TimeZone, Utc};
//!
//! let alice = User::new("1", "alice", "Alice");
//! let msg = Message::new(alice, "Hello, world!", Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap())
//!     .with_attachment("https://cdn.example.com/cat.png");
//!
//! assert_eq!(msg.author().username(), "alice");
//! assert_eq!(msg.attachment_count(), 1);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A participant in a message log.
///
/// | Field | Export key | Description |
/// |-------|------------|-------------|
/// | `id` | `id` | Stable unique identifier |
/// | `username` | `username` | Account handle, used as the chart series key |
/// | `display_name` | `global_name` | Human-facing name, used for mention chips |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// Stable unique identifier.
    pub id: String,

    /// Account handle.
    pub username: String,

    /// Human-facing name.
    pub display_name: String,
}

impl User {
    /// Creates a new user.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            display_name: display_name.into(),
        }
    }

    /// Returns the user id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// A single message from a loaded log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Raw text content of the message. May contain raw mention tokens
    /// like `<@123>` and bare links.
    pub content: String,

    /// When the message was sent.
    pub timestamp: DateTime<Utc>,

    /// Author of the message.
    pub author: User,

    /// Attachment URLs.
    #[serde(default)]
    pub attachments: Vec<String>,

    /// Users mentioned in the message.
    #[serde(default)]
    pub mentions: Vec<User>,
}

impl Message {
    /// Creates a message with no attachments and no mentions.
    pub fn new(author: User, content: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            timestamp,
            author,
            attachments: Vec::new(),
            mentions: Vec::new(),
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to add an attachment URL.
    #[must_use]
    pub fn with_attachment(mut self, url: impl Into<String>) -> Self {
        self.attachments.push(url.into());
        self
    }

    /// Builder method to add a mentioned user.
    #[must_use]
    pub fn with_mention(mut self, user: User) -> Self {
        self.mentions.push(user);
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the author.
    pub fn author(&self) -> &User {
        &self.author
    }

    /// Returns the attachment URLs.
    pub fn attachments(&self) -> &[String] {
        &self.attachments
    }

    /// Returns the mentioned users.
    pub fn mentions(&self) -> &[User] {
        &self.mentions
    }

    /// Returns the number of attachments.
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    /// Returns `true` if this message has at least one attachment.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}
