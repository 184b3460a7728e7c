//! Per-message render models: gif embeds, mentions, links, attachments.
//!
//! A message whose whole body is a single link to a gif host is an
//! *embed*: its text is not rendered, only a link to the media. Every other
//! message goes through a fixed pipeline, each stage working on the previous
//! stage's output:
//!
//! 1. HTML-escape the raw text
//! 2. wrap filter matches in `<mark>`
//! 3. replace raw mention tokens (`<@id>`, `<@!id>`) with `@displayName` chips
//! 4. wrap remaining `https://` links in anchors
//!
//! Links are only recognized in text outside inserted markup, and never
//! inside a mention chip.
//!
//! ```
//! use chatstats::core::content::ContentClassifier;
//! use chatstats::core::highlight::Highlighter;
//! use chatstats::config::StatsConfig;
//! use chatstats::{Message, User};
//! use chrono::{TimeZone, Utc};
//!
//! let classifier = ContentClassifier::new(&StatsConfig::default());
//! let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let msg = Message::new(User::new("1", "alice", "Alice"), "https://tenor.com/view/xyz", ts);
//!
//! let view = classifier.render(&msg, &Highlighter::new(""));
//! assert!(view.is_embed);
//! assert_eq!(view.embed_url.as_deref(), Some("https://tenor.com/view/xyz"));
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::config::StatsConfig;
use crate::core::highlight::{HighlightSegment, Highlighter, SegmentKind};
use crate::{Message, User};

/// `https://` + dotted host + optional path. Stops at whitespace, quotes and `<`.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https://([A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+)(?:/[^\s<>"']*)?"#)
        .expect("URL pattern is valid")
});

/// Escaped `<@id>` or `<@!id>`.
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&lt;@!?(\w+)&gt;").expect("mention pattern is valid"));

const MENTION_OPEN: &str = r#"<span class="mention">"#;
const MENTION_CLOSE: &str = "</span>";

/// Render model for one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageView {
    /// Highlight segments of the raw content (empty for embeds).
    pub segments: Vec<HighlightSegment>,

    /// Escaped, highlighted, mention- and link-rewritten markup. For embeds,
    /// a single link to the media.
    pub html: String,

    /// `true` if the message is a gif embed.
    pub is_embed: bool,

    /// The embedded media link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,

    /// Number of attachments, for the badge.
    pub attachment_count: usize,
}

/// Builds [`MessageView`]s with a fixed set of gif hosts.
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    gif_hosts: Vec<String>,
}

impl ContentClassifier {
    /// Creates a classifier using the configured gif hosts.
    pub fn new(config: &StatsConfig) -> Self {
        Self::with_gif_hosts(config.gif_hosts.iter().cloned())
    }

    /// Creates a classifier with an explicit gif host list.
    pub fn with_gif_hosts(hosts: impl IntoIterator<Item = String>) -> Self {
        Self {
            gif_hosts: hosts.into_iter().map(|h| h.to_ascii_lowercase()).collect(),
        }
    }

    /// Returns `true` if `host` is a gif host or a subdomain of one.
    pub fn is_gif_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.gif_hosts.iter().any(|known| {
            host == *known
                || host
                    .strip_suffix(known.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Returns the media link if the whole content is one gif-host link.
    ///
    /// Surrounding whitespace is ignored; any other surrounding text makes
    /// the message a normal text message.
    pub fn detect_embed(&self, content: &str) -> Option<String> {
        let trimmed = content.trim();
        let caps = URL_RE.captures(trimmed)?;
        let whole = caps.get(0)?;
        if whole.start() != 0 || whole.end() != trimmed.len() {
            return None;
        }
        let host = caps.get(1)?.as_str();
        self.is_gif_host(host).then(|| whole.as_str().to_string())
    }

    /// Builds the render model for `message`.
    pub fn render(&self, message: &Message, highlighter: &Highlighter) -> MessageView {
        let attachment_count = message.attachment_count();

        if let Some(url) = self.detect_embed(&message.content) {
            let escaped = escape_html(&url);
            return MessageView {
                segments: Vec::new(),
                html: format!(
                    r#"<a class="embed" href="{escaped}" target="_blank" rel="noreferrer">{escaped}</a>"#
                ),
                is_embed: true,
                embed_url: Some(url),
                attachment_count,
            };
        }

        let segments = highlighter.segments(&message.content);
        let html = render_segments(&segments);
        let html = substitute_mentions(&html, &message.mentions);
        let html = linkify(&html);

        MessageView {
            segments,
            html,
            is_embed: false,
            embed_url: None,
            attachment_count,
        }
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new(&StatsConfig::default())
    }
}

/// Escapes `&`, `<`, `>`, `"` and `'`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes each segment and wraps matches in `<mark>`.
pub fn render_segments(segments: &[HighlightSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment.kind {
            SegmentKind::Plain => out.push_str(&escape_html(&segment.text)),
            SegmentKind::Match => {
                out.push_str("<mark>");
                out.push_str(&escape_html(&segment.text));
                out.push_str("</mark>");
            }
        }
    }
    out
}

/// Replaces escaped mention tokens in `html` with display-name chips.
///
/// Both `<@id>` and the nickname form `<@!id>` are recognized, in their
/// escaped form. Tokens are matched in one pass over `html`, so text from an
/// inserted chip is never scanned again. Tokens with no listed user stay as
/// they are.
pub fn substitute_mentions(html: &str, mentions: &[User]) -> String {
    if mentions.is_empty() {
        return html.to_string();
    }

    let mut chips: HashMap<String, String> = HashMap::with_capacity(mentions.len());
    for user in mentions {
        chips.entry(escape_html(&user.id)).or_insert_with(|| {
            format!(
                "{MENTION_OPEN}@{}{MENTION_CLOSE}",
                escape_html(&user.display_name)
            )
        });
    }

    MENTION_RE
        .replace_all(html, |caps: &Captures<'_>| match chips.get(&caps[1]) {
            Some(chip) => chip.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Wraps `https://` links found in text nodes of `html` in anchors.
///
/// Tags are copied through untouched, and text inside mention chips is not
/// scanned.
pub fn linkify(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    // open spans since the outermost chip started; 0 outside chips
    let mut chip_depth = 0usize;

    while !rest.is_empty() {
        match rest.find('<') {
            Some(0) => {
                let end = rest.find('>').map_or(rest.len(), |i| i + 1);
                let tag = &rest[..end];
                if chip_depth == 0 {
                    if tag.starts_with(MENTION_OPEN) {
                        chip_depth = 1;
                    }
                } else if tag.starts_with("<span") {
                    chip_depth += 1;
                } else if tag == MENTION_CLOSE {
                    chip_depth -= 1;
                }
                out.push_str(tag);
                rest = &rest[end..];
            }
            next => {
                let end = next.unwrap_or(rest.len());
                let text = &rest[..end];
                if chip_depth > 0 {
                    out.push_str(text);
                } else {
                    out.push_str(&linkify_text(text));
                }
                rest = &rest[end..];
            }
        }
    }

    out
}

/// Escaped forms of characters that end a link.
const LINK_STOP_ENTITIES: [&str; 4] = ["&quot;", "&#39;", "&lt;", "&gt;"];

fn linkify_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while let Some(m) = URL_RE.find_at(text, cursor) {
        let candidate = m.as_str();
        let len = LINK_STOP_ENTITIES
            .iter()
            .filter_map(|entity| candidate.find(entity))
            .min()
            .unwrap_or(candidate.len());
        let url = &candidate[..len];

        out.push_str(&text[cursor..m.start()]);
        out.push_str(&format!(
            r#"<a href="{url}" target="_blank" rel="noreferrer">{url}</a>"#
        ));
        // rescan the cut-off tail
        cursor = m.start() + len;
    }

    out.push_str(&text[cursor..]);
    out
}
