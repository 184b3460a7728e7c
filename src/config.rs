//! Configuration for the statistics engine.
//!
//! [`StatsConfig`] holds the tunables the aggregators, the paginator and the
//! content classifier read. It is a plain serde struct with builder methods,
//! so it can be created in code or loaded from a JSON file.
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::StatsConfig;
//!
//! let config = StatsConfig::new()
//!     .with_page_size(25)
//!     .with_other_threshold(0.1)
//!     .with_gif_host("gfycat.com");
//!
//! assert_eq!(config.page_size, 25);
//! assert!(config.validate().is_ok());
//! ```
//!
//! A config file only needs the keys it overrides:
//!
//! ```json
//! { "page_size": 100, "gif_hosts": ["tenor.com"] }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChatstatsError;

/// Default number of messages per feed page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Default share below which an author is folded into "Other".
pub const DEFAULT_OTHER_THRESHOLD: f64 = 0.05;

/// Default number of chart color slots.
pub const DEFAULT_PALETTE_SIZE: usize = 8;

/// Gif hosts recognized by default. Subdomains match too.
pub const DEFAULT_GIF_HOSTS: &[&str] = &["tenor.com", "giphy.com"];

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Messages per feed page (default: 50)
    pub page_size: usize,

    /// Authors whose share of a total is strictly below this fraction are
    /// folded into "Other" (default: 0.05)
    pub other_threshold: f64,

    /// Hosts whose links are rendered as gif embeds (default: tenor, giphy)
    pub gif_hosts: Vec<String>,

    /// Number of distinct chart colors before they repeat (default: 8)
    pub palette_size: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            other_threshold: DEFAULT_OTHER_THRESHOLD,
            gif_hosts: DEFAULT_GIF_HOSTS.iter().map(|h| (*h).to_string()).collect(),
            palette_size: DEFAULT_PALETTE_SIZE,
        }
    }
}

impl StatsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file and validates it.
    pub fn from_json_file(path: &Path) -> Result<Self, ChatstatsError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ChatstatsError::config_parse(e, Some(path.to_path_buf())))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from a JSON string and validates it.
    pub fn from_json_str(content: &str) -> Result<Self, ChatstatsError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| ChatstatsError::config_parse(e, None))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::Config`] when `page_size` or `palette_size`
    /// is zero, `other_threshold` is outside `0.0..=1.0`, or a gif host is blank.
    pub fn validate(&self) -> Result<(), ChatstatsError> {
        if self.page_size == 0 {
            return Err(ChatstatsError::config("page_size must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.other_threshold) {
            return Err(ChatstatsError::config(format!(
                "other_threshold must be between 0 and 1, got {}",
                self.other_threshold
            )));
        }
        if self.palette_size == 0 {
            return Err(ChatstatsError::config("palette_size must be at least 1"));
        }
        if self.gif_hosts.iter().any(|h| h.trim().is_empty()) {
            return Err(ChatstatsError::config("gif_hosts must not contain blank entries"));
        }
        Ok(())
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the "Other" threshold.
    #[must_use]
    pub fn with_other_threshold(mut self, threshold: f64) -> Self {
        self.other_threshold = threshold;
        self
    }

    /// Adds a gif host.
    #[must_use]
    pub fn with_gif_host(mut self, host: impl Into<String>) -> Self {
        self.gif_hosts.push(host.into());
        self
    }

    /// Replaces the gif host list.
    #[must_use]
    pub fn with_gif_hosts(mut self, hosts: Vec<String>) -> Self {
        self.gif_hosts = hosts;
        self
    }

    /// Sets the palette size.
    #[must_use]
    pub fn with_palette_size(mut self, size: usize) -> Self {
        self.palette_size = size;
        self
    }
}
