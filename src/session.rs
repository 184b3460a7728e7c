//! Session state with derived views kept in sync.
//!
//! A [`StatsSession`] owns the loaded messages and the filter settings, and
//! holds every derived view model: the filtered feed, the stacked monthly
//! series, the monthly totals and the author distribution. Views are
//! recomputed from scratch whenever the messages or the applied settings
//! change, and every recompute resets the feed to page 1.
//!
//! When [`FilterSettings::auto_apply`] is off, setting changes are held as
//! pending until [`StatsSession::apply`] is called.
//!
//! ```
//! use chatstats::session::StatsSession;
//! use chatstats::config::StatsConfig;
//! use chatstats::core::FilterSettings;
//! use chatstats::{Message, User};
//! use chrono::{TimeZone, Utc};
//!
//! # fn main() -> chatstats::Result<()> {
//! let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let alice = User::new("1", "alice", "Alice");
//! let messages = vec![
//!     Message::new(alice.clone(), "cats", ts),
//!     Message::new(alice, "dogs", ts),
//! ];
//!
//! let mut session = StatsSession::new(messages, FilterSettings::new(), StatsConfig::new())?;
//! session.set_text_filter("cat");
//! assert_eq!(session.filtered_count(), 2); // not applied yet
//! session.apply();
//! assert_eq!(session.filtered_count(), 1);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use tracing::debug;

use crate::config::StatsConfig;
use crate::core::colors::ColorRegistry;
use crate::core::content::{ContentClassifier, MessageView};
use crate::core::distribution::{DistributionSlice, build_distribution};
use crate::core::filter::{FilterSettings, filter_indices};
use crate::core::highlight::Highlighter;
use crate::core::pagination::{PageWindow, last_page};
use crate::core::timeseries::{
    ChartSeriesPoint, MonthTotal, build_monthly_totals, build_time_series, describe_range,
};
use crate::error::Result;
use crate::loader::load_messages;
use crate::report::{FeedItem, LegendEntry, PageReport, Report, Summary};
use crate::Message;

/// Messages, filter settings and their derived views.
#[derive(Debug, Clone)]
pub struct StatsSession {
    config: StatsConfig,
    messages: Vec<Message>,
    /// Settings as currently edited.
    settings: FilterSettings,
    /// Settings the views were computed with.
    applied: FilterSettings,
    dirty: bool,

    filtered: Vec<usize>,
    page: usize,
    time_series: Vec<ChartSeriesPoint>,
    monthly_totals: Vec<MonthTotal>,
    distribution: Vec<DistributionSlice>,

    highlighter: Highlighter,
    classifier: ContentClassifier,
    colors: ColorRegistry,
}

impl StatsSession {
    /// Creates a session and computes its views.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::Config`](crate::ChatstatsError::Config) if
    /// `config` fails validation.
    pub fn new(
        messages: Vec<Message>,
        settings: FilterSettings,
        config: StatsConfig,
    ) -> Result<Self> {
        config.validate()?;

        let mut session = Self {
            classifier: ContentClassifier::new(&config),
            colors: ColorRegistry::new(config.palette_size),
            highlighter: Highlighter::new(""),
            config,
            messages,
            applied: settings.clone(),
            settings,
            dirty: false,
            filtered: Vec::new(),
            page: 1,
            time_series: Vec::new(),
            monthly_totals: Vec::new(),
            distribution: Vec::new(),
        };
        session.recompute();
        Ok(session)
    }

    /// Creates a session from an export file.
    pub fn from_file(path: &Path, settings: FilterSettings, config: StatsConfig) -> Result<Self> {
        Self::new(load_messages(path)?, settings, config)
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Replaces the loaded messages and recomputes.
    pub fn replace_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
        self.recompute();
    }

    /// Loads a new export file, replacing the current messages.
    ///
    /// On error the session is left unchanged.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let messages = load_messages(path)?;
        self.replace_messages(messages);
        Ok(())
    }

    /// Sets the text query.
    pub fn set_text_filter(&mut self, text: impl Into<String>) {
        self.settings.text_filter = text.into();
        self.settings_changed();
    }

    /// Sets case sensitivity.
    pub fn set_case_sensitive(&mut self, enabled: bool) {
        self.settings.case_sensitive = enabled;
        self.settings_changed();
    }

    /// Sets auto-apply. Enabling it applies any pending change.
    pub fn set_auto_apply(&mut self, enabled: bool) {
        self.settings.auto_apply = enabled;
        self.settings_changed();
    }

    /// Replaces all settings at once.
    pub fn set_settings(&mut self, settings: FilterSettings) {
        self.settings = settings;
        self.settings_changed();
    }

    /// Applies pending settings and recomputes.
    pub fn apply(&mut self) {
        self.applied = self.settings.clone();
        self.recompute();
    }

    fn settings_changed(&mut self) {
        if self.settings.auto_apply {
            self.apply();
        } else {
            self.dirty = !self.settings.same_query(&self.applied);
        }
    }

    fn recompute(&mut self) {
        self.filtered = filter_indices(&self.messages, &self.applied);

        let threshold = self.config.other_threshold;
        let filtered: Vec<&Message> = self.filtered.iter().map(|&i| &self.messages[i]).collect();
        let time_series = build_time_series(filtered.iter().copied(), threshold);
        let monthly_totals = build_monthly_totals(filtered.iter().copied());
        let distribution = build_distribution(filtered.iter().copied(), threshold);

        for point in &time_series {
            for key in point.values.keys() {
                self.colors.color_for(key);
            }
        }
        for slice in &distribution {
            self.colors.color_for(&slice.label);
        }

        debug!(
            total = self.messages.len(),
            filtered = self.filtered.len(),
            months = time_series.len(),
            "recomputed views"
        );

        self.time_series = time_series;
        self.monthly_totals = monthly_totals;
        self.distribution = distribution;
        self.highlighter = Highlighter::new(&self.applied.text_filter);
        self.dirty = false;
        self.page = 1;
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Returns the current page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the last page, 0 when nothing matches.
    pub fn last_page(&self) -> usize {
        last_page(self.filtered.len(), self.config.page_size)
    }

    /// Moves to `page`, clamped to the available pages.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.last_page().max(1));
    }

    /// Moves forward one page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page >= self.last_page() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Moves back one page. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Returns the configuration.
    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Returns the settings as currently edited.
    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    /// Returns the settings the views reflect.
    pub fn applied_settings(&self) -> &FilterSettings {
        &self.applied
    }

    /// Returns `true` if edited settings are waiting for [`apply`](Self::apply).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns all loaded messages.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages matching the applied filter.
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// Returns the messages matching the applied filter, in order.
    pub fn filtered_messages(&self) -> Vec<&Message> {
        self.filtered.iter().map(|&i| &self.messages[i]).collect()
    }

    /// Returns the current feed page.
    pub fn page_window(&self) -> PageWindow<'_> {
        PageWindow::new(&self.filtered_messages(), self.page, self.config.page_size)
    }

    /// Returns render models for the current page.
    pub fn message_views(&self) -> Vec<MessageView> {
        self.page_window()
            .items
            .into_iter()
            .map(|msg| self.classifier.render(msg, &self.highlighter))
            .collect()
    }

    /// Returns the stacked monthly series.
    pub fn time_series(&self) -> &[ChartSeriesPoint] {
        &self.time_series
    }

    /// Returns the monthly totals.
    pub fn monthly_totals(&self) -> &[MonthTotal] {
        &self.monthly_totals
    }

    /// Returns the author distribution.
    pub fn distribution(&self) -> &[DistributionSlice] {
        &self.distribution
    }

    /// Returns the color registry.
    pub fn colors(&self) -> &ColorRegistry {
        &self.colors
    }

    /// Returns e.g. `"Jan 2024 - Mar 2024 (12 results)"`.
    pub fn range_description(&self) -> String {
        describe_range(&self.monthly_totals)
    }

    /// Bundles every view into a serializable report.
    pub fn report(&self) -> Report<'_> {
        let window = self.page_window();
        let items = window
            .items
            .iter()
            .map(|&msg| FeedItem::new(msg, self.classifier.render(msg, &self.highlighter)))
            .collect();

        let mut legend: Vec<LegendEntry> = Vec::new();
        let keys = self
            .time_series
            .iter()
            .flat_map(|p| p.values.keys().map(String::as_str))
            .chain(self.distribution.iter().map(|s| s.label.as_str()));
        for key in keys {
            let key = key.strip_prefix('@').unwrap_or(key);
            if legend.iter().any(|e| e.key == key) {
                continue;
            }
            if let Some(color) = self.colors.get(key) {
                legend.push(LegendEntry {
                    key: key.to_string(),
                    color,
                });
            }
        }

        Report {
            summary: Summary {
                total_messages: self.messages.len(),
                filtered_messages: self.filtered.len(),
                text_filter: self.applied.text_filter.clone(),
                case_sensitive: self.applied.case_sensitive,
                range: self.range_description(),
            },
            time_series: &self.time_series,
            monthly_totals: &self.monthly_totals,
            distribution: &self.distribution,
            legend,
            page: PageReport {
                current_page: window.current_page,
                last_page: window.last_page,
                page_links: window.page_links,
                has_prev: window.has_prev,
                has_next: window.has_next,
                items,
            },
        }
    }
}
