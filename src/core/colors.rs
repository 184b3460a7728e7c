//! Stable chart colors per series key.
//!
//! Each new key takes the next palette slot in first-seen order; slots wrap
//! around after the palette is exhausted. `"Other"` is always gray and does
//! not consume a slot. Keys are compared with any leading `@` removed, so
//! `"@alice"` (a pie label) and `"alice"` (a bar series key) share a color.
//!
//! ```
//! use chatstats::core::colors::{ChartColor, ColorRegistry};
//!
//! let mut colors = ColorRegistry::new(8);
//! assert_eq!(colors.color_for("alice"), ChartColor::Slot(1));
//! assert_eq!(colors.color_for("Other"), ChartColor::Gray);
//! assert_eq!(colors.color_for("bob"), ChartColor::Slot(2));
//! assert_eq!(colors.color_for("@alice"), ChartColor::Slot(1));
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::OTHER_LABEL;

/// A chart color reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartColor {
    /// 1-based palette slot.
    Slot(usize),
    /// Reserved color for `"Other"`.
    Gray,
}

impl ChartColor {
    /// Returns the CSS variable reference, e.g. `var(--chart-3)`.
    pub fn css_var(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ChartColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartColor::Slot(n) => write!(f, "var(--chart-{n})"),
            ChartColor::Gray => write!(f, "var(--chart-gray)"),
        }
    }
}

impl Serialize for ChartColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Session-wide color assignment.
#[derive(Debug, Clone)]
pub struct ColorRegistry {
    palette_size: usize,
    assigned: HashMap<String, ChartColor>,
    order: Vec<String>,
}

impl ColorRegistry {
    /// Creates an empty registry. A palette size of 0 is treated as 1.
    pub fn new(palette_size: usize) -> Self {
        Self {
            palette_size: palette_size.max(1),
            assigned: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Returns the color for `key`, assigning one on first sight.
    pub fn color_for(&mut self, key: &str) -> ChartColor {
        let key = normalize(key);
        if key == OTHER_LABEL {
            return ChartColor::Gray;
        }
        if let Some(color) = self.assigned.get(key) {
            return *color;
        }
        let color = ChartColor::Slot(self.order.len() % self.palette_size + 1);
        self.assigned.insert(key.to_string(), color);
        self.order.push(key.to_string());
        color
    }

    /// Returns the color already assigned to `key`, without assigning.
    pub fn get(&self, key: &str) -> Option<ChartColor> {
        let key = normalize(key);
        if key == OTHER_LABEL {
            return Some(ChartColor::Gray);
        }
        self.assigned.get(key).copied()
    }

    /// Keys in assignment order with their colors.
    pub fn legend(&self) -> Vec<(&str, ChartColor)> {
        self.order
            .iter()
            .map(|k| (k.as_str(), self.assigned[k]))
            .collect()
    }

    /// Number of keys assigned so far (`"Other"` excluded).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing has been assigned.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for ColorRegistry {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PALETTE_SIZE)
    }
}

fn normalize(key: &str) -> &str {
    key.strip_prefix('@').unwrap_or(key)
}
