use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::date_format::timeline_date;

/// Named date range drawn as one bar.
///
/// `start <= end` is expected but not enforced; a reversed range lays out as
/// a zero-width bar that still reserves room for its label. Only the
/// description may change after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePeriod {
    name: String,
    #[serde(with = "timeline_date")]
    start: NaiveDateTime,
    #[serde(with = "timeline_date")]
    end: NaiveDateTime,
    #[serde(default)]
    approximate_start: bool,
    #[serde(default)]
    approximate_end: bool,
    #[serde(default)]
    description: String,
    #[serde(default = "default_fill_color")]
    fill_color: String,
    #[serde(default = "default_label_color")]
    label_color: String,
}

fn default_fill_color() -> String {
    "#4a7ab5".to_owned()
}

fn default_label_color() -> String {
    "#1f1f1f".to_owned()
}

impl TimePeriod {
    #[must_use]
    pub fn new(name: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            approximate_start: false,
            approximate_end: false,
            description: String::new(),
            fill_color: default_fill_color(),
            label_color: default_label_color(),
        }
    }

    #[must_use]
    pub fn with_approximate(mut self, approximate_start: bool, approximate_end: bool) -> Self {
        self.approximate_start = approximate_start;
        self.approximate_end = approximate_end;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_colors(mut self, fill_color: impl Into<String>, label_color: impl Into<String>) -> Self {
        self.fill_color = fill_color.into();
        self.label_color = label_color.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    #[must_use]
    pub fn approximate_start(&self) -> bool {
        self.approximate_start
    }

    #[must_use]
    pub fn approximate_end(&self) -> bool {
        self.approximate_end
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    #[must_use]
    pub fn fill_color(&self) -> &str {
        &self.fill_color
    }

    #[must_use]
    pub fn label_color(&self) -> &str {
        &self.label_color
    }
}
