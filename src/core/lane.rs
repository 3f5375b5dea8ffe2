use serde::{Deserialize, Serialize};

use crate::core::TimePeriod;

/// Derived row layout of a lane, rebuilt on every layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LaneGeometry {
    /// Row index per period, by period position.
    pub row_of: Vec<usize>,
    pub row_count: usize,
    pub row_height: f64,
    pub height: f64,
}

/// Horizontal track grouping time periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    name: String,
    #[serde(default)]
    hidden: bool,
    #[serde(default = "default_lane_color")]
    color: String,
    #[serde(default)]
    periods: Vec<TimePeriod>,
    #[serde(skip)]
    geometry: LaneGeometry,
}

fn default_lane_color() -> String {
    "#dde6f0".to_owned()
}

impl Lane {
    #[must_use]
    pub fn new(name: impl Into<String>, periods: Vec<TimePeriod>) -> Self {
        Self {
            name: name.into(),
            hidden: false,
            color: default_lane_color(),
            periods,
            geometry: LaneGeometry::default(),
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn periods(&self) -> &[TimePeriod] {
        &self.periods
    }

    /// Mutable access for description edits; the other period fields have no setters.
    pub fn period_mut(&mut self, index: usize) -> Option<&mut TimePeriod> {
        self.periods.get_mut(index)
    }

    #[must_use]
    pub fn geometry(&self) -> &LaneGeometry {
        &self.geometry
    }

    pub(crate) fn set_geometry(&mut self, geometry: LaneGeometry) {
        self.geometry = geometry;
    }
}
