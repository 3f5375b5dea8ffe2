use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_OVERFLOW_PX, ScaleTransitionConfig, Viewport};
use crate::error::{TimelineError, TimelineResult};

/// Vertical geometry of lanes and their rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneLayoutConfig {
    /// Padding above the top row and below the bottom row of a lane.
    pub lane_margin_px: f64,
    /// Height reported for lanes with few or no rows.
    pub min_lane_height_px: f64,
    pub bar_height_px: f64,
    /// Vertical space between stacked rows.
    pub row_gap_px: f64,
    /// Horizontal padding on both sides of a period label.
    pub label_padding_px: f64,
    /// Extra horizontal clearance required between boxes sharing a row.
    pub min_inline_gap_px: f64,
}

impl Default for LaneLayoutConfig {
    fn default() -> Self {
        Self {
            lane_margin_px: 6.0,
            min_lane_height_px: 30.0,
            bar_height_px: 16.0,
            row_gap_px: 4.0,
            label_padding_px: 6.0,
            min_inline_gap_px: 0.0,
        }
    }
}

impl LaneLayoutConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        for (value, name) in [
            (self.lane_margin_px, "lane_margin_px"),
            (self.min_lane_height_px, "min_lane_height_px"),
            (self.row_gap_px, "row_gap_px"),
            (self.label_padding_px, "label_padding_px"),
            (self.min_inline_gap_px, "min_inline_gap_px"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TimelineError::InvalidConfig(format!(
                    "lane layout `{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.bar_height_px.is_finite() || self.bar_height_px <= 0.0 {
            return Err(TimelineError::InvalidConfig(
                "lane layout `bar_height_px` must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

fn default_overflow_px() -> f64 {
    DEFAULT_OVERFLOW_PX
}

fn default_time_axis_height_px() -> f64 {
    28.0
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can persist viewer tuning next to their documents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub scale_transition: ScaleTransitionConfig,
    #[serde(default)]
    pub lane_layout: LaneLayoutConfig,
    /// How far beyond the viewport edges mapped dates are clamped.
    #[serde(default = "default_overflow_px")]
    pub overflow_px: f64,
    /// Space under the lane baseline reserved for the time axis.
    #[serde(default = "default_time_axis_height_px")]
    pub time_axis_height_px: f64,
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scale_transition: ScaleTransitionConfig::default(),
            lane_layout: LaneLayoutConfig::default(),
            overflow_px: default_overflow_px(),
            time_axis_height_px: default_time_axis_height_px(),
        }
    }

    #[must_use]
    pub fn with_scale_transition(mut self, scale_transition: ScaleTransitionConfig) -> Self {
        self.scale_transition = scale_transition;
        self
    }

    #[must_use]
    pub fn with_lane_layout(mut self, lane_layout: LaneLayoutConfig) -> Self {
        self.lane_layout = lane_layout;
        self
    }

    #[must_use]
    pub fn with_overflow_px(mut self, overflow_px: f64) -> Self {
        self.overflow_px = overflow_px;
        self
    }

    #[must_use]
    pub fn with_time_axis_height_px(mut self, time_axis_height_px: f64) -> Self {
        self.time_axis_height_px = time_axis_height_px;
        self
    }

    pub fn validate(self) -> TimelineResult<Self> {
        if !self.viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.scale_transition.validate()?;
        self.lane_layout.validate()?;
        if !self.overflow_px.is_finite() || self.overflow_px < 0.0 {
            return Err(TimelineError::InvalidConfig(
                "overflow_px must be finite and >= 0".to_owned(),
            ));
        }
        if !self.time_axis_height_px.is_finite() || self.time_axis_height_px < 0.0 {
            return Err(TimelineError::InvalidConfig(
                "time_axis_height_px must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{LaneLayoutConfig, TimelineEngineConfig};
    use crate::core::Viewport;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: TimelineEngineConfig =
            serde_json::from_str(r#"{ "viewport": { "width": 800, "height": 400 } }"#)
                .expect("deserialize");
        assert_eq!(config, TimelineEngineConfig::new(Viewport::new(800, 400)));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let zero = TimelineEngineConfig::new(Viewport::new(0, 400));
        assert!(zero.validate().is_err());

        let negative_overflow = TimelineEngineConfig::new(Viewport::new(800, 400)).with_overflow_px(-1.0);
        assert!(negative_overflow.validate().is_err());

        let flat_bars = TimelineEngineConfig::new(Viewport::new(800, 400)).with_lane_layout(
            LaneLayoutConfig {
                bar_height_px: 0.0,
                ..LaneLayoutConfig::default()
            },
        );
        assert!(flat_bars.validate().is_err());
    }
}
