use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::Granularity;
use crate::core::date_format::timeline_date;

/// Focus, zoom and scroll state of one timeline session.
///
/// The grid is anchored so that `focus_date` sits at `focus_x`. Mutation goes
/// through [`crate::core::ScaleTransitionController`] and the engine pan
/// operations, which re-clamp `unit_px` after every change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineViewState {
    #[serde(with = "timeline_date")]
    pub(crate) focus_date: NaiveDateTime,
    pub(crate) focus_x: f64,
    pub(crate) granularity: Granularity,
    pub(crate) unit_px: f64,
    pub(crate) vertical_offset: f64,
}

impl TimelineViewState {
    /// Creates an unclamped state; callers run it through
    /// `ScaleTransitionController::clamp_state` before use.
    #[must_use]
    pub fn new(
        focus_date: NaiveDateTime,
        focus_x: f64,
        granularity: Granularity,
        unit_px: f64,
    ) -> Self {
        Self {
            focus_date,
            focus_x,
            granularity,
            unit_px,
            vertical_offset: 0.0,
        }
    }

    #[must_use]
    pub fn focus_date(&self) -> NaiveDateTime {
        self.focus_date
    }

    #[must_use]
    pub fn focus_x(&self) -> f64 {
        self.focus_x
    }

    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Pixel width of one granularity unit.
    #[must_use]
    pub fn unit_px(&self) -> f64 {
        self.unit_px
    }

    #[must_use]
    pub fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }
}
