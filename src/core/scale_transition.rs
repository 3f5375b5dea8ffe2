use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::calendar::advance;
use crate::core::{Granularity, TimeGrid, TimelineViewState};
use crate::error::{TimelineError, TimelineResult};

/// Distance kept below `max_unit_px` when a unit width is clamped in place.
const CLAMP_INSET_PX: f64 = 1e-6;

/// Valid unit-width band for one granularity plus the widths it starts at
/// when the controller transitions into it.
///
/// Widening a unit past `max_unit_px` zooms in: the controller switches to
/// the finer granularity (year to month), never the coarser one. Narrowing
/// below `min_unit_px` zooms out to the coarser granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GranularityBounds {
    /// Falling below this moves to the coarser neighbor.
    pub min_unit_px: f64,
    /// Reaching this moves to the finer neighbor.
    pub max_unit_px: f64,
    /// Width assumed when entering from the coarser neighbor (zooming in).
    pub zoom_in_entry_px: f64,
    /// Width assumed when entering from the finer neighbor (zooming out).
    pub zoom_out_entry_px: f64,
}

impl GranularityBounds {
    #[must_use]
    pub const fn new(
        min_unit_px: f64,
        max_unit_px: f64,
        zoom_in_entry_px: f64,
        zoom_out_entry_px: f64,
    ) -> Self {
        Self {
            min_unit_px,
            max_unit_px,
            zoom_in_entry_px,
            zoom_out_entry_px,
        }
    }

    fn clamp(self, unit_px: f64) -> f64 {
        if !unit_px.is_finite() {
            return self.min_unit_px;
        }
        unit_px.clamp(self.min_unit_px, self.max_unit_px - CLAMP_INSET_PX)
    }

    fn validate(self, granularity: Granularity) -> TimelineResult<Self> {
        let values = [
            self.min_unit_px,
            self.max_unit_px,
            self.zoom_in_entry_px,
            self.zoom_out_entry_px,
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(TimelineError::InvalidConfig(format!(
                "{granularity} bounds must be finite"
            )));
        }
        if self.min_unit_px <= 0.0 || self.min_unit_px >= self.max_unit_px {
            return Err(TimelineError::InvalidConfig(format!(
                "{granularity} bounds require 0 < min_unit_px < max_unit_px"
            )));
        }
        for (name, entry) in [
            ("zoom_in_entry_px", self.zoom_in_entry_px),
            ("zoom_out_entry_px", self.zoom_out_entry_px),
        ] {
            if entry < self.min_unit_px || entry >= self.max_unit_px {
                return Err(TimelineError::InvalidConfig(format!(
                    "{granularity} `{name}` must lie in [min_unit_px, max_unit_px)"
                )));
            }
        }
        Ok(self)
    }
}

/// Per-granularity bounds table, indexed by [`Granularity::index`].
///
/// The defaults are tuned by eye for roughly 1000px wide viewports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleTransitionConfig {
    pub bounds: [GranularityBounds; 10],
}

impl Default for ScaleTransitionConfig {
    fn default() -> Self {
        Self {
            bounds: [
                // millennium
                GranularityBounds::new(50.0, 200.0, 60.0, 180.0),
                // century
                GranularityBounds::new(20.0, 200.0, 30.0, 180.0),
                // decade
                GranularityBounds::new(20.0, 200.0, 30.0, 180.0),
                // year
                GranularityBounds::new(20.0, 200.0, 30.0, 180.0),
                // month
                GranularityBounds::new(10.0, 200.0, 20.0, 180.0),
                // day
                GranularityBounds::new(5.0, 200.0, 15.0, 180.0),
                // hour
                GranularityBounds::new(10.0, 200.0, 20.0, 180.0),
                // minute
                GranularityBounds::new(5.0, 200.0, 15.0, 180.0),
                // second
                GranularityBounds::new(5.0, 200.0, 15.0, 180.0),
                // millisecond
                GranularityBounds::new(5.0, 100.0, 15.0, 90.0),
            ],
        }
    }
}

impl ScaleTransitionConfig {
    #[must_use]
    pub fn bounds(&self, granularity: Granularity) -> GranularityBounds {
        self.bounds[granularity.index()]
    }

    #[must_use]
    pub fn with_bounds(mut self, granularity: Granularity, bounds: GranularityBounds) -> Self {
        self.bounds[granularity.index()] = bounds;
        self
    }

    pub fn validate(self) -> TimelineResult<Self> {
        for granularity in Granularity::ALL {
            self.bounds(granularity).validate(granularity)?;
        }
        Ok(self)
    }
}

/// Outcome of one [`ScaleTransitionController::rescale`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleTransition {
    /// Unit width changed inside the current granularity's band.
    Stayed,
    /// Switched to the finer neighbor (zoomed in past `max_unit_px`).
    Finer { from: Granularity, to: Granularity },
    /// Switched to the coarser neighbor (zoomed out past `min_unit_px`).
    Coarser { from: Granularity, to: Granularity },
    /// Hit the millennium or millisecond end of the range and was clamped.
    Clamped,
}

/// State machine over [`Granularity`] driven by zoom deltas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaleTransitionController {
    config: ScaleTransitionConfig,
}

impl ScaleTransitionController {
    pub fn new(config: ScaleTransitionConfig) -> TimelineResult<Self> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ScaleTransitionConfig {
        &self.config
    }

    /// Forces `state.unit_px` into its granularity's band.
    pub fn clamp_state(&self, state: &mut TimelineViewState) {
        state.unit_px = self.config.bounds(state.granularity).clamp(state.unit_px);
    }

    /// Applies a zoom of `delta` pixels per unit around `pivot_x`.
    ///
    /// The focus is first re-anchored to the line of `grid` nearest the
    /// pivot, so that line stays put on screen. At most one granularity
    /// transition happens per call; the new granularity starts at its entry
    /// width nudged by the sign of `delta`.
    pub fn rescale(
        &self,
        state: &mut TimelineViewState,
        grid: &TimeGrid,
        delta: f64,
        pivot_x: f64,
    ) -> TimelineResult<ScaleTransition> {
        if !delta.is_finite() {
            return Err(TimelineError::InvalidInput(
                "rescale delta must be finite".to_owned(),
            ));
        }
        if !pivot_x.is_finite() {
            return Err(TimelineError::InvalidInput(
                "rescale pivot must be finite".to_owned(),
            ));
        }

        let from = state.granularity;
        state.unit_px += delta;

        if let Some(anchor) = grid.nearest_line(pivot_x) {
            state.focus_x = anchor.x;
            state.focus_date = anchor.date;
        }

        let bounds = self.config.bounds(from);
        let nudge = delta.signum();
        let transition = if state.unit_px >= bounds.max_unit_px {
            match from.finer() {
                Some(to) => {
                    let entry = self.config.bounds(to);
                    self.enter(state, to, entry.clamp(entry.zoom_in_entry_px + nudge));
                    ScaleTransition::Finer { from, to }
                }
                None => {
                    state.unit_px = bounds.clamp(state.unit_px);
                    ScaleTransition::Clamped
                }
            }
        } else if state.unit_px < bounds.min_unit_px {
            match from.coarser() {
                Some(to) => {
                    let entry = self.config.bounds(to);
                    self.enter(state, to, entry.clamp(entry.zoom_out_entry_px + nudge));
                    ScaleTransition::Coarser { from, to }
                }
                None => {
                    state.unit_px = bounds.clamp(state.unit_px);
                    ScaleTransition::Clamped
                }
            }
        } else {
            ScaleTransition::Stayed
        };

        match transition {
            ScaleTransition::Finer { from, to } | ScaleTransition::Coarser { from, to } => {
                debug!(%from, %to, unit_px = state.unit_px, "granularity transition");
            }
            ScaleTransition::Stayed | ScaleTransition::Clamped => {
                trace!(granularity = %state.granularity, unit_px = state.unit_px, ?transition, "rescale");
            }
        }
        Ok(transition)
    }

    fn enter(&self, state: &mut TimelineViewState, granularity: Granularity, unit_px: f64) {
        state.granularity = granularity;
        state.unit_px = unit_px;
        // Keep the focus date on a unit boundary so the focus line carries it exactly.
        state.focus_date = advance(state.focus_date, granularity, 0).unwrap_or(state.focus_date);
    }
}
