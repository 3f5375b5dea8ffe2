use chrono::NaiveDateTime;

use crate::core::{Granularity, Lane, ScaleTransitionConfig, TimeGrid, TimelineViewState, Viewport};
use crate::render::Renderer;

use super::{LaneSnapshot, TimelineEngine, TimelineEngineConfig, TimelineSnapshot};

impl<R: Renderer> TimelineEngine<R> {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn config(&self) -> &TimelineEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn scale_transition_config(&self) -> &ScaleTransitionConfig {
        self.controller.config()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn view_state(&self) -> &TimelineViewState {
        &self.view
    }

    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.view.granularity()
    }

    #[must_use]
    pub fn unit_px(&self) -> f64 {
        self.view.unit_px()
    }

    #[must_use]
    pub fn focus_date(&self) -> NaiveDateTime {
        self.view.focus_date()
    }

    #[must_use]
    pub fn focus_x(&self) -> f64 {
        self.view.focus_x()
    }

    #[must_use]
    pub fn vertical_offset(&self) -> f64 {
        self.view.vertical_offset()
    }

    /// Grid for the current view, rebuilt after every zoom, pan and resize.
    #[must_use]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    #[must_use]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    #[must_use]
    pub fn lane(&self, lane_index: usize) -> Option<&Lane> {
        self.lanes.get(lane_index)
    }

    #[must_use]
    pub fn snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            title: self.title.clone(),
            viewport: self.viewport,
            view: self.view,
            grid: self.grid.lines().to_vec(),
            lanes: self
                .lanes
                .iter()
                .map(|lane| LaneSnapshot {
                    name: lane.name().to_owned(),
                    hidden: lane.is_hidden(),
                    geometry: lane.geometry().clone(),
                })
                .collect(),
        }
    }
}
