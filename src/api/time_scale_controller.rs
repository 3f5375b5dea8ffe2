use chrono::NaiveDateTime;
use tracing::trace;

use crate::core::{ScaleTransition, TimeGrid, Viewport, build_grid};
use crate::error::{TimelineError, TimelineResult};
use crate::render::Renderer;

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    /// Zooms by `delta` pixels per unit around `pivot_x`.
    ///
    /// The grid is rebuilt before returning; lane geometry is refreshed by
    /// the next [`TimelineEngine::layout_lanes`] call.
    pub fn rescale(&mut self, delta: f64, pivot_x: f64) -> TimelineResult<ScaleTransition> {
        let transition = self
            .controller
            .rescale(&mut self.view, &self.grid, delta, pivot_x)?;
        self.refresh_grid();
        Ok(transition)
    }

    /// Scrolls the time axis by `delta` pixels; positive moves content right.
    pub fn pan_horizontal(&mut self, delta: f64) -> TimelineResult<()> {
        if !delta.is_finite() {
            return Err(TimelineError::InvalidInput(
                "horizontal pan delta must be finite".to_owned(),
            ));
        }
        self.view.focus_x += delta;
        self.refresh_grid();
        self.reanchor_focus_if_outside();
        Ok(())
    }

    /// Scrolls lanes vertically; the offset never drops below zero.
    pub fn pan_vertical(&mut self, delta: f64) -> TimelineResult<()> {
        if !delta.is_finite() {
            return Err(TimelineError::InvalidInput(
                "vertical pan delta must be finite".to_owned(),
            ));
        }
        self.view.vertical_offset = (self.view.vertical_offset + delta).max(0.0);
        Ok(())
    }

    /// Builds a fresh grid for `viewport_width` from the current view state.
    ///
    /// The engine's own grid is left untouched.
    #[must_use]
    pub fn build_grid(&self, viewport_width: f64) -> TimeGrid {
        build_grid(viewport_width, &self.view)
    }

    /// Updates viewport dimensions and rebuilds the grid for the new width.
    pub fn set_viewport(&mut self, viewport: Viewport) -> TimelineResult<()> {
        if !viewport.is_valid() {
            return Err(TimelineError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        self.config.viewport = viewport;
        self.refresh_grid();
        Ok(())
    }

    #[must_use]
    pub fn map_date_to_pixel(&self, date: NaiveDateTime) -> f64 {
        self.mapper.to_pixel_x(&self.grid, date)
    }

    /// Inverse of [`TimelineEngine::map_date_to_pixel`] inside the grid span.
    #[must_use]
    pub fn map_pixel_to_date(&self, pixel_x: f64) -> Option<NaiveDateTime> {
        self.mapper.to_date(&self.grid, pixel_x)
    }

    pub(super) fn refresh_grid(&mut self) {
        self.grid = build_grid(self.viewport.width_px(), &self.view);
        trace!(
            granularity = %self.view.granularity(),
            lines = self.grid.len(),
            focus_x = self.view.focus_x(),
            "grid rebuilt"
        );
    }

    /// Moves an off-screen focus onto the grid line nearest the viewport
    /// centre. When no line is on screen (the grid collapsed at a calendar
    /// limit) the focus date itself is placed at the centre.
    pub(super) fn reanchor_focus_if_outside(&mut self) {
        let width = self.viewport.width_px();
        let focus_x = self.view.focus_x();
        if (0.0..=width).contains(&focus_x) {
            return;
        }
        let centre = width / 2.0;
        match self.grid.nearest_line(centre).copied() {
            Some(anchor) if (0.0..=width).contains(&anchor.x) => {
                self.view.focus_x = anchor.x;
                self.view.focus_date = anchor.date;
            }
            _ => self.view.focus_x = centre,
        }
        trace!(focus_x = self.view.focus_x, "focus re-anchored");
        self.refresh_grid();
    }
}
