use crate::core::ScaleTransition;
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::InteractionMode;
use crate::render::Renderer;

use super::TimelineEngine;

impl<R: Renderer> TimelineEngine<R> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    pub fn pan_start(&mut self, x: f64, y: f64) -> TimelineResult<()> {
        validate_pointer(x, y)?;
        self.interaction.on_pan_start(x, y);
        Ok(())
    }

    /// Tracks the pointer; while dragging, applies the move as a pan on both axes.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> TimelineResult<()> {
        validate_pointer(x, y)?;
        if let Some(delta) = self.interaction.on_pointer_move(x, y) {
            if delta.dx != 0.0 {
                self.pan_horizontal(delta.dx)?;
            }
            if delta.dy != 0.0 {
                self.pan_vertical(delta.dy)?;
            }
        }
        Ok(())
    }

    pub fn pan_end(&mut self) {
        self.interaction.on_pan_end();
    }

    /// Wheel zoom centred on pointer position `x`.
    pub fn wheel(&mut self, delta: f64, x: f64) -> TimelineResult<ScaleTransition> {
        self.rescale(delta, x)
    }
}

fn validate_pointer(x: f64, y: f64) -> TimelineResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(TimelineError::InvalidInput(
            "pointer position must be finite".to_owned(),
        ));
    }
    Ok(())
}
