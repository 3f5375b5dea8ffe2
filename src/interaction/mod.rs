use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}

/// Pixel displacement produced by one pointer move while panning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanDelta {
    pub dx: f64,
    pub dy: f64,
}

/// Pointer state between host input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    cursor_x: f64,
    cursor_y: f64,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            cursor_x: 0.0,
            cursor_y: 0.0,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn cursor(self) -> (f64, f64) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn on_pan_start(&mut self, x: f64, y: f64) {
        self.mode = InteractionMode::Panning;
        self.cursor_x = x;
        self.cursor_y = y;
    }

    /// Records the pointer position; returns the drag delta while panning.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> Option<PanDelta> {
        let delta = PanDelta {
            dx: x - self.cursor_x,
            dy: y - self.cursor_y,
        };
        self.cursor_x = x;
        self.cursor_y = y;
        match self.mode {
            InteractionMode::Panning => Some(delta),
            InteractionMode::Idle => None,
        }
    }

    pub fn on_pan_end(&mut self) {
        self.mode = InteractionMode::Idle;
    }
}
