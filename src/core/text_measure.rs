use serde::{Deserialize, Serialize};

/// Rendered size of a label.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

impl TextExtent {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Seam through which hosts supply real font metrics for period labels.
///
/// Any `Fn(&str) -> TextExtent` closure works as a measurer.
pub trait TextMeasurer {
    fn measure(&self, text: &str) -> TextExtent;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str) -> TextExtent,
{
    fn measure(&self, text: &str) -> TextExtent {
        self(text)
    }
}

/// Monospace estimate used when the host does not provide metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedAdvanceTextMeasurer {
    pub char_width_px: f64,
    pub line_height_px: f64,
}

impl Default for FixedAdvanceTextMeasurer {
    fn default() -> Self {
        Self {
            char_width_px: 7.0,
            line_height_px: 14.0,
        }
    }
}

impl TextMeasurer for FixedAdvanceTextMeasurer {
    fn measure(&self, text: &str) -> TextExtent {
        TextExtent::new(
            text.chars().count() as f64 * self.char_width_px,
            self.line_height_px,
        )
    }
}
