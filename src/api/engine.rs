use crate::core::{
    DateToPixelMapper, Lane, ScaleTransitionController, TextMeasurer, TimeGrid,
    TimelineViewState, Viewport,
};
use crate::error::TimelineResult;
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::{TimelineEngineConfig, TimelineLayout, render_coordinator::RenderCoordinator};

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns one timeline session: the view state, the lanes and
/// their derived geometry, the current grid, pointer state, and the renderer.
pub struct TimelineEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: TimelineEngineConfig,
    pub(super) title: String,
    pub(super) viewport: Viewport,
    pub(super) view: TimelineViewState,
    pub(super) controller: ScaleTransitionController,
    pub(super) mapper: DateToPixelMapper,
    pub(super) grid: TimeGrid,
    pub(super) lanes: Vec<Lane>,
    pub(super) layout: TimelineLayout,
    pub(super) interaction: InteractionState,
    pub(super) text_measurer: Box<dyn TextMeasurer>,
}

impl<R: Renderer> TimelineEngine<R> {
    /// Runs a layout pass and hands the resulting frame to the renderer.
    pub fn render(&mut self) -> TimelineResult<()> {
        RenderCoordinator::render(self)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
