use tracing::trace;

use crate::error::TimelineResult;
use crate::render::Renderer;

use super::TimelineEngine;

pub(super) struct RenderCoordinator;

impl RenderCoordinator {
    pub(super) fn render<R: Renderer>(engine: &mut TimelineEngine<R>) -> TimelineResult<()> {
        engine.layout_lanes();
        let frame = engine.build_render_frame();
        trace!(
            lines = frame.lines.len(),
            rects = frame.rects.len(),
            texts = frame.texts.len(),
            "render pass"
        );
        engine.renderer.render(&frame)
    }
}
