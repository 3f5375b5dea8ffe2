use tracing::debug;

use crate::core::{
    DateToPixelMapper, FixedAdvanceTextMeasurer, ScaleTransitionController, TextMeasurer,
    TimelineDocument, build_grid,
};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::InteractionState;
use crate::render::Renderer;

use super::{TimelineEngine, TimelineEngineConfig, TimelineLayout};

impl<R: Renderer> TimelineEngine<R> {
    /// Creates an engine showing `document` with validated `config`.
    ///
    /// The document's initial unit width is clamped into its granularity's
    /// band, a focus outside the viewport is re-anchored the way a pan would
    /// re-anchor it, and the first grid is built immediately.
    pub fn new(
        renderer: R,
        config: TimelineEngineConfig,
        document: TimelineDocument,
    ) -> TimelineResult<Self> {
        let config = config.validate()?;
        let controller = ScaleTransitionController::new(config.scale_transition)?;
        if !document.focus_x.is_finite() {
            return Err(TimelineError::InvalidInput(
                "focus_x must be finite".to_owned(),
            ));
        }

        let mut view = document.view_state();
        controller.clamp_state(&mut view);
        let grid = build_grid(config.viewport.width_px(), &view);

        debug!(
            title = %document.title,
            lanes = document.lanes.len(),
            granularity = %view.granularity(),
            unit_px = view.unit_px(),
            "timeline engine initialized"
        );

        let mut engine = Self {
            renderer,
            config,
            title: document.title,
            viewport: config.viewport,
            view,
            controller,
            mapper: DateToPixelMapper::new(config.overflow_px),
            grid,
            lanes: document.lanes,
            layout: TimelineLayout::default(),
            interaction: InteractionState::default(),
            text_measurer: Box::new(FixedAdvanceTextMeasurer::default()),
        };
        engine.reanchor_focus_if_outside();
        Ok(engine)
    }

    /// Parses a timeline document and creates an engine for it.
    pub fn from_json_document(
        renderer: R,
        config: TimelineEngineConfig,
        input: &str,
    ) -> TimelineResult<Self> {
        let document = TimelineDocument::from_json_str(input)?;
        Self::new(renderer, config, document)
    }

    /// Replaces the label measurer used by lane layout.
    #[must_use]
    pub fn with_text_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.set_text_measurer(measurer);
        self
    }

    pub fn set_text_measurer(&mut self, measurer: impl TextMeasurer + 'static) {
        self.text_measurer = Box::new(measurer);
    }
}
