use crate::core::{Lane, TimePeriod, grid_line_label};
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::{LaneLayout, PeriodPlacement, TimelineEngine};

const GRID_LINE_COLOR: Color = Color::rgba(0.55, 0.58, 0.62, 0.45);
const AXIS_LINE_COLOR: Color = Color::rgb(0.25, 0.27, 0.30);
const AXIS_LABEL_COLOR: Color = Color::rgb(0.20, 0.22, 0.25);
const FALLBACK_LANE_COLOR: Color = Color::rgb(0.87, 0.90, 0.94);
const FALLBACK_FILL_COLOR: Color = Color::rgb(0.29, 0.48, 0.71);
const FALLBACK_LABEL_COLOR: Color = Color::rgb(0.12, 0.12, 0.12);

const LANE_BACKGROUND_ALPHA: f64 = 0.35;
const APPROXIMATE_END_ALPHA: f64 = 0.35;
/// Share of a bar drawn faded at each approximate end.
const APPROXIMATE_END_RATIO: f64 = 0.2;
const APPROXIMATE_END_MAX_PX: f64 = 40.0;
const MIN_BAR_WIDTH_PX: f64 = 1.0;
const LABEL_FONT_SIZE_PX: f64 = 12.0;
const AXIS_LABEL_OFFSET_PX: f64 = 16.0;

fn parse_color(input: &str, fallback: Color) -> Color {
    Color::from_hex(input).unwrap_or(fallback)
}

impl<R: Renderer> TimelineEngine<R> {
    /// Materializes the last layout pass plus the current grid into primitives.
    ///
    /// Does not re-run layout; [`TimelineEngine::render`] does both.
    #[must_use]
    pub fn build_render_frame(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        let width = self.viewport.width_px();

        for lane_layout in &self.layout.lanes {
            let Some(lane) = self.lanes.get(lane_layout.lane_index) else {
                continue;
            };
            frame.rects.push(RectPrimitive::new(
                0.0,
                lane_layout.top_y,
                width,
                lane_layout.height,
                parse_color(lane.color(), FALLBACK_LANE_COLOR).with_alpha(LANE_BACKGROUND_ALPHA),
            ));
        }

        self.push_time_axis(&mut frame);

        for lane_layout in &self.layout.lanes {
            if let Some(lane) = self.lanes.get(lane_layout.lane_index) {
                self.push_lane_periods(&mut frame, lane, lane_layout);
            }
        }

        frame
    }

    fn push_time_axis(&self, frame: &mut RenderFrame) {
        let baseline = self.baseline_y();
        let granularity = self.grid.granularity();

        for line in self.grid.visible_lines() {
            frame
                .lines
                .push(LinePrimitive::new(line.x, 0.0, line.x, baseline, 1.0, GRID_LINE_COLOR));
            let label = grid_line_label(line.date, granularity);
            if label.is_empty() {
                continue;
            }
            frame.texts.push(TextPrimitive::new(
                label,
                line.x,
                baseline + AXIS_LABEL_OFFSET_PX,
                LABEL_FONT_SIZE_PX,
                AXIS_LABEL_COLOR,
                TextHAlign::Center,
            ));
        }

        frame.lines.push(LinePrimitive::new(
            0.0,
            baseline,
            self.viewport.width_px(),
            baseline,
            1.0,
            AXIS_LINE_COLOR,
        ));
    }

    fn push_lane_periods(&self, frame: &mut RenderFrame, lane: &Lane, lane_layout: &LaneLayout) {
        let padding = self.config.lane_layout.label_padding_px;
        for placement in &lane_layout.periods {
            let Some(period) = lane.periods().get(placement.period_index) else {
                continue;
            };
            push_period_bar(frame, period, placement);

            if period.name().is_empty() {
                continue;
            }
            frame.texts.push(TextPrimitive::new(
                period.name(),
                placement.start_x + padding,
                placement.top_y + placement.height / 2.0 + LABEL_FONT_SIZE_PX / 3.0,
                LABEL_FONT_SIZE_PX,
                parse_color(period.label_color(), FALLBACK_LABEL_COLOR),
                TextHAlign::Left,
            ));
        }
    }
}

/// Solid bar, with faded segments on approximate ends.
fn push_period_bar(frame: &mut RenderFrame, period: &TimePeriod, placement: &PeriodPlacement) {
    let fill = parse_color(period.fill_color(), FALLBACK_FILL_COLOR);
    let width = (placement.end_x - placement.start_x).max(MIN_BAR_WIDTH_PX);
    let fade = (width * APPROXIMATE_END_RATIO).min(APPROXIMATE_END_MAX_PX);

    let mut solid_start = placement.start_x;
    let mut solid_end = placement.start_x + width;
    if period.approximate_start() {
        frame.rects.push(RectPrimitive::new(
            solid_start,
            placement.top_y,
            fade,
            placement.height,
            fill.with_alpha(APPROXIMATE_END_ALPHA),
        ));
        solid_start += fade;
    }
    if period.approximate_end() {
        solid_end -= fade;
        frame.rects.push(RectPrimitive::new(
            solid_end,
            placement.top_y,
            fade,
            placement.height,
            fill.with_alpha(APPROXIMATE_END_ALPHA),
        ));
    }
    frame.rects.push(RectPrimitive::new(
        solid_start,
        placement.top_y,
        (solid_end - solid_start).max(0.0),
        placement.height,
        fill,
    ));
}
