use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    DateToPixelMapper, Lane, LaneGeometry, PeriodBox, TextMeasurer, TimeGrid, TimePeriod,
    lane_height, pack_rows,
};
use crate::error::{TimelineError, TimelineResult};
use crate::render::Renderer;

use super::{LaneLayoutConfig, TimelineEngine};

/// Screen geometry of one period after a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodPlacement {
    pub period_index: usize,
    pub row: usize,
    pub start_x: f64,
    pub end_x: f64,
    /// Reserved width, `max(bar width, padded label width)`.
    pub box_width: f64,
    pub top_y: f64,
    pub height: f64,
}

impl PeriodPlacement {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.start_x
            && x <= self.start_x + self.box_width
            && y >= self.top_y
            && y <= self.top_y + self.height
    }
}

/// Screen geometry of one visible lane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneLayout {
    pub lane_index: usize,
    pub top_y: f64,
    pub bottom_y: f64,
    pub height: f64,
    pub row_count: usize,
    pub row_height: f64,
    pub periods: Vec<PeriodPlacement>,
}

/// Output of [`TimelineEngine::layout_lanes`]. Hidden lanes are absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineLayout {
    /// Y of the bottom edge of the lowest lane, before vertical scrolling.
    pub baseline_y: f64,
    pub total_height: f64,
    pub lanes: Vec<LaneLayout>,
}

impl TimelineLayout {
    #[must_use]
    pub fn lane(&self, lane_index: usize) -> Option<&LaneLayout> {
        self.lanes.iter().find(|lane| lane.lane_index == lane_index)
    }
}

pub(super) struct LaneLayoutContext<'a> {
    pub(super) grid: &'a TimeGrid,
    pub(super) mapper: DateToPixelMapper,
    pub(super) measurer: &'a dyn TextMeasurer,
    pub(super) config: LaneLayoutConfig,
    pub(super) baseline_y: f64,
    pub(super) vertical_offset: f64,
}

pub(super) struct LaneLayoutCoordinator;

impl LaneLayoutCoordinator {
    /// Packs every visible lane and stacks lanes upwards from the baseline.
    pub(super) fn layout(lanes: &mut [Lane], context: &LaneLayoutContext<'_>) -> TimelineLayout {
        let config = context.config;
        let mut stacked = 0.0;
        let mut layouts = Vec::with_capacity(lanes.len());

        for (lane_index, lane) in lanes.iter_mut().enumerate() {
            if lane.is_hidden() {
                lane.set_geometry(LaneGeometry::default());
                continue;
            }

            let boxes: Vec<PeriodBox> = lane
                .periods()
                .iter()
                .map(|period| period_box(period, context))
                .collect();
            let packing = pack_rows(&boxes, config.min_inline_gap_px);
            let row_height = boxes.first().map_or(0.0, |first| first.height);
            let height = lane_height(
                packing.row_count(),
                row_height,
                config.lane_margin_px,
                config.min_lane_height_px,
            );

            let bottom_y = context.baseline_y + context.vertical_offset - stacked;
            let top_y = bottom_y - height;
            stacked += height;

            let periods = boxes
                .iter()
                .zip(&packing.row_of)
                .enumerate()
                .map(|(period_index, (period_box, &row))| {
                    let row_bottom =
                        bottom_y - config.lane_margin_px - row as f64 * row_height;
                    let bar_height = (period_box.height - config.row_gap_px).max(0.0);
                    PeriodPlacement {
                        period_index,
                        row,
                        start_x: period_box.start_x,
                        end_x: period_box.end_x,
                        box_width: period_box.box_width(),
                        top_y: row_bottom - config.row_gap_px / 2.0 - bar_height,
                        height: bar_height,
                    }
                })
                .collect();

            lane.set_geometry(LaneGeometry {
                row_of: packing.row_of.clone(),
                row_count: packing.row_count(),
                row_height,
                height,
            });
            layouts.push(LaneLayout {
                lane_index,
                top_y,
                bottom_y,
                height,
                row_count: packing.row_count(),
                row_height,
                periods,
            });
        }

        trace!(
            visible_lanes = layouts.len(),
            total_height = stacked,
            "lane layout pass"
        );
        TimelineLayout {
            baseline_y: context.baseline_y,
            total_height: stacked,
            lanes: layouts,
        }
    }
}

fn period_box(period: &TimePeriod, context: &LaneLayoutContext<'_>) -> PeriodBox {
    let config = context.config;
    let start_x = context.mapper.to_pixel_x(context.grid, period.start());
    let end_x = context.mapper.to_pixel_x(context.grid, period.end());
    let label = context.measurer.measure(period.name());
    let label_width = label.width.max(0.0) + config.label_padding_px * 2.0;
    let height = config.bar_height_px.max(label.height) + config.row_gap_px;
    PeriodBox::new(start_x, end_x, label_width, height)
}

impl<R: Renderer> TimelineEngine<R> {
    /// Recomputes row assignment and geometry of every lane.
    ///
    /// Uses the current grid; call after `rescale`/`pan_*` and before drawing.
    pub fn layout_lanes(&mut self) -> &TimelineLayout {
        let context = LaneLayoutContext {
            grid: &self.grid,
            mapper: self.mapper,
            measurer: self.text_measurer.as_ref(),
            config: self.config.lane_layout,
            baseline_y: self.baseline_y(),
            vertical_offset: self.view.vertical_offset(),
        };
        self.layout = LaneLayoutCoordinator::layout(&mut self.lanes, &context);
        &self.layout
    }

    /// Y of the lane baseline, directly above the time axis.
    #[must_use]
    pub fn baseline_y(&self) -> f64 {
        (self.viewport.height_px() - self.config.time_axis_height_px).max(0.0)
    }

    /// Geometry of the most recent layout pass.
    #[must_use]
    pub fn layout(&self) -> &TimelineLayout {
        &self.layout
    }

    /// `(lane index, period index)` of the period box under the point, if any.
    #[must_use]
    pub fn period_at(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        self.layout.lanes.iter().find_map(|lane| {
            lane.periods
                .iter()
                .find(|placement| placement.contains(x, y))
                .map(|placement| (lane.lane_index, placement.period_index))
        })
    }

    pub fn set_lane_hidden(&mut self, lane_index: usize, hidden: bool) -> TimelineResult<()> {
        let lane = self.lanes.get_mut(lane_index).ok_or_else(|| {
            TimelineError::InvalidInput(format!("lane index {lane_index} out of range"))
        })?;
        lane.set_hidden(hidden);
        Ok(())
    }

    pub fn set_period_description(
        &mut self,
        lane_index: usize,
        period_index: usize,
        description: impl Into<String>,
    ) -> TimelineResult<()> {
        let period = self
            .lanes
            .get_mut(lane_index)
            .and_then(|lane| lane.period_mut(period_index))
            .ok_or_else(|| {
                TimelineError::InvalidInput(format!(
                    "period {period_index} of lane {lane_index} out of range"
                ))
            })?;
        period.set_description(description);
        Ok(())
    }
}
