use chrono::NaiveDateTime;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::calendar::advance;
use crate::core::date_format::timeline_date;
use crate::core::{Granularity, TimelineViewState};

/// Smallest spacing the grid walk uses, whatever the configured unit width.
pub const MIN_GRID_STEP_PX: f64 = 1.0;

/// Upper bound on lines produced by one build.
pub const MAX_GRID_LINES: usize = 1 << 16;

// Line indices beyond this are far outside any representable calendar range.
const MAX_LINE_INDEX: f64 = 9_007_199_254_740_992.0;

/// One granularity-unit boundary on the visible axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    #[serde(with = "timeline_date")]
    pub date: NaiveDateTime,
    pub x: f64,
}

impl GridLine {
    #[must_use]
    pub fn new(date: NaiveDateTime, x: f64) -> Self {
        Self { date, x }
    }
}

/// Grid lines for one frame, sorted ascending by `x`.
///
/// Always holds at least one line. Dates are strictly increasing along with
/// `x` and contiguous in the grid's granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    granularity: Granularity,
    step_px: f64,
    viewport_width: f64,
    lines: Vec<GridLine>,
}

impl TimeGrid {
    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Spacing between adjacent lines (the unit width, floored at 1px).
    #[must_use]
    pub fn step_px(&self) -> f64 {
        self.step_px
    }

    #[must_use]
    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    #[must_use]
    pub fn lines(&self) -> &[GridLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&GridLine> {
        self.lines.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&GridLine> {
        self.lines.last()
    }

    /// Line whose `x` is closest to `pixel_x`.
    #[must_use]
    pub fn nearest_line(&self, pixel_x: f64) -> Option<&GridLine> {
        self.lines
            .iter()
            .min_by_key(|line| OrderedFloat((line.x - pixel_x).abs()))
    }

    /// Lines whose `x` falls inside `[0, viewport_width]`.
    pub fn visible_lines(&self) -> impl Iterator<Item = &GridLine> + '_ {
        self.lines
            .iter()
            .filter(move |line| line.x >= 0.0 && line.x <= self.viewport_width)
    }
}

#[must_use]
pub fn effective_step_px(unit_px: f64) -> f64 {
    if unit_px.is_finite() {
        unit_px.max(MIN_GRID_STEP_PX)
    } else {
        MIN_GRID_STEP_PX
    }
}

fn line_index(offset_units: f64) -> f64 {
    offset_units.clamp(-MAX_LINE_INDEX, MAX_LINE_INDEX)
}

/// Builds the grid for a viewport `viewport_width` pixels wide.
///
/// Walks forward from the focus line until one line lies past the right edge
/// and backward until one line lies past the left edge. Those two overflow
/// lines let the date mapper interpolate periods that start or end
/// off-screen. A walk stops early if calendar arithmetic leaves the
/// representable range; if nothing at all could be produced (a focus far
/// beyond the calendar limits, for instance) the grid degrades to the single
/// focus line.
#[must_use]
pub fn build_grid(viewport_width: f64, state: &TimelineViewState) -> TimeGrid {
    let width = if viewport_width.is_finite() {
        viewport_width.max(0.0)
    } else {
        0.0
    };
    let granularity = state.granularity;
    let step = effective_step_px(state.unit_px);
    let focus_x = if state.focus_x.is_finite() {
        state.focus_x
    } else {
        0.0
    };

    let k_last = line_index((width - focus_x) / step).floor() as i64 + 1;
    let k_first = (line_index((-focus_x) / step).ceil() as i64 - 1)
        .max(k_last - (MAX_GRID_LINES as i64 - 1));

    let mut lines = Vec::with_capacity(usize::try_from(k_last - k_first + 1).unwrap_or(0));
    let mut push_step = |k: i64| match advance(state.focus_date, granularity, k) {
        Ok(date) => {
            lines.push(GridLine::new(date, focus_x + k as f64 * step));
            true
        }
        Err(err) => {
            warn!(error = %err, "grid walk stopped at calendar range limit");
            false
        }
    };

    for k in k_first.max(0)..=k_last {
        if !push_step(k) {
            break;
        }
    }
    let mut k = k_last.min(-1);
    while k >= k_first {
        if !push_step(k) {
            break;
        }
        k -= 1;
    }

    if lines.is_empty() {
        lines.push(GridLine::new(state.focus_date, focus_x));
    }
    lines.sort_by_key(|line| OrderedFloat(line.x));

    TimeGrid {
        granularity,
        step_px: step,
        viewport_width: width,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate, NaiveDateTime};

    use super::{GridLine, build_grid};
    use crate::core::{Granularity, TimelineViewState};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .expect("valid date")
    }

    #[test]
    fn year_grid_matches_reference_scenario() {
        let state = TimelineViewState::new(ymd(2000, 1, 1), 500.0, Granularity::Year, 100.0);
        let grid = build_grid(1000.0, &state);

        let find = |year: i32| -> Option<GridLine> {
            grid.lines().iter().copied().find(|line| line.date.year() == year)
        };
        assert_eq!(find(2000).map(|line| line.x), Some(500.0));
        assert_eq!(find(2001).map(|line| line.x), Some(600.0));
        assert_eq!(find(1999).map(|line| line.x), Some(400.0));
        assert_eq!(grid.first().map(|line| line.x), Some(-100.0));
        assert_eq!(grid.last().map(|line| line.x), Some(1100.0));
        assert_eq!(grid.len(), 13);
    }

    #[test]
    fn sub_pixel_unit_width_is_floored_to_one_pixel() {
        let state = TimelineViewState::new(ymd(2000, 1, 1), 5.0, Granularity::Day, 0.1);
        let grid = build_grid(10.0, &state);
        assert_eq!(grid.step_px(), 1.0);
        assert_eq!(grid.len(), 13);
    }

    #[test]
    fn focus_far_outside_viewport_still_covers_it() {
        let state = TimelineViewState::new(ymd(2000, 1, 1), 50_000.0, Granularity::Month, 50.0);
        let grid = build_grid(800.0, &state);
        let first = grid.first().expect("first");
        let last = grid.last().expect("last");
        assert!(first.x < 0.0);
        assert!(last.x > 800.0);
        assert!(grid.len() <= 800 / 50 + 3);
    }

    #[test]
    fn grid_stops_at_calendar_limits_without_panicking() {
        let state = TimelineViewState::new(ymd(262_000, 1, 1), 0.0, Granularity::Millennium, 50.0);
        let grid = build_grid(1000.0, &state);
        assert!(!grid.is_empty());
        for pair in grid.lines().windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn extreme_finite_focus_degrades_to_the_focus_line() {
        for focus_x in [1e300, -1e300, f64::MAX, f64::MIN] {
            let state = TimelineViewState::new(ymd(2000, 1, 1), focus_x, Granularity::Year, 100.0);
            let grid = build_grid(1000.0, &state);
            assert_eq!(grid.len(), 1);
            assert_eq!(grid.first().map(|line| line.x), Some(focus_x));
        }
    }

    #[test]
    fn zero_width_viewport_keeps_the_bracketing_lines() {
        let state = TimelineViewState::new(ymd(2000, 1, 1), 0.0, Granularity::Year, 100.0);
        let grid = build_grid(0.0, &state);
        assert!(grid.len() >= 2);
    }
}
