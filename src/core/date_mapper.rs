use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::core::calendar::{days_in_month, truncate};
use crate::core::{Granularity, GridLine, TimeGrid};

/// Mapped positions are clamped this far beyond either viewport edge.
pub const DEFAULT_OVERFLOW_PX: f64 = 1000.0;

/// Day-of-year divisor used at year-like granularities.
///
/// Leap years are not special-cased: 31 December of a leap year maps onto
/// the following 1 January. Positions are pixel-stable across years this way.
pub const DAYS_PER_YEAR_APPROX: f64 = 365.0;

/// Maps calendar instants onto the pixel axis described by a [`TimeGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateToPixelMapper {
    overflow_px: f64,
}

impl Default for DateToPixelMapper {
    fn default() -> Self {
        Self {
            overflow_px: DEFAULT_OVERFLOW_PX,
        }
    }
}

impl DateToPixelMapper {
    #[must_use]
    pub fn new(overflow_px: f64) -> Self {
        let overflow_px = if overflow_px.is_finite() {
            overflow_px.max(0.0)
        } else {
            DEFAULT_OVERFLOW_PX
        };
        Self { overflow_px }
    }

    #[must_use]
    pub fn overflow_px(&self) -> f64 {
        self.overflow_px
    }

    /// Fractional pixel position of `date`.
    ///
    /// Whole units are counted from the first grid line and the remainder is
    /// interpolated inside the unit:
    /// - year-like: day of year over a fixed 365-day year, with pixels per
    ///   year taken from the grid's end-to-end span
    /// - month: day (plus hour) over the length of that specific month
    /// - day: hour over 24
    /// - hour: minute over 60
    /// - minute, second, millisecond: elapsed milliseconds over the unit length
    #[must_use]
    pub fn to_pixel_x(&self, grid: &TimeGrid, date: NaiveDateTime) -> f64 {
        let Some(anchor) = grid.first().copied() else {
            return 0.0;
        };
        let step = grid.step_px();
        let granularity = grid.granularity();

        let raw = match granularity {
            Granularity::Millennium
            | Granularity::Century
            | Granularity::Decade
            | Granularity::Year => year_position(grid, anchor, date),
            Granularity::Month => {
                let months = month_index(date) - month_index(anchor.date);
                let month_days = f64::from(days_in_month(date.year(), date.month()).max(1));
                let within = (f64::from(date.day0()) + f64::from(date.hour()) / 24.0) / month_days;
                anchor.x + (months as f64 + within) * step
            }
            Granularity::Day => {
                let days = (date.date() - anchor.date.date()).num_days();
                anchor.x + (days as f64 + f64::from(date.hour()) / 24.0) * step
            }
            Granularity::Hour => {
                let hours = (truncate(date, Granularity::Hour) - anchor.date).num_hours();
                anchor.x + (hours as f64 + f64::from(date.minute()) / 60.0) * step
            }
            Granularity::Minute | Granularity::Second | Granularity::Millisecond => {
                let elapsed_ms = (date - anchor.date).num_milliseconds() as f64;
                let unit_ms = granularity.fixed_millis().unwrap_or(1) as f64;
                anchor.x + elapsed_ms / unit_ms * step
            }
        };

        self.clamp_to_overflow(grid, raw)
    }

    /// Inverse of [`Self::to_pixel_x`], linear in elapsed time between the
    /// two grid lines bracketing `pixel_x` (or the outermost pair when
    /// `pixel_x` lies outside the grid).
    #[must_use]
    pub fn to_date(&self, grid: &TimeGrid, pixel_x: f64) -> Option<NaiveDateTime> {
        let lines = grid.lines();
        match lines {
            [] => None,
            [only] => Some(only.date),
            _ => {
                let upper = lines
                    .partition_point(|line| line.x <= pixel_x)
                    .clamp(1, lines.len() - 1);
                let (lo, hi) = (lines[upper - 1], lines[upper]);
                let span_px = hi.x - lo.x;
                if span_px <= 0.0 || !pixel_x.is_finite() {
                    return Some(lo.date);
                }
                let span_ms = (hi.date - lo.date).num_milliseconds() as f64;
                let offset_ms = ((pixel_x - lo.x) / span_px * span_ms).round();
                if !offset_ms.is_finite() || offset_ms.abs() > i64::MAX as f64 {
                    return None;
                }
                lo.date
                    .checked_add_signed(TimeDelta::try_milliseconds(offset_ms as i64)?)
            }
        }
    }

    fn clamp_to_overflow(&self, grid: &TimeGrid, raw: f64) -> f64 {
        // Deserialized mappers bypass `new`, so a negative band is read as zero.
        let overflow = self.overflow_px.max(0.0);
        let lower = -overflow;
        let upper = grid.viewport_width() + overflow;
        if raw.is_nan() {
            return lower;
        }
        raw.clamp(lower, upper)
    }
}

fn month_index(date: NaiveDateTime) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn year_position(grid: &TimeGrid, anchor: GridLine, date: NaiveDateTime) -> f64 {
    let first_year = anchor.date.year();
    let px_per_year = match grid.last() {
        Some(last) if last.date.year() != first_year => {
            (last.x - anchor.x) / f64::from(last.date.year() - first_year)
        }
        _ => {
            let years = grid.granularity().years_per_unit().unwrap_or(1);
            grid.step_px() / f64::from(years)
        }
    };
    let within = f64::from(date.ordinal0()) / DAYS_PER_YEAR_APPROX;
    anchor.x + (f64::from(date.year() - first_year) + within) * px_per_year
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{NaiveDate, NaiveDateTime};

    use super::DateToPixelMapper;
    use crate::core::{Granularity, TimelineViewState, build_grid};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|day| day.and_hms_opt(h, min, 0))
            .expect("valid date")
    }

    #[test]
    fn year_scale_interpolates_by_day_of_year() {
        let state = TimelineViewState::new(at(2000, 1, 1, 0, 0), 500.0, Granularity::Year, 100.0);
        let grid = build_grid(1000.0, &state);
        let mapper = DateToPixelMapper::default();

        assert_abs_diff_eq!(mapper.to_pixel_x(&grid, at(2000, 1, 1, 0, 0)), 500.0);
        let start = mapper.to_pixel_x(&grid, at(1999, 6, 1, 0, 0));
        let end = mapper.to_pixel_x(&grid, at(2000, 6, 1, 0, 0));
        assert_abs_diff_eq!(start, 400.0 + 151.0 / 365.0 * 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(end, 500.0 + 152.0 / 365.0 * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn decade_scale_uses_grid_span_per_year() {
        let state = TimelineViewState::new(at(1990, 1, 1, 0, 0), 100.0, Granularity::Decade, 50.0);
        let grid = build_grid(500.0, &state);
        let mapper = DateToPixelMapper::default();
        assert_abs_diff_eq!(mapper.to_pixel_x(&grid, at(1995, 1, 1, 0, 0)), 125.0, epsilon = 1e-9);
    }

    #[test]
    fn month_scale_respects_month_length() {
        let state = TimelineViewState::new(at(2001, 2, 1, 0, 0), 0.0, Granularity::Month, 56.0);
        let grid = build_grid(600.0, &state);
        let mapper = DateToPixelMapper::default();
        // 15 February 2001 is half-way through a 28 day month.
        assert_abs_diff_eq!(mapper.to_pixel_x(&grid, at(2001, 2, 15, 0, 0)), 28.0, epsilon = 1e-9);
        // 16 March 2001 12:00 is 15.5 days into a 31 day month.
        assert_abs_diff_eq!(
            mapper.to_pixel_x(&grid, at(2001, 3, 16, 12, 0)),
            56.0 + 15.5 / 31.0 * 56.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn day_and_hour_scales_use_field_fractions() {
        let mapper = DateToPixelMapper::default();

        let day_state = TimelineViewState::new(at(2020, 5, 1, 0, 0), 0.0, Granularity::Day, 48.0);
        let day_grid = build_grid(480.0, &day_state);
        assert_abs_diff_eq!(mapper.to_pixel_x(&day_grid, at(2020, 5, 3, 6, 30)), 108.0, epsilon = 1e-9);

        let hour_state = TimelineViewState::new(at(2020, 5, 1, 10, 0), 0.0, Granularity::Hour, 60.0);
        let hour_grid = build_grid(600.0, &hour_state);
        assert_abs_diff_eq!(mapper.to_pixel_x(&hour_grid, at(2020, 5, 1, 11, 15)), 75.0, epsilon = 1e-9);
    }

    #[test]
    fn minute_scale_uses_elapsed_time() {
        let state = TimelineViewState::new(at(2020, 5, 1, 10, 0), 0.0, Granularity::Minute, 20.0);
        let grid = build_grid(400.0, &state);
        let mapper = DateToPixelMapper::default();
        let date = NaiveDate::from_ymd_opt(2020, 5, 1)
            .and_then(|day| day.and_hms_milli_opt(10, 3, 30, 0))
            .expect("valid date");
        assert_abs_diff_eq!(mapper.to_pixel_x(&grid, date), 70.0, epsilon = 1e-9);
    }

    #[test]
    fn far_away_dates_are_clamped_to_overflow_band() {
        let state = TimelineViewState::new(at(2000, 1, 1, 0, 0), 500.0, Granularity::Day, 50.0);
        let grid = build_grid(1000.0, &state);
        let mapper = DateToPixelMapper::default();
        assert_eq!(mapper.to_pixel_x(&grid, at(-5000, 1, 1, 0, 0)), -1000.0);
        assert_eq!(mapper.to_pixel_x(&grid, at(9000, 1, 1, 0, 0)), 2000.0);
    }

    #[test]
    fn to_date_inverts_uniform_scales() {
        let state = TimelineViewState::new(at(2020, 5, 1, 0, 0), 0.0, Granularity::Hour, 60.0);
        let grid = build_grid(600.0, &state);
        let mapper = DateToPixelMapper::default();
        let date = at(2020, 5, 1, 3, 30);
        let x = mapper.to_pixel_x(&grid, date);
        assert_eq!(mapper.to_date(&grid, x), Some(date));
    }

    #[test]
    fn negative_deserialized_overflow_clamps_to_the_viewport() {
        let mapper: DateToPixelMapper =
            serde_json::from_str(r#"{ "overflow_px": -50.0 }"#).expect("deserialize");
        let state = TimelineViewState::new(at(2000, 1, 1, 0, 0), 500.0, Granularity::Year, 100.0);
        let grid = build_grid(1000.0, &state);

        assert_eq!(mapper.to_pixel_x(&grid, at(1000, 1, 1, 0, 0)), 0.0);
        assert_eq!(mapper.to_pixel_x(&grid, at(3000, 1, 1, 0, 0)), 1000.0);
        assert_eq!(DateToPixelMapper::new(-50.0).overflow_px(), 0.0);
    }
}
