//! Calendar arithmetic on naive (zone-less) instants.
//!
//! Years use astronomical numbering: year `0` exists and `-1` is 2 BC. The
//! grid never skips year zero; only its labels are suppressed (see
//! [`crate::core::grid_line_label`]).

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

use crate::core::Granularity;
use crate::error::{TimelineError, TimelineResult};

/// Moves `date` by `steps` units of `granularity`.
///
/// Every field finer than `granularity` is reset first, so the result is
/// always aligned to a unit boundary (millisecond is the exception: it is the
/// finest unit and is added as-is). Year-like units additionally floor the
/// year to the unit size, e.g. decade steps from 1997 land on 1990, 2000, ...
pub fn advance(
    date: NaiveDateTime,
    granularity: Granularity,
    steps: i64,
) -> TimelineResult<NaiveDateTime> {
    let out_of_range = || TimelineError::DateOutOfRange { granularity, steps };

    let advanced = match granularity {
        Granularity::Millennium | Granularity::Century | Granularity::Decade | Granularity::Year => {
            let unit = i64::from(granularity.years_per_unit().unwrap_or(1));
            steps
                .checked_mul(unit)
                .and_then(|delta| i64::from(date.year()).checked_add(delta))
                .and_then(|year| start_of_year(year.div_euclid(unit) * unit))
        }
        Granularity::Month => (i64::from(date.year()) * 12 + i64::from(date.month0()))
            .checked_add(steps)
            .and_then(start_of_month_index),
        Granularity::Day => shift(truncate(date, granularity), TimeDelta::try_days(steps)),
        Granularity::Hour => shift(truncate(date, granularity), TimeDelta::try_hours(steps)),
        Granularity::Minute => shift(truncate(date, granularity), TimeDelta::try_minutes(steps)),
        Granularity::Second => shift(truncate(date, granularity), TimeDelta::try_seconds(steps)),
        Granularity::Millisecond => shift(date, TimeDelta::try_milliseconds(steps)),
    };
    advanced.ok_or_else(out_of_range)
}

/// Natural calendar component of `date` for `granularity`.
///
/// Year-like units return the (astronomical) year; month is 1-based.
#[must_use]
pub fn value_at(date: NaiveDateTime, granularity: Granularity) -> i64 {
    match granularity {
        Granularity::Millennium | Granularity::Century | Granularity::Decade | Granularity::Year => {
            i64::from(date.year())
        }
        Granularity::Month => i64::from(date.month()),
        Granularity::Day => i64::from(date.day()),
        Granularity::Hour => i64::from(date.hour()),
        Granularity::Minute => i64::from(date.minute()),
        Granularity::Second => i64::from(date.second()),
        Granularity::Millisecond => i64::from(date.nanosecond() / 1_000_000),
    }
}

/// Number of days in `month` (1-based) of `year`; `0` for an invalid month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.saturating_add(1), 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(next) => u32::try_from((next - first).num_days()).unwrap_or(31),
        // December of the last representable year.
        None => 31,
    }
}

/// Resets every field finer than `granularity` to its epoch value.
#[must_use]
pub fn truncate(date: NaiveDateTime, granularity: Granularity) -> NaiveDateTime {
    let day = date.date();
    let truncated = match granularity {
        Granularity::Millennium | Granularity::Century | Granularity::Decade | Granularity::Year => {
            NaiveDate::from_ymd_opt(date.year(), 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        }
        Granularity::Month => {
            NaiveDate::from_ymd_opt(date.year(), date.month(), 1).and_then(|d| d.and_hms_opt(0, 0, 0))
        }
        Granularity::Day => day.and_hms_opt(0, 0, 0),
        Granularity::Hour => day.and_hms_opt(date.hour(), 0, 0),
        Granularity::Minute => day.and_hms_opt(date.hour(), date.minute(), 0),
        Granularity::Second => day.and_hms_opt(date.hour(), date.minute(), date.second()),
        Granularity::Millisecond => return date,
    };
    truncated.unwrap_or(date)
}

fn start_of_year(year: i64) -> Option<NaiveDateTime> {
    let year = i32::try_from(year).ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)
}

/// First instant of the month `year * 12 + month0`.
fn start_of_month_index(total_months: i64) -> Option<NaiveDateTime> {
    let year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let month = u32::try_from(total_months.rem_euclid(12) + 1).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
}

fn shift(date: NaiveDateTime, delta: Option<TimeDelta>) -> Option<NaiveDateTime> {
    date.checked_add_signed(delta?)
}
