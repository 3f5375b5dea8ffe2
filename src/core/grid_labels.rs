use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::core::Granularity;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Axis label for a grid line.
///
/// Below decade granularity, lines in calendar year zero get an empty label;
/// the line itself is still drawn.
#[must_use]
pub fn grid_line_label(date: NaiveDateTime, granularity: Granularity) -> String {
    if granularity > Granularity::Decade && date.year() == 0 {
        return String::new();
    }

    match granularity {
        Granularity::Millennium | Granularity::Century | Granularity::Decade | Granularity::Year => {
            date.year().to_string()
        }
        Granularity::Month => MONTH_ABBREVIATIONS[date.month0() as usize].to_owned(),
        Granularity::Day => date.day().to_string(),
        Granularity::Hour => format!("{:02}:00", date.hour()),
        Granularity::Minute => format!("{:02}:{:02}", date.hour(), date.minute()),
        Granularity::Second => format!(
            "{:02}:{:02}:{:02}",
            date.hour(),
            date.minute(),
            date.second()
        ),
        Granularity::Millisecond => format!(
            "{:02}.{:03}",
            date.second(),
            date.nanosecond() / 1_000_000
        ),
    }
}
