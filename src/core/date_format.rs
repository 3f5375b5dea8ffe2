//! Minimal date-string codec used by timeline documents.
//!
//! Format: `[-]YYYY-MM-DD[-HH-MM-SS-MS]`. A leading `-` negates the year
//! (astronomical numbering, so `-0001` is 2 BC). Either three or seven
//! dash-separated numeric fields are accepted.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{TimelineError, TimelineResult};

pub fn parse_timeline_date(input: &str) -> TimelineResult<NaiveDateTime> {
    let malformed = |reason: &str| TimelineError::MalformedDate {
        input: input.to_owned(),
        reason: reason.to_owned(),
    };

    let trimmed = input.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let mut fields = Vec::with_capacity(7);
    for part in body.split('-') {
        if part.is_empty() || !part.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(malformed("every field must be a non-empty run of digits"));
        }
        let value: u32 = part
            .parse()
            .map_err(|_| malformed("field does not fit in 32 bits"))?;
        fields.push(value);
    }
    if fields.len() != 3 && fields.len() != 7 {
        return Err(malformed("expected YYYY-MM-DD or YYYY-MM-DD-HH-MM-SS-MS"));
    }

    let year = i32::try_from(fields[0]).map_err(|_| malformed("year out of range"))?;
    let year = if negative { -year } else { year };
    let date = NaiveDate::from_ymd_opt(year, fields[1], fields[2])
        .ok_or_else(|| malformed("year/month/day is not a valid calendar date"))?;

    let (hour, minute, second, millis) = match fields.as_slice() {
        [_, _, _, hour, minute, second, millis] => (*hour, *minute, *second, *millis),
        _ => (0, 0, 0, 0),
    };
    if millis > 999 {
        return Err(malformed("milliseconds must be in 0..=999"));
    }
    date.and_hms_milli_opt(hour, minute, second, millis)
        .ok_or_else(|| malformed("time of day out of range"))
}

/// Formats `date` in the document format.
///
/// Midnight instants use the short `YYYY-MM-DD` form.
#[must_use]
pub fn format_timeline_date(date: NaiveDateTime) -> String {
    let sign = if date.year() < 0 { "-" } else { "" };
    let short = format!(
        "{sign}{:04}-{:02}-{:02}",
        date.year().unsigned_abs(),
        date.month(),
        date.day()
    );
    let millis = date.nanosecond() / 1_000_000;
    if date.hour() == 0 && date.minute() == 0 && date.second() == 0 && millis == 0 {
        return short;
    }
    format!(
        "{short}-{:02}-{:02}-{:02}-{:03}",
        date.hour(),
        date.minute(),
        date.second(),
        millis
    )
}

/// Serde adapter for `#[serde(with = "timeline_date")]` fields.
pub mod timeline_date {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{format_timeline_date, parse_timeline_date};

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timeline_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timeline_date(&raw).map_err(serde::de::Error::custom)
    }
}
