use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Calendar unit displayed between two adjacent grid lines.
///
/// Variants are declared coarsest first, so the derived `Ord` reads as
/// "coarser < finer".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Granularity {
    Millennium,
    Century,
    Decade,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl Granularity {
    pub const ALL: [Granularity; 10] = [
        Granularity::Millennium,
        Granularity::Century,
        Granularity::Decade,
        Granularity::Year,
        Granularity::Month,
        Granularity::Day,
        Granularity::Hour,
        Granularity::Minute,
        Granularity::Second,
        Granularity::Millisecond,
    ];

    /// Position in [`Granularity::ALL`], used to index per-granularity tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn coarser(self) -> Option<Self> {
        self.index()
            .checked_sub(1)
            .map(|index| Self::ALL[index])
    }

    #[must_use]
    pub fn finer(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Years spanned by one unit for millennium, century, decade and year.
    #[must_use]
    pub const fn years_per_unit(self) -> Option<i32> {
        match self {
            Self::Millennium => Some(1000),
            Self::Century => Some(100),
            Self::Decade => Some(10),
            Self::Year => Some(1),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_year_like(self) -> bool {
        self.years_per_unit().is_some()
    }

    /// Fixed unit length for the uniform sub-day granularities.
    #[must_use]
    pub const fn fixed_millis(self) -> Option<i64> {
        match self {
            Self::Hour => Some(3_600_000),
            Self::Minute => Some(60_000),
            Self::Second => Some(1_000),
            Self::Millisecond => Some(1),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Millennium => "millennium",
            Self::Century => "century",
            Self::Decade => "decade",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = TimelineError;

    /// Parses a granularity name. `date` is accepted as an alias of `day`.
    fn from_str(value: &str) -> TimelineResult<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized == "date" {
            return Ok(Self::Day);
        }
        Self::ALL
            .into_iter()
            .find(|granularity| granularity.name() == normalized)
            .ok_or_else(|| TimelineError::InvalidGranularity(value.to_owned()))
    }
}

impl TryFrom<String> for Granularity {
    type Error = TimelineError;

    fn try_from(value: String) -> TimelineResult<Self> {
        value.parse()
    }
}

impl From<Granularity> for String {
    fn from(value: Granularity) -> Self {
        value.name().to_owned()
    }
}
