use thiserror::Error;

use crate::core::Granularity;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid granularity `{0}`: expected one of millennium, century, decade, year, month, day, hour, minute, second, millisecond")]
    InvalidGranularity(String),

    #[error("malformed date `{input}`: {reason}")]
    MalformedDate { input: String, reason: String },

    #[error("date arithmetic out of range: {steps} {granularity} step(s)")]
    DateOutOfRange { granularity: Granularity, steps: i64 },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid timeline document: {0}")]
    Document(String),
}
