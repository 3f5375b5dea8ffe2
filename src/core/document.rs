use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::date_format::timeline_date;
use crate::core::{Granularity, Lane, TimelineViewState};
use crate::error::{TimelineError, TimelineResult};

/// Persisted timeline: initial view plus lanes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineDocument {
    pub title: String,
    pub granularity: Granularity,
    pub unit_px: f64,
    #[serde(with = "timeline_date")]
    pub focus_date: NaiveDateTime,
    pub focus_x: f64,
    #[serde(default)]
    pub lanes: Vec<Lane>,
}

impl TimelineDocument {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        granularity: Granularity,
        unit_px: f64,
        focus_date: NaiveDateTime,
        focus_x: f64,
    ) -> Self {
        Self {
            title: title.into(),
            granularity,
            unit_px,
            focus_date,
            focus_x,
            lanes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_lane(mut self, lane: Lane) -> Self {
        self.lanes.push(lane);
        self
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let document: Self = serde_json::from_str(input)
            .map_err(|e| TimelineError::Document(format!("failed to parse timeline json: {e}")))?;
        if !document.focus_x.is_finite() {
            return Err(TimelineError::Document(
                "focus_x must be finite".to_owned(),
            ));
        }
        debug!(
            title = %document.title,
            lanes = document.lanes.len(),
            granularity = %document.granularity,
            "loaded timeline document"
        );
        Ok(document)
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TimelineError::Document(format!("failed to serialize timeline json: {e}")))
    }

    /// Initial view state; `unit_px` is clamped later by the engine.
    #[must_use]
    pub fn view_state(&self) -> TimelineViewState {
        TimelineViewState::new(self.focus_date, self.focus_x, self.granularity, self.unit_px)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::TimelineDocument;
    use crate::core::Granularity;
    use crate::error::TimelineError;

    const SAMPLE: &str = r##"{
        "title": "Wars",
        "granularity": "decade",
        "unit_px": 80.0,
        "focus_date": "1900-01-01",
        "focus_x": 400.0,
        "lanes": [
            {
                "name": "Europe",
                "color": "#eeeeee",
                "periods": [
                    { "name": "WWI", "start": "1914-07-28", "end": "1918-11-11" },
                    {
                        "name": "Punic",
                        "start": "-0264-01-01",
                        "end": "-0146-01-01",
                        "approximate_start": true,
                        "description": "Rome vs Carthage"
                    }
                ]
            },
            { "name": "Asia", "hidden": true }
        ]
    }"##;

    #[test]
    fn parses_sample_document() {
        let document = TimelineDocument::from_json_str(SAMPLE).expect("parse");
        assert_eq!(document.granularity, Granularity::Decade);
        assert_eq!(document.lanes.len(), 2);
        let punic = &document.lanes[0].periods()[1];
        assert_eq!(punic.start().year(), -264);
        assert!(punic.approximate_start());
        assert!(!punic.approximate_end());
        assert!(document.lanes[1].is_hidden());
        assert!(document.lanes[1].periods().is_empty());
    }

    #[test]
    fn json_round_trip_preserves_document() {
        let document = TimelineDocument::from_json_str(SAMPLE).expect("parse");
        let json = document.to_json_pretty().expect("serialize");
        let reparsed = TimelineDocument::from_json_str(&json).expect("reparse");
        assert_eq!(document, reparsed);
    }

    #[test]
    fn bad_granularity_and_dates_are_reported() {
        let bad_scale = SAMPLE.replace("\"decade\"", "\"eon\"");
        let err = TimelineDocument::from_json_str(&bad_scale).expect_err("must fail");
        assert!(matches!(err, TimelineError::Document(_)));
        assert!(err.to_string().contains("eon"));

        let bad_date = SAMPLE.replace("1914-07-28", "1914/07/28");
        let err = TimelineDocument::from_json_str(&bad_date).expect_err("must fail");
        assert!(err.to_string().contains("1914/07/28"));
    }
}
