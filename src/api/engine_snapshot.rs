use serde::{Deserialize, Serialize};

use crate::core::{GridLine, LaneGeometry, TimelineViewState, Viewport};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub title: String,
    pub viewport: Viewport,
    pub view: TimelineViewState,
    pub grid: Vec<GridLine>,
    pub lanes: Vec<LaneSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSnapshot {
    pub name: String,
    pub hidden: bool,
    pub geometry: LaneGeometry,
}
