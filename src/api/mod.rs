mod engine;
mod engine_accessors;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod interaction_controller;
mod json_contract;
mod lane_layout_coordinator;
mod render_coordinator;
mod render_frame_builder;
mod time_scale_controller;

pub use engine::TimelineEngine;
pub use engine_config::{LaneLayoutConfig, TimelineEngineConfig};
pub use engine_snapshot::{LaneSnapshot, TimelineSnapshot};
pub use json_contract::{TIMELINE_SNAPSHOT_JSON_SCHEMA_V1, TimelineSnapshotJsonContractV1};
pub use lane_layout_coordinator::{LaneLayout, PeriodPlacement, TimelineLayout};
