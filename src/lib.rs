//! timeline-rs: zoomable timeline layout engine.
//!
//! The crate maps calendar dates from millennia down to milliseconds onto a
//! pixel axis, switches granularity as the user zooms, and packs labeled
//! date-range bars into non-overlapping rows per lane. Drawing is delegated
//! to a [`render::Renderer`] that receives backend-agnostic primitives.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
