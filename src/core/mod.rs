pub mod calendar;
pub mod date_format;
pub mod date_mapper;
pub mod document;
pub mod granularity;
pub mod grid;
pub mod grid_labels;
pub mod lane;
pub mod period;
pub mod row_packer;
pub mod scale_transition;
pub mod text_measure;
pub mod types;
pub mod view_state;

pub use calendar::{advance, days_in_month, value_at};
pub use date_format::{format_timeline_date, parse_timeline_date};
pub use date_mapper::{DEFAULT_OVERFLOW_PX, DateToPixelMapper};
pub use document::TimelineDocument;
pub use granularity::Granularity;
pub use grid::{GridLine, TimeGrid, build_grid};
pub use grid_labels::grid_line_label;
pub use lane::{Lane, LaneGeometry};
pub use period::TimePeriod;
pub use row_packer::{PackedRow, PeriodBox, RowPacking, lane_height, pack_rows};
pub use scale_transition::{
    GranularityBounds, ScaleTransition, ScaleTransitionConfig, ScaleTransitionController,
};
pub use text_measure::{FixedAdvanceTextMeasurer, TextExtent, TextMeasurer};
pub use types::Viewport;
pub use view_state::TimelineViewState;
