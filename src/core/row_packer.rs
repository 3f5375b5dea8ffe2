use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Pixel footprint of one period inside a lane.
///
/// The reserved box is at least as wide as the label, so a short range with
/// a long name still claims room for its text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodBox {
    pub start_x: f64,
    pub end_x: f64,
    pub label_width: f64,
    pub height: f64,
}

impl PeriodBox {
    #[must_use]
    pub fn new(start_x: f64, end_x: f64, label_width: f64, height: f64) -> Self {
        Self {
            start_x,
            end_x,
            label_width,
            height,
        }
    }

    #[must_use]
    pub fn bar_width(&self) -> f64 {
        (self.end_x - self.start_x).max(0.0)
    }

    /// `max(bar width, label width)`.
    #[must_use]
    pub fn box_width(&self) -> f64 {
        self.bar_width().max(self.label_width.max(0.0))
    }

    #[must_use]
    pub fn box_end_x(&self) -> f64 {
        self.start_x + self.box_width()
    }
}

/// Periods placed in one row, in placement order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedRow {
    pub periods: SmallVec<[usize; 8]>,
    pub last_end_x: f64,
}

/// Result of [`pack_rows`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowPacking {
    pub rows: Vec<PackedRow>,
    /// Row index of each input box, by input position.
    pub row_of: Vec<usize>,
}

impl RowPacking {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Greedy first-fit row assignment.
///
/// Boxes are taken in the order given (not re-sorted by start). Each goes
/// into the lowest row whose last box ends at or before its start, less
/// `min_gap_px`; otherwise a new row is opened. Linear in rows per box and
/// order dependent: it does not minimise the row count.
#[must_use]
pub fn pack_rows(boxes: &[PeriodBox], min_gap_px: f64) -> RowPacking {
    let min_gap_px = if min_gap_px.is_finite() {
        min_gap_px.max(0.0)
    } else {
        0.0
    };
    let mut packing = RowPacking {
        rows: Vec::new(),
        row_of: Vec::with_capacity(boxes.len()),
    };

    for (index, period) in boxes.iter().enumerate() {
        let row = allocate_row(&mut packing.rows, period.start_x, period.box_end_x(), min_gap_px);
        packing.rows[row].periods.push(index);
        packing.row_of.push(row);
    }

    packing
}

fn allocate_row(rows: &mut Vec<PackedRow>, start_x: f64, end_x: f64, min_gap: f64) -> usize {
    for (row, packed) in rows.iter_mut().enumerate() {
        if start_x >= packed.last_end_x + min_gap {
            packed.last_end_x = end_x;
            return row;
        }
    }
    rows.push(PackedRow {
        periods: SmallVec::new(),
        last_end_x: end_x,
    });
    rows.len() - 1
}

/// `max(min_height, 2 * margin + rows * row_height)`.
#[must_use]
pub fn lane_height(row_count: usize, row_height: f64, margin: f64, min_height: f64) -> f64 {
    (margin * 2.0 + row_count as f64 * row_height).max(min_height)
}
