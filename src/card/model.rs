//! Core data types for card analysis.
//!
//! Fragments come straight from the OCR provider response; everything else
//! is derived locally during a single analysis pass. Nothing here persists
//! between calls.

use serde::Serialize;

/// Cards are a fixed 5x5 grid.
pub const GRID_SIZE: usize = 5;

/// Row of the free-space cell at the center of the card.
pub const FREE_ROW: usize = 2;
/// Column of the free-space cell at the center of the card.
pub const FREE_COL: usize = 2;

/// Column header letters in board order.
pub const COLUMN_LETTERS: [char; GRID_SIZE] = ['B', 'I', 'N', 'G', 'O'];

/// Inclusive number range owned by each column, indexed by column.
pub const COLUMN_RANGES: [(u32, u32); GRID_SIZE] =
    [(1, 15), (16, 30), (31, 45), (46, 60), (61, 75)];

/// Returns true if `value` falls inside the range owned by column `col`.
pub fn in_column_range(value: u32, col: usize) -> bool {
    let (lo, hi) = COLUMN_RANGES[col];
    value >= lo && value <= hi
}

/// A point in image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// One OCR-detected text span with confidence and a bounding polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub text: String,
    /// Provider confidence in [0, 1].
    pub confidence: f32,
    /// Polygon vertices in image coordinates (usually 4).
    pub polygon: Vec<Point>,
}

impl Fragment {
    pub fn new(text: impl Into<String>, confidence: f32, polygon: Vec<Point>) -> Self {
        Self {
            text: text.into(),
            confidence,
            polygon,
        }
    }

    /// Axis-aligned bounding box over the polygon: (min_x, min_y, max_x, max_y).
    pub fn bounding_box(&self) -> (f32, f32, f32, f32) {
        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for p in &self.polygon {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        if self.polygon.is_empty() {
            return (0.0, 0.0, 0.0, 0.0);
        }
        (min_x, min_y, max_x, max_y)
    }

    /// Midpoint of the bounding box.
    pub fn center(&self) -> Point {
        let (min_x, min_y, max_x, max_y) = self.bounding_box();
        Point {
            x: (min_x + max_x) / 2.0,
            y: (min_y + max_y) / 2.0,
        }
    }
}

/// The winning number resolved for one non-center cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedNumber {
    /// Number in [1, 75], validated against the column range
    pub value: u32,
    pub is_odd: bool,
    /// Grid row (0-4)
    pub row: usize,
    /// Grid column (0-4)
    pub col: usize,
    /// Confidence of the fragment the value came from
    pub confidence: f32,
}

/// The fully interpreted card.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Card {
    /// Resolved numbers, at most one per non-center cell
    pub numbers: Vec<ResolvedNumber>,
    /// Text shown in the center free-space cell
    pub free_space_content: Option<String>,
    /// Count of resolved numbers with odd values
    pub odds_count: usize,
    /// Count of resolved numbers with even values
    pub evens_count: usize,
    /// Total resolved numbers (24 on a perfect read)
    pub total_numbers: usize,
    /// Mean confidence over resolved numbers, 0.0 when none resolved
    pub confidence: f32,
}

impl Card {
    /// True when fewer numbers resolved than `threshold` (of 24 expected).
    /// A low-detection card is still a valid result; the caller decides how
    /// to surface the warning.
    pub fn is_low_detection(&self, threshold: usize) -> bool {
        self.total_numbers < threshold
    }
}
