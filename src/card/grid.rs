//! Grid location: partitions image space into the 5x5 cell lattice.
//!
//! Three strategies run in a fixed fallback order, strictest first, and
//! exactly one produces the grid for a given call:
//! 1. Header-anchored: column geometry from the B/I/N/G/O header letters.
//! 2. Density: when enough number-bearing fragments exist, the bounding box
//!    is computed over those alone, which shakes off logo/footer noise.
//! 3. Relaxed bounding box: uniform lattice over the expanded extent of the
//!    working set, with out-of-range cells clamped so every fragment lands
//!    somewhere.

use std::cmp::Ordering;

use super::extract;
use super::model::{Fragment, GRID_SIZE};

/// Header letters needed before column geometry is trusted.
const MIN_HEADER_ANCHORS: usize = 3;

/// Number-bearing fragment count at which the density pre-filter kicks in.
const DENSITY_MIN_FRAGMENTS: usize = 20;

/// Relative margin added to each side of the relaxed bounding box, so
/// fragments whose centers sit on an edge still fall inside the lattice.
const RELAXED_MARGIN: f32 = 0.10;

/// Fragments assigned per cell, indexed `[row][col]`.
pub type CellGrid = [[Vec<Fragment>; GRID_SIZE]; GRID_SIZE];

fn empty_grid() -> CellGrid {
    std::array::from_fn(|_| std::array::from_fn(|_| Vec::new()))
}

/// Partitions `accepted` fragments into the 5x5 grid.
///
/// `headers` are the single-letter B/I/N/G/O fragments harvested before the
/// token filter dropped them; they anchor the header strategy but never
/// become cell content themselves.
pub fn locate(accepted: &[Fragment], headers: &[Fragment]) -> CellGrid {
    if headers.len() >= MIN_HEADER_ANCHORS {
        if let Some(grid) = locate_by_headers(accepted, headers) {
            crate::log(&format!(
                "Grid strategy: header-anchored ({} anchors)",
                headers.len()
            ));
            return grid;
        }
    }

    let numeric: Vec<&Fragment> = accepted
        .iter()
        .filter(|f| !extract::candidate_numbers(&f.text).is_empty())
        .collect();

    if numeric.len() >= DENSITY_MIN_FRAGMENTS {
        crate::log(&format!(
            "Grid strategy: density ({} number-bearing fragments)",
            numeric.len()
        ));
        locate_relaxed(&numeric)
    } else {
        crate::log("Grid strategy: relaxed bounding box");
        let all: Vec<&Fragment> = accepted.iter().collect();
        locate_relaxed(&all)
    }
}

/// Column geometry from the header letters; rows from the vertical extent
/// of everything on the page. Fragments landing outside the lattice are
/// discarded rather than clamped, since the geometry here is trusted.
fn locate_by_headers(accepted: &[Fragment], headers: &[Fragment]) -> Option<CellGrid> {
    let mut xs: Vec<f32> = headers.iter().map(|h| h.center().x).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let leftmost = *xs.first()?;
    let rightmost = *xs.last()?;
    let col_width = (rightmost - leftmost) / (headers.len() - 1) as f32;
    if col_width <= 0.0 {
        return None;
    }

    let (min_y, max_y) = vertical_extent(accepted.iter().chain(headers.iter()))?;
    let row_height = (max_y - min_y) / GRID_SIZE as f32;
    if row_height <= 0.0 {
        return None;
    }

    let left_edge = leftmost - col_width / 2.0;
    let mut grid = empty_grid();
    for frag in accepted {
        let c = frag.center();
        let col = ((c.x - left_edge) / col_width).floor() as i64;
        let row = ((c.y - min_y) / row_height).floor() as i64;
        let bounds = 0..GRID_SIZE as i64;
        if bounds.contains(&row) && bounds.contains(&col) {
            grid[row as usize][col as usize].push(frag.clone());
        }
    }
    Some(grid)
}

/// Uniform lattice over the expanded bounding box of the working set.
/// Every fragment is assigned; out-of-range rows/cols clamp to the nearest
/// valid cell.
fn locate_relaxed(fragments: &[&Fragment]) -> CellGrid {
    let mut grid = empty_grid();
    let Some((min_x, min_y, max_x, max_y)) = extent(fragments) else {
        return grid;
    };

    let margin_x = (max_x - min_x) * RELAXED_MARGIN;
    let margin_y = (max_y - min_y) * RELAXED_MARGIN;
    let min_x = min_x - margin_x;
    let min_y = min_y - margin_y;
    let max_x = max_x + margin_x;
    let max_y = max_y + margin_y;

    let cell_w = ((max_x - min_x) / GRID_SIZE as f32).max(f32::EPSILON);
    let cell_h = ((max_y - min_y) / GRID_SIZE as f32).max(f32::EPSILON);

    let max_index = (GRID_SIZE - 1) as i64;
    for frag in fragments {
        let c = frag.center();
        let col = (((c.x - min_x) / cell_w).floor() as i64).clamp(0, max_index);
        let row = (((c.y - min_y) / cell_h).floor() as i64).clamp(0, max_index);
        grid[row as usize][col as usize].push((*frag).clone());
    }
    grid
}

/// Bounding box over fragment bounding boxes: (min_x, min_y, max_x, max_y).
fn extent(fragments: &[&Fragment]) -> Option<(f32, f32, f32, f32)> {
    let mut iter = fragments.iter();
    let first = iter.next()?;
    let mut acc = first.bounding_box();
    for frag in iter {
        let (x0, y0, x1, y1) = frag.bounding_box();
        acc = (acc.0.min(x0), acc.1.min(y0), acc.2.max(x1), acc.3.max(y1));
    }
    Some(acc)
}

fn vertical_extent<'a>(fragments: impl Iterator<Item = &'a Fragment>) -> Option<(f32, f32)> {
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;
    let mut any = false;
    for frag in fragments {
        let (_, y0, _, y1) = frag.bounding_box();
        min_y = min_y.min(y0);
        max_y = max_y.max(y1);
        any = true;
    }
    any.then_some((min_y, max_y))
}
