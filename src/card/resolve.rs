//! Cell resolution and card aggregation.
//!
//! Picks at most one winning number per non-center cell, under the column
//! range constraint, and folds the winners into the final card.

use std::cmp::Ordering;

use super::extract;
use super::grid::CellGrid;
use super::model::{Card, FREE_COL, FREE_ROW, Fragment, GRID_SIZE, ResolvedNumber, in_column_range};

/// Free-space text used when nothing was detected in the center cell.
const DEFAULT_FREE_TEXT: &str = "FREE";

/// Resolves every cell of the grid.
///
/// Returns the winners for the 24 non-center cells (holes allowed) and the
/// free-space text for the center cell. Fragments are sorted by confidence
/// descending; the sort is stable, so equal-confidence ties keep provider
/// order and resolution stays deterministic.
pub fn resolve_cells(grid: &CellGrid) -> (Vec<ResolvedNumber>, String) {
    let mut winners = Vec::new();
    let mut free_text = DEFAULT_FREE_TEXT.to_string();

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let mut fragments: Vec<&Fragment> = grid[row][col].iter().collect();
            fragments.sort_by(|a, b| {
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(Ordering::Equal)
            });

            if row == FREE_ROW && col == FREE_COL {
                // Free cell never yields a number, even when its text would
                // parse to a valid one
                if let Some(top) = fragments.first() {
                    free_text = top.text.trim().to_string();
                }
                continue;
            }

            if let Some(winner) = pick_winner(&fragments, row, col) {
                winners.push(winner);
            }
        }
    }

    (winners, free_text)
}

/// Picks the cell winner from confidence-sorted fragments.
///
/// The first fragment yielding a candidate inside the column range wins;
/// since fragments are sorted, that candidate has the highest source
/// confidence in the pool. A fragment yielding several in-range candidates
/// ties on confidence; the largest value is taken, since a 2-digit reading
/// dominates the 1-digit artifacts of its own sliding window.
fn pick_winner(fragments: &[&Fragment], row: usize, col: usize) -> Option<ResolvedNumber> {
    for frag in fragments {
        let candidates = extract::candidate_numbers(&frag.text);
        if let Some(&value) = candidates.iter().rev().find(|&&v| in_column_range(v, col)) {
            return Some(ResolvedNumber {
                value,
                is_odd: value % 2 == 1,
                row,
                col,
                confidence: frag.confidence,
            });
        }
    }
    None
}

/// Folds resolved winners into the final card with odd/even counts and a
/// mean confidence (0.0 when nothing resolved).
pub fn aggregate(winners: Vec<ResolvedNumber>, free_text: String) -> Card {
    let odds_count = winners.iter().filter(|n| n.is_odd).count();
    let evens_count = winners.len() - odds_count;
    let total_numbers = winners.len();
    let confidence = if winners.is_empty() {
        0.0
    } else {
        winners.iter().map(|n| n.confidence).sum::<f32>() / winners.len() as f32
    };

    Card {
        numbers: winners,
        free_space_content: Some(free_text),
        odds_count,
        evens_count,
        total_numbers,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::model::Point;

    fn frag(text: &str, confidence: f32) -> Fragment {
        Fragment::new(
            text,
            confidence,
            vec![
                Point { x: 0.0, y: 0.0 },
                Point { x: 10.0, y: 0.0 },
                Point { x: 10.0, y: 10.0 },
                Point { x: 0.0, y: 10.0 },
            ],
        )
    }

    fn empty_grid() -> CellGrid {
        std::array::from_fn(|_| std::array::from_fn(|_| Vec::new()))
    }

    #[test]
    fn test_highest_confidence_fragment_wins() {
        let mut grid = empty_grid();
        grid[0][0].push(frag("7", 0.5));
        grid[0][0].push(frag("12", 0.9));

        let (winners, _) = resolve_cells(&grid);
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].value, 12);
        assert_eq!(winners[0].confidence, 0.9);
    }

    #[test]
    fn test_column_range_validation() {
        let mut grid = empty_grid();
        // "7" has no candidate inside the I column range, so the win goes
        // to the lower-confidence fragment that validates
        grid[0][1].push(frag("7", 0.9));
        grid[0][1].push(frag("20", 0.5));

        let (winners, _) = resolve_cells(&grid);
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].value, 20);
        assert_eq!(winners[0].confidence, 0.5);
    }

    #[test]
    fn test_unresolvable_cell_is_a_hole() {
        let mut grid = empty_grid();
        // Nothing in range for the O column
        grid[0][4].push(frag("7", 0.9));

        let (winners, _) = resolve_cells(&grid);
        assert!(winners.is_empty());
    }

    #[test]
    fn test_free_cell_text_and_default() {
        let mut grid = empty_grid();
        let (_, free_text) = resolve_cells(&grid);
        assert_eq!(free_text, "FREE");

        grid[FREE_ROW][FREE_COL].push(frag(" Free Space ", 0.4));
        grid[FREE_ROW][FREE_COL].push(frag("noise", 0.2));
        let (_, free_text) = resolve_cells(&grid);
        assert_eq!(free_text, "Free Space");
    }

    #[test]
    fn test_free_cell_never_yields_a_number() {
        let mut grid = empty_grid();
        // 42 would be valid for the N column, but the center is the free cell
        grid[FREE_ROW][FREE_COL].push(frag("42", 0.95));

        let (winners, free_text) = resolve_cells(&grid);
        assert!(winners.is_empty());
        assert_eq!(free_text, "42");
    }

    #[test]
    fn test_merged_text_resolves_per_column() {
        let mut grid = empty_grid();
        // Merged read of two adjacent cells; only the candidate inside the
        // cell's own column range survives
        grid[0][3].push(frag("6063", 0.8));
        let (winners, _) = resolve_cells(&grid);
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].value, 60);

        let mut grid = empty_grid();
        grid[0][4].push(frag("6063", 0.8));
        let (winners, _) = resolve_cells(&grid);
        assert_eq!(winners[0].value, 63);
    }

    #[test]
    fn test_winner_positions_recorded() {
        let mut grid = empty_grid();
        grid[3][1].push(frag("25", 0.7));
        let (winners, _) = resolve_cells(&grid);
        assert_eq!(winners[0].row, 3);
        assert_eq!(winners[0].col, 1);
        assert!(winners[0].is_odd);
    }

    #[test]
    fn test_aggregate_counts_and_confidence() {
        let winners = vec![
            ResolvedNumber { value: 7, is_odd: true, row: 0, col: 0, confidence: 0.8 },
            ResolvedNumber { value: 20, is_odd: false, row: 0, col: 1, confidence: 0.6 },
            ResolvedNumber { value: 33, is_odd: true, row: 0, col: 2, confidence: 0.7 },
        ];
        let card = aggregate(winners, "FREE".to_string());

        assert_eq!(card.odds_count, 2);
        assert_eq!(card.evens_count, 1);
        assert_eq!(card.total_numbers, 3);
        assert_eq!(card.odds_count + card.evens_count, card.numbers.len());
        assert!((card.confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_aggregate_empty_is_zero_confidence() {
        let card = aggregate(Vec::new(), "FREE".to_string());
        assert_eq!(card.total_numbers, 0);
        assert_eq!(card.confidence, 0.0);
        assert_eq!(card.free_space_content.as_deref(), Some("FREE"));
    }
}
