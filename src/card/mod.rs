//! Card analysis pipeline: raw OCR fragments → validated 5x5 bingo card.
//!
//! Every stage is a pure function over explicit inputs; one `analyze` call
//! holds no state beyond its own locals, so concurrent analyses never
//! interact.

pub mod config;
pub mod extract;
pub mod filter;
pub mod grid;
pub mod model;
pub mod resolve;

pub use config::ScanConfig;
pub use model::{Card, Fragment, ResolvedNumber};

use crate::error::ScanError;

/// Runs the full interpretation pipeline over raw provider fragments.
///
/// Header letters are harvested before filtering since the grid locator
/// needs their positions even though they never become cell content. Fails
/// only when nothing at all survives the token filter; a sparse card is a
/// valid (low-detection) result, not an error.
pub fn analyze(annotations: &[Fragment], config: &ScanConfig) -> Result<Card, ScanError> {
    let headers: Vec<Fragment> = annotations
        .iter()
        .filter(|f| filter::is_header_letter(f.text.trim()))
        .cloned()
        .collect();

    let accepted: Vec<Fragment> = annotations
        .iter()
        .filter(|f| filter::accept(f, config.min_confidence))
        .cloned()
        .collect();

    crate::log(&format!(
        "Token filter kept {} of {} fragments ({} header anchors)",
        accepted.len(),
        annotations.len(),
        headers.len()
    ));

    if accepted.is_empty() {
        return Err(ScanError::NoSignal);
    }

    let cells = grid::locate(&accepted, &headers);
    let (winners, free_text) = resolve::resolve_cells(&cells);
    let card = resolve::aggregate(winners, free_text);

    crate::log(&format!(
        "Resolved {} numbers ({} odd / {} even), confidence {:.2}",
        card.total_numbers, card.odds_count, card.evens_count, card.confidence
    ));

    Ok(card)
}
