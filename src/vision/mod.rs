//! External OCR provider boundary.
//!
//! Everything the pipeline needs from the provider comes through the
//! [`AnnotationSource`] trait, so analysis logic is testable on fixture
//! fragments with no network. [`VisionClient`] is the real implementation.

pub mod client;
pub mod response;

pub use client::VisionClient;

use crate::card::model::Fragment;
use crate::error::ScanError;

/// Source of OCR annotations for a base64-encoded image payload.
pub trait AnnotationSource {
    fn annotate(&self, image_base64: &str) -> Result<Vec<Fragment>, ScanError>;
}
