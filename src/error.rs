//! Error taxonomy for the scan pipeline.
//!
//! Provider-side failures are mapped onto these kinds once, at the client
//! boundary; no stage below it returns anything transport-specific. Nothing
//! is retried inside the pipeline; retry is a caller policy.

use thiserror::Error;

/// Errors surfaced to the caller of the scan pipeline.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The image payload could not be decoded.
    #[error("image payload is not a decodable image")]
    InputFormat(#[from] image::ImageError),

    /// The OCR provider rejected the API credential (HTTP 403).
    #[error("OCR provider rejected the API credential")]
    InvalidCredential,

    /// The OCR provider rate or quota limit was hit (HTTP 429).
    /// The same request may succeed later.
    #[error("OCR provider quota exceeded; retry later")]
    QuotaExceeded,

    /// The provider could not parse the request (HTTP 400).
    #[error("malformed OCR request: {detail}")]
    MalformedRequest { detail: String },

    /// Any other provider or transport failure.
    #[error("OCR provider failure: {detail}")]
    Provider { detail: String },

    /// No fragment survived the token filter.
    #[error("no valid text detected in image")]
    NoSignal,
}
