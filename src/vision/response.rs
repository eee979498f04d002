//! Serde model of the provider's annotate response.
//!
//! Only the fields the pipeline consumes are modeled; everything else in
//! the response body is ignored.

use serde::Deserialize;

use crate::card::model::{Fragment, Point};
use crate::error::ScanError;

#[derive(Debug, Deserialize)]
pub struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<ImageResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageResponse {
    #[serde(default)]
    text_annotations: Vec<TextAnnotation>,
    /// Present when the provider failed this image despite HTTP 200
    error: Option<ProviderStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextAnnotation {
    #[serde(default)]
    description: String,
    /// The provider omits this for high-certainty annotations; absence is
    /// treated as full weight so those fragments survive the token filter
    #[serde(default = "full_confidence")]
    confidence: f32,
    #[serde(default)]
    bounding_poly: BoundingPoly,
}

#[derive(Debug, Default, Deserialize)]
struct BoundingPoly {
    #[serde(default)]
    vertices: Vec<Vertex>,
}

/// Vertices omit a coordinate when it is zero.
#[derive(Debug, Deserialize)]
struct Vertex {
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
}

#[derive(Debug, Deserialize)]
struct ProviderStatus {
    #[serde(default)]
    message: String,
}

fn full_confidence() -> f32 {
    1.0
}

impl AnnotateResponse {
    /// Maps the response to domain fragments.
    ///
    /// The first annotation is the provider's full-page text and is
    /// discarded; each following annotation is one detected span.
    pub fn into_fragments(self) -> Result<Vec<Fragment>, ScanError> {
        let Some(first) = self.responses.into_iter().next() else {
            return Err(ScanError::Provider {
                detail: "response contained no image results".to_string(),
            });
        };

        if let Some(status) = first.error {
            return Err(ScanError::Provider {
                detail: status.message,
            });
        }

        Ok(first
            .text_annotations
            .into_iter()
            .skip(1)
            .map(|a| {
                Fragment::new(
                    a.description,
                    a.confidence,
                    a.bounding_poly
                        .vertices
                        .into_iter()
                        .map(|v| Point { x: v.x, y: v.y })
                        .collect(),
                )
            })
            .collect())
    }
}
