//! Blocking HTTP client for the provider's annotate endpoint.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;

use super::AnnotationSource;
use super::response::AnnotateResponse;
use crate::card::model::Fragment;
use crate::error::ScanError;

const ANNOTATE_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

/// Both detection modes are requested: plain text detection finds isolated
/// digits, document detection handles the dense grid layout better.
const FEATURE_TYPES: [&str; 2] = ["TEXT_DETECTION", "DOCUMENT_TEXT_DETECTION"];

const LANGUAGE_HINT: &str = "en";

#[derive(Serialize)]
struct AnnotateRequest<'a> {
    requests: Vec<ImageRequest<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageRequest<'a> {
    image: ImageContent<'a>,
    features: Vec<Feature>,
    image_context: ImageContext,
}

#[derive(Serialize)]
struct ImageContent<'a> {
    content: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    max_results: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageContext {
    language_hints: Vec<&'static str>,
}

/// Client for the external OCR provider.
///
/// One blocking request per `annotate` call; no retries live here, a caller
/// wanting one simply calls again.
pub struct VisionClient {
    http: Client,
    api_key: String,
    max_results: u32,
    endpoint: String,
}

impl VisionClient {
    pub fn new(api_key: String, max_results: u32, timeout_secs: u64) -> Result<Self, ScanError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ScanError::Provider {
                detail: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            api_key,
            max_results,
            endpoint: ANNOTATE_ENDPOINT.to_string(),
        })
    }

    fn build_request<'a>(&self, image_base64: &'a str) -> AnnotateRequest<'a> {
        AnnotateRequest {
            requests: vec![ImageRequest {
                image: ImageContent {
                    content: image_base64,
                },
                features: FEATURE_TYPES
                    .iter()
                    .map(|&feature_type| Feature {
                        feature_type,
                        max_results: self.max_results,
                    })
                    .collect(),
                image_context: ImageContext {
                    language_hints: vec![LANGUAGE_HINT],
                },
            }],
        }
    }
}

impl AnnotationSource for VisionClient {
    fn annotate(&self, image_base64: &str) -> Result<Vec<Fragment>, ScanError> {
        let body = self.build_request(image_base64);

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| ScanError::Provider {
                detail: format!("request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(map_status(status, &detail));
        }

        let parsed: AnnotateResponse = response.json().map_err(|e| ScanError::Provider {
            detail: format!("unreadable response body: {e}"),
        })?;
        parsed.into_fragments()
    }
}

/// Maps a non-2xx provider status onto the error taxonomy.
fn map_status(status: StatusCode, detail: &str) -> ScanError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => ScanError::QuotaExceeded,
        StatusCode::FORBIDDEN => ScanError::InvalidCredential,
        StatusCode::BAD_REQUEST => ScanError::MalformedRequest {
            detail: detail.to_string(),
        },
        _ => ScanError::Provider {
            detail: format!("HTTP {status}: {detail}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            map_status(StatusCode::TOO_MANY_REQUESTS, ""),
            ScanError::QuotaExceeded
        ));
        assert!(matches!(
            map_status(StatusCode::FORBIDDEN, ""),
            ScanError::InvalidCredential
        ));
        match map_status(StatusCode::BAD_REQUEST, "invalid image content") {
            ScanError::MalformedRequest { detail } => {
                assert_eq!(detail, "invalid image content")
            }
            other => panic!("expected MalformedRequest, got {other:?}"),
        }
        match map_status(StatusCode::INTERNAL_SERVER_ERROR, "backend glitch") {
            ScanError::Provider { detail } => assert!(detail.contains("backend glitch")),
            other => panic!("expected Provider, got {other:?}"),
        }
    }

    #[test]
    fn test_request_shape() {
        let client = VisionClient::new("test-key".to_string(), 50, 30).unwrap();
        let body = serde_json::to_value(client.build_request("aGVsbG8=")).unwrap();

        let request = &body["requests"][0];
        assert_eq!(request["image"]["content"], "aGVsbG8=");
        assert_eq!(request["features"][0]["type"], "TEXT_DETECTION");
        assert_eq!(request["features"][1]["type"], "DOCUMENT_TEXT_DETECTION");
        assert_eq!(request["features"][0]["maxResults"], 50);
        assert_eq!(request["imageContext"]["languageHints"][0], "en");
    }
}
