//! Image transport inside JSON requests.

use crate::error::AnalysisError;
use crate::image::{decode_grayscale, GrayImageU8};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Encoded image bytes: a base64 string (optionally a `data:` URL) or a raw
/// byte array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImagePayload {
    Base64(String),
    Bytes(Vec<u8>),
}

impl ImagePayload {
    /// Base64 payload of already encoded image bytes.
    pub fn from_bytes_base64(bytes: &[u8]) -> Self {
        ImagePayload::Base64(STANDARD.encode(bytes))
    }

    /// Encoded image bytes carried by the payload.
    pub fn bytes(&self) -> Result<Cow<'_, [u8]>, AnalysisError> {
        match self {
            ImagePayload::Bytes(b) => Ok(Cow::Borrowed(b.as_slice())),
            ImagePayload::Base64(s) => {
                let body = strip_data_url(s);
                let cleaned: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
                STANDARD
                    .decode(cleaned.as_bytes())
                    .map(Cow::Owned)
                    .map_err(|e| AnalysisError::Decode(format!("invalid base64 payload: {e}")))
            }
        }
    }

    /// Decode the carried image to 8-bit grayscale.
    pub fn decode(&self) -> Result<GrayImageU8, AnalysisError> {
        let bytes = self.bytes()?;
        decode_grayscale(&bytes)
    }
}

/// Drop a `data:<mime>;base64,` prefix if present.
fn strip_data_url(s: &str) -> &str {
    let trimmed = s.trim_start();
    if trimmed.starts_with("data:") {
        if let Some(idx) = trimmed.find(";base64,") {
            return &trimmed[idx + ";base64,".len()..];
        }
    }
    trimmed
}
