//! Error type shared by the analysis pipeline and the request layer.
//!
//! Only genuine input problems are errors. An image without detectable
//! singular points, or a pattern resolved through the classifier fallback,
//! is a regular [`crate::types::AnalysisResult`].

use serde::Serialize;
use thiserror::Error;

/// Failure kinds reported to callers as structured errors.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The bytes carry a known signature but cannot be decoded.
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// The decoded image cannot hold a single orientation block.
    #[error("image {width}x{height} is smaller than the minimum {min_side}x{min_side}")]
    Dimension {
        width: usize,
        height: usize,
        min_side: usize,
    },

    /// A ridge-count endpoint lies outside the image.
    #[error("point ({x:.1}, {y:.1}) lies outside the {width}x{height} image")]
    PointOutOfBounds {
        x: f32,
        y: f32,
        width: usize,
        height: usize,
    },

    /// The byte signature does not match any enabled image format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The request could not be mapped onto a typed operation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl AnalysisError {
    /// Stable identifier used in serialized error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Decode(_) => "DecodeError",
            AnalysisError::Dimension { .. } => "DimensionError",
            AnalysisError::PointOutOfBounds { .. } => "PointOutOfBoundsError",
            AnalysisError::UnsupportedFormat(_) => "UnsupportedFormatError",
            AnalysisError::InvalidRequest(_) => "InvalidRequestError",
        }
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        AnalysisError::InvalidRequest(msg.into())
    }
}

/// Serializable failure body handed back to the calling service.
#[derive(Clone, Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

impl From<&AnalysisError> for ErrorResponse {
    fn from(err: &AnalysisError) -> Self {
        Self {
            error: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        let err = AnalysisError::PointOutOfBounds {
            x: -1.0,
            y: 4.0,
            width: 10,
            height: 10,
        };
        assert_eq!(err.kind(), "PointOutOfBoundsError");
        let body = ErrorResponse::from(&err);
        assert_eq!(body.error, "PointOutOfBoundsError");
        assert!(body.message.contains("outside the 10x10 image"));
    }

    #[test]
    fn dimension_message_names_minimum() {
        let err = AnalysisError::Dimension {
            width: 8,
            height: 40,
            min_side: 16,
        };
        assert_eq!(
            err.to_string(),
            "image 8x40 is smaller than the minimum 16x16"
        );
    }
}
