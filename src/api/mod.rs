//! Request/response layer mapping JSON-compatible requests onto the analyzer.
//!
//! Two operations exist: *detect* (singular points, pattern, optional ridge
//! count) and *count ridges* (between caller-supplied points). Handlers are
//! synchronous and CPU-bound; a host service runs them on its blocking pool or
//! hands a batch to [`handle_batch`], which fans out on rayon.
//!
//! Failures surface as [`ErrorResponse`] values with a stable `error` kind.

pub mod multipart;
pub mod payload;
pub mod request;
pub mod response;

pub use multipart::{FormPart, MultipartForm};
pub use payload::ImagePayload;
pub use request::{CountRidgesRequest, DetectRequest, IMAGE_FIELD};
pub use response::{CountRidgesResponse, DetectResponse};

use crate::analyzer::{AnalysisInput, FingerprintAnalyzer};
use crate::error::{AnalysisError, ErrorResponse};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A request tagged with its operation, as read from request files.
///
/// ```json
/// { "operation": "detect", "image": "<base64>", "image_type": "raw" }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum ApiRequest {
    Detect(DetectRequest),
    CountRidges(CountRidgesRequest),
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Detect(DetectResponse),
    CountRidges(CountRidgesResponse),
    Error(ErrorResponse),
}

impl ApiResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, ApiResponse::Error(_))
    }
}

pub fn handle_detect(
    analyzer: &FingerprintAnalyzer,
    request: &DetectRequest,
) -> Result<DetectResponse, AnalysisError> {
    let gray = request.image.decode()?;
    let input = AnalysisInput {
        variant: request.image_type,
        hand: request.hand,
        count_ridges: request.count_ridges,
    };
    let result = analyzer.analyze(gray.as_view(), input)?;
    Ok(DetectResponse::from(result))
}

pub fn handle_count_ridges(
    analyzer: &FingerprintAnalyzer,
    request: &CountRidgesRequest,
) -> Result<CountRidgesResponse, AnalysisError> {
    request.validate()?;
    let gray = request.image.decode()?;
    let summary = analyzer.count_ridges(
        gray.as_view(),
        request.image_type,
        &request.cores,
        &request.deltas,
    )?;
    Ok(CountRidgesResponse::from(summary))
}

/// Detect from a raw `multipart/form-data` upload.
pub fn handle_detect_multipart(
    analyzer: &FingerprintAnalyzer,
    content_type: &str,
    body: &[u8],
) -> Result<DetectResponse, AnalysisError> {
    let form = MultipartForm::parse(content_type, body)?;
    handle_detect(analyzer, &DetectRequest::from_multipart(&form)?)
}

/// Count ridges from a raw `multipart/form-data` upload.
pub fn handle_count_ridges_multipart(
    analyzer: &FingerprintAnalyzer,
    content_type: &str,
    body: &[u8],
) -> Result<CountRidgesResponse, AnalysisError> {
    let form = MultipartForm::parse(content_type, body)?;
    handle_count_ridges(analyzer, &CountRidgesRequest::from_multipart(&form)?)
}

/// Run one tagged request, folding failures into an error body.
pub fn handle(analyzer: &FingerprintAnalyzer, request: &ApiRequest) -> ApiResponse {
    let outcome = match request {
        ApiRequest::Detect(req) => handle_detect(analyzer, req).map(ApiResponse::Detect),
        ApiRequest::CountRidges(req) => {
            handle_count_ridges(analyzer, req).map(ApiResponse::CountRidges)
        }
    };
    outcome.unwrap_or_else(|err| {
        log::warn!("request failed: {} ({})", err, err.kind());
        ApiResponse::Error(ErrorResponse::from(&err))
    })
}

/// Independent requests processed in parallel; output order matches input.
pub fn handle_batch(analyzer: &FingerprintAnalyzer, requests: &[ApiRequest]) -> Vec<ApiResponse> {
    requests.par_iter().map(|r| handle(analyzer, r)).collect()
}
