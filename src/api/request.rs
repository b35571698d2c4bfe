use super::multipart::MultipartForm;
use super::payload::ImagePayload;
use crate::error::AnalysisError;
use crate::preprocess::ImageVariant;
use crate::types::{Finger, Hand, Point};
use serde::{Deserialize, Serialize};

/// Multipart field carrying the uploaded image file.
pub const IMAGE_FIELD: &str = "image_data";

fn default_true() -> bool {
    true
}

/// Detect singular points and the pattern of one finger image.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectRequest {
    pub image: ImagePayload,
    #[serde(default, alias = "variant")]
    pub image_type: ImageVariant,
    #[serde(default)]
    pub hand: Option<Hand>,
    #[serde(default)]
    pub finger: Option<Finger>,
    #[serde(default = "default_true")]
    pub count_ridges: bool,
}

/// Count ridges between caller-chosen cores and deltas.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CountRidgesRequest {
    pub image: ImagePayload,
    #[serde(default, alias = "variant")]
    pub image_type: ImageVariant,
    #[serde(default)]
    pub cores: Vec<Point>,
    #[serde(default)]
    pub deltas: Vec<Point>,
}

impl DetectRequest {
    pub fn new(image: ImagePayload) -> Self {
        Self {
            image,
            image_type: ImageVariant::default(),
            hand: None,
            finger: None,
            count_ridges: true,
        }
    }

    pub fn from_multipart(form: &MultipartForm) -> Result<Self, AnalysisError> {
        let mut req = Self::new(image_part(form)?);
        if let Some(v) = form.text("image_type")? {
            req.image_type = parse_field("image_type", v)?;
        }
        if let Some(v) = non_empty(form.text("hand")?) {
            req.hand = Some(parse_field("hand", v)?);
        }
        if let Some(v) = non_empty(form.text("finger")?) {
            req.finger = Some(parse_field("finger", v)?);
        }
        if let Some(v) = form.text("count_ridges")? {
            req.count_ridges = parse_field("count_ridges", v)?;
        }
        Ok(req)
    }
}

impl CountRidgesRequest {
    pub fn from_multipart(form: &MultipartForm) -> Result<Self, AnalysisError> {
        let image_type = match form.text("image_type")? {
            Some(v) => parse_field("image_type", v)?,
            None => ImageVariant::default(),
        };
        let req = Self {
            image: image_part(form)?,
            image_type,
            cores: points_field(form, "cores")?,
            deltas: points_field(form, "deltas")?,
        };
        req.validate()?;
        Ok(req)
    }

    /// Reject non-finite coordinates before any image work.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        for (label, points) in [("cores", &self.cores), ("deltas", &self.deltas)] {
            if let Some(p) = points.iter().find(|p| !p.is_finite()) {
                return Err(AnalysisError::invalid_request(format!(
                    "{label} contains a non-finite point ({}, {})",
                    p.x, p.y
                )));
            }
        }
        Ok(())
    }
}

fn image_part(form: &MultipartForm) -> Result<ImagePayload, AnalysisError> {
    let part = form
        .part(IMAGE_FIELD)
        .ok_or_else(|| AnalysisError::invalid_request(format!("missing '{IMAGE_FIELD}' field")))?;
    Ok(ImagePayload::Bytes(part.data.clone()))
}

fn non_empty(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.is_empty())
}

fn parse_field<T>(name: &str, value: &str) -> Result<T, AnalysisError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| AnalysisError::invalid_request(format!("field '{name}': {e}")))
}

fn points_field(form: &MultipartForm, name: &str) -> Result<Vec<Point>, AnalysisError> {
    match non_empty(form.text(name)?) {
        None => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json)
            .map_err(|e| AnalysisError::invalid_request(format!("field '{name}': {e}"))),
    }
}
