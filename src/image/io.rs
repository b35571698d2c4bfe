//! I/O helpers for grayscale ridge images and JSON.
//!
//! - `decode_grayscale`: sniff and decode in-memory bytes (request payloads).
//! - `load_grayscale_image`: read a PNG/JPEG/etc. from disk into 8-bit gray.
//! - `encode_png`: serialize an owned gray buffer back to PNG bytes.
//! - `save_grayscale_f32` / `save_grayscale_u8` / `save_binary`: debug dumps.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{BinaryImage, ImageF32, ImageU8, ImageView};
use crate::error::AnalysisError;
use image::{GrayImage, ImageError, ImageFormat, Luma};
use serde::Serialize;
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Owned 8-bit grayscale buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given tightly packed rows.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.data,
        }
    }

    fn to_gray_image(&self) -> Result<GrayImage, String> {
        GrayImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
            .ok_or_else(|| "Failed to create image buffer".to_string())
    }
}

/// Decode in-memory image bytes into 8-bit grayscale.
///
/// An unknown signature is `UnsupportedFormat`; a known signature whose
/// payload does not decode is `Decode`.
pub fn decode_grayscale(bytes: &[u8]) -> Result<GrayImageU8, AnalysisError> {
    if bytes.is_empty() {
        return Err(AnalysisError::Decode("empty image payload".to_string()));
    }
    let format = image::guess_format(bytes)
        .map_err(|e| AnalysisError::UnsupportedFormat(e.to_string()))?;
    let decoded = image::load_from_memory_with_format(bytes, format).map_err(|e| match e {
        ImageError::Unsupported(inner) => AnalysisError::UnsupportedFormat(inner.to_string()),
        other => AnalysisError::Decode(other.to_string()),
    })?;
    let gray = decoded.into_luma8();
    let width = gray.width() as usize;
    let height = gray.height() as usize;
    log::debug!("decoded {:?} image {}x{}", format, width, height);
    Ok(GrayImageU8::new(width, height, gray.into_raw()))
}

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    Ok(GrayImageU8::new(width, height, img.into_raw()))
}

/// Encode an owned grayscale buffer as PNG bytes.
pub fn encode_png(buffer: &GrayImageU8) -> Result<Vec<u8>, String> {
    let image = buffer.to_gray_image()?;
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| format!("Failed to encode PNG: {e}"))?;
    Ok(out.into_inner())
}

/// Save a float image to a grayscale PNG, clamping values in [0, 255].
pub fn save_grayscale_f32(image: &ImageF32, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for y in 0..image.h {
        let row = image.row(y);
        for (x, &px) in row.iter().enumerate() {
            let v = (px * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_grayscale_u8(buffer: &GrayImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    buffer
        .to_gray_image()?
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a ridge mask as black ridges on white.
pub fn save_binary(mask: &BinaryImage, path: &Path) -> Result<(), String> {
    let rendered = GrayImageU8::new(mask.w, mask.h, mask.to_gray_u8());
    save_grayscale_u8(&rendered, path)
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
