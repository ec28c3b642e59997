//! Inline thumbnail previews.
//!
//! Each preview is a PNG small enough to fit in a 200x200 box, embedded as
//! a `data:` URI so the report can be rendered without touching the
//! original files again.

use crate::core::hasher::fast_resize::FastResizer;
use crate::core::hasher::FastDecoder;
use crate::error::ThumbnailError;
use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// Default bounding box for previews
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 200;

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Configuration builder for thumbnails
#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// Longest allowed edge of a preview, in pixels
    max_dimension: u32,
}

impl ThumbnailConfig {
    pub fn new() -> Self {
        Self {
            max_dimension: DEFAULT_THUMBNAIL_SIZE,
        }
    }

    pub fn max_dimension(mut self, size: u32) -> Self {
        self.max_dimension = size;
        self
    }

    pub fn build(self) -> Result<Thumbnailer, ThumbnailError> {
        if self.max_dimension == 0 {
            return Err(ThumbnailError::InvalidSize {
                size: self.max_dimension,
            });
        }
        Ok(Thumbnailer {
            max_dimension: self.max_dimension,
        })
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders previews as PNG data URIs
#[derive(Debug, Clone)]
pub struct Thumbnailer {
    max_dimension: u32,
}

impl Thumbnailer {
    /// Load the image at `path` and render its preview
    pub fn render(&self, path: &Path) -> Result<String, ThumbnailError> {
        let image = FastDecoder::decode(path).map_err(ThumbnailError::Decode)?;
        self.render_image(path, &image)
    }

    /// Render a preview from an already-decoded image.
    /// `path` is only used for error context.
    pub fn render_image(&self, path: &Path, image: &DynamicImage) -> Result<String, ThumbnailError> {
        let (width, height) = fit_within(image.width(), image.height(), self.max_dimension);

        let preview = if (width, height) == (image.width(), image.height()) {
            to_8bit(image)
        } else {
            FastResizer::new()
                .resize_color(image, width, height)
                .map_err(|source| ThumbnailError::Resize {
                    path: path.to_path_buf(),
                    source,
                })?
        };

        let mut png = Cursor::new(Vec::new());
        preview
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| ThumbnailError::Encode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(to_data_uri(png.get_ref()))
    }
}

/// Largest size with the same aspect ratio that fits in a `max`x`max` box.
///
/// Images already inside the box are left alone; previews are never upscaled.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }

    let scale = f64::min(max as f64 / width as f64, max as f64 / height as f64);
    let fit = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max);

    (fit(width), fit(height))
}

/// Encode PNG bytes as a `data:image/png;base64,...` URI
pub fn to_data_uri(png: &[u8]) -> String {
    format!("{}{}", DATA_URI_PREFIX, general_purpose::STANDARD.encode(png))
}

// 16-bit and float images are narrowed so the PNG stays small
fn to_8bit(image: &DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_)
        | DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_) => image.clone(),
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}
