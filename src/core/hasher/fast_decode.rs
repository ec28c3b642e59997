//! Fast image decoding with format-specific optimizations.
//!
//! The format is sniffed from the file content, not the extension: the
//! caller only filtered by extension, and a renamed file must still decode
//! (or fail) on what it actually contains.
//!
//! Uses zune-jpeg for JPEG data (1.5-2x faster than image crate),
//! falls back to image crate for everything else.

use super::file_bytes::read_file_bytes;
use crate::error::HashError;
use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, Rgb, Rgba};
use std::path::Path;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Fast image decoder that uses optimized decoders per format
pub struct FastDecoder;

impl FastDecoder {
    /// Decode the image behind a reference using the fastest available decoder.
    pub fn decode(path: &Path) -> Result<DynamicImage, HashError> {
        let bytes = read_file_bytes(path)?;
        Self::decode_bytes(path, &bytes)
    }

    /// Decode already-loaded bytes. `path` is only used for error context.
    pub fn decode_bytes(path: &Path, bytes: &[u8]) -> Result<DynamicImage, HashError> {
        let format = image::guess_format(bytes).map_err(|e| HashError::DecodeError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let image = match format {
            ImageFormat::Jpeg => Self::decode_jpeg(path, bytes)
                .or_else(|_| Self::decode_fallback(path, bytes, format))?,
            _ => Self::decode_fallback(path, bytes, format)?,
        };

        if image.width() == 0 || image.height() == 0 {
            return Err(HashError::EmptyImage {
                path: path.to_path_buf(),
            });
        }

        Ok(image)
    }

    fn decode_jpeg(path: &Path, bytes: &[u8]) -> Result<DynamicImage, HashError> {
        let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
        let mut decoder = JpegDecoder::new_with_options(bytes, options);

        let pixels = decoder.decode().map_err(|e| HashError::DecodeError {
            path: path.to_path_buf(),
            reason: format!("zune-jpeg decode failed: {:?}", e),
        })?;

        let info = decoder.info().ok_or_else(|| HashError::DecodeError {
            path: path.to_path_buf(),
            reason: "Failed to get image info".to_string(),
        })?;

        let width = info.width as u32;
        let height = info.height as u32;
        let buffer_error = |kind: &str| HashError::DecodeError {
            path: path.to_path_buf(),
            reason: format!("Failed to create {} buffer", kind),
        };

        // The requested colorspace is a hint; grayscale JPEGs may still come back as Luma
        let image = match decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB) {
            ColorSpace::RGB => {
                let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| buffer_error("RGB"))?;
                DynamicImage::ImageRgb8(buffer)
            }
            ColorSpace::RGBA => {
                let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| buffer_error("RGBA"))?;
                DynamicImage::ImageRgba8(buffer)
            }
            ColorSpace::Luma => {
                let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels)
                        .ok_or_else(|| buffer_error("Luma"))?;
                DynamicImage::ImageLuma8(buffer)
            }
            other => {
                return Err(HashError::DecodeError {
                    path: path.to_path_buf(),
                    reason: format!("Unsupported JPEG colorspace {:?}", other),
                })
            }
        };

        Ok(image)
    }

    fn decode_fallback(
        path: &Path,
        bytes: &[u8],
        format: ImageFormat,
    ) -> Result<DynamicImage, HashError> {
        image::load_from_memory_with_format(bytes, format).map_err(|e| HashError::DecodeError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
