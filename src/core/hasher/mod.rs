//! # Hasher Module
//!
//! Computes rotation-aware perceptual fingerprints for images.
//!
//! ## How It Works
//! 1. Decode the image and normalise it to RGB
//! 2. Produce the four 90° orientations (original, 90°, 180°, 270°)
//! 3. Difference-hash each orientation independently
//! 4. Render every hash as a hex fingerprint
//!
//! A photo and a losslessly rotated copy of it end up sharing a
//! fingerprint, so rotation duplicates are found by exact string match.
//!
//! ## Performance Optimizations
//! - Uses `zune-jpeg` for 1.5-2x faster JPEG decoding
//! - Uses `fast_image_resize` for 5-14x faster SIMD-accelerated resizing
//!
//! ## Example
//! ```rust,ignore
//! use duplicate_image_finder::core::hasher::HasherConfig;
//!
//! let hasher = HasherConfig::new().hash_size(8).build()?;
//! let fingerprints = hasher.compute_fingerprints(&path)?;
//! ```

mod algorithms;
pub mod fast_decode;
pub mod fast_resize;
mod file_bytes;
mod traits;

pub use algorithms::DifferenceHasher;
pub use fast_decode::FastDecoder;
pub use traits::{Fingerprint, FingerprintSet, HashAlgorithm, ImageHashValue, Orientation};

use crate::error::HashError;
use image::DynamicImage;
use std::path::Path;
use tracing::{debug, warn};

/// Smallest grid that still has a left/right comparison per row
pub const MIN_HASH_SIZE: u32 = 2;

/// Largest grid accepted; 64 already gives 4096-bit fingerprints
pub const MAX_HASH_SIZE: u32 = 64;

/// Configuration builder for the fingerprint engine
#[derive(Debug, Clone)]
pub struct HasherConfig {
    /// Side length of the dHash grid (8 gives 64-bit fingerprints)
    hash_size: u32,
}

impl HasherConfig {
    pub fn new() -> Self {
        Self { hash_size: 8 }
    }

    /// Set the hash size.
    ///
    /// - 8: 64 bits, the usual dHash
    /// - 16: 256 bits, fewer accidental collisions between unrelated images
    pub fn hash_size(mut self, size: u32) -> Self {
        self.hash_size = size;
        self
    }

    pub fn build(self) -> Result<RotationHasher, HashError> {
        if !(MIN_HASH_SIZE..=MAX_HASH_SIZE).contains(&self.hash_size) {
            return Err(HashError::InvalidHashSize {
                size: self.hash_size,
            });
        }

        Ok(RotationHasher::new(Box::new(DifferenceHasher::new(
            self.hash_size,
        ))))
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Hashes an image at all four orientations.
///
/// Holds no per-image state: the same hasher can be shared across threads
/// and across batches.
pub struct RotationHasher {
    algorithm: Box<dyn HashAlgorithm>,
}

impl RotationHasher {
    pub fn new(algorithm: Box<dyn HashAlgorithm>) -> Self {
        Self { algorithm }
    }

    /// Decode the image at `path` and fingerprint it.
    ///
    /// Any failure (missing file, unreadable bytes, unknown format, broken
    /// data) comes back as an error for this image alone.
    pub fn compute_fingerprints(&self, path: &Path) -> Result<FingerprintSet, HashError> {
        let result = FastDecoder::decode(path).and_then(|image| self.fingerprint_image(&image));

        match &result {
            Ok(set) => debug!(path = %path.display(), original = %set.original(), "hashed image"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to hash image"),
        }

        result
    }

    /// Fingerprint an already-decoded image.
    pub fn fingerprint_image(&self, image: &DynamicImage) -> Result<FingerprintSet, HashError> {
        // Grayscale, palette and alpha inputs hash like their RGB rendering
        let rgb = match image {
            DynamicImage::ImageRgb8(buffer) => buffer.clone(),
            other => other.to_rgb8(),
        };

        let hash_at = |orientation: Orientation| -> Result<Fingerprint, HashError> {
            let rotated = DynamicImage::ImageRgb8(orientation.apply(&rgb));
            Ok(self.algorithm.hash_image(&rotated)?.fingerprint())
        };

        Ok(FingerprintSet::new([
            hash_at(Orientation::Original)?,
            hash_at(Orientation::Rotate90)?,
            hash_at(Orientation::Rotate180)?,
            hash_at(Orientation::Rotate270)?,
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    /// Asymmetric test pattern: a bright block in the top-left quadrant
    /// over a diagonal ramp, so every rotation looks different.
    fn patterned_image(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            if x < width / 3 && y < height / 4 {
                Rgb([250, 250, 250])
            } else {
                let v = ((x * 3 + y * 7) % 200) as u8;
                Rgb([v, v / 2, 255 - v])
            }
        })
    }

    fn hasher() -> RotationHasher {
        HasherConfig::new().build().unwrap()
    }

    #[test]
    fn config_defaults_to_eight() {
        let config = HasherConfig::new();
        assert_eq!(config.hash_size, 8);
    }

    #[test]
    fn config_rejects_degenerate_size() {
        let result = HasherConfig::new().hash_size(1).build();
        assert!(matches!(
            result,
            Err(HashError::InvalidHashSize { size: 1 })
        ));
    }

    #[test]
    fn config_rejects_oversized_hash() {
        for size in [MAX_HASH_SIZE + 1, 65_536, u32::MAX] {
            let result = HasherConfig::new().hash_size(size).build();
            assert!(matches!(
                result,
                Err(HashError::InvalidHashSize { size: s }) if s == size
            ));
        }
    }

    #[test]
    fn largest_hash_size_still_hashes() {
        let hasher = HasherConfig::new().hash_size(MAX_HASH_SIZE).build().unwrap();
        let image = DynamicImage::ImageRgb8(patterned_image(8, 8));

        let set = hasher.fingerprint_image(&image).unwrap();

        // 64x64 bits, two hex chars per byte
        assert_eq!(set.original().as_str().len(), 1024);
    }

    #[test]
    fn fingerprints_are_sixteen_hex_chars() {
        let image = DynamicImage::ImageRgb8(patterned_image(64, 48));
        let set = hasher().fingerprint_image(&image).unwrap();

        for fingerprint in set.iter() {
            assert_eq!(fingerprint.as_str().len(), 16);
            assert!(fingerprint.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn rotated_copy_shares_fingerprints() {
        let original = patterned_image(64, 48);
        let rotated = image::imageops::rotate90(&original);
        let hasher = hasher();

        let a = hasher
            .fingerprint_image(&DynamicImage::ImageRgb8(original))
            .unwrap();
        let b = hasher
            .fingerprint_image(&DynamicImage::ImageRgb8(rotated))
            .unwrap();

        assert_eq!(a.get(Orientation::Rotate90), b.original());
        assert_eq!(b.get(Orientation::Rotate270), a.original());
        assert!(b.contains(a.original()));
    }

    #[test]
    fn every_quarter_turn_is_matched() {
        let original = patterned_image(40, 30);
        let hasher = hasher();
        let base = hasher
            .fingerprint_image(&DynamicImage::ImageRgb8(original.clone()))
            .unwrap();

        for orientation in Orientation::ALL {
            let turned = orientation.apply(&original);
            let set = hasher
                .fingerprint_image(&DynamicImage::ImageRgb8(turned))
                .unwrap();
            assert_eq!(set.original(), base.get(orientation));
        }
    }

    #[test]
    fn grayscale_hashes_like_rgb() {
        let gray = GrayImage::from_fn(32, 32, |x, y| Luma([((x * 7 + y * 3) % 256) as u8]));
        let rgb = DynamicImage::ImageLuma8(gray.clone()).to_rgb8();
        let hasher = hasher();

        let from_gray = hasher
            .fingerprint_image(&DynamicImage::ImageLuma8(gray))
            .unwrap();
        let from_rgb = hasher
            .fingerprint_image(&DynamicImage::ImageRgb8(rgb))
            .unwrap();

        assert_eq!(from_gray, from_rgb);
    }

    #[test]
    fn opaque_alpha_hashes_like_rgb() {
        let rgb = patterned_image(30, 20);
        let rgba = RgbaImage::from_fn(30, 20, |x, y| {
            let p = rgb.get_pixel(x, y);
            Rgba([p[0], p[1], p[2], 255])
        });
        let hasher = hasher();

        let a = hasher
            .fingerprint_image(&DynamicImage::ImageRgba8(rgba))
            .unwrap();
        let b = hasher
            .fingerprint_image(&DynamicImage::ImageRgb8(rgb))
            .unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn hashing_is_deterministic() {
        let image = DynamicImage::ImageRgb8(patterned_image(50, 50));
        let hasher = hasher();

        assert_eq!(
            hasher.fingerprint_image(&image).unwrap(),
            hasher.fingerprint_image(&image).unwrap()
        );
    }

    #[test]
    fn compute_fingerprints_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.png");
        patterned_image(64, 48).save(&path).unwrap();

        let from_file = hasher().compute_fingerprints(&path).unwrap();
        let in_memory = hasher()
            .fingerprint_image(&DynamicImage::ImageRgb8(patterned_image(64, 48)))
            .unwrap();

        assert_eq!(from_file, in_memory);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrupt.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nnot really").unwrap();

        assert!(hasher().compute_fingerprints(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = hasher().compute_fingerprints(Path::new("/nonexistent/gone.png"));
        assert!(matches!(result, Err(HashError::IoError { .. })));
    }
}
