//! Difference Hash (dHash) implementation.
//!
//! dHash works by:
//! 1. Resizing the image to (hash_size+1) x hash_size
//! 2. Converting to grayscale
//! 3. Comparing each pixel to the one to its right
//! 4. If the right pixel is brighter, set bit to 1, else 0
//!
//! This captures the relative gradient of brightness changes, so mild
//! recompression or resizing leaves the hash intact.

use super::super::fast_resize::resize_to_grayscale;
use super::super::traits::{HashAlgorithm, ImageHashValue};
use crate::error::HashError;
use image::DynamicImage;

/// Difference Hash (dHash) implementation
pub struct DifferenceHasher {
    /// Size of the hash (width and height of comparison grid)
    hash_size: u32,
}

impl DifferenceHasher {
    pub fn new(hash_size: u32) -> Self {
        Self { hash_size }
    }
}

impl HashAlgorithm for DifferenceHasher {
    fn hash_image(&self, image: &DynamicImage) -> Result<ImageHashValue, HashError> {
        // One extra column so every cell has a right-hand neighbour
        let gray = resize_to_grayscale(image, self.hash_size + 1, self.hash_size)?;

        let total_bits = (self.hash_size * self.hash_size) as usize;
        let mut hash_bytes = Vec::with_capacity(total_bits.div_ceil(8));
        let mut current_byte: u8 = 0;
        let mut bit_position = 0;

        for y in 0..self.hash_size {
            for x in 0..self.hash_size {
                let left_pixel = gray.get_pixel(x, y)[0];
                let right_pixel = gray.get_pixel(x + 1, y)[0];

                if right_pixel > left_pixel {
                    current_byte |= 1 << (7 - bit_position);
                }

                bit_position += 1;

                if bit_position == 8 {
                    hash_bytes.push(current_byte);
                    current_byte = 0;
                    bit_position = 0;
                }
            }
        }

        // Trailing partial byte for odd grid sizes
        if bit_position > 0 {
            hash_bytes.push(current_byte);
        }

        Ok(ImageHashValue::new(hash_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn create_solid_image(r: u8, g: u8, b: u8) -> DynamicImage {
        let img = ImageBuffer::from_fn(100, 100, |_, _| Rgb([r, g, b]));
        DynamicImage::ImageRgb8(img)
    }

    fn create_left_to_right_gradient() -> DynamicImage {
        // Left is dark, right is bright
        let img = ImageBuffer::from_fn(100, 100, |x, _| {
            let brightness = (x * 255 / 99) as u8;
            Rgb([brightness, brightness, brightness])
        });
        DynamicImage::ImageRgb8(img)
    }

    fn create_right_to_left_gradient() -> DynamicImage {
        let img = ImageBuffer::from_fn(100, 100, |x, _| {
            let brightness = ((99 - x) * 255 / 99) as u8;
            Rgb([brightness, brightness, brightness])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn identical_images_produce_identical_hash() {
        let hasher = DifferenceHasher::new(8);
        let image = create_left_to_right_gradient();

        let hash1 = hasher.hash_image(&image).unwrap();
        let hash2 = hasher.hash_image(&image).unwrap();

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn solid_image_hashes_to_zero() {
        let hasher = DifferenceHasher::new(8);
        let hash = hasher.hash_image(&create_solid_image(128, 128, 128)).unwrap();

        assert_eq!(hash.to_hex(), "0000000000000000");
    }

    #[test]
    fn brightening_gradient_sets_every_bit() {
        let hasher = DifferenceHasher::new(8);
        let hash = hasher.hash_image(&create_left_to_right_gradient()).unwrap();

        assert_eq!(hash.to_hex(), "ffffffffffffffff");
    }

    #[test]
    fn opposite_gradients_produce_different_hash() {
        let hasher = DifferenceHasher::new(8);

        let hash1 = hasher.hash_image(&create_left_to_right_gradient()).unwrap();
        let hash2 = hasher.hash_image(&create_right_to_left_gradient()).unwrap();

        assert_ne!(hash1, hash2);
        assert_eq!(hash2.to_hex(), "0000000000000000");
    }

    #[test]
    fn hash_size_affects_output_length() {
        let image = create_solid_image(128, 128, 128);

        let hash_8 = DifferenceHasher::new(8).hash_image(&image).unwrap();
        let hash_16 = DifferenceHasher::new(16).hash_image(&image).unwrap();
        let hash_3 = DifferenceHasher::new(3).hash_image(&image).unwrap();

        // 8x8 = 64 bits = 8 bytes
        assert_eq!(hash_8.as_bytes().len(), 8);
        // 16x16 = 256 bits = 32 bytes
        assert_eq!(hash_16.as_bytes().len(), 32);
        // 3x3 = 9 bits, padded to 2 bytes
        assert_eq!(hash_3.as_bytes().len(), 2);
    }
}
