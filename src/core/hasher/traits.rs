//! Trait and value types for perceptual hashing.

use crate::error::HashError;
use image::{imageops, DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trait for hash algorithm implementations
pub trait HashAlgorithm: Send + Sync {
    /// Compute a hash from an already-loaded image
    fn hash_image(&self, image: &DynamicImage) -> Result<ImageHashValue, HashError>;
}

/// Raw hash bits, packed MSB-first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHashValue {
    bytes: Vec<u8>,
}

impl ImageHashValue {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the hash as a lowercase hexadecimal string
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// The string form used for exact-match grouping
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint(self.to_hex())
    }
}

/// Fixed-format string form of a perceptual hash.
///
/// Grouping compares fingerprints by string equality only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Fingerprint {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the four 90° steps an image is hashed at.
///
/// Rotations are clockwise and lossless; the canvas swaps width and
/// height for the quarter turns, so nothing is cropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Original,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Orientation {
    /// Hashing order; also the slot order inside a [`FingerprintSet`]
    pub const ALL: [Orientation; 4] = [
        Orientation::Original,
        Orientation::Rotate90,
        Orientation::Rotate180,
        Orientation::Rotate270,
    ];

    pub fn degrees(&self) -> u32 {
        match self {
            Orientation::Original => 0,
            Orientation::Rotate90 => 90,
            Orientation::Rotate180 => 180,
            Orientation::Rotate270 => 270,
        }
    }

    /// Rotate an RGB image into this orientation
    pub fn apply(&self, image: &RgbImage) -> RgbImage {
        match self {
            Orientation::Original => image.clone(),
            Orientation::Rotate90 => imageops::rotate90(image),
            Orientation::Rotate180 => imageops::rotate180(image),
            Orientation::Rotate270 => imageops::rotate270(image),
        }
    }

    fn index(&self) -> usize {
        match self {
            Orientation::Original => 0,
            Orientation::Rotate90 => 1,
            Orientation::Rotate180 => 2,
            Orientation::Rotate270 => 3,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Fingerprints of one image at all four orientations:
/// `[original, rot90, rot180, rot270]`.
///
/// An image either has a complete set or none at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintSet {
    fingerprints: [Fingerprint; 4],
}

impl FingerprintSet {
    pub fn new(fingerprints: [Fingerprint; 4]) -> Self {
        Self { fingerprints }
    }

    pub fn get(&self, orientation: Orientation) -> &Fingerprint {
        &self.fingerprints[orientation.index()]
    }

    pub fn original(&self) -> &Fingerprint {
        self.get(Orientation::Original)
    }

    /// Fingerprints in orientation order
    pub fn iter(&self) -> impl Iterator<Item = &Fingerprint> {
        self.fingerprints.iter()
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.fingerprints.contains(fingerprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn to_hex_produces_correct_string() {
        let hash = ImageHashValue::new(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(hash.to_hex(), "deadbeef");
        assert_eq!(hash.fingerprint().as_str(), "deadbeef");
    }

    #[test]
    fn hex_keeps_leading_zeros() {
        let hash = ImageHashValue::new(vec![0x00, 0x0f]);
        assert_eq!(hash.to_hex(), "000f");
        assert_eq!(hash.as_bytes().len(), 2);
    }

    #[test]
    fn fingerprint_serializes_as_plain_string() {
        let fingerprint = Fingerprint::from("c3c3e1f0f8783c1c");
        let json = serde_json::to_string(&fingerprint).unwrap();
        assert_eq!(json, "\"c3c3e1f0f8783c1c\"");
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        let image = RgbImage::from_pixel(4, 2, Rgb([1, 2, 3]));

        assert_eq!(Orientation::Original.apply(&image).dimensions(), (4, 2));
        assert_eq!(Orientation::Rotate90.apply(&image).dimensions(), (2, 4));
        assert_eq!(Orientation::Rotate180.apply(&image).dimensions(), (4, 2));
        assert_eq!(Orientation::Rotate270.apply(&image).dimensions(), (2, 4));
    }

    #[test]
    fn rotate90_then_rotate270_is_identity() {
        let image = RgbImage::from_fn(5, 3, |x, y| Rgb([x as u8, y as u8, (x * y) as u8]));

        let turned = Orientation::Rotate90.apply(&image);
        let back = Orientation::Rotate270.apply(&turned);

        assert_eq!(back, image);
    }

    #[test]
    fn set_slots_follow_orientation_order() {
        let set = FingerprintSet::new([
            Fingerprint::from("00"),
            Fingerprint::from("5a"),
            Fingerprint::from("b4"),
            Fingerprint::from("ff"),
        ]);

        assert_eq!(set.original().as_str(), "00");
        assert_eq!(set.get(Orientation::Rotate180).as_str(), "b4");
        assert_eq!(set.get(Orientation::Rotate270).as_str(), "ff");
        let slots: Vec<&str> = set.iter().map(Fingerprint::as_str).collect();
        assert_eq!(slots, vec!["00", "5a", "b4", "ff"]);
        assert!(set.contains(&Fingerprint::from("ff")));
    }

    #[test]
    fn orientation_display() {
        assert_eq!(Orientation::Rotate270.to_string(), "270°");
    }
}
