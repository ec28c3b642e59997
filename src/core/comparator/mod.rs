//! # Comparator Module
//!
//! Finds duplicates by exact fingerprint matching across orientations.
//!
//! ## How It Works
//! 1. Build an inverted index: fingerprint → images that produced it
//! 2. Walk the index in discovery order, skipping fingerprints seen once
//! 3. Greedily claim unclaimed images into groups (first fingerprint wins)
//! 4. Whatever is never claimed is unique
//!
//! Matching is by string equality of fingerprints only; there is no
//! Hamming-distance tolerance.

mod grouper;
mod index;

pub use grouper::FingerprintGrouper;
pub use index::{FingerprintIndex, IndexEntry};

use crate::core::hasher::{Fingerprint, FingerprintSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A set of two or more images sharing a fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// The fingerprint that brought these images together
    pub hash: Fingerprint,
    /// Member images, in the order they contributed the fingerprint
    pub images: Vec<PathBuf>,
}

impl DuplicateGroup {
    pub fn new(hash: Fingerprint, images: Vec<PathBuf>) -> Self {
        Self { hash, images }
    }

    pub fn count(&self) -> usize {
        self.images.len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.images.iter().any(|p| p == path)
    }
}

/// Images not claimed by any group, in input order
pub fn unique_images(
    images: &[(PathBuf, FingerprintSet)],
    groups: &[DuplicateGroup],
) -> Vec<PathBuf> {
    let claimed: HashSet<&Path> = groups
        .iter()
        .flat_map(|g| g.images.iter().map(PathBuf::as_path))
        .collect();

    images
        .iter()
        .map(|(path, _)| path)
        .filter(|path| !claimed.contains(path.as_path()))
        .cloned()
        .collect()
}
