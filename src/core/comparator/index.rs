//! Inverted index from fingerprint to the images that produced it.
//!
//! Entries keep the order in which fingerprints were first seen (input
//! order, then orientation order). The grouper's tie-break depends on that
//! order, so it is stored explicitly instead of relying on hash-map iteration.

use crate::core::hasher::{Fingerprint, FingerprintSet};
use std::collections::HashMap;
use std::path::PathBuf;

/// One fingerprint and every image that hashed to it at some orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub fingerprint: Fingerprint,
    /// Images in the order they contributed this fingerprint; no repeats
    pub images: Vec<PathBuf>,
}

/// Insertion-ordered fingerprint index
#[derive(Debug, Default)]
pub struct FingerprintIndex {
    entries: Vec<IndexEntry>,
    positions: HashMap<Fingerprint, usize>,
}

impl FingerprintIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from fingerprint sets in input order
    pub fn build(images: &[(PathBuf, FingerprintSet)]) -> Self {
        let mut index = Self::new();
        for (path, set) in images {
            index.insert(path, set);
        }
        index
    }

    /// Record every orientation of one image.
    ///
    /// An image whose rotations collide (a symmetric picture) is listed
    /// once under that fingerprint.
    pub fn insert(&mut self, path: &PathBuf, set: &FingerprintSet) {
        for fingerprint in set.iter() {
            let position = match self.positions.get(fingerprint) {
                Some(&position) => position,
                None => {
                    self.entries.push(IndexEntry {
                        fingerprint: fingerprint.clone(),
                        images: Vec::new(),
                    });
                    self.positions
                        .insert(fingerprint.clone(), self.entries.len() - 1);
                    self.entries.len() - 1
                }
            };

            let images = &mut self.entries[position].images;
            if !images.contains(path) {
                images.push(path.clone());
            }
        }
    }

    /// Entries in discovery order
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&IndexEntry> {
        self.positions
            .get(fingerprint)
            .map(|&position| &self.entries[position])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: [&str; 4]) -> FingerprintSet {
        FingerprintSet::new(values.map(Fingerprint::from))
    }

    #[test]
    fn empty_input_builds_empty_index() {
        let index = FingerprintIndex::build(&[]);
        assert!(index.is_empty());
    }

    #[test]
    fn entries_follow_discovery_order() {
        let images = vec![
            (PathBuf::from("/a.png"), set(["a0", "a1", "a2", "a3"])),
            (PathBuf::from("/b.png"), set(["b0", "a0", "b2", "b3"])),
        ];

        let index = FingerprintIndex::build(&images);
        let order: Vec<&str> = index
            .entries()
            .iter()
            .map(|e| e.fingerprint.as_str())
            .collect();

        assert_eq!(order, vec!["a0", "a1", "a2", "a3", "b0", "b2", "b3"]);
        assert_eq!(
            index.get(&Fingerprint::from("a0")).unwrap().images,
            vec![PathBuf::from("/a.png"), PathBuf::from("/b.png")]
        );
    }

    #[test]
    fn symmetric_image_is_listed_once() {
        let images = vec![(PathBuf::from("/plain.png"), set(["00", "00", "00", "00"]))];

        let index = FingerprintIndex::build(&images);

        assert_eq!(index.len(), 1);
        assert_eq!(index.entries()[0].images.len(), 1);
    }
}
