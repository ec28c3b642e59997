//! Groups images that share a fingerprint into disjoint duplicate sets.
//!
//! Candidates are visited in fingerprint discovery order. The first
//! candidate to gather two or more unclaimed images wins them; later
//! candidates only see what is left. When A matches B on one fingerprint and
//! C on another (but B and C do not match), A ends up with whichever
//! fingerprint was discovered first.

use super::index::FingerprintIndex;
use super::DuplicateGroup;
use crate::core::hasher::FingerprintSet;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Greedy first-come-first-served grouper over an ordered fingerprint index
pub struct FingerprintGrouper;

impl FingerprintGrouper {
    pub fn new() -> Self {
        Self
    }

    /// Group fingerprinted images into duplicate sets.
    ///
    /// Every image ends up in at most one group; groups come out in the
    /// order their triggering fingerprint was discovered.
    pub fn group(&self, images: &[(PathBuf, FingerprintSet)]) -> Vec<DuplicateGroup> {
        let index = FingerprintIndex::build(images);
        let mut claimed: HashSet<&Path> = HashSet::new();
        let mut groups = Vec::new();

        for entry in index.entries() {
            if entry.images.len() < 2 {
                continue;
            }

            let unclaimed: Vec<PathBuf> = entry
                .images
                .iter()
                .filter(|path| !claimed.contains(path.as_path()))
                .cloned()
                .collect();

            if unclaimed.len() < 2 {
                continue;
            }

            for path in &entry.images {
                if unclaimed.contains(path) {
                    claimed.insert(path.as_path());
                }
            }

            debug!(
                hash = %entry.fingerprint,
                count = unclaimed.len(),
                "duplicate group"
            );
            groups.push(DuplicateGroup::new(entry.fingerprint.clone(), unclaimed));
        }

        groups
    }
}

impl Default for FingerprintGrouper {
    fn default() -> Self {
        Self::new()
    }
}
