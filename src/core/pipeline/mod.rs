//! # Pipeline Module
//!
//! Orchestrates one batch end to end.
//!
//! ## Pipeline Stages
//! 1. **Hash** - Fingerprint every image at four orientations
//! 2. **Group** - Claim images into disjoint duplicate groups
//! 3. **Report** - Attach names and thumbnails, split unique and failed images
//!
//! ## Parallelism
//! Hashing and thumbnailing use rayon; grouping is one ordered pass.

mod executor;

pub use executor::{
    generate_report, HashedBatch, Pipeline, PipelineBuilder, PipelineConfig,
};
