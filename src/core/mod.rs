//! # Core Module
//!
//! The front-end-agnostic duplicate detection engine.
//!
//! ## Modules
//! - `hasher` - Computes four-orientation perceptual fingerprints
//! - `comparator` - Groups images sharing a fingerprint into disjoint sets
//! - `reporter` - Builds the report with inline thumbnails, exports it
//! - `pipeline` - Orchestrates the full workflow for one batch
//! - `batch` - Caller-side admission checks (count, size, extensions)

pub mod batch;
pub mod comparator;
pub mod hasher;
pub mod pipeline;
pub mod reporter;

// Re-export commonly used types
pub use batch::BatchLimits;
pub use comparator::DuplicateGroup;
pub use hasher::{Fingerprint, FingerprintSet, Orientation};
pub use pipeline::{generate_report, Pipeline};
pub use reporter::{FailedImage, GroupReport, ImageEntry, Report};
