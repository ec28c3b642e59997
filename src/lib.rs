//! # Duplicate Image Finder
//!
//! Finds visually duplicate images in a small batch, including copies that
//! were rotated by a multiple of 90°, and reports them with thumbnails.
//!
//! ## How It Works
//! - Every image is difference-hashed at 0°, 90°, 180° and 270°
//! - Images sharing any fingerprint are grouped; each image joins at most
//!   one group, with ties going to the fingerprint discovered first
//! - The report lists duplicate groups, unique images and unreadable images
//!
//! ## Architecture
//! - `core` - The detection engine (hash, group, report)
//! - `events` - Progress events for any front end
//! - `error` - Error types

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{DuplicateFinderError, Result};

/// Initialize tracing for the library
///
/// Called by the binary. `RUST_LOG` takes precedence; otherwise
/// `default_level` (e.g. "info" or "debug") applies.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
