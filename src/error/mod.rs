//! # Error Module
//!
//! Error types for the duplicate image finder.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Per-image errors are recoverable** - the batch keeps going

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DuplicateFinderError {
    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Thumbnail error: {0}")]
    Thumbnail(#[from] ThumbnailError),

    #[error("Batch rejected: {0}")]
    Batch(#[from] BatchError),

    #[error("Report generation error: {0}")]
    Report(#[from] ReportError),
}

/// Errors that occur while computing fingerprints for one image
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to decode image {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Image is empty or corrupted: {path}")]
    EmptyImage { path: PathBuf },

    #[error("Failed to open image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid hash size: {size} (must be between 2 and 64)")]
    InvalidHashSize { size: u32 },

    #[error("Hash computation failed: {0}")]
    ComputationFailed(#[from] ResizeError),
}

/// Errors from the SIMD resizer shared by hashing and thumbnails
#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("Invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to create image buffer: {0}")]
    Buffer(String),

    #[error("Resize failed: {0}")]
    Resize(String),
}

/// Errors that occur while rendering a thumbnail
#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("Failed to load image for thumbnail: {0}")]
    Decode(#[source] HashError),

    #[error("Failed to resize thumbnail for {path}: {source}")]
    Resize {
        path: PathBuf,
        #[source]
        source: ResizeError,
    },

    #[error("Failed to encode thumbnail for {path}: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("Invalid thumbnail size: {size} (must be at least 1)")]
    InvalidSize { size: u32 },
}

/// Errors raised by the caller-side batch guard
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("No files provided")]
    Empty,

    #[error("No valid image files selected")]
    NoValidImages,

    #[error("Maximum {max} files allowed, got {count}")]
    TooManyFiles { count: usize, max: usize },

    #[error("Total file size exceeds {limit_mb}MB limit. Current: {current_mb}MB")]
    TooLarge { current_mb: u64, limit_mb: u64 },

    #[error("Cannot read file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while exporting a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DuplicateFinderError>;
