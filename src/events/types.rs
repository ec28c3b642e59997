//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted while processing a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Fingerprinting phase events
    Hash(HashEvent),
    /// Grouping phase events
    Group(GroupEvent),
    /// Report assembly events
    Report(ReportEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events during the fingerprinting phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HashEvent {
    /// Hashing has started
    Started { total_images: usize },
    /// One image finished, successfully or not
    Progress(HashProgress),
    /// An image could not be fingerprinted; the batch continues
    Error { path: PathBuf, message: String },
    /// Hashing completed
    Completed { total_hashed: usize, failed: usize },
}

/// Progress information during hashing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashProgress {
    /// Number of images processed so far
    pub completed: usize,
    /// Total number of images in the batch
    pub total: usize,
    /// Image that just finished
    pub current_path: PathBuf,
}

/// Events from the grouping phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GroupEvent {
    Completed {
        total_groups: usize,
        /// Images that ended up in some group
        grouped_images: usize,
    },
}

/// Events while the report is assembled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportEvent {
    /// Thumbnail rendering has started
    Started { total_thumbnails: usize },
    /// A preview could not be rendered; the entry is kept without one
    ThumbnailFailed { path: PathBuf, message: String },
    Completed,
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    Completed { summary: PipelineSummary },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Hashing,
    Grouping,
    Reporting,
}

/// Summary of one batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub total_images: usize,
    pub duplicate_groups: usize,
    pub unique_images: usize,
    pub failed_images: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Hashing => write!(f, "Hashing"),
            PipelinePhase::Grouping => write!(f, "Grouping"),
            PipelinePhase::Reporting => write!(f, "Building report"),
        }
    }
}
