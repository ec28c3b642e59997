//! # Reporter Module
//!
//! Turns grouping results into the final report: duplicate groups, unique
//! images and images that could not be processed, each entry carrying a
//! display name and an inline thumbnail.
//!
//! Every input image lands in exactly one section, so
//! `total_images == unique_images + Σ group counts + failed_images`.

pub mod export;
mod thumbnail;

pub use export::{export_html, export_json, ExportFormat};
pub use thumbnail::{fit_within, to_data_uri, ThumbnailConfig, Thumbnailer, DEFAULT_THUMBNAIL_SIZE};

use crate::core::comparator::DuplicateGroup;
use crate::events::{Event, EventSender, ReportEvent};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// The complete result of one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Number of distinct images submitted; a path given more than once
    /// is counted once
    pub total_images: usize,
    pub duplicate_groups: Vec<GroupReport>,
    /// Number of images not in any group
    pub unique_images: usize,
    pub unique_images_list: Vec<ImageEntry>,
    /// Number of images that could not be decoded
    pub failed_images: usize,
    pub failed_images_list: Vec<FailedImage>,
}

impl Report {
    /// Total number of images sitting in duplicate groups
    pub fn duplicate_count(&self) -> usize {
        self.duplicate_groups.iter().map(|g| g.count).sum()
    }

    /// Whether every submitted image is accounted for exactly once
    pub fn is_consistent(&self) -> bool {
        self.total_images == self.unique_images + self.duplicate_count() + self.failed_images
    }
}

/// One duplicate group as presented to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupReport {
    /// Fingerprint shared by every member
    pub hash: String,
    pub count: usize,
    pub images: Vec<ImageEntry>,
}

/// An image with its display name and preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub path: PathBuf,
    /// Base name only
    pub filename: String,
    /// `data:image/png;base64,...`, absent if the preview could not be made
    pub thumbnail: Option<String>,
}

/// An image that was dropped before grouping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedImage {
    pub path: PathBuf,
    pub filename: String,
    pub reason: String,
}

impl FailedImage {
    pub fn new(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            filename: display_name(&path),
            path,
            reason: reason.into(),
        }
    }
}

/// Base name of an image reference, falling back to the whole path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Assembles reports, rendering thumbnails as it goes
pub struct Reporter {
    thumbnailer: Option<Thumbnailer>,
    parallel: bool,
}

impl Reporter {
    /// `None` skips preview rendering; every `thumbnail` is then absent.
    pub fn new(thumbnailer: Option<Thumbnailer>) -> Self {
        Self {
            thumbnailer,
            parallel: true,
        }
    }

    /// Render previews on the rayon pool (default) or one by one
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the report for one batch.
    ///
    /// A preview failure only blanks that entry's thumbnail.
    pub fn build(
        &self,
        total_images: usize,
        groups: &[DuplicateGroup],
        unique: &[PathBuf],
        failed: Vec<FailedImage>,
        events: &EventSender,
    ) -> Report {
        let listed: Vec<&Path> = groups
            .iter()
            .flat_map(|g| g.images.iter())
            .chain(unique.iter())
            .map(PathBuf::as_path)
            .collect();

        events.send(Event::Report(ReportEvent::Started {
            total_thumbnails: if self.thumbnailer.is_some() { listed.len() } else { 0 },
        }));

        let thumbnails = self.render_all(&listed, events);
        let entry = |path: &PathBuf| ImageEntry {
            path: path.clone(),
            filename: display_name(path),
            thumbnail: thumbnails.get(path.as_path()).cloned().flatten(),
        };

        let duplicate_groups = groups
            .iter()
            .map(|group| GroupReport {
                hash: group.hash.to_string(),
                count: group.count(),
                images: group.images.iter().map(entry).collect(),
            })
            .collect();

        let unique_images_list: Vec<ImageEntry> = unique.iter().map(entry).collect();

        events.send(Event::Report(ReportEvent::Completed));

        Report {
            total_images,
            duplicate_groups,
            unique_images: unique_images_list.len(),
            unique_images_list,
            failed_images: failed.len(),
            failed_images_list: failed,
        }
    }

    fn render_all<'a>(
        &self,
        paths: &[&'a Path],
        events: &EventSender,
    ) -> HashMap<&'a Path, Option<String>> {
        let Some(thumbnailer) = &self.thumbnailer else {
            return HashMap::new();
        };

        let render = |path: &&'a Path| {
            let thumbnail = match thumbnailer.render(path) {
                Ok(uri) => Some(uri),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "thumbnail failed");
                    events.send(Event::Report(ReportEvent::ThumbnailFailed {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    }));
                    None
                }
            };
            (*path, thumbnail)
        };

        if self.parallel {
            paths.par_iter().map(render).collect()
        } else {
            paths.iter().map(render).collect()
        }
    }
}
