//! Pipeline execution implementation.

use crate::core::comparator::{unique_images, FingerprintGrouper};
use crate::core::hasher::{FingerprintSet, HasherConfig, RotationHasher};
use crate::core::reporter::{FailedImage, Report, Reporter, ThumbnailConfig, DEFAULT_THUMBNAIL_SIZE};
use crate::error::DuplicateFinderError;
use crate::events::{
    null_sender, Event, EventSender, GroupEvent, HashEvent, HashProgress, PipelineEvent,
    PipelinePhase, PipelineSummary,
};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{info, warn};

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// dHash grid size
    pub hash_size: u32,
    /// Render inline previews
    pub thumbnails: bool,
    /// Bounding box for previews
    pub thumbnail_size: u32,
    /// Hash and thumbnail images on the rayon pool
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            hash_size: 8,
            thumbnails: true,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            parallel: true,
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    pub fn hash_size(mut self, size: u32) -> Self {
        self.config.hash_size = size;
        self
    }

    pub fn thumbnails(mut self, enabled: bool) -> Self {
        self.config.thumbnails = enabled;
        self
    }

    pub fn thumbnail_size(mut self, size: u32) -> Self {
        self.config.thumbnail_size = size;
        self
    }

    /// Per-image work in parallel (default) or strictly one image at a time.
    /// Grouping is always a single ordered pass, so the report is the same
    /// either way.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Validate the configuration and build the pipeline
    pub fn build(self) -> Result<Pipeline, DuplicateFinderError> {
        let hasher = HasherConfig::new()
            .hash_size(self.config.hash_size)
            .build()?;

        let thumbnailer = ThumbnailConfig::new()
            .max_dimension(self.config.thumbnail_size)
            .build()?;

        let reporter = Reporter::new(self.config.thumbnails.then_some(thumbnailer))
            .parallel(self.config.parallel);

        Ok(Pipeline {
            config: self.config,
            hasher,
            reporter,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fingerprinting results for one batch, in input order
#[derive(Debug, Default)]
pub struct HashedBatch {
    pub hashed: Vec<(PathBuf, FingerprintSet)>,
    pub failed: Vec<FailedImage>,
}

/// The duplicate detection pipeline.
///
/// Holds configuration only; every run starts from scratch, so one pipeline
/// can serve any number of batches, including concurrently.
pub struct Pipeline {
    config: PipelineConfig,
    hasher: RotationHasher,
    reporter: Reporter,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline without events
    pub fn run(&self, paths: &[PathBuf]) -> Report {
        self.run_with_events(paths, &null_sender())
    }

    /// Run the pipeline with event reporting.
    ///
    /// Per-image problems never fail the batch: undecodable images are
    /// listed under `failed_images`, missing previews leave `thumbnail` empty.
    pub fn run_with_events(&self, paths: &[PathBuf], events: &EventSender) -> Report {
        let start_time = Instant::now();
        events.send(Event::Pipeline(PipelineEvent::Started));

        let paths = distinct_references(paths);
        info!(images = paths.len(), "processing batch");

        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Hashing,
        }));
        let batch = self.fingerprint_all(&paths, events);

        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Grouping,
        }));
        let groups = FingerprintGrouper::new().group(&batch.hashed);
        let unique = unique_images(&batch.hashed, &groups);

        events.send(Event::Group(GroupEvent::Completed {
            total_groups: groups.len(),
            grouped_images: groups.iter().map(|g| g.count()).sum(),
        }));

        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Reporting,
        }));
        let report = self
            .reporter
            .build(paths.len(), &groups, &unique, batch.failed, events);

        let duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            total = report.total_images,
            groups = report.duplicate_groups.len(),
            unique = report.unique_images,
            failed = report.failed_images,
            duration_ms,
            "batch complete"
        );

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total_images: report.total_images,
                duplicate_groups: report.duplicate_groups.len(),
                unique_images: report.unique_images,
                failed_images: report.failed_images,
                duration_ms,
            },
        }));

        report
    }

    /// Fingerprint every image, keeping input order in both result lists
    pub fn fingerprint_all(&self, paths: &[PathBuf], events: &EventSender) -> HashedBatch {
        let total = paths.len();
        let completed = AtomicUsize::new(0);

        events.send(Event::Hash(HashEvent::Started {
            total_images: total,
        }));

        let hash_one = |path: &PathBuf| {
            let result = self.hasher.compute_fingerprints(path);
            if let Err(e) = &result {
                events.send(Event::Hash(HashEvent::Error {
                    path: path.clone(),
                    message: e.to_string(),
                }));
            }

            let current = completed.fetch_add(1, Ordering::SeqCst) + 1;
            events.send(Event::Hash(HashEvent::Progress(HashProgress {
                completed: current,
                total,
                current_path: path.clone(),
            })));

            (path.clone(), result)
        };

        // Indexed collect keeps input order, so parallel runs group identically
        let results: Vec<_> = if self.config.parallel {
            paths.par_iter().map(hash_one).collect()
        } else {
            paths.iter().map(hash_one).collect()
        };

        let mut batch = HashedBatch::default();
        for (path, result) in results {
            match result {
                Ok(set) => batch.hashed.push((path, set)),
                Err(e) => batch.failed.push(FailedImage::new(path, e.to_string())),
            }
        }

        events.send(Event::Hash(HashEvent::Completed {
            total_hashed: batch.hashed.len(),
            failed: batch.failed.len(),
        }));

        batch
    }
}

/// Drop repeated references, keeping the first occurrence
fn distinct_references(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen: HashSet<&Path> = HashSet::with_capacity(paths.len());
    let mut distinct = Vec::with_capacity(paths.len());

    for path in paths {
        if seen.insert(path.as_path()) {
            distinct.push(path.clone());
        } else {
            warn!(path = %path.display(), "image listed more than once; keeping first");
        }
    }

    distinct
}

/// Build a report for `paths` with the default configuration
pub fn generate_report(paths: &[PathBuf]) -> Result<Report, DuplicateFinderError> {
    Ok(Pipeline::builder().build()?.run(paths))
}
