//! # Batch Module
//!
//! Caller-side admission checks for a batch of uploads.
//!
//! The detection core trusts its input; front ends run these checks first.
//! Files with an extension outside the allowlist are skipped, while a batch
//! that is empty, has too many files or is too large is rejected outright.

use crate::error::BatchError;
use std::path::{Path, PathBuf};
use tracing::debug;

const MB: u64 = 1024 * 1024;

/// Default extension allowlist (compared case-insensitively)
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tiff"];

/// Limits applied to one batch
#[derive(Debug, Clone)]
pub struct BatchLimits {
    pub max_files: usize,
    pub max_total_bytes: u64,
    pub allowed_extensions: Vec<String>,
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            max_files: 25,
            max_total_bytes: 50 * MB,
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl BatchLimits {
    /// Whether the file name carries an allowed extension
    pub fn is_allowed(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|e| self.allowed_extensions.iter().any(|a| a == &e))
    }

    /// Check a batch and return the files that should be processed.
    ///
    /// The file count limit applies to everything submitted; the size limit
    /// only to the files that pass the extension check.
    pub fn validate(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>, BatchError> {
        if paths.is_empty() {
            return Err(BatchError::Empty);
        }

        if paths.len() > self.max_files {
            return Err(BatchError::TooManyFiles {
                count: paths.len(),
                max: self.max_files,
            });
        }

        let mut accepted = Vec::with_capacity(paths.len());
        let mut total_size: u64 = 0;

        for path in paths {
            if !self.is_allowed(path) {
                debug!(path = %path.display(), "skipping file with disallowed extension");
                continue;
            }

            let size = std::fs::metadata(path)
                .map_err(|source| BatchError::Unreadable {
                    path: path.clone(),
                    source,
                })?
                .len();

            if total_size + size > self.max_total_bytes {
                return Err(BatchError::TooLarge {
                    current_mb: total_size / MB,
                    limit_mb: self.max_total_bytes / MB,
                });
            }

            total_size += size;
            accepted.push(path.clone());
        }

        if accepted.is_empty() {
            return Err(BatchError::NoValidImages);
        }

        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, len: usize) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, vec![0u8; len]).unwrap();
        path
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let limits = BatchLimits::default();
        assert!(limits.is_allowed(Path::new("a.PNG")));
        assert!(limits.is_allowed(Path::new("b.jpeg")));
        assert!(limits.is_allowed(Path::new("c.TiFf")));
        assert!(!limits.is_allowed(Path::new("d.webp")));
        assert!(!limits.is_allowed(Path::new("no_extension")));
    }

    #[test]
    fn empty_batch_is_rejected() {
        let result = BatchLimits::default().validate(&[]);
        assert!(matches!(result, Err(BatchError::Empty)));
    }

    #[test]
    fn too_many_files_is_rejected() {
        let paths: Vec<PathBuf> = (0..26).map(|i| PathBuf::from(format!("{i}.png"))).collect();
        let result = BatchLimits::default().validate(&paths);
        assert!(matches!(
            result,
            Err(BatchError::TooManyFiles { count: 26, max: 25 })
        ));
    }

    #[test]
    fn disallowed_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        let png = write_file(&dir, "a.png", 10);
        let txt = write_file(&dir, "notes.txt", 10);

        let accepted = BatchLimits::default().validate(&[png.clone(), txt]).unwrap();

        assert_eq!(accepted, vec![png]);
    }

    #[test]
    fn only_disallowed_files_is_rejected() {
        let dir = TempDir::new().unwrap();
        let txt = write_file(&dir, "notes.txt", 10);

        let result = BatchLimits::default().validate(&[txt]);

        assert!(matches!(result, Err(BatchError::NoValidImages)));
    }

    #[test]
    fn cumulative_size_is_enforced() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.png", 600);
        let b = write_file(&dir, "b.png", 600);
        let limits = BatchLimits {
            max_total_bytes: 1000,
            ..BatchLimits::default()
        };

        let result = limits.validate(&[a, b]);

        assert!(matches!(result, Err(BatchError::TooLarge { .. })));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let result = BatchLimits::default().validate(&[PathBuf::from("/nonexistent/x.png")]);
        assert!(matches!(result, Err(BatchError::Unreadable { .. })));
    }
}
