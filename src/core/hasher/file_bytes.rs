//! Reading image references into memory.
//!
//! Batches are capped at 50MB, so a single upload can still be large
//! enough that a memory map beats a heap copy.

use crate::error::HashError;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Minimum file size to use memory-mapped I/O (1MB)
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Read the bytes behind an image reference.
///
/// Files of at least 1MB are memory mapped, smaller ones are read with
/// `fs::read`. A zero-length file is reported as an empty image rather
/// than handed to a decoder.
pub fn read_file_bytes(path: &Path) -> Result<FileBytes, HashError> {
    let metadata = std::fs::metadata(path).map_err(|e| HashError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() == 0 {
        return Err(HashError::EmptyImage {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() >= MMAP_THRESHOLD {
        read_mmap(path)
    } else {
        read_standard(path)
    }
}

fn read_mmap(path: &Path) -> Result<FileBytes, HashError> {
    let file = File::open(path).map_err(|e| HashError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    // SAFETY: the map is read-only and the core never writes to image
    // references; the caller owns the file for the whole batch.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| HashError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(FileBytes::Mmap(mmap))
}

fn read_standard(path: &Path) -> Result<FileBytes, HashError> {
    let bytes = std::fs::read(path).map_err(|e| HashError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(FileBytes::Vec(bytes))
}

/// File bytes that may be either owned or memory-mapped.
pub enum FileBytes {
    Vec(Vec<u8>),
    Mmap(Mmap),
}

impl AsRef<[u8]> for FileBytes {
    fn as_ref(&self) -> &[u8] {
        match self {
            FileBytes::Vec(v) => v,
            FileBytes::Mmap(m) => m,
        }
    }
}

impl std::ops::Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_ref()
    }
}
