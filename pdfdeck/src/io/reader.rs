//! Reading a file selection into memory.
//!
//! Every selected file is read in full, whatever its type. Nothing is parsed
//! here: a file that is not a PDF is only rejected when it is rendered or
//! merged.

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{PdfDeckError, Result};
use crate::files::{FileEntry, format_file_size};

/// Default number of files read at the same time.
const DEFAULT_WORKERS: usize = 8;

/// Reads selected files concurrently, keeping selection order.
#[derive(Debug, Clone)]
pub struct SelectionReader {
    workers: usize,
}

impl SelectionReader {
    /// Create a reader with the default concurrency.
    pub fn new() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }

    /// Create a reader that reads at most `workers` files at a time.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Read one file.
    ///
    /// The entry is named after the file name component of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    pub async fn read(&self, path: &Path) -> Result<FileEntry> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PdfDeckError::file_not_found(path.to_path_buf())
            } else {
                PdfDeckError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        log::debug!("Read {} ({})", name, format_file_size(bytes.len() as u64));
        Ok(FileEntry::new(name, bytes))
    }

    /// Read every path, returning entries in the order of `paths`.
    ///
    /// # Errors
    ///
    /// Fails with the first unreadable path; no entries are returned then.
    pub async fn read_all(&self, paths: &[PathBuf]) -> Result<Vec<FileEntry>> {
        let start = Instant::now();

        let results: Vec<Result<FileEntry>> = stream::iter(paths)
            .map(|path| self.read(path))
            .buffered(self.workers)
            .collect()
            .await;

        let entries = results.into_iter().collect::<Result<Vec<_>>>()?;

        log::info!(
            "Read {} file(s) in {:.2}s",
            entries.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(entries)
    }
}

impl Default for SelectionReader {
    fn default() -> Self {
        Self::new()
    }
}
