//! Writing the merged document and preview images.
//!
//! Writes are atomic: bytes go to a temporary sibling file which
//! is then renamed over the destination, so a failed download never leaves a
//! truncated PDF behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::io::writer::PdfWriter;
//! use std::path::Path;
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let stats = PdfWriter::new()
//!     .save_bytes(&bytes, Path::new("merged.pdf"))
//!     .await?;
//! println!("Wrote {}", stats.format_file_size());
//! # Ok(())
//! # }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfDeckError, Result};
use crate::files::format_file_size;
use crate::preview::PreviewPage;

/// Buffer size for writing (in bytes).
const WRITE_BUFFER_SIZE: usize = 8192;

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Atomic file writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl PdfWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self
    }

    /// Write `bytes` to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output directory doesn't exist
    /// - The file cannot be created or written
    /// - The temporary file cannot be renamed into place
    pub async fn save_bytes(&self, bytes: &[u8], path: &Path) -> Result<WriteStatistics> {
        let bytes = bytes.to_vec();
        let path_buf = path.to_path_buf();

        task::spawn_blocking(move || write_file(&bytes, path_buf))
            .await
            .map_err(|e| PdfDeckError::other(format!("Write task failed: {e}")))?
    }

    /// Write every rendered page of a preview into `dir` as a PGM image.
    ///
    /// Pages are named `page-001.pgm`, `page-002.pgm`, ... after their page
    /// number. Pages whose render failed are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be created or any image fails to write.
    pub async fn export_preview(&self, pages: &[PreviewPage], dir: &Path) -> Result<Vec<PathBuf>> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| PdfDeckError::FailedToCreateOutput {
                path: dir.to_path_buf(),
                source: e,
            })?;

        let mut written = Vec::new();
        for page in pages {
            let Ok(rendered) = &page.outcome else {
                continue;
            };
            let path = dir.join(format!("page-{:03}.pgm", page.page_number));
            self.save_bytes(&rendered.surface.to_pgm(), &path).await?;
            written.push(path);
        }

        log::info!("Exported {} preview page(s) to {}", written.len(), dir.display());
        Ok(written)
    }

    /// Check if a file can be written to the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory doesn't exist
    /// - Parent directory is not writable
    pub async fn can_write(&self, path: &Path) -> Result<()> {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        let metadata = tokio::fs::metadata(parent).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PdfDeckError::invalid_config(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                ))
            } else {
                PdfDeckError::FileNotAccessible {
                    path: parent.to_path_buf(),
                    source: e,
                }
            }
        })?;

        if metadata.permissions().readonly() {
            return Err(PdfDeckError::invalid_config(format!(
                "Output directory is not writable: {}",
                parent.display()
            )));
        }

        Ok(())
    }
}

fn write_file(bytes: &[u8], path: PathBuf) -> Result<WriteStatistics> {
    let start = Instant::now();
    let temp_path = path.with_extension("tmp");

    let file = std::fs::File::create(&temp_path).map_err(|e| {
        PdfDeckError::FailedToCreateOutput {
            path: temp_path.clone(),
            source: e,
        }
    })?;

    let mut writer = std::io::BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);
    writer
        .write_all(bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            PdfDeckError::FailedToWrite {
                path: temp_path.clone(),
                source: e,
            }
        })?;
    drop(writer);

    std::fs::rename(&temp_path, &path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        PdfDeckError::FailedToWrite {
            path: path.clone(),
            source: e,
        }
    })?;

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size: bytes.len() as u64,
        output_path: path,
    })
}
