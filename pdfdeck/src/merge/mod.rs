//! PDF merging.
//!
//! The session hands the current order of files to a [`PdfMerger`] and gets
//! back one [`MergedDocument`]. The merger:
//! - Appends every page of every source, sources in list order
//! - Preserves page order within each source
//! - Fails as a whole if any source cannot be loaded
//!
//! [`LopdfMerger`] is the built-in implementation.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::files::FileEntry;
//! use pdfdeck::merge::{LopdfMerger, MergeSource, PdfMerger};
//!
//! # async fn example(a: FileEntry, b: FileEntry) -> Result<(), Box<dyn std::error::Error>> {
//! let merger = LopdfMerger::new();
//! let sources = vec![MergeSource::from(&a), MergeSource::from(&b)];
//! let merged = merger.merge(sources).await?;
//! println!("Merged {} pages", merged.page_count());
//! # Ok(())
//! # }
//! ```

pub mod merger;

pub use merger::LopdfMerger;

use futures::future::BoxFuture;
use std::sync::Arc;

use crate::error::Result;
use crate::files::{FileEntry, FileId};

/// One input of a merge.
#[derive(Debug, Clone)]
pub struct MergeSource {
    /// File the bytes came from.
    pub id: FileId,
    /// Display name, used in error messages.
    pub name: String,
    /// Full content of the file.
    pub bytes: Arc<[u8]>,
}

impl From<&FileEntry> for MergeSource {
    fn from(entry: &FileEntry) -> Self {
        Self {
            id: entry.id(),
            name: entry.name().to_string(),
            bytes: entry.shared_bytes(),
        }
    }
}

/// The output of a successful merge.
#[derive(Debug, Clone)]
pub struct MergedDocument {
    bytes: Arc<[u8]>,
    page_count: u32,
    sources: Vec<FileId>,
}

impl MergedDocument {
    /// Wrap merged bytes.
    pub fn new(bytes: impl Into<Arc<[u8]>>, page_count: u32, sources: Vec<FileId>) -> Self {
        Self {
            bytes: bytes.into(),
            page_count,
            sources,
        }
    }

    /// Serialized PDF.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the serialized PDF.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Files merged, in merge order.
    pub fn sources(&self) -> &[FileId] {
        &self.sources
    }
}

/// Concatenates the pages of several PDFs into one.
pub trait PdfMerger: Send + Sync {
    /// Merge `sources` in the given order.
    fn merge(&self, sources: Vec<MergeSource>) -> BoxFuture<'static, Result<MergedDocument>>;
}
