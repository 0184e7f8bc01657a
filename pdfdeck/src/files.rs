//! Handles to user-selected files.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a selected file.
///
/// Rows, gestures and thumbnails refer to files by id, never by position, so
/// a reference stays valid while the file moves around the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FileId(u64);

impl FileId {
    fn next() -> Self {
        Self(NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value of the id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An immutable handle to one selected file: its name and its bytes.
///
/// Cloning shares the content; it never copies bytes.
#[derive(Clone)]
pub struct FileEntry {
    id: FileId,
    name: Arc<str>,
    bytes: Arc<[u8]>,
}

impl FileEntry {
    /// Create an entry with a fresh id.
    pub fn new(name: impl Into<Arc<str>>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            id: FileId::next(),
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Identity of this entry.
    pub fn id(&self) -> FileId {
        self.id
    }

    /// Display name (usually the file name without directories).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full byte content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the byte content, for handing to background tasks.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Size of the content in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("byte_len", &self.bytes.len())
            .finish()
    }
}

impl PartialEq for FileEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FileEntry {}

/// Format a byte count as a human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
