//! Display rows derived from the ordered list.

use serde::Serialize;

use super::OrderedFileList;
use crate::files::{FileId, format_file_size};
use crate::preview::ThumbnailBoard;

/// What a row's preview area currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ThumbnailState {
    /// Render requested, not finished yet.
    Pending,
    /// First page rendered at the given pixel size.
    Ready {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Rendering failed; the file stays in the list.
    Failed {
        /// Why rendering failed.
        reason: String,
    },
}

/// Display descriptor for one list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualRow {
    /// Zero-based position in the list.
    pub index: usize,
    /// File shown by this row.
    pub file_id: FileId,
    /// Row label (the file name).
    pub label: String,
    /// Human-readable file size.
    pub size: String,
    /// First-page preview state.
    pub thumbnail: ThumbnailState,
    /// Whether the "up" control does anything.
    pub can_move_up: bool,
    /// Whether the "down" control does anything.
    pub can_move_down: bool,
}

/// Map the list (and its thumbnails) to one row per entry, in list order.
pub fn rows(list: &OrderedFileList, thumbnails: &ThumbnailBoard) -> Vec<VisualRow> {
    let last = list.len().saturating_sub(1);

    list.entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| VisualRow {
            index,
            file_id: entry.id(),
            label: entry.name().to_string(),
            size: format_file_size(entry.byte_len() as u64),
            thumbnail: thumbnails.state(entry.id()),
            can_move_up: index > 0,
            can_move_down: index < last,
        })
        .collect()
}
