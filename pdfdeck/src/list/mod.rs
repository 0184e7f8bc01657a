//! The ordered file list.
//!
//! [`OrderedFileList`] is the single source of truth for merge order. Display
//! rows are derived from it by [`rows::rows`]; nothing ever reads positions back
//! from the display. Every reorder takes `&mut self`, so a reorder is observed
//! either completely or not at all.
//!
//! # Examples
//!
//! ```
//! use pdfdeck::files::FileEntry;
//! use pdfdeck::list::{Direction, OrderedFileList};
//!
//! let x = FileEntry::new("x.pdf", Vec::<u8>::new());
//! let y = FileEntry::new("y.pdf", Vec::<u8>::new());
//! let z = FileEntry::new("z.pdf", Vec::<u8>::new());
//! let z_id = z.id();
//!
//! let mut list = OrderedFileList::default();
//! list.load_selection(vec![x, y, z]);
//! assert!(list.move_one(z_id, Direction::Up));
//!
//! let names: Vec<&str> = list.entries().iter().map(|e| e.name()).collect();
//! assert_eq!(names, ["x.pdf", "z.pdf", "y.pdf"]);
//! ```

pub mod rows;
pub mod touch;

pub use rows::{ThumbnailState, VisualRow, rows};
pub use touch::TouchDrag;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::PdfDeckError;
use crate::files::{FileEntry, FileId};

/// Direction of a single-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards index 0.
    Up,
    /// Towards the last index.
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
        }
    }
}

/// Where a dragged row lands relative to the row it was dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropPlacement {
    /// Remove the dragged row and insert it next to the target, on the side it
    /// came from. Rows in between shift by one.
    #[default]
    Reinsert,
    /// Exchange the dragged row and the target; rows in between stay put.
    Swap,
}

impl FromStr for DropPlacement {
    type Err = PdfDeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reinsert" => Ok(Self::Reinsert),
            "swap" => Ok(Self::Swap),
            _ => Err(PdfDeckError::invalid_config(format!(
                "Invalid drop placement: {s}. Must be one of: reinsert, swap"
            ))),
        }
    }
}

/// Identifies one selection. Bumped whenever the list is replaced or cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// The list order at one point in time.
#[derive(Debug, Clone)]
pub struct OrderSnapshot {
    /// Generation of the list the snapshot was taken from.
    pub generation: Generation,
    /// Entries in list order.
    pub entries: Vec<FileEntry>,
}

impl OrderSnapshot {
    /// Number of entries in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered sequence of selected files.
#[derive(Debug, Clone, Default)]
pub struct OrderedFileList {
    entries: Vec<FileEntry>,
    generation: Generation,
    placement: DropPlacement,
}

impl OrderedFileList {
    /// Create an empty list with the given drag-and-drop placement.
    pub fn new(placement: DropPlacement) -> Self {
        Self {
            placement,
            ..Default::default()
        }
    }

    /// Replace the whole list with `files`, keeping their order.
    ///
    /// Returns the generation of the new selection.
    pub fn load_selection(&mut self, files: Vec<FileEntry>) -> Generation {
        self.entries = files;
        self.generation = self.generation.next();
        log::debug!(
            "Loaded selection of {} file(s) as generation {:?}",
            self.entries.len(),
            self.generation
        );
        self.generation
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> Generation {
        self.load_selection(Vec::new())
    }

    /// Current generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Placement used by [`reorder_by_drag`](Self::reorder_by_drag).
    pub fn placement(&self) -> DropPlacement {
        self.placement
    }

    /// Entries in current order.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    /// Current index of the row showing `id`.
    pub fn position(&self, id: FileId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    /// Move the row showing `id` one step in `direction`.
    ///
    /// Returns false without changing anything when the row is already at
    /// that end of the list or is not in the list.
    pub fn move_one(&mut self, id: FileId, direction: Direction) -> bool {
        match self.position(id) {
            Some(index) => self.move_index(index, direction),
            None => false,
        }
    }

    /// Move the row at `index` one step in `direction`.
    ///
    /// Returns false at the boundaries and for indices past the end.
    pub fn move_index(&mut self, index: usize, direction: Direction) -> bool {
        if index >= self.entries.len() {
            return false;
        }

        let neighbour = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < self.entries.len() => index + 1,
            _ => return false,
        };

        self.entries.swap(index, neighbour);
        log::debug!("Moved row {index} {direction} to {neighbour}");
        true
    }

    /// Drop the row showing `source` onto the row showing `target`.
    ///
    /// With [`DropPlacement::Reinsert`] the source ends up at the target's
    /// former index: before the target when dragged from below, after it when
    /// dragged from above. With [`DropPlacement::Swap`] the two rows exchange
    /// places. Returns false when source and target are the same row or either
    /// is not in the list.
    pub fn reorder_by_drag(&mut self, source: FileId, target: FileId) -> bool {
        if source == target {
            return false;
        }

        let (Some(from), Some(to)) = (self.position(source), self.position(target)) else {
            return false;
        };

        match self.placement {
            DropPlacement::Reinsert if from > to => self.entries[to..=from].rotate_right(1),
            DropPlacement::Reinsert => self.entries[from..=to].rotate_left(1),
            DropPlacement::Swap => self.entries.swap(from, to),
        }

        log::debug!(
            "Dragged row {from} onto row {to} ({:?})",
            self.placement
        );
        true
    }

    /// Snapshot of the current order, for merging.
    pub fn current_order(&self) -> OrderSnapshot {
        OrderSnapshot {
            generation: self.generation,
            entries: self.entries.clone(),
        }
    }
}
