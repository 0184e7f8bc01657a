//! Touch-drag reordering.
//!
//! A touch gesture is sampled continuously. Each sample reports which row the
//! finger is over; every time the finger reaches a row it was not over before,
//! the dragged row moves exactly one step towards it.

use super::{Direction, Generation, OrderedFileList};
use crate::files::FileId;

/// An in-progress touch drag of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchDrag {
    row: FileId,
    last_index: usize,
    generation: Generation,
}

impl TouchDrag {
    /// Start dragging the row showing `row`.
    ///
    /// Returns None if the row is not in the list.
    pub fn begin(list: &OrderedFileList, row: FileId) -> Option<Self> {
        let last_index = list.position(row)?;
        Some(Self {
            row,
            last_index,
            generation: list.generation(),
        })
    }

    /// The row being dragged.
    pub fn row(&self) -> FileId {
        self.row
    }

    /// Index of the last row the finger was detected over.
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    /// Feed one position sample: `over` is the index of the row under the finger.
    ///
    /// Returns the direction of the step taken, or None when the sample does
    /// not cross into a new row, points at the dragged row itself, or the list
    /// was reloaded since the gesture began.
    pub fn sample(&mut self, list: &mut OrderedFileList, over: Option<usize>) -> Option<Direction> {
        if list.generation() != self.generation {
            return None;
        }

        let over = over.filter(|&index| index < list.len())?;
        if over == self.last_index || list.get(over).map(|e| e.id()) == Some(self.row) {
            return None;
        }

        let direction = if self.last_index < over {
            Direction::Down
        } else {
            Direction::Up
        };

        self.last_index = over;
        if list.move_one(self.row, direction) {
            Some(direction)
        } else {
            None
        }
    }

    /// Finish the gesture.
    pub fn end(self) -> FileId {
        self.row
    }
}
