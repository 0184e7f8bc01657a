//! Preview state: per-row thumbnails and the merged-document preview.
//!
//! Renders complete asynchronously and possibly out of order. Results are
//! only written if they still belong to what is on screen:
//! - [`ThumbnailBoard`] accepts a thumbnail only for the list [`Generation`]
//!   it was requested for, and only for a row that still exists.
//! - [`PreviewArea`] accepts a page set only for the merge token it was
//!   rendered from.
//! - [`render_pages_in_order`] hands back pages in page order regardless of
//!   completion order.

use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{PdfDeckError, Result};
use crate::files::FileId;
use crate::list::{Generation, ThumbnailState};
use crate::render::{PageRenderer, RenderedPage};

/// First-page preview of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    /// Render in flight.
    Pending,
    /// Rendered.
    Ready(RenderedPage),
    /// Render failed with the given reason.
    Failed(String),
}

#[derive(Debug, Default)]
struct BoardState {
    generation: Generation,
    slots: HashMap<FileId, Thumbnail>,
}

/// Thumbnails of the current selection, shared with background renders.
#[derive(Debug, Clone, Default)]
pub struct ThumbnailBoard {
    inner: Arc<Mutex<BoardState>>,
}

impl ThumbnailBoard {
    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop every thumbnail and open a pending slot per row of `generation`.
    pub fn reset(&self, generation: Generation, rows: impl IntoIterator<Item = FileId>) {
        let mut state = self.lock();
        state.generation = generation;
        state.slots = rows.into_iter().map(|id| (id, Thumbnail::Pending)).collect();
    }

    /// Store a finished render.
    ///
    /// Returns false, and stores nothing, when `generation` is no longer
    /// current or the row is gone.
    pub fn fulfil(&self, generation: Generation, row: FileId, result: Result<RenderedPage>) -> bool {
        let mut state = self.lock();
        if state.generation != generation {
            log::debug!("Discarding thumbnail for {row}: selection replaced");
            return false;
        }

        let Some(slot) = state.slots.get_mut(&row) else {
            log::debug!("Discarding thumbnail for {row}: row removed");
            return false;
        };

        *slot = match result {
            Ok(page) => Thumbnail::Ready(page),
            Err(err) => Thumbnail::Failed(err.to_string()),
        };
        true
    }

    /// Generation the board currently shows.
    pub fn generation(&self) -> Generation {
        self.lock().generation
    }

    /// Thumbnail of `row`, if the row belongs to the current generation.
    pub fn get(&self, row: FileId) -> Option<Thumbnail> {
        self.lock().slots.get(&row).cloned()
    }

    /// Display state of `row`; rows without a slot show as pending.
    pub fn state(&self, row: FileId) -> ThumbnailState {
        match self.lock().slots.get(&row) {
            Some(Thumbnail::Ready(page)) => ThumbnailState::Ready {
                width: page.surface.width(),
                height: page.surface.height(),
            },
            Some(Thumbnail::Failed(reason)) => ThumbnailState::Failed {
                reason: reason.clone(),
            },
            Some(Thumbnail::Pending) | None => ThumbnailState::Pending,
        }
    }
}

/// Identifies one merge; guards preview installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MergeToken(u64);

impl MergeToken {
    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// One page slot of the merged-document preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewPage {
    /// 1-based page number.
    pub page_number: u32,
    /// The render, or why it failed.
    pub outcome: std::result::Result<RenderedPage, String>,
}

/// The preview of the merged document, in page order.
#[derive(Debug, Clone, Default)]
pub struct PreviewArea {
    token: MergeToken,
    pages: Vec<PreviewPage>,
}

impl PreviewArea {
    /// Empty the area and bind it to merge `token`.
    pub fn reset(&mut self, token: MergeToken) {
        self.token = token;
        self.pages.clear();
    }

    /// Install pages rendered from merge `token`.
    ///
    /// Returns false, and installs nothing, when another merge has happened since.
    pub fn install(&mut self, token: MergeToken, pages: Vec<PreviewPage>) -> bool {
        if token != self.token {
            log::warn!("Discarding preview of a superseded merge");
            return false;
        }
        self.pages = pages;
        true
    }

    /// Merge the area is bound to.
    pub fn token(&self) -> MergeToken {
        self.token
    }

    /// Installed pages, in page order.
    pub fn pages(&self) -> &[PreviewPage] {
        &self.pages
    }

    /// Whether no pages are installed.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Render every page of `bytes` at `scale`, at most `jobs` at a time.
///
/// Pages come back in page order even when renders finish out of order.
/// A page that fails to render yields a failed slot; only a failure to
/// count the pages fails the whole call.
pub async fn render_pages_in_order(
    renderer: Arc<dyn PageRenderer>,
    bytes: Arc<[u8]>,
    scale: f32,
    jobs: usize,
) -> Result<Vec<PreviewPage>> {
    let total = renderer.page_count(Arc::clone(&bytes)).await?;
    if total == 0 {
        return Err(PdfDeckError::corrupted_pdf("merged document", "PDF has no pages"));
    }

    let pages = stream::iter(1..=total)
        .map(|page_number| {
            let render = renderer.render_page(Arc::clone(&bytes), page_number, scale);
            async move {
                PreviewPage {
                    page_number,
                    outcome: render.await.map_err(|e| e.to_string()),
                }
            }
        })
        .buffered(jobs.max(1))
        .collect::<Vec<_>>()
        .await;

    Ok(pages)
}
