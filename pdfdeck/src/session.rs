//! The merge/preview/download orchestrator.
//!
//! A [`Session`] owns the ordered list and everything derived from it: the
//! thumbnail board, the latest merged document and its preview. It sequences
//! calls to the [`PdfMerger`] and [`PageRenderer`] collaborators; it does not
//! merge or render anything itself.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::config::SessionConfig;
//! use pdfdeck::notice;
//! use pdfdeck::session::Session;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (notices, _receiver) = notice::channel();
//! let mut session = Session::new(SessionConfig::default(), notices)?;
//!
//! session.select_paths(&["a.pdf", "b.pdf"]).await?;
//! session.merge().await?;
//! let path = session.download(Path::new(".")).await?;
//! println!("Saved {}", path.display());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::{MIN_MERGE_FILES, SessionConfig};
use crate::error::{PdfDeckError, Result};
use crate::files::{FileEntry, FileId};
use crate::io::{PdfWriter, SelectionReader};
use crate::list::{
    Direction, Generation, OrderSnapshot, OrderedFileList, TouchDrag, VisualRow, rows,
};
use crate::merge::{LopdfMerger, MergeSource, MergedDocument, PdfMerger};
use crate::notice::{self, Notice, NoticeSender};
use crate::preview::{
    MergeToken, PreviewArea, PreviewPage, ThumbnailBoard, render_pages_in_order,
};
use crate::render::{FrameRenderer, PageRenderer};
use crate::utils::collect_paths_for_patterns;

/// One interactive session.
pub struct Session {
    config: SessionConfig,
    list: OrderedFileList,
    thumbnails: ThumbnailBoard,
    merger: Arc<dyn PdfMerger>,
    renderer: Arc<dyn PageRenderer>,
    reader: SelectionReader,
    writer: PdfWriter,
    notices: NoticeSender,
    renders: JoinSet<()>,
    render_slots: Arc<Semaphore>,
    merged: Option<MergedDocument>,
    merge_token: MergeToken,
    preview: PreviewArea,
}

impl Session {
    /// Create a session with the built-in lopdf merger and frame renderer.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(config: SessionConfig, notices: NoticeSender) -> Result<Self> {
        let merger = Arc::new(LopdfMerger::with_compression(config.compression));
        let renderer = Arc::new(FrameRenderer::new());
        Self::with_collaborators(config, merger, renderer, notices)
    }

    /// Create a session with custom collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn with_collaborators(
        config: SessionConfig,
        merger: Arc<dyn PdfMerger>,
        renderer: Arc<dyn PageRenderer>,
        notices: NoticeSender,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            list: OrderedFileList::new(config.drop_placement),
            reader: SelectionReader::with_workers(config.effective_jobs()),
            render_slots: Arc::new(Semaphore::new(config.effective_jobs())),
            config,
            thumbnails: ThumbnailBoard::default(),
            merger,
            renderer,
            writer: PdfWriter::new(),
            notices,
            renders: JoinSet::new(),
            merged: None,
            merge_token: MergeToken::default(),
            preview: PreviewArea::default(),
        })
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The ordered list.
    pub fn list(&self) -> &OrderedFileList {
        &self.list
    }

    /// Per-row thumbnails.
    pub fn thumbnails(&self) -> &ThumbnailBoard {
        &self.thumbnails
    }

    /// Display rows for the current list.
    pub fn rows(&self) -> Vec<VisualRow> {
        rows(&self.list, &self.thumbnails)
    }

    /// Files in current merge order.
    pub fn current_order(&self) -> OrderSnapshot {
        self.list.current_order()
    }

    /// Latest merged document, if the last merge succeeded.
    pub fn merged(&self) -> Option<&MergedDocument> {
        self.merged.as_ref()
    }

    /// Pages of the installed preview.
    pub fn preview_pages(&self) -> &[PreviewPage] {
        self.preview.pages()
    }

    /// Replace the list with `files` and request a thumbnail for each.
    ///
    /// Must be called from within a tokio runtime. Thumbnail renders run in
    /// the background, at most `render_jobs` at a time. Renders still in
    /// flight from an earlier selection are left to finish and their results
    /// are discarded; queued ones never start.
    pub fn load_selection(&mut self, files: Vec<FileEntry>) -> Generation {
        self.renders.detach_all();

        let generation = self.list.load_selection(files);
        self.thumbnails
            .reset(generation, self.list.entries().iter().map(FileEntry::id));

        let entries = self.list.entries().to_vec();
        for entry in &entries {
            self.spawn_thumbnail(generation, entry);
        }

        log::info!("Selected {} file(s)", self.list.len());
        generation
    }

    /// Expand `patterns`, read the files and load them as the new selection.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is invalid or a file cannot be read. The
    /// current list is left untouched then.
    pub async fn select_paths<T>(&mut self, patterns: T) -> Result<Generation>
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let paths = collect_paths_for_patterns(patterns)?;
        let files = self.reader.read_all(&paths).await?;
        Ok(self.load_selection(files))
    }

    /// Empty the list.
    pub fn clear(&mut self) -> Generation {
        self.renders.detach_all();
        let generation = self.list.clear();
        self.thumbnails.reset(generation, std::iter::empty());
        generation
    }

    fn spawn_thumbnail(&mut self, generation: Generation, entry: &FileEntry) {
        let renderer = Arc::clone(&self.renderer);
        let slots = Arc::clone(&self.render_slots);
        let scale = self.config.thumbnail_scale;
        let bytes = entry.shared_bytes();
        let board = self.thumbnails.clone();
        let notices = self.notices.clone();
        let id = entry.id();
        let name = entry.name().to_string();

        self.renders.spawn(async move {
            let Ok(_permit) = slots.acquire_owned().await else {
                return;
            };
            if board.generation() != generation {
                log::debug!("Skipping thumbnail of {name}: selection replaced");
                return;
            }

            let result = renderer.render_page(bytes, 1, scale).await;
            let failure = result.as_ref().err().map(ToString::to_string);

            if !board.fulfil(generation, id, result) {
                return;
            }
            if let Some(reason) = failure {
                log::warn!("Thumbnail of {name} failed: {reason}");
                notice::post(
                    &notices,
                    Notice::warning(format!("Could not render a preview of {name}: {reason}")),
                );
            }
        });
    }

    /// Wait until every thumbnail of the current selection has finished.
    pub async fn settle_thumbnails(&mut self) {
        while let Some(joined) = self.renders.join_next().await {
            if let Err(err) = joined {
                log::warn!("Thumbnail task ended abnormally: {err}");
            }
        }
    }

    /// Move a row one step up or down. No-op at the list boundary.
    pub fn move_one(&mut self, id: FileId, direction: Direction) -> bool {
        self.list.move_one(id, direction)
    }

    /// Move the row at `index` one step up or down.
    pub fn move_index(&mut self, index: usize, direction: Direction) -> bool {
        self.list.move_index(index, direction)
    }

    /// Drop the `source` row onto the `target` row.
    pub fn reorder_by_drag(&mut self, source: FileId, target: FileId) -> bool {
        self.list.reorder_by_drag(source, target)
    }

    /// Start a touch gesture on `row`.
    pub fn begin_touch(&self, row: FileId) -> Option<TouchDrag> {
        TouchDrag::begin(&self.list, row)
    }

    /// Feed one touch position sample into a gesture.
    pub fn touch_sample(&mut self, drag: &mut TouchDrag, over: Option<usize>) -> Option<Direction> {
        drag.sample(&mut self.list, over)
    }

    /// Merge the files in their current order.
    ///
    /// The order is captured before anything is awaited. The previous merged
    /// document and its preview are discarded once the merge starts, so a
    /// failed merge leaves nothing behind.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::NotEnoughFiles`] without calling the merger
    /// when fewer than two files are selected, or the merger's error.
    pub async fn merge(&mut self) -> Result<&MergedDocument> {
        let snapshot = self.list.current_order();
        if snapshot.len() < MIN_MERGE_FILES {
            return Err(PdfDeckError::NotEnoughFiles {
                selected: snapshot.len(),
                required: MIN_MERGE_FILES,
            });
        }

        self.merged = None;
        self.merge_token = self.merge_token.next();
        self.preview.reset(self.merge_token);

        let sources: Vec<MergeSource> = snapshot.entries.iter().map(MergeSource::from).collect();
        let merged = self.merger.merge(sources).await?;

        log::info!(
            "Merged {} file(s) into {} page(s)",
            snapshot.len(),
            merged.page_count()
        );
        Ok(&*self.merged.insert(merged))
    }

    /// Render every page of the merged document into the preview area.
    ///
    /// Pages that fail to render keep their slot and raise a warning notice.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::NothingMerged`] before a successful merge, or
    /// an error if the merged document cannot be opened.
    pub async fn preview(&mut self) -> Result<&[PreviewPage]> {
        let merged = self.merged.as_ref().ok_or(PdfDeckError::NothingMerged)?;
        let token = self.merge_token;

        let pages = render_pages_in_order(
            Arc::clone(&self.renderer),
            merged.shared_bytes(),
            self.config.preview_scale,
            self.config.effective_jobs(),
        )
        .await?;

        for page in &pages {
            if let Err(reason) = &page.outcome {
                log::warn!("Preview of page {} failed: {reason}", page.page_number);
                notice::post(
                    &self.notices,
                    Notice::warning(format!(
                        "Could not render page {}: {reason}",
                        page.page_number
                    )),
                );
            }
        }

        self.preview.install(token, pages);
        Ok(self.preview.pages())
    }

    /// Write the installed preview pages into `dir` as images.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::NothingMerged`] when no preview is installed,
    /// or the writer's error.
    pub async fn export_preview(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if self.preview.is_empty() {
            return Err(PdfDeckError::NothingMerged);
        }
        self.writer.export_preview(self.preview.pages(), dir).await
    }

    /// Save the merged document into `dir` under the configured download name.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::NothingMerged`] before a successful merge, or
    /// an error if the file cannot be written.
    pub async fn download(&self, dir: &Path) -> Result<PathBuf> {
        let merged = self.merged.as_ref().ok_or(PdfDeckError::NothingMerged)?;
        let path = dir.join(&self.config.download_name);

        self.writer.can_write(&path).await?;
        let stats = self.writer.save_bytes(merged.bytes(), &path).await?;

        log::info!("Saved {} ({})", path.display(), stats.format_file_size());
        Ok(path)
    }
}
