//! Core PDF merging implementation.
//!
//! The first source becomes the base document. Every further source is
//! renumbered past the base's highest object id, its objects are moved over,
//! and its pages are appended to the base's root page tree.

use futures::FutureExt;
use futures::future::BoxFuture;
use lopdf::{Document, Object, ObjectId};
use std::time::Instant;
use tokio::task;

use super::{MergeSource, MergedDocument, PdfMerger};
use crate::config::CompressionLevel;
use crate::error::{PdfDeckError, Result};
use crate::files::format_file_size;
use crate::utils::{flatten_inherited_attributes, root_pages_id};

/// Merger built on lopdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfMerger {
    compression: CompressionLevel,
}

impl LopdfMerger {
    /// Create a merger with standard compression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger with the given output compression.
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self { compression }
    }

    /// Merge synchronously. [`PdfMerger::merge`] runs this on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `sources` is empty
    /// - Any source cannot be parsed, is encrypted or has no pages
    /// - The page tree of the first source is malformed
    pub fn merge_blocking(&self, sources: &[MergeSource]) -> Result<MergedDocument> {
        let start = Instant::now();

        let Some((first, rest)) = sources.split_first() else {
            return Err(PdfDeckError::merge_failed("No PDF files to merge"));
        };

        let mut merged = load_source(first)?;
        let pages_id = root_pages_id(&merged)?;
        let mut max_id = merged.max_id;

        for source in rest {
            let mut doc = load_source(source)?;

            // Renumber objects to avoid ID conflicts
            doc.renumber_objects_with(max_id + 1);
            max_id = doc.max_id;

            let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
            for &page_id in &page_ids {
                flatten_inherited_attributes(&mut doc, page_id)?;
            }

            merged.objects.extend(doc.objects);
            add_pages_to_tree(&mut merged, pages_id, &page_ids)?;
        }
        merged.max_id = max_id;

        match self.compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => merged.compress(),
            CompressionLevel::Maximum => {
                merged.compress();
                merged.prune_objects();
            }
        }

        merged.renumber_objects();
        let page_count = merged.get_pages().len() as u32;

        let mut bytes = Vec::new();
        merged.save_to(&mut bytes).map_err(|e| {
            PdfDeckError::merge_failed(format!("Failed to serialize merged document: {e}"))
        })?;

        log::info!(
            "Merged {} file(s) into {} page(s), {} in {:.2}s",
            sources.len(),
            page_count,
            format_file_size(bytes.len() as u64),
            start.elapsed().as_secs_f64()
        );

        Ok(MergedDocument::new(
            bytes,
            page_count,
            sources.iter().map(|s| s.id).collect(),
        ))
    }
}

impl PdfMerger for LopdfMerger {
    fn merge(&self, sources: Vec<MergeSource>) -> BoxFuture<'static, Result<MergedDocument>> {
        let merger = *self;
        async move {
            task::spawn_blocking(move || merger.merge_blocking(&sources))
                .await
                .map_err(|e| PdfDeckError::merge_failed(format!("Merge task failed: {e}")))?
        }
        .boxed()
    }
}

fn load_source(source: &MergeSource) -> Result<Document> {
    let doc =
        Document::load_mem(&source.bytes).map_err(|e| PdfDeckError::from_load(&source.name, e))?;

    if doc.get_pages().is_empty() {
        return Err(PdfDeckError::corrupted_pdf(&source.name, "PDF has no pages"));
    }

    Ok(doc)
}

/// Append `page_ids` to the root page tree node and re-parent them.
fn add_pages_to_tree(merged: &mut Document, pages_id: ObjectId, page_ids: &[ObjectId]) -> Result<()> {
    let pages = merged
        .get_dictionary_mut(pages_id)
        .map_err(|e| PdfDeckError::merge_failed(format!("Failed to get pages object: {e}")))?;

    let kids = pages
        .get_mut(b"Kids")
        .and_then(Object::as_array_mut)
        .map_err(|_| PdfDeckError::merge_failed("Pages dictionary missing Kids array"))?;
    kids.extend(page_ids.iter().map(|&id| Object::Reference(id)));

    let current_count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
    pages.set("Count", current_count + page_ids.len() as i64);

    for &page_id in page_ids {
        let page = merged
            .get_dictionary_mut(page_id)
            .map_err(|e| PdfDeckError::merge_failed(format!("Failed to get page: {e}")))?;
        page.set("Parent", pages_id);
    }

    Ok(())
}
