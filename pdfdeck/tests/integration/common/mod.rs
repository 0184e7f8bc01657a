//! Shared helpers for the integration tests.
//!
//! Test PDFs are generated in memory. Every page carries a `DeckTag` entry
//! (`"<tag>-<page>"`) so page order can be checked after merging.

use lopdf::{Document, Object, dictionary};
use pdfdeck::files::FileEntry;
use pdfdeck::list::OrderedFileList;
use std::path::PathBuf;
use tempfile::TempDir;

/// Build a PDF with `pages` pages tagged `"{tag}-1"`, `"{tag}-2"`, ...
pub fn tagged_pdf(tag: &str, pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let catalog_id = doc.new_object_id();
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::with_capacity(pages);
    for number in 1..=pages {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "DeckTag" => Object::string_literal(format!("{tag}-{number}")),
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }
        .into(),
    );
    doc.objects.insert(
        catalog_id,
        dictionary! { "Type" => "Catalog", "Pages" => pages_id }.into(),
    );
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to serialize test PDF");
    bytes
}

/// In-memory entry named `"{tag}.pdf"`.
pub fn entry(tag: &str, pages: usize) -> FileEntry {
    FileEntry::new(format!("{tag}.pdf"), tagged_pdf(tag, pages))
}

/// Write `"{tag}.pdf"` into `dir` and return its path.
pub fn write_pdf(dir: &TempDir, tag: &str, pages: usize) -> PathBuf {
    let path = dir.path().join(format!("{tag}.pdf"));
    std::fs::write(&path, tagged_pdf(tag, pages)).expect("Failed to write test PDF");
    path
}

/// Page tags of a PDF, in page order.
pub fn page_tags(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).expect("Output is not a valid PDF");
    doc.get_pages()
        .values()
        .map(|&id| match doc.get_dictionary(id).and_then(|d| d.get(b"DeckTag")) {
            Ok(Object::String(raw, _)) => String::from_utf8_lossy(raw).into_owned(),
            _ => "?".to_string(),
        })
        .collect()
}

/// Entry names of a list, in order.
pub fn names(list: &OrderedFileList) -> Vec<String> {
    list.entries().iter().map(|e| e.name().to_string()).collect()
}
