//! Utilities for selection path expansion and page-tree lookups.

use crate::error::{PdfDeckError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::path::PathBuf;

/// Page attributes a page may inherit from its ancestors in the page tree.
pub(crate) const INHERITABLE_PAGE_KEYS: [&[u8]; 4] =
    [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Page tree nesting deeper than this is treated as a reference cycle.
const MAX_TREE_DEPTH: usize = 64;

/// Expand selection patterns into filesystem paths, keeping their order.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`.
///
/// Patterns without glob metacharacters are kept as literal paths even when
/// nothing exists there, so reading them reports the missing file. Matches of
/// one pattern come out in the sorted order `glob` yields them.
///
/// Errors:
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from glob iterator.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let paths = collect_paths_for_pattern(pattern)?;
        resolved_paths.extend(paths);
    }

    Ok(resolved_paths)
}

fn collect_paths_for_pattern<P: AsRef<str>>(pattern: P) -> Result<Vec<PathBuf>> {
    let pattern = pattern.as_ref();
    if !pattern.contains(['*', '?', '[']) {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let mut resolved_paths = Vec::new();

    let paths = glob::glob(pattern).map_err(|err| PdfDeckError::Other {
        message: format!("Invalid pattern '{pattern}': {err}"),
    })?;

    for entry in paths {
        let path = entry.map_err(|err| PdfDeckError::Other {
            message: err.to_string(),
        })?;
        resolved_paths.push(path);
    }

    if resolved_paths.is_empty() {
        log::warn!("Pattern '{pattern}' matched no files");
    }

    Ok(resolved_paths)
}

/// Object id of the root `Pages` node of a document.
pub(crate) fn root_pages_id(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfDeckError::merge_failed(format!("Failed to get pages reference: {e}")))
}

/// Look up `key` on a page, walking up through its `Parent` chain.
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    page: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node = page;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

/// Copy inheritable attributes from a page's ancestors onto the page itself.
///
/// Needed before the page is re-parented into another document's page tree,
/// which would otherwise lose whatever the old ancestors supplied.
pub(crate) fn flatten_inherited_attributes(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let page = doc
        .get_dictionary(page_id)
        .map_err(|e| PdfDeckError::merge_failed(format!("Failed to get page: {e}")))?;

    let found: Vec<(&[u8], Object)> = INHERITABLE_PAGE_KEYS
        .iter()
        .filter(|key| !page.has(key))
        .filter_map(|key| inherited_attribute(doc, page, key).map(|value| (*key, value.clone())))
        .collect();

    if found.is_empty() {
        return Ok(());
    }

    let page = doc
        .get_dictionary_mut(page_id)
        .map_err(|e| PdfDeckError::merge_failed(format!("Failed to get page: {e}")))?;
    for (key, value) in found {
        page.set(key, value);
    }

    Ok(())
}

/// Media box of a page as `(width, height)` in points, honouring inheritance.
///
/// Falls back to US Letter when the page has no usable media box.
pub(crate) fn page_dimensions(doc: &Document, page: &Dictionary) -> (f32, f32) {
    const LETTER: (f32, f32) = (612.0, 792.0);

    let Some(Object::Array(rect)) = inherited_attribute(doc, page, b"MediaBox") else {
        return LETTER;
    };

    let coords: Vec<f32> = rect.iter().filter_map(|o| o.as_float().ok()).collect();
    match coords.as_slice() {
        [x1, y1, x2, y2] => ((x2 - x1).abs(), (y2 - y1).abs()),
        _ => LETTER,
    }
}

/// Effective `/Rotate` of a page in degrees, normalised to 0, 90, 180 or 270.
pub(crate) fn page_rotation(doc: &Document, page: &Dictionary) -> i64 {
    inherited_attribute(doc, page, b"Rotate")
        .and_then(|o| o.as_i64().ok())
        .map(|degrees| degrees.rem_euclid(360) / 90 * 90)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;
    use tempfile::TempDir;

    #[test]
    fn test_literal_paths_are_kept() {
        let paths = collect_paths_for_patterns(["missing.pdf", "other.pdf"]).unwrap();
        assert_eq!(
            paths,
            vec![PathBuf::from("missing.pdf"), PathBuf::from("other.pdf")]
        );
    }

    #[test]
    fn test_glob_patterns_expand_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["b.pdf", "a.pdf", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let pattern = format!("{}/*.pdf", dir.path().display());
        let paths = collect_paths_for_patterns([pattern]).unwrap();

        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_invalid_glob_pattern_errors() {
        assert!(collect_paths_for_patterns(["[*.pdf"]).is_err());
    }

    fn nested_tree_doc() -> (Document, ObjectId) {
        let mut doc = Document::with_version("1.5");
        let root_id = doc.new_object_id();
        let page_id = doc.new_object_id();

        doc.objects.insert(
            page_id,
            dictionary! {
                "Type" => "Page",
                "Parent" => root_id,
            }
            .into(),
        );
        doc.objects.insert(
            root_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1i64,
                "MediaBox" => vec![0.into(), 0.into(), 200.into(), 100.into()],
                "Rotate" => 450i64,
            }
            .into(),
        );
        (doc, page_id)
    }

    #[test]
    fn test_inherited_dimensions_and_rotation() {
        let (doc, page_id) = nested_tree_doc();
        let page = doc.get_dictionary(page_id).unwrap();

        assert_eq!(page_dimensions(&doc, page), (200.0, 100.0));
        assert_eq!(page_rotation(&doc, page), 90);
    }

    #[test]
    fn test_flatten_copies_inherited_keys_onto_page() {
        let (mut doc, page_id) = nested_tree_doc();
        flatten_inherited_attributes(&mut doc, page_id).unwrap();

        let page = doc.get_dictionary(page_id).unwrap();
        assert!(page.has(b"MediaBox"));
        assert!(page.has(b"Rotate"));
        assert!(!page.has(b"Resources"));
    }
}
