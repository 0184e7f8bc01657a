//! In-memory PDF fixtures for unit tests.

use lopdf::{Document, Object, ObjectId, dictionary};

/// Key under which every generated page records its tag.
pub const TAG_KEY: &[u8] = b"DeckTag";

/// Build a US Letter PDF with `pages` pages tagged `"{tag}-1"`, `"{tag}-2"`, ...
pub fn sample_pdf(tag: &str, pages: usize) -> Vec<u8> {
    build_pdf(tag, pages, vec![0.into(), 0.into(), 612.into(), 792.into()])
}

/// Build a one-page PDF, tagged `"sized-1"`, with a `width` x `height` point media box.
pub fn sized_pdf(width: f32, height: f32) -> Vec<u8> {
    build_pdf(
        "sized",
        1,
        vec![0.into(), 0.into(), width.into(), height.into()],
    )
}

fn build_pdf(tag: &str, pages: usize, media_box: Vec<Object>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let catalog_id = doc.new_object_id();
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for number in 1..=pages {
        let page_id = doc.new_object_id();
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box.clone(),
            "DeckTag" => Object::string_literal(format!("{tag}-{number}")),
        };
        doc.objects.insert(page_id, page.into());
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
    };
    doc.objects.insert(pages_id, pages_dict.into());
    doc.objects.insert(
        catalog_id,
        dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        }
        .into(),
    );
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("in-memory save");
    bytes
}

/// Page tags of a PDF, in page order.
pub fn page_tags(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).expect("valid pdf");
    doc.get_pages()
        .values()
        .map(|&id: &ObjectId| {
            let page = doc.get_dictionary(id).expect("page dictionary");
            match page.get(TAG_KEY) {
                Ok(Object::String(raw, _)) => String::from_utf8_lossy(raw).into_owned(),
                _ => String::from("?"),
            }
        })
        .collect()
}
