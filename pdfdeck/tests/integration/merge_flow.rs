//! Full select, reorder, merge, preview and download flows.

use pdfdeck::config::SessionConfig;
use pdfdeck::list::Direction;
use pdfdeck::notice;
use pdfdeck::session::Session;
use tempfile::TempDir;

use crate::common::{entry, page_tags, write_pdf};

fn new_session() -> Session {
    let (sender, _receiver) = notice::channel();
    Session::new(SessionConfig::default(), sender).expect("default config is valid")
}

#[tokio::test]
async fn test_merge_concatenates_in_list_order() {
    let mut session = new_session();
    session.load_selection(vec![entry("a", 3), entry("b", 2)]);

    let merged = session.merge().await.unwrap();
    assert_eq!(merged.page_count(), 5);
    assert_eq!(page_tags(merged.bytes()), ["a-1", "a-2", "a-3", "b-1", "b-2"]);
}

#[tokio::test]
async fn test_select_move_merge_download() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<String> = [("x", 2), ("y", 1), ("z", 3)]
        .iter()
        .map(|(tag, pages)| write_pdf(&dir, tag, *pages).to_string_lossy().into_owned())
        .collect();

    let mut session = new_session();
    session.select_paths(&paths).await.unwrap();
    assert!(session.move_index(2, Direction::Up));

    session.merge().await.unwrap();
    let pages = session.preview().await.unwrap();
    assert_eq!(pages.len(), 6);

    let saved = session.download(dir.path()).await.unwrap();
    assert_eq!(saved.file_name().unwrap(), "merged.pdf");
    assert_eq!(
        page_tags(&std::fs::read(&saved).unwrap()),
        ["x-1", "x-2", "z-1", "z-2", "z-3", "y-1"]
    );
}

#[tokio::test]
async fn test_glob_selection_sorted() {
    let dir = TempDir::new().unwrap();
    for tag in ["b", "c", "a"] {
        write_pdf(&dir, tag, 1);
    }
    let pattern = dir.path().join("*.pdf").to_string_lossy().into_owned();

    let mut session = new_session();
    session.select_paths([pattern]).await.unwrap();

    let merged = session.merge().await.unwrap();
    assert_eq!(page_tags(merged.bytes()), ["a-1", "b-1", "c-1"]);
}

#[tokio::test]
async fn test_merge_uses_order_at_invocation() {
    let mut session = new_session();
    let a = entry("a", 1);
    let a_id = a.id();
    session.load_selection(vec![a, entry("b", 1)]);

    let first = page_tags(session.merge().await.unwrap().bytes());
    session.move_one(a_id, Direction::Down);
    let second = page_tags(session.merge().await.unwrap().bytes());

    assert_eq!(first, ["a-1", "b-1"]);
    assert_eq!(second, ["b-1", "a-1"]);
}

#[tokio::test]
async fn test_preview_export_writes_page_images() {
    let dir = TempDir::new().unwrap();
    let mut session = new_session();
    session.load_selection(vec![entry("a", 1), entry("b", 1)]);
    session.merge().await.unwrap();
    session.preview().await.unwrap();

    let written = session.export_preview(&dir.path().join("pages")).await.unwrap();
    let files: Vec<_> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(files, ["page-001.pgm", "page-002.pgm"]);
}
