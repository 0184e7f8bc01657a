//! Integration tests for error handling and edge cases.

use pdfdeck::config::SessionConfig;
use pdfdeck::error::PdfDeckError;
use pdfdeck::files::FileEntry;
use pdfdeck::list::ThumbnailState;
use pdfdeck::notice::{self, NoticeLevel};
use pdfdeck::session::Session;
use tempfile::TempDir;

use crate::common::{entry, names};

#[tokio::test]
async fn test_empty_selection_warns_on_merge() {
    let (sender, _receiver) = notice::channel();
    let mut session = Session::new(SessionConfig::default(), sender).unwrap();
    session.load_selection(Vec::new());

    assert!(session.rows().is_empty());
    let err = session.merge().await.unwrap_err();
    assert!(matches!(err, PdfDeckError::NotEnoughFiles { selected: 0, .. }));
    assert!(err.is_precondition());
    assert!(session.merged().is_none());
}

#[tokio::test]
async fn test_non_pdf_is_accepted_but_fails_preview_and_merge() {
    let (sender, mut receiver) = notice::channel();
    let mut session = Session::new(SessionConfig::default(), sender).unwrap();
    let notes = FileEntry::new("notes.txt", b"shopping list".to_vec());
    let notes_id = notes.id();

    session.load_selection(vec![entry("a", 1), notes]);
    session.settle_thumbnails().await;

    let warnings = notice::drain(&mut receiver);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].level, NoticeLevel::Warning);
    assert!(warnings[0].message.contains("notes.txt"));

    assert_eq!(names(session.list()), ["a.pdf", "notes.txt"]);
    let row = session
        .rows()
        .into_iter()
        .find(|r| r.file_id == notes_id)
        .unwrap();
    assert!(matches!(row.thumbnail, ThumbnailState::Failed { .. }));

    let err = session.merge().await.unwrap_err();
    assert!(matches!(err, PdfDeckError::FailedToLoadPdf { ref name, .. } if name == "notes.txt"));
    assert_eq!(names(session.list()), ["a.pdf", "notes.txt"]);
}

#[tokio::test]
async fn test_missing_file_leaves_selection_untouched() {
    let dir = TempDir::new().unwrap();
    let (sender, _receiver) = notice::channel();
    let mut session = Session::new(SessionConfig::default(), sender).unwrap();
    session.load_selection(vec![entry("keep", 1)]);

    let missing = dir.path().join("missing.pdf").to_string_lossy().into_owned();
    let err = session.select_paths([missing]).await.unwrap_err();

    assert!(matches!(err, PdfDeckError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(names(session.list()), ["keep.pdf"]);
}

#[tokio::test]
async fn test_download_into_missing_directory() {
    let dir = TempDir::new().unwrap();
    let (sender, _receiver) = notice::channel();
    let mut session = Session::new(SessionConfig::default(), sender).unwrap();
    session.load_selection(vec![entry("a", 1), entry("b", 1)]);
    session.merge().await.unwrap();

    let result = session.download(&dir.path().join("nope")).await;
    assert!(result.is_err());
    assert!(session.merged().is_some());
}

#[tokio::test]
async fn test_invalid_download_name_rejected() {
    let (sender, _receiver) = notice::channel();
    let config = SessionConfig {
        download_name: "../merged.pdf".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        Session::new(config, sender),
        Err(PdfDeckError::InvalidConfig { .. })
    ));
}
