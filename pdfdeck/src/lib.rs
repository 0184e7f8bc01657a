//! pdfdeck - Collect PDF files, put them in order and merge them.
//!
//! This library keeps an ordered selection of files, lets it be reordered
//! one step at a time, by drag-and-drop or by touch gestures, and merges the
//! files in that order into one PDF that can be previewed and saved.
//!
//! - Ordered file list with derived display rows
//! - First-page thumbnails rendered in the background
//! - Whole-document merge through a pluggable merger
//! - Page-ordered preview through a pluggable renderer
//! - Atomic download of the merged document
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::config::SessionConfig;
//! use pdfdeck::list::Direction;
//! use pdfdeck::notice;
//! use pdfdeck::session::Session;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (notices, _receiver) = notice::channel();
//! let mut session = Session::new(SessionConfig::default(), notices)?;
//!
//! session.select_paths(&["x.pdf", "y.pdf", "z.pdf"]).await?;
//! session.move_index(2, Direction::Up);
//!
//! let merged = session.merge().await?;
//! println!("Merged {} pages", merged.page_count());
//!
//! session.preview().await?;
//! session.download(Path::new(".")).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod files;
pub mod io;
pub mod list;
pub mod merge;
pub mod notice;
pub mod output;
pub mod preview;
pub mod render;
pub mod session;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::SessionConfig;
pub use error::{PdfDeckError, Result};
pub use files::{FileEntry, FileId};
pub use list::{Direction, DropPlacement, OrderedFileList};
pub use session::Session;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
