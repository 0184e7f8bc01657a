//! File I/O for a session.
//!
//! - [`SelectionReader`] reads the user's file selection into memory
//! - [`PdfWriter`] writes the merged document and exported preview pages
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::io::{PdfWriter, SelectionReader};
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let files = SelectionReader::new()
//!     .read_all(&[PathBuf::from("a.pdf"), PathBuf::from("b.pdf")])
//!     .await?;
//!
//! let writer = PdfWriter::new();
//! writer.save_bytes(files[0].bytes(), Path::new("copy.pdf")).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::SelectionReader;
pub use writer::{PdfWriter, WriteStatistics};
