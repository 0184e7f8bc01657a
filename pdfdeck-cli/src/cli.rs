//! CLI argument parsing for pdfdeck.
//!
//! Defines the command-line interface with `clap` and converts it into a
//! validated [`SessionConfig`].

use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use pdfdeck::config::{CompressionLevel, SessionConfig};
use pdfdeck::error::{PdfDeckError, Result};
use pdfdeck::list::DropPlacement;

/// Arrange PDF files, merge them, preview the result and save it.
///
/// pdfdeck runs an interactive session: files are selected, reordered with
/// up/down moves, drags or touch gestures, then merged into one document
/// that can be previewed and downloaded as merged.pdf.
#[derive(Parser, Debug)]
#[command(name = "pdfdeck")]
#[command(version)]
#[command(about = "Arrange, merge and preview PDF files", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Files to select when the session starts (in order)
    ///
    /// Glob patterns are expanded; matches of one pattern are sorted.
    ///
    /// Examples:
    ///   pdfdeck cover.pdf chapter*.pdf
    #[arg(value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Read session commands from a file instead of stdin
    ///
    /// One command per line. Lines starting with '#' are ignored.
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Directory that 'download' writes into when no directory is given
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Scale of the first-page thumbnail rendered for each selected file
    #[arg(long, value_name = "SCALE", default_value_t = pdfdeck::config::DEFAULT_THUMBNAIL_SCALE)]
    pub thumbnail_scale: f32,

    /// Scale of the merged-document page previews
    #[arg(long, value_name = "SCALE", default_value_t = pdfdeck::config::DEFAULT_PREVIEW_SCALE)]
    pub preview_scale: f32,

    /// Where a dragged file lands relative to the file it is dropped on
    ///
    /// - reinsert: remove the file and insert it at the drop position (default)
    /// - swap: exchange the two files, leaving the ones between untouched
    #[arg(long, value_name = "MODE", default_value = "reinsert")]
    #[arg(value_parser = ["reinsert", "swap"])]
    pub drop_placement: String,

    /// Compression level for the merged PDF
    ///
    /// - none: No compression
    /// - standard: Balanced compression (default)
    /// - maximum: Compression plus removal of unused objects
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Number of pages rendered concurrently for previews
    ///
    /// Default is number of CPU cores.
    #[arg(short, long, value_name = "N", env = "PDFDECK_JOBS")]
    pub jobs: Option<usize>,

    /// Verbose output - show sizes and details after each command
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated session configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Compression level or drop placement is invalid
    /// - Configuration validation fails
    pub fn to_config(&self) -> Result<SessionConfig> {
        let compression = CompressionLevel::from_str(&self.compression)?;
        let drop_placement = DropPlacement::from_str(&self.drop_placement)?;

        let config = SessionConfig {
            thumbnail_scale: self.thumbnail_scale,
            preview_scale: self.preview_scale,
            drop_placement,
            compression,
            render_jobs: self.jobs,
            quiet: self.quiet,
            verbose: self.verbose,
            ..SessionConfig::default()
        };

        config.validate().map_err(|e| {
            PdfDeckError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}
