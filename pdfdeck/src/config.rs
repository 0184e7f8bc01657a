//! Configuration for a pdfdeck session.
//!
//! [`SessionConfig`] collects every tunable of the session: preview scales,
//! the download file name, how drag-and-drop places rows, output compression
//! and render concurrency. The CLI builds one from its arguments; library users
//! usually start from [`SessionConfig::default`].

use std::str::FromStr;

use crate::error::{PdfDeckError, Result};
use crate::list::DropPlacement;

/// Default scale of the per-row first-page thumbnails.
pub const DEFAULT_THUMBNAIL_SCALE: f32 = 0.2;

/// Default scale of the merged-document page previews.
pub const DEFAULT_PREVIEW_SCALE: f32 = 0.5;

/// Default name of the downloaded document.
pub const DEFAULT_DOWNLOAD_NAME: &str = "merged.pdf";

/// Minimum number of files a merge needs.
pub const MIN_MERGE_FILES: usize = 2;

const MAX_SCALE: f32 = 4.0;

/// Compression level for the merged PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - preserves exact quality and structure.
    None,
    /// Compress streams.
    #[default]
    Standard,
    /// Compress streams and drop unreachable objects.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfDeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfDeckError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Complete configuration for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Scale of the first-page thumbnail rendered for every selected file.
    pub thumbnail_scale: f32,

    /// Scale of the merged-document page previews.
    pub preview_scale: f32,

    /// File name used when downloading the merged document.
    pub download_name: String,

    /// Where a dragged row lands relative to its drop target.
    pub drop_placement: DropPlacement,

    /// Compression applied to the merged document.
    pub compression: CompressionLevel,

    /// Maximum number of concurrent page renders (None = auto-detect).
    pub render_jobs: Option<usize>,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            thumbnail_scale: DEFAULT_THUMBNAIL_SCALE,
            preview_scale: DEFAULT_PREVIEW_SCALE,
            download_name: DEFAULT_DOWNLOAD_NAME.to_string(),
            drop_placement: DropPlacement::default(),
            compression: CompressionLevel::default(),
            render_jobs: None,
            quiet: false,
            verbose: false,
        }
    }
}

impl SessionConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A scale is not a finite number in (0, 4]
    /// - The download name is empty or contains a path separator
    /// - Render jobs is zero
    /// - Verbose and quiet modes are both enabled
    pub fn validate(&self) -> Result<()> {
        validate_scale("thumbnail scale", self.thumbnail_scale)?;
        validate_scale("preview scale", self.preview_scale)?;

        let name = self.download_name.trim();
        if name.is_empty() {
            return Err(PdfDeckError::invalid_config("Download name cannot be empty"));
        }
        if name.contains(['/', '\\']) {
            return Err(PdfDeckError::invalid_config(format!(
                "Download name must be a plain file name: {name}"
            )));
        }

        if self.render_jobs == Some(0) {
            return Err(PdfDeckError::invalid_config(
                "Number of render jobs must be at least 1",
            ));
        }

        if self.verbose && self.quiet {
            return Err(PdfDeckError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        Ok(())
    }

    /// Get the effective number of concurrent renders.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.render_jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

fn validate_scale(label: &str, scale: f32) -> Result<()> {
    if !scale.is_finite() || scale <= 0.0 || scale > MAX_SCALE {
        return Err(PdfDeckError::invalid_config(format!(
            "Invalid {label}: {scale}. Must be greater than 0 and at most {MAX_SCALE}"
        )));
    }
    Ok(())
}
