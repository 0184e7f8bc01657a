//! Output formatting and display for pdfdeck.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - Background notices
//! - The file list and merge summaries
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::output::OutputFormatter;
//! use pdfdeck::config::SessionConfig;
//!
//! # fn example(config: SessionConfig) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Merging 3 files");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::merge::MergedDocument;
use crate::preview::PreviewPage;

/// Display a merge summary to the user.
pub fn display_merge_summary(formatter: &OutputFormatter, merged: &MergedDocument) {
    formatter.success(&format!(
        "Merged {} file(s) into {} page(s)",
        merged.sources().len(),
        merged.page_count()
    ));
    formatter.detail(
        "Size",
        &crate::files::format_file_size(merged.bytes().len() as u64),
    );
}

/// Display the outcome of a preview render.
pub fn display_preview_summary(formatter: &OutputFormatter, pages: &[PreviewPage]) {
    let failed = pages.iter().filter(|p| p.outcome.is_err()).count();

    formatter.section("Preview");
    for page in pages {
        match &page.outcome {
            Ok(rendered) => formatter.list_item(
                page.page_number as usize,
                &format!(
                    "{}x{} px",
                    rendered.surface.width(),
                    rendered.surface.height()
                ),
            ),
            Err(reason) => formatter.list_item(page.page_number as usize, &format!("failed: {reason}")),
        }
    }

    if failed > 0 {
        formatter.warning(&format!("{failed} page(s) could not be rendered"));
    }
}
