//! Error types for pdfdeck.
//!
//! Every fallible library operation returns [`Result`]. Errors are meant to be
//! shown to the user as a single message at the boundary of the operation that
//! failed (one command in the interactive session); none of them leave the
//! ordered file list in a modified state.
//!
//! # Error Categories
//!
//! - **I/O Errors**: selected file missing, output not writable
//! - **PDF Errors**: a source cannot be parsed, is encrypted or has no pages
//! - **Precondition Errors**: merging fewer than two files, previewing before merging
//! - **Configuration Errors**: invalid scales, names or command arguments

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfdeck operations.
pub type Result<T> = std::result::Result<T, PdfDeckError>;

/// Main error type for pdfdeck operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfDeckError {
    /// A selected file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// A selected file exists but could not be read.
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A source document could not be parsed.
    #[error("Failed to load PDF: {name}\n  Reason: {reason}")]
    FailedToLoadPdf {
        /// Display name of the source.
        name: String,
        /// Reason for the failure.
        reason: String,
    },

    /// A source document parsed but has an unusable structure.
    #[error("Corrupted or invalid PDF: {name}\n  Details: {details}")]
    CorruptedPdf {
        /// Display name of the source.
        name: String,
        /// Details about the corruption.
        details: String,
    },

    /// A source document is encrypted.
    #[error(
        "PDF is encrypted and cannot be processed: {name}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools"
    )]
    EncryptedPdf {
        /// Display name of the source.
        name: String,
    },

    /// Merge was requested with too few files in the list.
    #[error("Please select at least {required} PDF files to merge ({selected} selected)")]
    NotEnoughFiles {
        /// Number of files currently in the list.
        selected: usize,
        /// Minimum number of files a merge needs.
        required: usize,
    },

    /// Preview or download was requested before a successful merge.
    #[error("Nothing merged yet. Run 'merge' first")]
    NothingMerged,

    /// The merger failed while combining the sources.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// A page could not be rendered.
    #[error("Failed to render page {page}: {reason}")]
    RenderFailed {
        /// 1-based page number.
        page: u32,
        /// Reason for the failure.
        reason: String,
    },

    /// A page number outside the document was requested.
    #[error("Page {page} is out of range (document has {total} page(s))")]
    PageOutOfRange {
        /// Requested 1-based page number.
        page: u32,
        /// Number of pages in the document.
        total: u32,
    },

    /// The output file could not be created.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Writing the output file failed.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// A session command could not be understood.
    #[error("Invalid command: {message}")]
    InvalidCommand {
        /// Description of what's wrong with the command.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl PdfDeckError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            name: name.into(),
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(name: impl Into<String>) -> Self {
        Self::EncryptedPdf { name: name.into() }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error.
    pub fn render_failed(page: u32, reason: impl Into<String>) -> Self {
        Self::RenderFailed {
            page,
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an InvalidCommand error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::InvalidCommand {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Map a lopdf load error for the named source onto the matching variant.
    pub(crate) fn from_load(name: &str, err: lopdf::Error) -> Self {
        let reason = err.to_string();
        if reason.contains("encrypt") || reason.contains("password") {
            Self::encrypted_pdf(name)
        } else {
            Self::failed_to_load_pdf(name, reason)
        }
    }

    /// Check if this error is an unmet precondition rather than a failure.
    ///
    /// Precondition errors are shown as warnings: nothing was attempted.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NotEnoughFiles { .. } | Self::NothingMerged)
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::NotEnoughFiles { .. } => 1,
            Self::NothingMerged => 1,
            Self::MergeFailed { .. } => 6,
            Self::RenderFailed { .. } => 6,
            Self::PageOutOfRange { .. } => 1,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::InvalidCommand { .. } => 1,
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
