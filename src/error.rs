//! Error types for the extraction and analysis library.
//!
//! Validation errors (file type/size, page range) block an operation before any
//! work starts. Per-item failures (a page's text, a search pattern, metadata) are
//! recovered where they happen and only surface through the fallible `try_*`
//! variants of the affected operation.

use std::fmt;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during ingestion and analysis.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// One or more files of a batch failed validation.
    #[error("{}", invalid_input_message(.not_pdf, .oversized, .max_file_size))]
    InvalidInput {
        /// Number of files that are not PDF documents
        not_pdf: usize,
        /// Number of files exceeding the size cap
        oversized: usize,
        /// Size cap in bytes the batch was checked against
        max_file_size: u64,
    },

    /// Requested start page is after the end page
    #[error("Start page cannot be greater than end page ({start} > {end})")]
    PageRange {
        /// Requested first page (1-based)
        start: u32,
        /// Requested last page (1-based)
        end: u32,
    },

    /// A document of the batch could not be loaded
    #[error("An error occurred during text extraction: {0}")]
    Extraction(ExtractionFailure),

    /// Search pattern is not a valid regular expression
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    /// Document metadata could not be read
    #[error("Metadata extraction failed: {0}")]
    MetadataExtraction(String),

    /// An option value is outside its accepted range
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// A sequential task was cancelled before it finished
    #[error("Operation cancelled")]
    Cancelled,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn invalid_input_message(not_pdf: &usize, oversized: &usize, max_file_size: &u64) -> String {
    let mut msg = String::from("Invalid files detected:");
    if *not_pdf > 0 {
        msg.push_str(&format!("\n• {} file(s) are not PDF format", not_pdf));
    }
    if *oversized > 0 {
        msg.push_str(&format!(
            "\n• {} file(s) exceed {} limit",
            oversized,
            format_size(*max_file_size)
        ));
    }
    msg
}

fn format_size(bytes: u64) -> String {
    const MB: u64 = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Category of a document load failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    /// The file is not a valid PDF document
    InvalidPdf,
    /// The document is password protected
    PasswordProtected,
    /// The bytes could not be read or transferred
    Transport,
    /// Anything else, with the underlying message
    Other(String),
}

impl ExtractionFailure {
    /// Classify an underlying failure from its message.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("password") || lower.contains("decrypt") || lower.contains("encrypt") {
            Self::PasswordProtected
        } else if lower.contains("network") || lower.contains("failed to read") {
            Self::Transport
        } else if lower.contains("header")
            || lower.contains("xref")
            || lower.contains("trailer")
            || lower.contains("invalid pdf")
            || lower.contains("parse")
        {
            Self::InvalidPdf
        } else {
            Self::Other(message.to_string())
        }
    }
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPdf => write!(f, "one or more files are not valid PDF documents"),
            Self::PasswordProtected => write!(f, "one or more PDFs are password protected"),
            Self::Transport => write!(f, "a read error occurred while processing files"),
            Self::Other(msg) => write!(f, "unexpected error: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_aggregates_both_kinds() {
        let err = Error::InvalidInput {
            not_pdf: 2,
            oversized: 1,
            max_file_size: 50 * 1024 * 1024,
        };
        let msg = format!("{}", err);
        assert!(msg.starts_with("Invalid files detected:"));
        assert!(msg.contains("2 file(s) are not PDF format"));
        assert!(msg.contains("1 file(s) exceed 50MB limit"));
    }

    #[test]
    fn test_invalid_input_omits_empty_kind() {
        let err = Error::InvalidInput {
            not_pdf: 0,
            oversized: 3,
            max_file_size: 50 * 1024 * 1024,
        };
        let msg = format!("{}", err);
        assert!(!msg.contains("not PDF format"));
        assert!(msg.contains("3 file(s)"));
    }

    #[test]
    fn test_invalid_input_reports_configured_limit() {
        let err = Error::InvalidInput {
            not_pdf: 0,
            oversized: 1,
            max_file_size: 10,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("1 file(s) exceed 10 bytes limit"));
        assert!(!msg.contains("50MB"));

        let err = Error::InvalidInput {
            not_pdf: 0,
            oversized: 1,
            max_file_size: 5 * 1024 * 1024,
        };
        assert!(err.to_string().contains("exceed 5MB limit"));
    }

    #[test]
    fn test_page_range_error() {
        let err = Error::PageRange { start: 5, end: 2 };
        let msg = format!("{}", err);
        assert!(msg.contains("5 > 2"));
    }

    #[test]
    fn test_classify_failures() {
        assert_eq!(
            ExtractionFailure::classify("Decryption error: wrong password"),
            ExtractionFailure::PasswordProtected
        );
        assert_eq!(
            ExtractionFailure::classify("Invalid file header"),
            ExtractionFailure::InvalidPdf
        );
        assert_eq!(
            ExtractionFailure::classify("network connection reset"),
            ExtractionFailure::Transport
        );
        assert_eq!(
            ExtractionFailure::classify("boom"),
            ExtractionFailure::Other("boom".to_string())
        );
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
