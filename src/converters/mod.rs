//! Text transformations and export encodings.
//!
//! - **Formatter**: togglable whitespace and punctuation normalization
//! - **Export**: plain text, JSON, CSV and Markdown renderings of a document,
//!   plus CSV for detected tables
//!
//! # Examples
//!
//! ```
//! use pdf_lens::analysis::analyze;
//! use pdf_lens::converters::{export, ExportFormat};
//! use pdf_lens::Document;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = Document::new("=== notes.pdf ===\nPage 1:\nHello there.\n\n\n");
//! let csv = export(&doc, ExportFormat::Csv, 1, &analyze(doc.text()))?;
//! assert_eq!(csv, "\"Page Number\",\"Content\"\n\"1\",\"Hello there.\"");
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod formatter;

// Re-export main types
pub use export::{
    export, table_to_csv, to_csv, to_json, to_markdown, to_plain_text, ExportFormat,
};
pub use formatter::{format, FormatOptions};
