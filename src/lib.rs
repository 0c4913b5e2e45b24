//! # pdf_lens
//!
//! Text extraction from PDF documents plus a suite of text-analysis transforms
//! over the extracted text.
//!
//! ## Core Features
//!
//! ### Extraction
//! - **Batch ingestion**: validation, per-file page ranges, sequential
//!   page-by-page extraction with progress events and cancellation
//! - **Pluggable loaders**: [`ingest::DocumentLoader`] seam, `lopdf`-backed by default
//! - **Metadata**: title, author, dates and page count from the Info dictionary
//!
//! ### Analysis
//! - **Tables**: column-gap table detection ([`layout`])
//! - **Keywords**: TF-IDF-like ranking with position and length weights
//! - **Summaries**: frequency-weighted extractive summarization
//! - **Search**: regex search/replace, circular navigation, highlighting
//! - **Segmentation**: paragraphs or sentences with per-segment counts
//! - **Formatting**: seven togglable normalization rules
//! - **Statistics**: counts, reading time, top words, coarse language detection
//!
//! ### Output
//! - **Export**: plain text, JSON, CSV, Markdown and per-table CSV
//! - **Speech**: sentence-by-sentence playback over an external engine
//!
//! Every analysis is a pure function of the text and its options.
//! [`AnalysisSession`] adds caching on top and invalidates it when the document
//! changes.
//!
//! ## Quick Start
//!
//! ```
//! use pdf_lens::analysis::{extract_keywords, generate_summary};
//! use pdf_lens::layout::detect_tables;
//! use pdf_lens::search::{search, SearchOptions};
//!
//! let text = "Name  Age  City\nAlice  30  NYC\nBob  25  LA\nSome prose line.";
//!
//! let tables = detect_tables(text);
//! assert_eq!(tables[0].headers, vec!["Name", "Age", "City"]);
//!
//! let matches = search(text, "alice", &SearchOptions::default());
//! assert_eq!(matches.len(), 1);
//!
//! let keywords = extract_keywords(text, 3);
//! assert!(keywords.len() <= 3);
//!
//! let summary = generate_summary(text, 30);
//! assert_eq!(summary.stats.compression_ratio, 100);
//! ```
//!
//! Extracting from PDF files:
//!
//! ```no_run
//! use pdf_lens::ingest::{FileInput, Ingestor, PageSelection};
//! use pdf_lens::task::CancellationToken;
//!
//! # fn main() -> pdf_lens::Result<()> {
//! let files = vec![FileInput::from_path("paper.pdf")?];
//! let report = Ingestor::lopdf().run(&files, PageSelection::all(), None, &CancellationToken::new())?;
//! println!("{}", report.document.text());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Document text and shared text utilities
pub mod document;
pub mod text;

// Extraction
pub mod ingest;
pub mod metadata;
pub mod task;

// Analyses
pub mod analysis;
pub mod layout;
pub mod search;

// Formatting and export
pub mod converters;

// Playback
pub mod speech;

// Cached analyses over the current document
pub mod session;

pub use document::Document;
pub use error::{Error, Result};
pub use session::AnalysisSession;

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all other values.
    /// This ensures that sorting operations never panic due to NaN comparisons.
    #[inline]
    pub fn safe_float_cmp(a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
