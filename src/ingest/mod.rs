//! Batch text extraction from PDF files.
//!
//! Ingestion turns a batch of uploaded files into one [`Document`]:
//!
//! 1. The whole batch is validated up front ([`validate_files`],
//!    [`PageSelection::validate`]). Any failure rejects the batch before a
//!    single page is read.
//! 2. Files are processed one after another, pages one after another, in the
//!    selected (and per-file clamped) range.
//! 3. Progress is reported over an optional channel, and a
//!    [`CancellationToken`] is checked before each page.
//!
//! Reading a PDF is delegated to a [`DocumentLoader`]; [`LopdfLoader`] is the
//! default implementation.

pub mod lopdf_source;

pub use lopdf_source::LopdfLoader;

use crate::config::IngestConfig;
use crate::document::{Document, DocumentBuilder};
use crate::error::{Error, Result};
use crate::task::CancellationToken;
use crossbeam_channel::Sender;
use serde::Serialize;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::{Duration, Instant};

/// Media type accepted by ingestion.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// An uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInput {
    /// File name shown in the file marker line
    pub name: String,
    /// Declared media type
    pub media_type: String,
    /// File contents
    pub data: Vec<u8>,
}

impl FileInput {
    /// Create a file with an explicit media type.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data,
        }
    }

    /// Create a file declared as `application/pdf`.
    pub fn pdf(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self::new(name, PDF_MEDIA_TYPE, data)
    }

    /// Read a file from disk. The media type is derived from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        let media_type = if is_pdf {
            PDF_MEDIA_TYPE
        } else {
            "application/octet-stream"
        };
        Ok(Self::new(name, media_type, data))
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the declared media type is PDF.
    pub fn is_pdf(&self) -> bool {
        self.media_type.eq_ignore_ascii_case(PDF_MEDIA_TYPE)
    }
}

/// Check every file of a batch. All problems are counted and reported in a
/// single [`Error::InvalidInput`].
pub fn validate_files(files: &[FileInput], config: &IngestConfig) -> Result<()> {
    let not_pdf = files.iter().filter(|f| !f.is_pdf()).count();
    let oversized = files
        .iter()
        .filter(|f| f.size() > config.max_file_size)
        .count();

    if not_pdf > 0 || oversized > 0 {
        log::warn!(
            "Rejecting batch of {} file(s): {} not PDF, {} oversized",
            files.len(),
            not_pdf,
            oversized
        );
        return Err(Error::InvalidInput {
            not_pdf,
            oversized,
            max_file_size: config.max_file_size,
        });
    }
    Ok(())
}

/// Requested 1-based page range. Missing bounds mean first/last page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSelection {
    /// First page to extract
    pub start: Option<u32>,
    /// Last page to extract
    pub end: Option<u32>,
}

impl PageSelection {
    /// Every page.
    pub fn all() -> Self {
        Self::default()
    }

    /// Pages `start..=end`.
    pub fn range(start: u32, end: u32) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Set the first page.
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the last page.
    pub fn with_end(mut self, end: u32) -> Self {
        self.end = Some(end);
        self
    }

    /// Fails when both bounds are given and start is after end.
    pub fn validate(&self) -> Result<()> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => Err(Error::PageRange { start, end }),
            _ => Ok(()),
        }
    }

    /// The range to extract from a document with `page_count` pages.
    ///
    /// The start is clamped into `1..=page_count` and the end into
    /// `start..=page_count`, so an out-of-range request still yields at least
    /// one page. Returns `None` for a document without pages.
    pub fn clamp(&self, page_count: u32) -> Option<RangeInclusive<u32>> {
        if page_count == 0 {
            return None;
        }
        let start = self.start.unwrap_or(1).min(page_count).max(1);
        let end = self.end.unwrap_or(page_count).max(start).min(page_count);
        Some(start..=end)
    }
}

/// Per-page text access to one opened document.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Plain text of a 1-based page.
    fn page_text(&self, page: u32) -> Result<String>;
}

/// Opens files as [`PageSource`]s.
///
/// Load failures should be reported as [`Error::Extraction`].
pub trait DocumentLoader {
    /// Open `file` for page extraction.
    fn load(&self, file: &FileInput) -> Result<Box<dyn PageSource>>;
}

/// Progress notifications sent while a batch is extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestEvent {
    /// Extraction of a file began
    FileStarted {
        /// Position in the batch
        index: usize,
        /// File name
        name: String,
    },
    /// Overall batch progress
    Progress {
        /// Whole percent, 0..=100
        percent: u8,
    },
    /// Extraction of a file completed
    FileFinished {
        /// Position in the batch
        index: usize,
        /// File name
        name: String,
        /// Pages extracted from this file
        pages: u32,
    },
}

/// One extracted file of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    /// File name
    pub name: String,
    /// Pages in the document
    pub page_count: u32,
    /// Pages actually extracted
    pub pages_extracted: u32,
    /// Pages whose text could not be extracted
    pub failed_pages: Vec<u32>,
}

/// Output of a successful batch.
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// Combined marker-delimited text of all files
    pub document: Document,
    /// Per-file details in batch order
    pub files: Vec<ProcessedFile>,
    /// Wall time of the extraction
    pub elapsed: Duration,
}

/// Summary numbers for a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Files in the batch
    pub total_files: usize,
    /// Pages across all documents
    pub total_pages: u64,
    /// Tables detected in the combined text
    pub total_tables: usize,
    /// Extraction wall time in milliseconds
    pub processing_time_ms: u64,
}

impl BatchStats {
    /// Build statistics from a report and the number of detected tables.
    pub fn from_report(report: &IngestReport, total_tables: usize) -> Self {
        Self {
            total_files: report.files.len(),
            total_pages: report.files.iter().map(|f| u64::from(f.page_count)).sum(),
            total_tables,
            processing_time_ms: u64::try_from(report.elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Sequential batch extractor.
pub struct Ingestor<L: DocumentLoader> {
    loader: L,
    config: IngestConfig,
}

impl Ingestor<LopdfLoader> {
    /// Ingestor backed by `lopdf`.
    pub fn lopdf() -> Self {
        Self::new(LopdfLoader)
    }
}

impl<L: DocumentLoader> Ingestor<L> {
    /// Create an ingestor with default configuration.
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            config: IngestConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: IngestConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Extract `selection` from every file of the batch.
    ///
    /// A page whose text cannot be extracted is logged and replaced by
    /// `[Error extracting page N]`. A file that cannot be opened aborts the
    /// whole batch.
    pub fn run(
        &self,
        files: &[FileInput],
        selection: PageSelection,
        events: Option<&Sender<IngestEvent>>,
        cancel: &CancellationToken,
    ) -> Result<IngestReport> {
        validate_files(files, &self.config)?;
        selection.validate()?;

        let started = Instant::now();
        let estimate = self.config.page_estimate as u64;
        let mut builder = DocumentBuilder::new();
        let mut processed = Vec::with_capacity(files.len());
        // pages extracted from finished files
        let mut finished_pages: u64 = 0;

        log::info!("Extracting text from {} file(s)", files.len());
        emit(events, IngestEvent::Progress { percent: 0 });

        for (index, file) in files.iter().enumerate() {
            cancel.check()?;
            emit(
                events,
                IngestEvent::FileStarted {
                    index,
                    name: file.name.clone(),
                },
            );

            let source = self.loader.load(file).map_err(|e| {
                log::warn!("Failed to open {}: {}", file.name, e);
                e
            })?;
            let page_count = source.page_count();
            let range = selection.clamp(page_count);
            let range_len = range
                .as_ref()
                .map_or(0, |r| u64::from(r.end() - r.start() + 1));
            let remaining_estimate = (files.len() - index - 1) as u64 * estimate;

            log::debug!(
                "{}: {} page(s), extracting {:?}",
                file.name,
                page_count,
                range
            );

            builder.begin_file(&file.name);
            let mut failed_pages = Vec::new();
            let mut done: u64 = 0;

            for page in range.into_iter().flatten() {
                cancel.check()?;

                let text = match source.page_text(page) {
                    Ok(text) => text,
                    Err(e) => {
                        log::warn!("Error extracting text from page {} of {}: {}", page, file.name, e);
                        failed_pages.push(page);
                        format!("[Error extracting page {}]", page)
                    }
                };
                builder.push_page(page, &text);

                done += 1;
                let total = finished_pages + range_len + remaining_estimate;
                emit(
                    events,
                    IngestEvent::Progress {
                        percent: percent(finished_pages + done, total),
                    },
                );
            }
            builder.end_file();
            finished_pages += done;

            let pages_extracted = done as u32;
            emit(
                events,
                IngestEvent::FileFinished {
                    index,
                    name: file.name.clone(),
                    pages: pages_extracted,
                },
            );
            processed.push(ProcessedFile {
                name: file.name.clone(),
                page_count,
                pages_extracted,
                failed_pages,
            });
        }

        emit(events, IngestEvent::Progress { percent: 100 });
        let elapsed = started.elapsed();
        log::info!(
            "Extracted {} page(s) from {} file(s) in {:?}",
            finished_pages,
            files.len(),
            elapsed
        );

        Ok(IngestReport {
            document: builder.build(),
            files: processed,
            elapsed,
        })
    }
}

fn percent(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((done as f64 / total as f64) * 100.0).round().min(100.0) as u8
}

fn emit(events: Option<&Sender<IngestEvent>>, event: IngestEvent) {
    if let Some(tx) = events {
        // receiver may have gone away; extraction continues regardless
        let _ = tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeSource {
        pages: u32,
        failing: Option<u32>,
    }

    impl PageSource for FakeSource {
        fn page_count(&self) -> u32 {
            self.pages
        }

        fn page_text(&self, page: u32) -> Result<String> {
            if self.failing == Some(page) {
                Err(Error::Extraction(crate::error::ExtractionFailure::Other("bad page".into())))
            } else {
                Ok(format!("text of page {}", page))
            }
        }
    }

    struct FakeLoader {
        failing: Option<u32>,
    }

    impl DocumentLoader for FakeLoader {
        fn load(&self, file: &FileInput) -> Result<Box<dyn PageSource>> {
            Ok(Box::new(FakeSource {
                pages: file.data.len() as u32,
                failing: self.failing,
            }))
        }
    }

    fn pdf_with_pages(name: &str, pages: usize) -> FileInput {
        FileInput::pdf(name, vec![0; pages])
    }

    #[test]
    fn test_validate_aggregates() {
        let files = vec![
            FileInput::new("a.txt", "text/plain", vec![]),
            FileInput::new("b.png", "image/png", vec![]),
            FileInput::pdf("c.pdf", vec![0; 11]),
        ];
        let config = IngestConfig::new().with_max_file_size(10);
        match validate_files(&files, &config) {
            Err(Error::InvalidInput {
                not_pdf,
                oversized,
                max_file_size,
            }) => {
                assert_eq!(not_pdf, 2);
                assert_eq!(oversized, 1);
                assert_eq!(max_file_size, 10);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_page_selection_validate() {
        assert!(PageSelection::range(3, 2).validate().is_err());
        assert!(PageSelection::range(2, 2).validate().is_ok());
        assert!(PageSelection::all().with_start(9).validate().is_ok());
    }

    #[test]
    fn test_page_selection_clamp() {
        assert_eq!(PageSelection::all().clamp(5), Some(1..=5));
        assert_eq!(PageSelection::range(2, 3).clamp(5), Some(2..=3));
        assert_eq!(PageSelection::range(4, 9).clamp(5), Some(4..=5));
        assert_eq!(PageSelection::range(8, 9).clamp(5), Some(5..=5));
        assert_eq!(PageSelection::range(0, 2).clamp(5), Some(1..=2));
        assert_eq!(PageSelection::all().clamp(0), None);
    }

    #[test]
    fn test_run_builds_marked_document() {
        let ingestor = Ingestor::new(FakeLoader { failing: None });
        let files = vec![pdf_with_pages("a.pdf", 2), pdf_with_pages("b.pdf", 1)];
        let report = ingestor
            .run(&files, PageSelection::all(), None, &CancellationToken::new())
            .unwrap();

        assert_eq!(
            report.document.text(),
            "=== a.pdf ===\nPage 1:\ntext of page 1\n\nPage 2:\ntext of page 2\n\n\n\
             === b.pdf ===\nPage 1:\ntext of page 1\n\n\n"
        );
        assert_eq!(report.files.len(), 2);
        assert_eq!(report.files[0].pages_extracted, 2);

        let stats = BatchStats::from_report(&report, 0);
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_pages, 3);
    }

    #[test]
    fn test_failed_page_placeholder() {
        let ingestor = Ingestor::new(FakeLoader { failing: Some(2) });
        let report = ingestor
            .run(
                &[pdf_with_pages("a.pdf", 3)],
                PageSelection::all(),
                None,
                &CancellationToken::new(),
            )
            .unwrap();
        assert!(report.document.text().contains("Page 2:\n[Error extracting page 2]\n"));
        assert_eq!(report.files[0].failed_pages, vec![2]);
        assert_eq!(report.files[0].pages_extracted, 3);
    }

    #[test]
    fn test_progress_events() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let ingestor = Ingestor::new(FakeLoader { failing: None });
        let files = vec![pdf_with_pages("a.pdf", 2), pdf_with_pages("b.pdf", 2)];
        ingestor
            .run(&files, PageSelection::all(), Some(&tx), &CancellationToken::new())
            .unwrap();
        drop(tx);

        let percents: Vec<u8> = rx
            .iter()
            .filter_map(|e| match e {
                IngestEvent::Progress { percent } => Some(percent),
                _ => None,
            })
            .collect();
        // second file is estimated at 10 pages until it is opened
        assert_eq!(percents, vec![0, 8, 17, 75, 100, 100]);
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let ingestor = Ingestor::new(FakeLoader { failing: None });
        let result = ingestor.run(&[pdf_with_pages("a.pdf", 1)], PageSelection::all(), None, &cancel);
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[test]
    fn test_invalid_range_rejected_before_work() {
        let ingestor = Ingestor::new(FakeLoader { failing: None });
        let result = ingestor.run(
            &[pdf_with_pages("a.pdf", 1)],
            PageSelection::range(5, 1),
            None,
            &CancellationToken::new(),
        );
        assert!(matches!(result, Err(Error::PageRange { start: 5, end: 1 })));
    }
}
