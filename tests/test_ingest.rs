//! Integration tests for batch ingestion, metadata recovery and export.
//!
//! PDF decoding is replaced by an in-memory loader whose "files" are page
//! texts separated by form feeds.

use pdf_lens::analysis::analyze;
use pdf_lens::config::IngestConfig;
use pdf_lens::converters::{export, to_csv, to_markdown, ExportFormat};
use pdf_lens::error::{ExtractionFailure, Result};
use pdf_lens::ingest::{
    validate_files, BatchStats, DocumentLoader, FileInput, IngestEvent, Ingestor, LopdfLoader,
    PageSelection, PageSource,
};
use pdf_lens::layout::detect_tables;
use pdf_lens::metadata::{describe, metadata_or_none, NO_METADATA};
use pdf_lens::task::CancellationToken;
use pdf_lens::Error;

struct MemorySource {
    pages: Vec<String>,
}

impl PageSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<String> {
        let text = &self.pages[(page - 1) as usize];
        if text == "BROKEN" {
            return Err(Error::Extraction(ExtractionFailure::Other("corrupt stream".into())));
        }
        Ok(text.clone())
    }
}

struct MemoryLoader;

impl DocumentLoader for MemoryLoader {
    fn load(&self, file: &FileInput) -> Result<Box<dyn PageSource>> {
        let text = String::from_utf8(file.data.clone())
            .map_err(|e| Error::Extraction(ExtractionFailure::classify(&e.to_string())))?;
        if text.starts_with("LOCKED") {
            return Err(Error::Extraction(ExtractionFailure::classify("document is encrypted")));
        }
        Ok(Box::new(MemorySource {
            pages: text.split('\u{c}').map(str::to_string).collect(),
        }))
    }
}

fn file(name: &str, pages: &[&str]) -> FileInput {
    FileInput::pdf(name, pages.join("\u{c}").into_bytes())
}

fn run(files: &[FileInput], selection: PageSelection) -> Result<pdf_lens::ingest::IngestReport> {
    Ingestor::new(MemoryLoader).run(files, selection, None, &CancellationToken::new())
}

// =============================================================================
// VALIDATION
// =============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_mixed_batch_rejected_with_counts() {
        let files = vec![
            file("ok.pdf", &["fine"]),
            FileInput::new("notes.txt", "text/plain", b"hello".to_vec()),
        ];
        let err = run(&files, PageSelection::all()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { not_pdf: 1, oversized: 0, .. }));
        assert!(err.to_string().contains("1 file(s) are not PDF format"));
    }

    #[test]
    fn test_size_limit_is_configurable() {
        let files = vec![file("big.pdf", &["0123456789"])];
        assert!(validate_files(&files, &IngestConfig::default()).is_ok());
        let strict = IngestConfig::new().with_max_file_size(4);
        let err = validate_files(&files, &strict).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput { not_pdf: 0, oversized: 1, max_file_size: 4 }
        ));
        assert!(err.to_string().contains("exceed 4 bytes limit"));
    }

    #[test]
    fn test_media_type_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let pdf_path = dir.path().join("Scan.PDF");
        let txt_path = dir.path().join("readme.txt");
        std::fs::write(&pdf_path, b"%PDF-1.4").unwrap();
        std::fs::write(&txt_path, b"text").unwrap();

        let pdf = FileInput::from_path(&pdf_path).unwrap();
        assert_eq!(pdf.name, "Scan.PDF");
        assert!(pdf.is_pdf());
        assert!(!FileInput::from_path(&txt_path).unwrap().is_pdf());
    }
}

// =============================================================================
// EXTRACTION
// =============================================================================

mod extraction_tests {
    use super::*;

    #[test]
    fn test_page_range_clamped_per_file() {
        let files = vec![
            file("long.pdf", &["p1", "p2", "p3", "p4"]),
            file("short.pdf", &["only"]),
        ];
        let report = run(&files, PageSelection::range(2, 3)).unwrap();
        let pages = report.document.pages();
        let numbers: Vec<u32> = pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![2, 3, 1]);
        assert_eq!(pages[2].content, "only");
        assert_eq!(report.files[1].pages_extracted, 1);
    }

    #[test]
    fn test_broken_page_does_not_abort() {
        let report = run(&[file("a.pdf", &["good", "BROKEN", "good again"])], PageSelection::all()).unwrap();
        let pages = report.document.pages();
        assert_eq!(pages[1].content, "[Error extracting page 2]");
        assert_eq!(pages[2].content, "good again");
    }

    #[test]
    fn test_locked_file_aborts_batch() {
        let files = vec![file("a.pdf", &["fine"]), file("b.pdf", &["LOCKED"])];
        let err = run(&files, PageSelection::all()).unwrap_err();
        assert!(matches!(err, Error::Extraction(ExtractionFailure::PasswordProtected)));
    }

    #[test]
    fn test_events_in_order() {
        let (tx, rx) = crossbeam_channel::unbounded();
        Ingestor::new(MemoryLoader)
            .run(&[file("a.pdf", &["x", "y"])], PageSelection::all(), Some(&tx), &CancellationToken::new())
            .unwrap();
        drop(tx);

        let events: Vec<IngestEvent> = rx.iter().collect();
        assert_eq!(
            events,
            vec![
                IngestEvent::Progress { percent: 0 },
                IngestEvent::FileStarted { index: 0, name: "a.pdf".into() },
                IngestEvent::Progress { percent: 50 },
                IngestEvent::Progress { percent: 100 },
                IngestEvent::FileFinished { index: 0, name: "a.pdf".into(), pages: 2 },
                IngestEvent::Progress { percent: 100 },
            ]
        );
    }

    #[test]
    fn test_batch_stats() {
        let report = run(
            &[file("t.pdf", &["A  B  C\n1  2  3\n4  5  6", "prose"])],
            PageSelection::all(),
        )
        .unwrap();
        let tables = detect_tables(report.document.text()).len();
        let stats = BatchStats::from_report(&report, tables);
        assert_eq!(stats.total_files, 1);
        assert_eq!(stats.total_pages, 2);
        assert_eq!(stats.total_tables, 1);
    }

    #[test]
    fn test_real_loader_rejects_garbage() {
        let result = Ingestor::new(LopdfLoader).run(
            &[FileInput::pdf("fake.pdf", b"hello".to_vec())],
            PageSelection::all(),
            None,
            &CancellationToken::new(),
        );
        assert!(matches!(result, Err(Error::Extraction(_))));
    }
}

// =============================================================================
// METADATA AND EXPORT
// =============================================================================

mod output_tests {
    use super::*;

    #[test]
    fn test_metadata_failure_recovers() {
        let meta = metadata_or_none(b"%PDF-garbage");
        assert!(meta.is_none());
        assert_eq!(describe(meta.as_ref()), NO_METADATA);
    }

    #[test]
    fn test_export_round_trip_through_files() {
        let report = run(
            &[file("a.pdf", &["First page.", "Second, \"quoted\" page."])],
            PageSelection::all(),
        )
        .unwrap();
        let doc = &report.document;
        let stats = analyze(doc.text());
        let dir = tempfile::tempdir().unwrap();

        for format in [ExportFormat::Text, ExportFormat::Json, ExportFormat::Csv, ExportFormat::Markdown] {
            let path = dir.path().join(format!("out.{}", format.extension()));
            std::fs::write(&path, export(doc, format, 1, &stats).unwrap()).unwrap();
            assert!(std::fs::metadata(&path).unwrap().len() > 0);
        }

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("out.json")).unwrap()).unwrap();
        assert_eq!(json["pages"].as_array().unwrap().len(), 2);
        assert_eq!(json["pages"][0]["content"], "First page.");

        assert_eq!(
            to_csv(doc),
            "\"Page Number\",\"Content\"\n\"1\",\"First page.\"\n\"2\",\"Second, \"\"quoted\"\" page.\""
        );
        assert!(to_markdown(doc, &stats).contains("## a.pdf\n\n### Page 1\n\nFirst page.\n\n### Page 2"));
    }
}
