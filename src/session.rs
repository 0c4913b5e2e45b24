//! The current document and the analyses derived from it.
//!
//! Analyses are pure, but some are requested repeatedly (statistics for the
//! export footer, tables for table export). [`AnalysisSession`] caches those
//! and drops every cached result, including search matches, whenever the
//! document is replaced.

use crate::analysis::{
    AnalysisStats, Keyword, KeywordExtractor, SegmentKind, Segmentation, StatsAnalyzer, Summarizer,
    SummaryResult,
};
use crate::config::AnalysisConfig;
use crate::converters::formatter::{self, FormatOptions};
use crate::document::Document;
use crate::layout::{Table, TableDetector};
use crate::search::{SearchMatch, SearchOptions, SearchSession};

/// A document plus lazily computed, cached analyses.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    document: Document,
    config: AnalysisConfig,
    detector: TableDetector,
    tables: Option<Vec<Table>>,
    stats: Option<AnalysisStats>,
    keywords: Option<(usize, Vec<Keyword>)>,
    search: SearchSession,
}

impl AnalysisSession {
    /// Session over `document` with default configuration.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            config: AnalysisConfig::default(),
            detector: TableDetector::default(),
            tables: None,
            stats: None,
            keywords: None,
            search: SearchSession::new(),
        }
    }

    /// Replace the analysis configuration. Cached results are dropped.
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self.invalidate();
        self
    }

    /// Replace the table detector. Cached tables are dropped.
    pub fn with_table_detector(mut self, detector: TableDetector) -> Self {
        self.detector = detector;
        self.tables = None;
        self
    }

    /// The current document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Detected tables (cached).
    pub fn tables(&mut self) -> &[Table] {
        let detector = &self.detector;
        let text = self.document.text();
        self.tables.get_or_insert_with(|| detector.detect(text))
    }

    /// Document statistics (cached).
    pub fn stats(&mut self) -> &AnalysisStats {
        let config = &self.config;
        let text = self.document.text();
        self.stats
            .get_or_insert_with(|| StatsAnalyzer::with_config(config.clone()).analyze(text))
    }

    /// Top `count` keywords (cached per count).
    pub fn keywords(&mut self, count: usize) -> &[Keyword] {
        if !matches!(&self.keywords, Some((cached, _)) if *cached == count) {
            let extractor = KeywordExtractor::with_stop_words(self.config.stop_words.clone());
            self.keywords = Some((count, extractor.extract(self.document.text(), count)));
        }
        match &self.keywords {
            Some((_, keywords)) => keywords,
            None => &[],
        }
    }

    /// Extractive summary.
    pub fn summary(&self, length_percentage: u32) -> SummaryResult {
        Summarizer::with_stop_words(self.config.stop_words.clone())
            .summarize(self.document.text(), length_percentage)
    }

    /// Paragraph or sentence segmentation.
    pub fn segment(&self, kind: SegmentKind) -> Segmentation {
        crate::analysis::segment(self.document.text(), kind)
    }

    /// Formatted copy of the document text. The document is not changed.
    pub fn format(&self, options: &FormatOptions) -> String {
        formatter::format(self.document.text(), options)
    }

    /// Run a search and keep its matches.
    pub fn search(&mut self, pattern: &str, options: SearchOptions) -> &[SearchMatch] {
        self.search.search(&self.document, pattern, options)
    }

    /// The search state.
    pub fn search_session(&self) -> &SearchSession {
        &self.search
    }

    /// Mutable search state, for navigation.
    pub fn search_session_mut(&mut self) -> &mut SearchSession {
        &mut self.search
    }

    /// Highlight the current matches with the default markers.
    pub fn highlight(&self) -> String {
        self.search.highlight(&self.document)
    }

    /// Replace every match of the last search pattern. The document is
    /// replaced and all cached results, search matches included, are dropped.
    pub fn replace_all(&mut self, replacement: &str) -> &Document {
        let replaced = self.search.replace_all(&self.document, replacement);
        self.set_document(replaced);
        &self.document
    }

    /// Install a freshly ingested document and drop every cached result.
    pub fn replace_document(&mut self, document: Document) {
        self.set_document(document);
        self.search.clear();
    }

    fn set_document(&mut self, document: Document) {
        log::debug!("Replacing document ({} bytes)", document.text().len());
        self.document = document;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.tables = None;
        self.stats = None;
        self.keywords = None;
    }
}
