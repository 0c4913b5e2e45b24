//! Configuration for ingestion and analysis.

use crate::text::StopWords;

/// Default reading speed used for reading-time estimates.
pub const DEFAULT_WORDS_PER_MINUTE: usize = 225;

/// Default per-file size cap (50 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Page count assumed for files that have not been opened yet.
pub const DEFAULT_PAGE_ESTIMATE: usize = 10;

/// Analysis configuration shared by the text transforms.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Words excluded from term statistics.
    pub stop_words: StopWords,

    /// Reading speed for reading-time estimates.
    pub words_per_minute: usize,

    /// Share of alphabetic tokens above which text is reported as English.
    pub language_threshold: f64,

    /// Number of entries in the statistics top-word list.
    pub top_word_count: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            stop_words: StopWords::english(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            language_threshold: 0.3,
            top_word_count: 10,
        }
    }

    /// Replace the stop-word set.
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Set the reading speed. Zero is treated as one.
    pub fn with_words_per_minute(mut self, wpm: usize) -> Self {
        self.words_per_minute = wpm.max(1);
        self
    }

    /// Set the language-detection threshold.
    pub fn with_language_threshold(mut self, threshold: f64) -> Self {
        self.language_threshold = threshold;
        self
    }

    /// Set the length of the top-word list.
    pub fn with_top_word_count(mut self, count: usize) -> Self {
        self.top_word_count = count;
        self
    }
}

/// Ingestion configuration.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,

    /// Page count assumed for files not opened yet when estimating progress.
    pub page_estimate: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            page_estimate: DEFAULT_PAGE_ESTIMATE,
        }
    }

    /// Set the file size cap.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Set the page estimate for unopened files.
    pub fn with_page_estimate(mut self, pages: usize) -> Self {
        self.page_estimate = pages.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.words_per_minute, 225);
        assert_eq!(config.top_word_count, 10);
        assert!(config.stop_words.contains("the"));
    }

    #[test]
    fn test_analysis_builder() {
        let config = AnalysisConfig::new()
            .with_stop_words(StopWords::none())
            .with_words_per_minute(0)
            .with_top_word_count(3);
        assert!(config.stop_words.is_empty());
        assert_eq!(config.words_per_minute, 1);
        assert_eq!(config.top_word_count, 3);
    }

    #[test]
    fn test_ingest_defaults() {
        let config = IngestConfig::default();
        assert_eq!(config.max_file_size, 52_428_800);
        assert_eq!(config.page_estimate, 10);
    }
}
