//! Aggregate document statistics.
//!
//! Language detection here is deliberately coarse: text counts as English when
//! enough of its tokens are plain ASCII words longer than two letters. It does
//! not tell English from other Latin-script languages.

use crate::config::AnalysisConfig;
use crate::text;
use serde::{Deserialize, Serialize};

/// A frequent term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    /// The term (lowercase)
    pub word: String,
    /// Occurrences
    pub count: usize,
}

/// Statistics over a whole text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    /// Whitespace-separated words
    pub words: usize,
    /// Characters including whitespace
    pub characters: usize,
    /// Characters excluding whitespace
    pub characters_no_spaces: usize,
    /// Non-empty sentence pieces
    pub sentences: usize,
    /// Non-empty paragraphs
    pub paragraphs: usize,
    /// Lines
    pub lines: usize,
    /// Estimated reading time, whole minutes rounded up
    pub reading_time_minutes: usize,
    /// "English" or "Unknown"
    pub detected_language: String,
    /// Most frequent terms, stop words excluded
    pub top_words: Vec<WordFrequency>,
    /// Mean characters per word
    pub average_word_length: f64,
    /// Mean words per sentence
    pub average_sentence_length: f64,
}

/// Statistics analyzer.
#[derive(Debug, Clone, Default)]
pub struct StatsAnalyzer {
    config: AnalysisConfig,
}

impl StatsAnalyzer {
    /// Analyzer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer with custom configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Compute statistics for `text`.
    pub fn analyze(&self, text: &str) -> AnalysisStats {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let words = tokens.len();
        let sentences = text::split_sentences(text).len();
        let paragraphs = text::split_paragraphs(text).len();
        let word_chars: usize = tokens.iter().map(|t| text::char_count(t)).sum();

        let top_words = text::top_terms(text, &self.config.stop_words, self.config.top_word_count)
            .into_iter()
            .map(|(word, count)| WordFrequency { word, count })
            .collect();

        AnalysisStats {
            words,
            characters: text::char_count(text),
            characters_no_spaces: text.chars().filter(|c| !c.is_whitespace()).count(),
            sentences,
            paragraphs,
            lines: text.lines().count(),
            reading_time_minutes: words.div_ceil(self.config.words_per_minute.max(1)),
            detected_language: self.detect_language(&tokens).to_string(),
            top_words,
            average_word_length: ratio(word_chars, words),
            average_sentence_length: ratio(words, sentences),
        }
    }

    fn detect_language(&self, tokens: &[&str]) -> &'static str {
        if tokens.is_empty() {
            return "Unknown";
        }
        let alphabetic = tokens
            .iter()
            .filter(|t| t.len() > 2 && t.chars().all(|c| c.is_ascii_alphabetic()))
            .count();
        if alphabetic as f64 / tokens.len() as f64 > self.config.language_threshold {
            "English"
        } else {
            "Unknown"
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Compute statistics with default configuration.
pub fn analyze(text: &str) -> AnalysisStats {
    StatsAnalyzer::new().analyze(text)
}
