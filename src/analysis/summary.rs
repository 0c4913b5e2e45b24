//! Extractive summarization.
//!
//! Sentences are scored by the summed document frequency of their terms, with
//! two boosts that compound:
//!
//! - ×1.5 for the first and the last sentence
//! - ×1.2 for sentences of 8 to 25 words
//!
//! The best `max(3, ceil(n * percentage / 100))` sentences are kept and put back
//! into document order.

use crate::text::{self, StopWords};
use crate::utils::safe_float_cmp;
use serde::{Deserialize, Serialize};

/// Shortest and longest accepted summary length, in percent.
pub const MIN_LENGTH_PERCENTAGE: u32 = 10;
/// See [`MIN_LENGTH_PERCENTAGE`].
pub const MAX_LENGTH_PERCENTAGE: u32 = 50;

/// Sentences no longer than this (in characters, trimmed) are ignored.
const MIN_SENTENCE_CHARS: usize = 10;

/// Minimum number of sentences in a summary.
const MIN_SUMMARY_SENTENCES: usize = 3;

const EDGE_BOOST: f64 = 1.5;
const LENGTH_BOOST: f64 = 1.2;
const PREFERRED_WORDS: std::ops::RangeInclusive<usize> = 8..=25;

/// Word counts describing a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// Words in the source text
    pub original_words: usize,
    /// Words in the summary
    pub summary_words: usize,
    /// `summary_words / original_words` as a rounded percentage
    pub compression_ratio: u32,
}

/// A generated summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// The summary text
    pub summary: String,
    /// Word counts
    pub stats: SummaryStats,
}

/// Frequency-weighted extractive summarizer.
#[derive(Debug, Clone, Default)]
pub struct Summarizer {
    stop_words: StopWords,
}

impl Summarizer {
    /// Summarizer using the English stop-word set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarizer using a custom stop-word set.
    pub fn with_stop_words(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    /// Summarize `text` to roughly `length_percentage` percent of its sentences.
    ///
    /// Percentages outside 10..=50 are clamped. Text with fewer than three
    /// qualifying sentences is returned whole.
    pub fn summarize(&self, text: &str, length_percentage: u32) -> SummaryResult {
        let percentage = clamp_percentage(length_percentage);

        let sentences: Vec<&str> = text::split_sentences(text)
            .into_iter()
            .filter(|s| text::char_count(s) > MIN_SENTENCE_CHARS)
            .collect();

        let original_words = text::word_count(text);

        if sentences.len() < MIN_SUMMARY_SENTENCES {
            log::debug!(
                "Only {} qualifying sentence(s); returning the whole text",
                sentences.len()
            );
            return SummaryResult {
                summary: text.to_string(),
                stats: SummaryStats {
                    original_words,
                    summary_words: original_words,
                    compression_ratio: 100,
                },
            };
        }

        let frequencies = text::term_frequencies(&text::terms(text, &self.stop_words));
        let last = sentences.len() - 1;

        let mut scored: Vec<(usize, f64)> = sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| {
                let mut score: f64 = text::terms(sentence, &self.stop_words)
                    .iter()
                    .map(|t| frequencies.get(t.as_str()).copied().unwrap_or(0) as f64)
                    .sum();

                if index == 0 || index == last {
                    score *= EDGE_BOOST;
                }
                if PREFERRED_WORDS.contains(&text::word_count(sentence)) {
                    score *= LENGTH_BOOST;
                }
                (index, score)
            })
            .collect();

        let target = ((sentences.len() as f64 * percentage as f64 / 100.0).ceil() as usize)
            .max(MIN_SUMMARY_SENTENCES)
            .min(sentences.len());

        // stable: equal scores keep document order
        scored.sort_by(|a, b| safe_float_cmp(b.1, a.1));
        let mut selected: Vec<usize> = scored.into_iter().take(target).map(|(i, _)| i).collect();
        selected.sort_unstable();

        let mut summary = selected
            .iter()
            .map(|&i| sentences[i])
            .collect::<Vec<_>>()
            .join(". ");
        summary.push('.');

        let summary_words = text::word_count(&summary);
        let compression_ratio = if original_words == 0 {
            100
        } else {
            (summary_words as f64 / original_words as f64 * 100.0).round() as u32
        };

        log::debug!(
            "Summary kept {} of {} sentences ({}%)",
            selected.len(),
            sentences.len(),
            compression_ratio
        );

        SummaryResult {
            summary,
            stats: SummaryStats {
                original_words,
                summary_words,
                compression_ratio,
            },
        }
    }
}

fn clamp_percentage(length_percentage: u32) -> u32 {
    let clamped = length_percentage.clamp(MIN_LENGTH_PERCENTAGE, MAX_LENGTH_PERCENTAGE);
    if clamped != length_percentage {
        log::warn!(
            "Summary length {}% outside {}..={}; using {}%",
            length_percentage,
            MIN_LENGTH_PERCENTAGE,
            MAX_LENGTH_PERCENTAGE,
            clamped
        );
    }
    clamped
}

/// Summarize `text` with the English stop-word set.
pub fn generate_summary(text: &str, length_percentage: u32) -> SummaryResult {
    Summarizer::new().summarize(text, length_percentage)
}
