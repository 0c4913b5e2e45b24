//! Keyword extraction with TF-IDF-like scoring.
//!
//! Each surviving term is scored from four signals:
//!
//! - `tf = frequency / total`
//! - `idf = ln(1 + total / frequency)`
//! - `position_weight = 1 / (1 + avg_position / total)`, favouring terms that
//!   appear early
//! - `length_weight = min(len / 10, 1)`, favouring longer terms
//!
//! `score = tf * idf * (1 + position_weight) * (1 + length_weight)`, where
//! `total` is the number of terms left after stop-word filtering and positions
//! are 0-based indices into that filtered list.

use crate::text::{self, StopWords};
use crate::utils::safe_float_cmp;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A ranked keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    /// The term (lowercase)
    pub word: String,
    /// Number of occurrences
    pub frequency: usize,
    /// Composite score, never negative
    pub score: f64,
    /// Number of recorded occurrence positions
    pub positions: usize,
    /// Mean 0-based term index of the occurrences, rounded
    pub avg_position: usize,
}

#[derive(Debug, Default)]
struct TermStats {
    frequency: usize,
    position_sum: usize,
}

/// Keyword extractor.
#[derive(Debug, Clone, Default)]
pub struct KeywordExtractor {
    stop_words: StopWords,
}

impl KeywordExtractor {
    /// Extractor using the English stop-word set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor using a custom stop-word set.
    pub fn with_stop_words(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    /// Return at most `count` keywords, best first.
    ///
    /// Ties keep first-occurrence order.
    pub fn extract(&self, text: &str, count: usize) -> Vec<Keyword> {
        let terms = text::terms(text, &self.stop_words);
        let total = terms.len();
        if total == 0 || count == 0 {
            return vec![];
        }

        let mut stats: IndexMap<&str, TermStats> = IndexMap::new();
        for (index, term) in terms.iter().enumerate() {
            let entry = stats.entry(term.as_str()).or_default();
            entry.frequency += 1;
            entry.position_sum += index;
        }

        let total_f = total as f64;
        let mut keywords: Vec<Keyword> = stats
            .into_iter()
            .map(|(word, s)| {
                let frequency = s.frequency as f64;
                let avg_position = s.position_sum as f64 / frequency;

                let tf = frequency / total_f;
                let idf = (1.0 + total_f / frequency).ln();
                let position_weight = 1.0 / (1.0 + avg_position / total_f);
                let length_weight = (word.chars().count() as f64 / 10.0).min(1.0);
                let score = tf * idf * (1.0 + position_weight) * (1.0 + length_weight);

                Keyword {
                    word: word.to_string(),
                    frequency: s.frequency,
                    score,
                    positions: s.frequency,
                    avg_position: avg_position.round() as usize,
                }
            })
            .collect();

        // stable: equal scores stay in first-seen order
        keywords.sort_by(|a, b| safe_float_cmp(b.score, a.score));
        keywords.truncate(count);

        log::debug!("Extracted {} keyword(s) from {} terms", keywords.len(), total);
        keywords
    }
}

/// Extract the top `count` keywords using the English stop-word set.
pub fn extract_keywords(text: &str, count: usize) -> Vec<Keyword> {
    KeywordExtractor::new().extract(text, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_term_score() {
        let keywords = extract_keywords("database", 5);
        assert_eq!(keywords.len(), 1);
        let k = &keywords[0];
        assert_eq!(k.word, "database");
        assert_eq!(k.frequency, 1);
        assert_eq!(k.avg_position, 0);
        // tf=1, idf=ln 2, position_weight=1, length_weight=0.8
        let expected = 2.0_f64.ln() * 2.0 * 1.8;
        assert!((k.score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_dominates() {
        let keywords = extract_keywords("rust rust rust python java", 3);
        assert_eq!(keywords[0].word, "rust");
        assert_eq!(keywords[0].frequency, 3);
        assert_eq!(keywords[0].avg_position, 1);
    }

    #[test]
    fn test_count_bound_and_filters() {
        let text = "The quick brown fox jumps over the lazy dog and it is an ox";
        let keywords = extract_keywords(text, 3);
        assert_eq!(keywords.len(), 3);
        for k in &keywords {
            assert!(k.word.chars().count() > 2);
            assert!(!StopWords::english().contains(&k.word));
        }
    }

    #[test]
    fn test_sorted_descending() {
        let text = "alpha beta gamma alpha delta beta alpha epsilon";
        let keywords = extract_keywords(text, 10);
        for pair in keywords.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_earlier_terms_rank_higher() {
        let extractor = KeywordExtractor::with_stop_words(StopWords::none());
        let keywords = extractor.extract("abcd efgh", 2);
        assert_eq!(keywords[0].word, "abcd");
        assert_eq!(keywords[1].word, "efgh");
    }

    #[test]
    fn test_tie_break_first_occurrence() {
        // both terms: frequency 2, length 4, mean position 1.5
        let extractor = KeywordExtractor::with_stop_words(StopWords::none());
        let keywords = extractor.extract("bbbb aaaa aaaa bbbb", 2);
        assert_eq!(keywords[0].score, keywords[1].score);
        assert_eq!(keywords[0].word, "bbbb");
        assert_eq!(keywords[1].word, "aaaa");
    }

    #[test]
    fn test_empty_and_zero_count() {
        assert!(extract_keywords("", 5).is_empty());
        assert!(extract_keywords("the and of", 5).is_empty());
        assert!(extract_keywords("meaningful words here", 0).is_empty());
    }
}
