//! Stop-word sets used to filter tokens before scoring.
//!
//! The default set covers common English function words and contractions.
//! Callers analysing other languages can build their own set with
//! [`StopWords::from_words`] and pass it through [`crate::config::AnalysisConfig`].

use std::collections::HashSet;

/// Common English function words and contractions.
const ENGLISH: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "before", "after", "above", "below",
    "between", "among", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
    "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they", "me", "him",
    "her", "us", "them", "my", "your", "his", "its", "our", "their", "what", "which", "who",
    "when", "where", "why", "how", "all", "any", "both", "each", "few", "more", "most", "other",
    "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
    "just", "also", "then", "there", "here", "out", "over", "again", "once", "because", "while",
    "if", "as", "until", "don", "doesn", "didn", "isn", "aren", "wasn", "weren", "won", "wouldn",
    "shouldn", "couldn", "can't", "won't", "don't", "it's", "i'm", "you're", "we're", "they're",
];

/// A set of lowercase words excluded from term statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

impl StopWords {
    /// The built-in English stop-word set.
    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    /// An empty set; every token survives filtering.
    pub fn none() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Build a set from arbitrary words. Words are lowercased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Whether `word` (already lowercased) is a stop word.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
