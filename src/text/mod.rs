//! Shared text utilities: splitting rules and tokenization.
//!
//! Every analysis in the crate splits text the same way, so the rules live here:
//!
//! - **Sentences** are the pieces between runs of `.`, `!` or `?`. This is a
//!   heuristic: abbreviations ("Mr. Smith") and decimals ("3.14") are split too.
//! - **Paragraphs** are the pieces between blank-line runs (two or more newlines
//!   with only whitespace between them).
//! - **Words** are whitespace-separated tokens.
//! - **Terms** are lowercase word tokens longer than two characters that are not
//!   stop words, used for frequency and keyword scoring.

pub mod stopwords;

pub use stopwords::StopWords;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Sentence terminator runs
    static ref RE_SENTENCE_END: Regex = Regex::new(r"[.!?]+").unwrap();

    /// Blank-line runs separating paragraphs
    static ref RE_BLANK_LINES: Regex = Regex::new(r"\n\s*\n").unwrap();

    /// Anything that is neither a word character nor whitespace
    static ref RE_NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
}

/// Split text into trimmed, non-empty sentence pieces.
pub fn split_sentences(text: &str) -> Vec<&str> {
    RE_SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split text into trimmed, non-empty paragraphs.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    RE_BLANK_LINES
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Number of whitespace-separated words.
#[inline]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of characters (not bytes).
#[inline]
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Lowercase `text`, blank out punctuation and return the surviving terms.
///
/// A term survives when it is longer than two characters and not in `stop_words`.
pub fn terms(text: &str, stop_words: &StopWords) -> Vec<String> {
    let lowered = text.to_lowercase();
    RE_NON_WORD
        .replace_all(&lowered, " ")
        .split_whitespace()
        .filter(|t| t.chars().count() > 2 && !stop_words.contains(t))
        .map(str::to_string)
        .collect()
}

/// Count term occurrences, keeping first-seen order.
///
/// The insertion order is what makes downstream ranking stable: equal scores
/// resolve to the term that appeared first.
pub fn term_frequencies<S: AsRef<str>>(terms: &[S]) -> IndexMap<String, usize> {
    let mut freq: IndexMap<String, usize> = IndexMap::new();
    for term in terms {
        *freq.entry(term.as_ref().to_string()).or_insert(0) += 1;
    }
    freq
}

/// Top `limit` terms by raw frequency, ties resolved by first occurrence.
pub fn top_terms(text: &str, stop_words: &StopWords, limit: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = term_frequencies(&terms(text, stop_words))
        .into_iter()
        .collect();
    // stable sort keeps first-seen order among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}
