//! Regex search, replace and highlighting over plain text.
//!
//! Offsets in [`SearchMatch`] are byte offsets into the searched text and are
//! only valid for that exact text. After any replacement they must be
//! recomputed.

use crate::error::{Error, Result};
use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// A search match with its position in the searched text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    /// 0-based position in the match list
    pub index: usize,
    /// The matched text
    pub text: String,
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl SearchMatch {
    /// Length of the match in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Always false; empty matches are never reported.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Options for text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Case sensitive search (default: case-insensitive)
    pub case_sensitive: bool,
    /// Match whole words only
    pub whole_word: bool,
    /// Treat pattern as literal text (not regex)
    pub literal: bool,
    /// Maximum number of results (0 = unlimited)
    pub max_results: usize,
}

impl SearchOptions {
    /// Create new default search options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable case-sensitive search.
    pub fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
            ..Default::default()
        }
    }

    /// Set case sensitivity.
    pub fn with_case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = value;
        self
    }

    /// Match whole words only.
    pub fn with_whole_word(mut self, value: bool) -> Self {
        self.whole_word = value;
        self
    }

    /// Treat pattern as literal text (escape regex special characters).
    pub fn with_literal(mut self, value: bool) -> Self {
        self.literal = value;
        self
    }

    /// Limit the number of results.
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }
}

/// Direction for stepping through a match list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the end, wrapping to the first match
    Next,
    /// Towards the start, wrapping to the last match
    Prev,
}

/// Markers wrapped around matches by [`highlight`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightMarkers {
    /// Opening marker for ordinary matches
    pub open: String,
    /// Opening marker for the current match
    pub current_open: String,
    /// Closing marker for every match
    pub close: String,
}

impl Default for HighlightMarkers {
    fn default() -> Self {
        Self {
            open: "<mark>".to_string(),
            current_open: "<mark class=\"current\">".to_string(),
            close: "</mark>".to_string(),
        }
    }
}

impl HighlightMarkers {
    /// Custom markers.
    pub fn new(
        open: impl Into<String>,
        current_open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        Self {
            open: open.into(),
            current_open: current_open.into(),
            close: close.into(),
        }
    }
}

/// Stateless text searcher.
pub struct TextSearcher;

impl TextSearcher {
    /// Find all non-overlapping, non-empty matches of `pattern` in `text`.
    ///
    /// An empty pattern yields no matches.
    pub fn search(text: &str, pattern: &str, options: &SearchOptions) -> Result<Vec<SearchMatch>> {
        if pattern.is_empty() {
            return Ok(Vec::new());
        }
        let regex = Self::build_regex(pattern, options)?;

        let mut results = Vec::new();
        for mat in regex.find_iter(text).filter(|m| !m.as_str().is_empty()) {
            results.push(SearchMatch {
                index: results.len(),
                text: mat.as_str().to_string(),
                start: mat.start(),
                end: mat.end(),
            });

            if options.max_results > 0 && results.len() >= options.max_results {
                break;
            }
        }

        log::debug!("Pattern '{}' matched {} time(s)", pattern, results.len());
        Ok(results)
    }

    /// Replace every non-empty match of `pattern` in `text`.
    ///
    /// `replacement` may reference capture groups as `$1` or `${name}`. An
    /// empty pattern leaves the text unchanged. `max_results` does not apply.
    pub fn replace_all(
        text: &str,
        pattern: &str,
        replacement: &str,
        options: &SearchOptions,
    ) -> Result<String> {
        if pattern.is_empty() {
            return Ok(text.to_string());
        }
        let regex = Self::build_regex(pattern, options)?;

        let mut result = String::with_capacity(text.len());
        let mut last_end = 0;
        let mut replaced = 0usize;
        for caps in regex.captures_iter(text) {
            let Some(mat) = caps.get(0) else { continue };
            if mat.as_str().is_empty() {
                continue;
            }
            result.push_str(&text[last_end..mat.start()]);
            caps.expand(replacement, &mut result);
            last_end = mat.end();
            replaced += 1;
        }
        result.push_str(&text[last_end..]);

        log::info!("Replaced {} occurrence(s) of '{}'", replaced, pattern);
        Ok(result)
    }

    /// Build regex from pattern and options.
    pub fn build_regex(pattern: &str, options: &SearchOptions) -> Result<Regex> {
        let mut pattern_str = if options.literal {
            regex::escape(pattern)
        } else {
            pattern.to_string()
        };

        if options.whole_word {
            pattern_str = format!(r"\b(?:{})\b", pattern_str);
        }

        RegexBuilder::new(&pattern_str)
            .case_insensitive(!options.case_sensitive)
            .build()
            .map_err(|e| Error::InvalidPattern(e.to_string()))
    }
}

/// Like [`search`] but reports an invalid pattern as an error.
pub fn try_search(text: &str, pattern: &str, options: &SearchOptions) -> Result<Vec<SearchMatch>> {
    TextSearcher::search(text, pattern, options)
}

/// Find all matches. An invalid pattern is logged and yields no matches.
pub fn search(text: &str, pattern: &str, options: &SearchOptions) -> Vec<SearchMatch> {
    match TextSearcher::search(text, pattern, options) {
        Ok(matches) => matches,
        Err(e) => {
            log::warn!("Search failed: {}", e);
            Vec::new()
        }
    }
}

/// Like [`replace_all`] but reports an invalid pattern as an error.
pub fn try_replace_all(
    text: &str,
    pattern: &str,
    replacement: &str,
    options: &SearchOptions,
) -> Result<String> {
    TextSearcher::replace_all(text, pattern, replacement, options)
}

/// Replace all matches. An invalid pattern is logged and the text is returned
/// unchanged.
pub fn replace_all(text: &str, pattern: &str, replacement: &str, options: &SearchOptions) -> String {
    match TextSearcher::replace_all(text, pattern, replacement, options) {
        Ok(replaced) => replaced,
        Err(e) => {
            log::warn!("Replace failed: {}", e);
            text.to_string()
        }
    }
}

/// Step through `match_count` matches from `current`, wrapping at both ends.
///
/// Without a current position (or with one out of range), `Next` starts at the
/// first match and `Prev` at the last. Returns `None` when there are no matches.
pub fn navigate(match_count: usize, current: Option<usize>, direction: Direction) -> Option<usize> {
    if match_count == 0 {
        return None;
    }
    let next = match (current.filter(|&i| i < match_count), direction) {
        (None, Direction::Next) => 0,
        (None, Direction::Prev) => match_count - 1,
        (Some(i), Direction::Next) => (i + 1) % match_count,
        (Some(i), Direction::Prev) => (i + match_count - 1) % match_count,
    };
    Some(next)
}

/// Wrap every match in `text` with the default markers.
pub fn highlight(text: &str, matches: &[SearchMatch], current: Option<usize>) -> String {
    highlight_with(text, matches, current, &HighlightMarkers::default())
}

/// Wrap every match in `text` with `markers`, using `current_open` for the
/// match at position `current` in `matches`.
///
/// Matches that overlap a previous one, fall outside `text` or no longer
/// cover their recorded text are skipped.
pub fn highlight_with(
    text: &str,
    matches: &[SearchMatch],
    current: Option<usize>,
    markers: &HighlightMarkers,
) -> String {
    let mut out = String::with_capacity(text.len() + matches.len() * 16);
    let mut last_end = 0;

    for (i, m) in matches.iter().enumerate() {
        let fits = m.start >= last_end
            && m.end <= text.len()
            && text.get(m.start..m.end) == Some(m.text.as_str());
        if !fits {
            log::debug!("Skipping stale match at {}..{}", m.start, m.end);
            continue;
        }

        out.push_str(&text[last_end..m.start]);
        if current == Some(i) {
            out.push_str(&markers.current_open);
        } else {
            out.push_str(&markers.open);
        }
        out.push_str(&m.text);
        out.push_str(&markers.close);
        last_end = m.end;
    }
    out.push_str(&text[last_end..]);
    out
}
