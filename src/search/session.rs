//! Stateful search over a document: the last query, its matches and a cursor.

use super::text_search::{self, Direction, HighlightMarkers, SearchMatch, SearchOptions};
use crate::document::Document;
use crate::error::Result;

/// The last search run against a document together with the current match.
///
/// Matches are tied to the text they were computed on. [`replace_all`]
/// produces a new document and clears the match list, so callers have to run
/// [`search`] again before navigating or highlighting.
///
/// [`replace_all`]: SearchSession::replace_all
/// [`search`]: SearchSession::search
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    pattern: String,
    options: SearchOptions,
    matches: Vec<SearchMatch>,
    current: Option<usize>,
}

impl SearchSession {
    /// Empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `pattern` against `doc`, replacing any previous results.
    ///
    /// The cursor moves to the first match. An invalid pattern is logged and
    /// leaves the session with no matches.
    pub fn search(&mut self, doc: &Document, pattern: &str, options: SearchOptions) -> &[SearchMatch] {
        self.matches = text_search::search(doc.text(), pattern, &options);
        self.current = if self.matches.is_empty() { None } else { Some(0) };
        self.pattern = pattern.to_string();
        self.options = options;
        &self.matches
    }

    /// Like [`search`](Self::search) but reports an invalid pattern.
    pub fn try_search(
        &mut self,
        doc: &Document,
        pattern: &str,
        options: SearchOptions,
    ) -> Result<&[SearchMatch]> {
        let found = text_search::try_search(doc.text(), pattern, &options);
        self.pattern = pattern.to_string();
        self.options = options;
        match found {
            Ok(matches) => {
                self.current = if matches.is_empty() { None } else { Some(0) };
                self.matches = matches;
                Ok(&self.matches)
            }
            Err(e) => {
                self.clear();
                Err(e)
            }
        }
    }

    /// Replace every match of the session's pattern and return the new
    /// document. Clears the match list and cursor.
    pub fn replace_all(&mut self, doc: &Document, replacement: &str) -> Document {
        let text = text_search::replace_all(doc.text(), &self.pattern, replacement, &self.options);
        self.clear();
        Document::new(text)
    }

    /// Move the cursor and return the new current match.
    pub fn step(&mut self, direction: Direction) -> Option<&SearchMatch> {
        self.current = text_search::navigate(self.matches.len(), self.current, direction);
        self.current_match()
    }

    /// Move to the next match, wrapping to the first.
    pub fn next(&mut self) -> Option<&SearchMatch> {
        self.step(Direction::Next)
    }

    /// Move to the previous match, wrapping to the last.
    pub fn prev(&mut self) -> Option<&SearchMatch> {
        self.step(Direction::Prev)
    }

    /// Mark every match in `doc` with the default markers.
    pub fn highlight(&self, doc: &Document) -> String {
        self.highlight_with(doc, &HighlightMarkers::default())
    }

    /// Mark every match in `doc` with custom markers.
    pub fn highlight_with(&self, doc: &Document, markers: &HighlightMarkers) -> String {
        text_search::highlight_with(doc.text(), &self.matches, self.current, markers)
    }

    /// Drop matches and cursor. Pattern and options are kept.
    pub fn clear(&mut self) {
        self.matches.clear();
        self.current = None;
    }

    /// Matches from the last search.
    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    /// Cursor position in [`matches`](Self::matches).
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// The match under the cursor.
    pub fn current_match(&self) -> Option<&SearchMatch> {
        self.current.and_then(|i| self.matches.get(i))
    }

    /// Pattern of the last search.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Options of the last search.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_sets_cursor() {
        let doc = Document::new("one two one two one");
        let mut session = SearchSession::new();
        assert_eq!(session.search(&doc, "one", SearchOptions::default()).len(), 3);
        assert_eq!(session.current(), Some(0));
        assert_eq!(session.prev().map(|m| m.start), Some(16));
        assert_eq!(session.next().map(|m| m.start), Some(0));
    }

    #[test]
    fn test_no_matches() {
        let doc = Document::new("abc");
        let mut session = SearchSession::new();
        assert!(session.search(&doc, "zzz", SearchOptions::default()).is_empty());
        assert_eq!(session.current(), None);
        assert!(session.next().is_none());
    }

    #[test]
    fn test_replace_clears_matches() {
        let doc = Document::new("the cat sat");
        let mut session = SearchSession::new();
        session.search(&doc, "at", SearchOptions::default());
        let replaced = session.replace_all(&doc, "X");
        assert_eq!(replaced.text(), "the cX sX");
        assert!(session.matches().is_empty());
        assert_eq!(session.current(), None);
        assert_eq!(session.pattern(), "at");
        assert_eq!(session.highlight(&replaced), "the cX sX");
    }

    #[test]
    fn test_try_search_invalid_pattern_clears() {
        let doc = Document::new("abc abc");
        let mut session = SearchSession::new();
        session.search(&doc, "abc", SearchOptions::default());
        assert!(session.try_search(&doc, "(", SearchOptions::default()).is_err());
        assert!(session.matches().is_empty());
    }
}
