//! Regex search and replace over extracted text.
//!
//! Supports:
//! - Regular expression or literal patterns
//! - Case-insensitive (default) and whole-word matching
//! - Global replace with `$1` / `${name}` group references
//! - Circular navigation and match highlighting
//!
//! ## Example
//!
//! ```
//! use pdf_lens::search::{highlight, replace_all, search, SearchOptions};
//!
//! let text = "the cat sat";
//! let matches = search(text, "at", &SearchOptions::default());
//! assert_eq!(matches.len(), 2);
//! assert_eq!(highlight(text, &matches, Some(0)),
//!            "the c<mark class=\"current\">at</mark> s<mark>at</mark>");
//! assert_eq!(replace_all(text, "at", "X", &SearchOptions::default()), "the cX sX");
//! ```

mod session;
mod text_search;

pub use session::SearchSession;
pub use text_search::{
    highlight, highlight_with, navigate, replace_all, search, try_replace_all, try_search,
    Direction, HighlightMarkers, SearchMatch, SearchOptions, TextSearcher,
};
