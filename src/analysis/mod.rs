//! Text analyses over extracted document text.
//!
//! Every analysis is a pure function of the text and its options. They share no
//! state and can run in any order, or in parallel.
//!
//! - **Keywords**: TF-IDF-like term ranking
//! - **Summary**: frequency-weighted extractive summarization
//! - **Segmenter**: paragraph and sentence segmentation
//! - **Stats**: word, sentence and paragraph counts, reading time, top words
//!
//! Table detection lives in [`crate::layout`] and formatting in
//! [`crate::converters`].

pub mod keywords;
pub mod segmenter;
pub mod stats;
pub mod summary;

pub use keywords::{extract_keywords, Keyword, KeywordExtractor};
pub use segmenter::{segment, Segment, SegmentKind, Segmentation};
pub use stats::{analyze, AnalysisStats, StatsAnalyzer, WordFrequency};
pub use summary::{generate_summary, Summarizer, SummaryResult, SummaryStats};
