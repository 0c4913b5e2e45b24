//! Paragraph and sentence segmentation.

use crate::text;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How to split text into segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Split on blank-line runs
    #[default]
    Paragraphs,
    /// Split on `.`, `!` and `?` runs
    Sentences,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paragraphs => write!(f, "paragraphs"),
            Self::Sentences => write!(f, "sentences"),
        }
    }
}

impl FromStr for SegmentKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paragraphs" | "paragraph" => Ok(Self::Paragraphs),
            "sentences" | "sentence" => Ok(Self::Sentences),
            other => Err(crate::Error::InvalidOption(format!(
                "unknown segment kind '{}'",
                other
            ))),
        }
    }
}

/// One segment of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// 1-based position in the source text
    pub id: usize,
    /// Trimmed segment text
    pub content: String,
    /// Whitespace-separated words in `content`
    pub word_count: usize,
    /// Characters in `content`
    pub char_count: usize,
}

/// Result of segmenting a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segmentation {
    /// Splitting rule used
    #[serde(rename = "type")]
    pub kind: SegmentKind,
    /// Segments in order of appearance
    pub segments: Vec<Segment>,
    /// Number of segments
    pub total_segments: usize,
    /// Sum of segment word counts
    pub total_words: usize,
    /// Sum of segment character counts
    pub total_chars: usize,
}

/// Split `text` into segments of the given kind.
///
/// In sentence mode every segment except the last gets its terminating period
/// back (the original terminator, `!` or `?`, is not preserved).
pub fn segment(text: &str, kind: SegmentKind) -> Segmentation {
    let pieces = match kind {
        SegmentKind::Paragraphs => text::split_paragraphs(text),
        SegmentKind::Sentences => text::split_sentences(text),
    };

    let last = pieces.len().saturating_sub(1);
    let segments: Vec<Segment> = pieces
        .into_iter()
        .enumerate()
        .map(|(i, piece)| {
            let content = if kind == SegmentKind::Sentences && i < last {
                format!("{}.", piece)
            } else {
                piece.to_string()
            };
            Segment {
                id: i + 1,
                word_count: text::word_count(&content),
                char_count: text::char_count(&content),
                content,
            }
        })
        .collect();

    let total_words = segments.iter().map(|s| s.word_count).sum();
    let total_chars = segments.iter().map(|s| s.char_count).sum();

    log::debug!("Segmented text into {} {}", segments.len(), kind);

    Segmentation {
        kind,
        total_segments: segments.len(),
        total_words,
        total_chars,
        segments,
    }
}
