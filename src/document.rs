//! Extracted document text.
//!
//! A [`Document`] is one flat string. Ingestion lays out every extracted page
//! with literal marker lines so the per-file/per-page structure can be recovered
//! later by exporters:
//!
//! ```text
//! === report.pdf ===
//! Page 1:
//! <page text>
//!
//! Page 2:
//! <page text>
//!
//!
//! === appendix.pdf ===
//! ...
//! ```
//!
//! The text is never edited in place. Operations that change it (a global
//! replace) build a new `Document`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref RE_FILE_MARKER: Regex = Regex::new(r"^=== (.+) ===$").unwrap();
    static ref RE_PAGE_MARKER: Regex = Regex::new(r"^Page (\d+):$").unwrap();
}

/// The canonical extracted text of an ingestion batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    text: String,
}

/// One page recovered from the marker layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSection {
    /// Page number as written in the marker. `0` for text outside any page marker.
    pub page_number: u32,
    /// Trimmed page text
    pub content: String,
}

/// One file recovered from the marker layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSection {
    /// File name from the `=== name ===` marker, `None` for text before any marker
    pub name: Option<String>,
    /// Pages in order of appearance
    pub pages: Vec<PageSection>,
}

impl Document {
    /// Wrap already extracted text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The full text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the document, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }

    /// Whether the document holds no non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Recover the file/page structure from the marker lines.
    ///
    /// Text without any marker is returned as a single unnamed section holding
    /// one page numbered 1. Loose text inside a marked document (before the first
    /// page marker of a file) becomes a page numbered 0.
    pub fn sections(&self) -> Vec<FileSection> {
        let mut sections: Vec<FileSection> = Vec::new();
        let mut current: Option<FileSection> = None;
        let mut page: Option<(u32, Vec<&str>)> = None;
        let mut loose: Vec<&str> = Vec::new();
        let mut saw_marker = false;

        fn flush_page(
            section: &mut Option<FileSection>,
            page: &mut Option<(u32, Vec<&str>)>,
            loose: &mut Vec<&str>,
        ) {
            let target = section.get_or_insert_with(|| FileSection {
                name: None,
                pages: Vec::new(),
            });
            let loose_text = loose.join("\n");
            if !loose_text.trim().is_empty() {
                target.pages.push(PageSection {
                    page_number: 0,
                    content: loose_text.trim().to_string(),
                });
            }
            loose.clear();
            if let Some((number, lines)) = page.take() {
                target.pages.push(PageSection {
                    page_number: number,
                    content: lines.join("\n").trim().to_string(),
                });
            }
        }

        for line in self.text.lines() {
            if let Some(caps) = RE_FILE_MARKER.captures(line) {
                saw_marker = true;
                flush_page(&mut current, &mut page, &mut loose);
                if let Some(done) = current.take() {
                    if done.name.is_some() || !done.pages.is_empty() {
                        sections.push(done);
                    }
                }
                current = Some(FileSection {
                    name: Some(caps[1].to_string()),
                    pages: Vec::new(),
                });
            } else if let Some(caps) = RE_PAGE_MARKER.captures(line) {
                saw_marker = true;
                flush_page(&mut current, &mut page, &mut loose);
                let number = caps[1].parse().unwrap_or(0);
                page = Some((number, Vec::new()));
            } else if let Some((_, lines)) = page.as_mut() {
                lines.push(line);
            } else {
                loose.push(line);
            }
        }

        if !saw_marker {
            let content = self.text.trim();
            if content.is_empty() {
                return Vec::new();
            }
            return vec![FileSection {
                name: None,
                pages: vec![PageSection {
                    page_number: 1,
                    content: content.to_string(),
                }],
            }];
        }

        flush_page(&mut current, &mut page, &mut loose);
        if let Some(done) = current.take() {
            if done.name.is_some() || !done.pages.is_empty() {
                sections.push(done);
            }
        }
        sections
    }

    /// All pages of all files, in order.
    pub fn pages(&self) -> Vec<PageSection> {
        self.sections().into_iter().flat_map(|s| s.pages).collect()
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Incrementally lays out extracted pages in the marker format.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    text: String,
    in_file: bool,
}

impl DocumentBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new file block. Closes the previous block if still open.
    pub fn begin_file(&mut self, name: &str) -> &mut Self {
        if self.in_file {
            self.end_file();
        }
        self.text.push_str(&format!("=== {} ===\n", name));
        self.in_file = true;
        self
    }

    /// Append one page to the open file block.
    pub fn push_page(&mut self, number: u32, text: &str) -> &mut Self {
        self.text.push_str(&format!("Page {}:\n{}\n\n", number, text));
        self
    }

    /// Close the open file block with its blank-line separator.
    pub fn end_file(&mut self) -> &mut Self {
        if self.in_file {
            self.text.push('\n');
            self.in_file = false;
        }
        self
    }

    /// Finish the batch.
    pub fn build(mut self) -> Document {
        self.end_file();
        Document { text: self.text }
    }
}
