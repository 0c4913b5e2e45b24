//! Whitespace and punctuation normalization for extracted text.
//!
//! Each rule is a standalone function; [`format`] applies the enabled ones in a
//! fixed order:
//!
//! 1. remove extra spaces
//! 2. normalize line breaks
//! 3. remove empty lines
//! 4. trim lines
//! 5. capitalize sentences
//! 6. remove special characters
//! 7. format paragraphs
//!
//! The order matters. Rules run later see the output of earlier ones, so for
//! example trimming happens after line breaks are normalized.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Runs of spaces and tabs
    static ref RE_HORIZONTAL_SPACE: Regex = Regex::new(r"[ \t]+").unwrap();

    /// Windows and old Mac line endings
    static ref RE_LINE_ENDING: Regex = Regex::new(r"\r\n|\r").unwrap();

    /// Regex for normalizing 3+ consecutive newlines
    static ref RE_MULTI_NEWLINE: Regex = Regex::new(r"\n{3,}").unwrap();

    /// Lowercase letter at string start or after sentence punctuation
    static ref RE_SENTENCE_START: Regex = Regex::new(r"(^|[.!?]\s+)(\p{Ll})").unwrap();

    /// Characters outside the kept set
    static ref RE_SPECIAL_CHAR: Regex = Regex::new(r#"[^\w\s.,!?\-()\[\]{}'"]"#).unwrap();

    /// Blank-line runs separating paragraphs
    static ref RE_PARAGRAPH_BREAK: Regex = Regex::new(r"\n\s*\n").unwrap();
}

/// Which formatting rules to apply. All disabled by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    /// Collapse runs of spaces and tabs to one space
    pub remove_extra_spaces: bool,
    /// CRLF/CR to LF, and 3+ newlines to exactly 2
    pub normalize_line_breaks: bool,
    /// Drop whitespace-only lines
    pub remove_empty_lines: bool,
    /// Trim every line
    pub trim_lines: bool,
    /// Uppercase the first letter of each sentence
    pub capitalize_sentences: bool,
    /// Drop characters other than word characters, whitespace and `.,!?-()[]{}'"`
    pub remove_special_chars: bool,
    /// Join soft-wrapped lines and separate paragraphs by one blank line
    pub format_paragraphs: bool,
}

impl FormatOptions {
    /// No rules enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every rule enabled.
    pub fn all() -> Self {
        Self {
            remove_extra_spaces: true,
            normalize_line_breaks: true,
            remove_empty_lines: true,
            trim_lines: true,
            capitalize_sentences: true,
            remove_special_chars: true,
            format_paragraphs: true,
        }
    }

    /// Enable or disable extra-space removal.
    pub fn with_remove_extra_spaces(mut self, value: bool) -> Self {
        self.remove_extra_spaces = value;
        self
    }

    /// Enable or disable line-break normalization.
    pub fn with_normalize_line_breaks(mut self, value: bool) -> Self {
        self.normalize_line_breaks = value;
        self
    }

    /// Enable or disable empty-line removal.
    pub fn with_remove_empty_lines(mut self, value: bool) -> Self {
        self.remove_empty_lines = value;
        self
    }

    /// Enable or disable line trimming.
    pub fn with_trim_lines(mut self, value: bool) -> Self {
        self.trim_lines = value;
        self
    }

    /// Enable or disable sentence capitalization.
    pub fn with_capitalize_sentences(mut self, value: bool) -> Self {
        self.capitalize_sentences = value;
        self
    }

    /// Enable or disable special-character removal.
    pub fn with_remove_special_chars(mut self, value: bool) -> Self {
        self.remove_special_chars = value;
        self
    }

    /// Enable or disable paragraph formatting.
    pub fn with_format_paragraphs(mut self, value: bool) -> Self {
        self.format_paragraphs = value;
        self
    }

    /// Whether any rule is enabled.
    pub fn any(&self) -> bool {
        self.remove_extra_spaces
            || self.normalize_line_breaks
            || self.remove_empty_lines
            || self.trim_lines
            || self.capitalize_sentences
            || self.remove_special_chars
            || self.format_paragraphs
    }
}

/// Apply the enabled rules in order. With no rule enabled this returns the
/// input unchanged.
///
/// # Examples
///
/// ```
/// use pdf_lens::converters::formatter::{format, FormatOptions};
///
/// let options = FormatOptions::new()
///     .with_remove_extra_spaces(true)
///     .with_capitalize_sentences(true);
/// assert_eq!(format("hello   world. bye", &options), "Hello world. Bye");
/// ```
pub fn format(text: &str, options: &FormatOptions) -> String {
    let mut result = text.to_string();

    if options.remove_extra_spaces {
        result = remove_extra_spaces(&result);
    }
    if options.normalize_line_breaks {
        result = normalize_line_breaks(&result);
    }
    if options.remove_empty_lines {
        result = remove_empty_lines(&result);
    }
    if options.trim_lines {
        result = trim_lines(&result);
    }
    if options.capitalize_sentences {
        result = capitalize_sentences(&result);
    }
    if options.remove_special_chars {
        result = remove_special_chars(&result);
    }
    if options.format_paragraphs {
        result = format_paragraphs(&result);
    }

    result
}

/// Collapse runs of spaces and tabs to a single space. Newlines are kept.
pub fn remove_extra_spaces(text: &str) -> String {
    RE_HORIZONTAL_SPACE.replace_all(text, " ").into_owned()
}

/// Convert CRLF and CR to LF, then limit blank runs to one blank line.
pub fn normalize_line_breaks(text: &str) -> String {
    let unix = RE_LINE_ENDING.replace_all(text, "\n");
    RE_MULTI_NEWLINE.replace_all(&unix, "\n\n").into_owned()
}

/// Drop lines that are empty or whitespace-only.
pub fn remove_empty_lines(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trim leading and trailing whitespace from every line.
pub fn trim_lines(text: &str) -> String {
    text.split('\n').map(str::trim).collect::<Vec<_>>().join("\n")
}

/// Uppercase a lowercase letter at the start of the text or after `.`, `!` or
/// `?` followed by whitespace.
pub fn capitalize_sentences(text: &str) -> String {
    RE_SENTENCE_START
        .replace_all(text, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned()
}

/// Remove every character that is not a word character, whitespace or one of
/// `.,!?-()[]{}'"`.
pub fn remove_special_chars(text: &str) -> String {
    RE_SPECIAL_CHAR.replace_all(text, "").into_owned()
}

/// Join the lines of each paragraph with single spaces and separate paragraphs
/// with exactly one blank line.
pub fn format_paragraphs(text: &str) -> String {
    RE_PARAGRAPH_BREAK
        .split(text)
        .map(|para| {
            para.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|para| !para.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_without_options() {
        let input = "  messy\r\n\n\n\ntext  @#  here ";
        assert_eq!(format(input, &FormatOptions::default()), input);
        assert!(!FormatOptions::default().any());
    }

    #[test]
    fn test_remove_extra_spaces() {
        assert_eq!(remove_extra_spaces("a  b\t\tc\n  d"), "a b c\n d");
    }

    #[test]
    fn test_normalize_line_breaks() {
        assert_eq!(normalize_line_breaks("a\r\nb\rc"), "a\nb\nc");
        assert_eq!(normalize_line_breaks("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize_line_breaks("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_remove_empty_lines() {
        assert_eq!(remove_empty_lines("a\n\n  \nb\n"), "a\nb");
    }

    #[test]
    fn test_trim_lines() {
        assert_eq!(trim_lines("  a  \n\tb\n"), "a\nb\n");
    }

    #[test]
    fn test_capitalize_sentences() {
        assert_eq!(
            capitalize_sentences("first. second! third?  fourth"),
            "First. Second! Third?  Fourth"
        );
        assert_eq!(capitalize_sentences("é. ü"), "É. Ü");
        // no whitespace after the period
        assert_eq!(capitalize_sentences("v1.x works"), "V1.x works");
    }

    #[test]
    fn test_remove_special_chars() {
        assert_eq!(
            remove_special_chars("Price: $5 (approx) [note] {x} 'q' \"d\" a-b @home #tag"),
            "Price 5 (approx) [note] {x} 'q' \"d\" a-b home tag"
        );
    }

    #[test]
    fn test_format_paragraphs() {
        let input = "line one\n  line two\n\n\n\nnext para\nwraps here\n";
        assert_eq!(format_paragraphs(input), "line one line two\n\nnext para wraps here");
    }

    #[test]
    fn test_all_rules() {
        let input = "  hello   world.  this is\r\nwrapped\r\n\r\n\r\n\r\nnew   para @ end ";
        // empty-line removal runs before paragraph formatting, so everything
        // ends up in one paragraph
        assert_eq!(
            format(input, &FormatOptions::all()),
            "Hello world. This is wrapped new para  end"
        );
    }

    #[test]
    fn test_paragraphs_kept_without_empty_line_removal() {
        let options = FormatOptions::all().with_remove_empty_lines(false);
        let input = "  hello   world.  this is\r\nwrapped\r\n\r\n\r\n\r\nnew   para @ end ";
        assert_eq!(format(input, &options), "Hello world. This is wrapped\n\nnew para  end");
    }
}
