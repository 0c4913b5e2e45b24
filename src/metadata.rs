//! Document information (title, author, dates, ...) read from the PDF trailer.
//!
//! Metadata is display-only. [`metadata_or_none`] recovers from every failure
//! so a broken Info dictionary never blocks text extraction.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use lopdf::{Dictionary, Document, Object};
use serde::Serialize;
use std::fmt;

/// Text shown when no metadata could be read.
pub const NO_METADATA: &str = "No metadata available";

/// Information dictionary entries plus document-level facts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Document title
    pub title: Option<String>,
    /// Author
    pub author: Option<String>,
    /// Subject
    pub subject: Option<String>,
    /// Keywords, as a single string
    pub keywords: Option<String>,
    /// Authoring application
    pub creator: Option<String>,
    /// Producing application
    pub producer: Option<String>,
    /// Creation date
    pub creation_date: Option<DateTime<FixedOffset>>,
    /// Last modification date
    pub modification_date: Option<DateTime<FixedOffset>>,
    /// PDF header version, e.g. "1.7"
    pub pdf_version: String,
    /// Number of pages
    pub page_count: u32,
}

impl fmt::Display for DocumentMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text_fields = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Keywords", &self.keywords),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
        ];
        for (label, value) in text_fields {
            if let Some(value) = value {
                writeln!(f, "{}: {}", label, value)?;
            }
        }
        if let Some(date) = &self.creation_date {
            writeln!(f, "Created: {}", date.to_rfc3339())?;
        }
        if let Some(date) = &self.modification_date {
            writeln!(f, "Modified: {}", date.to_rfc3339())?;
        }
        writeln!(f, "PDF version: {}", self.pdf_version)?;
        write!(f, "Pages: {}", self.page_count)
    }
}

/// Read metadata from raw PDF bytes.
pub fn extract_metadata(data: &[u8]) -> Result<DocumentMetadata> {
    let doc = Document::load_mem(data).map_err(|e| Error::MetadataExtraction(e.to_string()))?;

    let mut meta = DocumentMetadata {
        pdf_version: doc.version.clone(),
        page_count: doc.get_pages().len() as u32,
        ..Default::default()
    };

    let Some(info) = info_dictionary(&doc) else {
        log::debug!("Document has no Info dictionary");
        return Ok(meta);
    };

    let text = |key: &[u8]| info_string(&doc, info, key);
    meta.title = text(b"Title");
    meta.author = text(b"Author");
    meta.subject = text(b"Subject");
    meta.keywords = text(b"Keywords");
    meta.creator = text(b"Creator");
    meta.producer = text(b"Producer");
    meta.creation_date = text(b"CreationDate").and_then(|d| parse_pdf_date(&d));
    meta.modification_date = text(b"ModDate").and_then(|d| parse_pdf_date(&d));

    Ok(meta)
}

/// Like [`extract_metadata`], but failures are logged and yield `None`.
pub fn metadata_or_none(data: &[u8]) -> Option<DocumentMetadata> {
    match extract_metadata(data) {
        Ok(meta) => Some(meta),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}

/// Display text for optional metadata.
pub fn describe(meta: Option<&DocumentMetadata>) -> String {
    meta.map_or_else(|| NO_METADATA.to_string(), ToString::to_string)
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    let info = doc.trailer.get(b"Info").ok()?;
    resolve(doc, info)?.as_dict().ok()
}

fn info_string(doc: &Document, info: &Dictionary, key: &[u8]) -> Option<String> {
    let value = resolve(doc, info.get(key).ok()?)?;
    match value {
        Object::String(bytes, _) => {
            let s = decode_pdf_string(bytes);
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE when it starts with the `FE FF` byte
/// order mark, otherwise one byte per character.
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    // PDFDocEncoding agrees with Latin-1 for printable characters
    bytes.iter().map(|&b| b as char).collect()
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSSOHH'mm'`). Every part after the
/// year is optional; a missing offset means UTC.
pub fn parse_pdf_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let s = raw.trim();
    let s = s.strip_prefix("D:").unwrap_or(s);

    let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, rest) = s.split_at(digits_end);
    if digits.len() < 4 {
        return None;
    }

    let field = |from: usize, len: usize, default: u32| -> Option<u32> {
        match digits.get(from..from + len) {
            Some(part) => part.parse().ok(),
            None => Some(default),
        }
    };
    let year: i32 = digits[..4].parse().ok()?;
    let month = field(4, 2, 1)?;
    let day = field(6, 2, 1)?;
    let hour = field(8, 2, 0)?;
    let minute = field(10, 2, 0)?;
    let second = field(12, 2, 0)?;

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    let offset = parse_offset(rest)?;
    offset.from_local_datetime(&naive).single()
}

fn parse_offset(rest: &str) -> Option<FixedOffset> {
    let mut chars = rest.chars();
    let sign = match chars.next() {
        None | Some('Z') => return FixedOffset::east_opt(0),
        Some('+') => 1,
        Some('-') => -1,
        Some(_) => return None,
    };
    let digits: String = chars.filter(char::is_ascii_digit).collect();
    let hours: i32 = digits.get(0..2)?.parse().ok()?;
    let minutes: i32 = digits.get(2..4).and_then(|m| m.parse().ok()).unwrap_or(0);
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
