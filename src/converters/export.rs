//! Export encodings for extracted text and detected tables.
//!
//! All exporters read the page structure back out of the document's marker
//! lines (see [`crate::document`]). They only encode; writing files or
//! triggering downloads is up to the caller.

use crate::analysis::AnalysisStats;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::layout::Table;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Supported document export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Plain text
    Text,
    /// JSON with per-page entries
    Json,
    /// CSV with one row per page
    Csv,
    /// Markdown with file/page headers and a statistics block
    Markdown,
}

impl ExportFormat {
    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "md",
        }
    }

    /// MIME type of the encoded output.
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            Self::Markdown => "text/markdown",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "md" | "markdown" => Ok(Self::Markdown),
            other => Err(Error::InvalidOption(format!("unknown export format '{}'", other))),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonExport<'a> {
    extraction_date: String,
    files_processed: usize,
    extracted_text: &'a str,
    pages: Vec<JsonPage>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonPage {
    page_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    content: String,
}

/// The document text as-is.
pub fn to_plain_text(doc: &Document) -> String {
    doc.text().to_string()
}

/// Pretty-printed JSON:
/// `{ extractionDate, filesProcessed, extractedText, pages: [{ pageNumber, file?, content }] }`.
pub fn to_json(
    doc: &Document,
    files_processed: usize,
    extracted_at: DateTime<Utc>,
) -> Result<String> {
    let pages = doc
        .sections()
        .into_iter()
        .flat_map(|section| {
            let file = section.name;
            section.pages.into_iter().map(move |page| JsonPage {
                page_number: page.page_number,
                file: file.clone(),
                content: page.content,
            })
        })
        .collect();

    let export = JsonExport {
        extraction_date: extracted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        files_processed,
        extracted_text: doc.text(),
        pages,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

/// CSV with a `Page Number`, `Content` header and one row per page.
///
/// Every field is quoted, embedded quotes are doubled and newlines inside page
/// content become spaces.
pub fn to_csv(doc: &Document) -> String {
    let mut rows = vec![csv_row(&["Page Number", "Content"])];
    for page in doc.pages() {
        let content = page.content.replace(['\r', '\n'], " ");
        rows.push(csv_row(&[&page.page_number.to_string(), content.trim()]));
    }
    rows.join("\n")
}

/// Markdown with `##` file headers, `###` page headers and a trailing
/// statistics block.
pub fn to_markdown(doc: &Document, stats: &AnalysisStats) -> String {
    let mut out = String::from("# Extracted Text\n\n");

    for section in doc.sections() {
        if let Some(name) = &section.name {
            out.push_str(&format!("## {}\n\n", name));
        }
        for page in &section.pages {
            if page.page_number > 0 {
                out.push_str(&format!("### Page {}\n\n", page.page_number));
            }
            if !page.content.is_empty() {
                out.push_str(&page.content);
                out.push_str("\n\n");
            }
        }
    }

    out.push_str("---\n\n## Statistics\n\n");
    out.push_str(&format!("- **Words:** {}\n", stats.words));
    out.push_str(&format!("- **Characters:** {}\n", stats.characters));
    out.push_str(&format!("- **Sentences:** {}\n", stats.sentences));
    out.push_str(&format!("- **Paragraphs:** {}\n", stats.paragraphs));
    out.push_str(&format!("- **Reading time:** {} min\n", stats.reading_time_minutes));
    out.push_str(&format!("- **Language:** {}\n", stats.detected_language));
    out
}

/// CSV for one table: the header row followed by the data rows.
pub fn table_to_csv(table: &Table) -> String {
    std::iter::once(&table.headers)
        .chain(table.rows.iter())
        .map(|row| {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            csv_row(&cells)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Encode a document in the given format.
pub fn export(
    doc: &Document,
    format: ExportFormat,
    files_processed: usize,
    stats: &AnalysisStats,
) -> Result<String> {
    match format {
        ExportFormat::Text => Ok(to_plain_text(doc)),
        ExportFormat::Json => to_json(doc, files_processed, Utc::now()),
        ExportFormat::Csv => Ok(to_csv(doc)),
        ExportFormat::Markdown => Ok(to_markdown(doc, stats)),
    }
}

fn csv_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::document::DocumentBuilder;
    use chrono::TimeZone;

    fn sample() -> Document {
        let mut builder = DocumentBuilder::new();
        builder
            .begin_file("report.pdf")
            .push_page(1, "He said \"hi\".\nNext line.")
            .push_page(2, "Second page.");
        builder.build()
    }

    #[test]
    fn test_csv_escaping() {
        let csv = to_csv(&sample());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "\"Page Number\",\"Content\"");
        assert_eq!(lines[1], "\"1\",\"He said \"\"hi\"\". Next line.\"");
        assert_eq!(lines[2], "\"2\",\"Second page.\"");
    }

    #[test]
    fn test_json_shape() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let json = to_json(&sample(), 1, at).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["extractionDate"], "2024-03-01T12:00:00.000Z");
        assert_eq!(value["filesProcessed"], 1);
        assert_eq!(value["pages"][1]["pageNumber"], 2);
        assert_eq!(value["pages"][1]["file"], "report.pdf");
        assert_eq!(value["pages"][1]["content"], "Second page.");
        assert!(value["extractedText"].as_str().unwrap().starts_with("=== report.pdf ==="));
    }

    #[test]
    fn test_markdown_layout() {
        let doc = sample();
        let md = to_markdown(&doc, &analyze(doc.text()));
        assert!(md.starts_with("# Extracted Text\n\n## report.pdf\n\n### Page 1\n\n"));
        assert!(md.contains("### Page 2\n\nSecond page.\n\n"));
        assert!(md.contains("## Statistics"));
        assert!(md.contains("- **Language:** English"));
    }

    #[test]
    fn test_table_csv() {
        let table = Table {
            headers: vec!["Name".into(), "Note".into()],
            rows: vec![vec!["Bob".into(), "says \"x\"".into()]],
            raw: vec![],
        };
        assert_eq!(table_to_csv(&table), "\"Name\",\"Note\"\n\"Bob\",\"says \"\"x\"\"\"");
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("MD".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("txt".parse::<ExportFormat>().unwrap().media_type(), "text/plain");
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
