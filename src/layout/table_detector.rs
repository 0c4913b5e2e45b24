//! Table detection over line-delimited text.
//!
//! Extracted page text carries no geometry, so tables are found from how lines
//! are spaced: columns are separated by runs of two or more whitespace
//! characters, tabs or pipes. Consecutive lines that split into more than two
//! fields form a table; the first line becomes the header row.
//!
//! This is a heuristic. Prose containing wide gaps can be picked up, and a table
//! whose columns are separated by single spaces is not detected.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Default column delimiter: 2+ whitespace, a tab, or a pipe
    static ref RE_COLUMN_DELIMITER: Regex = Regex::new(r"\s{2,}|\t|\|").unwrap();

    /// Run of 2+ whitespace characters
    static ref RE_WIDE_GAP: Regex = Regex::new(r"\s{2,}").unwrap();
}

/// Minimum number of consecutive table-like lines that make a table.
const MIN_TABLE_LINES: usize = 2;

/// A detected table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Cells of the first line
    pub headers: Vec<String>,
    /// Remaining lines; each row has exactly `headers.len()` cells
    pub rows: Vec<Vec<String>>,
    /// Source lines the table was parsed from
    pub raw: Vec<String>,
}

impl Table {
    /// Number of columns.
    pub fn num_cols(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows (header excluded).
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Table detector with a configurable column delimiter.
#[derive(Debug, Clone)]
pub struct TableDetector {
    delimiter: Regex,
}

impl Default for TableDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDetector {
    /// Detector using the default delimiter (`\s{2,}|\t|\|`).
    pub fn new() -> Self {
        Self {
            delimiter: RE_COLUMN_DELIMITER.clone(),
        }
    }

    /// Detector using a custom column delimiter.
    pub fn with_delimiter(delimiter: Regex) -> Self {
        Self { delimiter }
    }

    /// Detect every table in `text`.
    pub fn detect(&self, text: &str) -> Vec<Table> {
        let mut tables = vec![];
        let mut run: Vec<&str> = vec![];

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if self.is_table_like(line) {
                run.push(line);
            } else {
                self.flush_run(&mut run, &mut tables);
            }
        }

        // table at end of text
        self.flush_run(&mut run, &mut tables);

        log::debug!("Detected {} table(s)", tables.len());
        tables
    }

    /// Parse a run of lines into a table, padding short rows.
    pub fn parse(&self, lines: &[&str]) -> Table {
        let parsed: Vec<Vec<String>> = lines
            .iter()
            .map(|line| {
                self.delimiter
                    .split(line)
                    .map(str::trim)
                    .filter(|cell| !cell.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .collect();

        let max_cols = parsed.iter().map(|r| r.len()).max().unwrap_or(0);

        let mut normalized = parsed.into_iter().map(|mut row| {
            row.resize(max_cols, String::new());
            row
        });

        let headers = normalized.next().unwrap_or_default();
        let rows = normalized.collect();

        Table {
            headers,
            rows,
            raw: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Whether a trimmed line looks like a table row.
    ///
    /// The split must yield more than two fields (empty fields count), and the
    /// line must contain a digit or a wide whitespace gap.
    pub fn is_table_like(&self, line: &str) -> bool {
        let fields = self.delimiter.split(line).count();
        let has_numbers = line.chars().any(|c| c.is_ascii_digit());
        let has_wide_gap = RE_WIDE_GAP.is_match(line);
        fields > 2 && (has_numbers || has_wide_gap)
    }

    fn flush_run(&self, run: &mut Vec<&str>, tables: &mut Vec<Table>) {
        if run.len() >= MIN_TABLE_LINES {
            tables.push(self.parse(run));
        }
        run.clear();
    }
}

/// Detect tables in `text` with the default delimiter.
///
/// # Examples
///
/// ```
/// use pdf_lens::layout::table_detector::detect_tables;
///
/// let text = "Name  Age  City\nAlice  30  NYC\nBob  25  LA\nSome prose line.";
/// let tables = detect_tables(text);
/// assert_eq!(tables.len(), 1);
/// assert_eq!(tables[0].headers, vec!["Name", "Age", "City"]);
/// assert_eq!(tables[0].rows.len(), 2);
/// ```
pub fn detect_tables(text: &str) -> Vec<Table> {
    TableDetector::new().detect(text)
}

/// Parse lines into a table with the default delimiter.
pub fn parse_table(lines: &[&str]) -> Table {
    TableDetector::new().parse(lines)
}
