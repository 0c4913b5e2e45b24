//! Layout analysis over extracted text.
//!
//! Page text arrives without positions, so layout is inferred from spacing
//! alone:
//! - Table detection from column gaps, tabs and pipes

pub mod table_detector;

// Re-export main types
pub use table_detector::{detect_tables, parse_table, Table, TableDetector};
