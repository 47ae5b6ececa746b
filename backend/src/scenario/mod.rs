//! Withdrawal scenario inputs
//!
//! Withdrawals arrive either as a delimited text list (`"50,80,120"`) or
//! as a CSV table with a designated withdrawal column. Parsing failures
//! are reported before any simulation starts.
//!
//! # Example
//!
//! ```rust
//! use bank_survival_core_rs::scenario::{parse_withdrawal_list, parse_withdrawal_table};
//!
//! assert_eq!(parse_withdrawal_list("50, 80,120").unwrap(), vec![50.0, 80.0, 120.0]);
//!
//! let csv = "period,withdrawal\n1,50\n2,80\n";
//! let withdrawals = parse_withdrawal_table(csv.as_bytes(), "withdrawal").unwrap();
//! assert_eq!(withdrawals, vec![50.0, 80.0]);
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Column read by default from tabular scenarios
pub const DEFAULT_WITHDRAWAL_COLUMN: &str = "withdrawal";

/// Errors raised while parsing withdrawal inputs
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Withdrawal entry {position} ('{value}') is not a finite number")]
    NonNumeric { position: usize, value: String },

    #[error("Missing required column '{column}' (found: {found})")]
    MissingColumn { column: String, found: String },

    #[error("Row {row}: withdrawal '{value}' is not a finite number")]
    NonNumericCell { row: usize, value: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot read scenario file: {0}")]
    Io(#[from] std::io::Error),
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a delimited list of withdrawals
///
/// Entries may be separated by commas, semicolons or newlines. Blank
/// input yields an empty sequence and trailing separators are ignored;
/// an empty entry in the middle of the list is an error.
pub fn parse_withdrawal_list(text: &str) -> Result<Vec<f64>, ScenarioError> {
    let mut entries: Vec<&str> = text
        .split(|c| c == ',' || c == ';' || c == '\n')
        .map(str::trim)
        .collect();

    while entries.last().is_some_and(|e| e.is_empty()) {
        entries.pop();
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            parse_amount(entry).ok_or_else(|| ScenarioError::NonNumeric {
                position: index + 1,
                value: entry.to_string(),
            })
        })
        .collect()
}

/// Parse withdrawals from CSV data with a header row
///
/// `column` must match a header exactly (surrounding whitespace ignored).
/// Rows are numbered from 1, excluding the header.
pub fn parse_withdrawal_table<R: Read>(reader: R, column: &str) -> Result<Vec<f64>, ScenarioError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let index = headers
        .iter()
        .position(|h| h == column.trim())
        .ok_or_else(|| ScenarioError::MissingColumn {
            column: column.to_string(),
            found: headers.iter().collect::<Vec<_>>().join(", "),
        })?;

    let mut withdrawals = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let cell = record.get(index).unwrap_or("");
        let amount = parse_amount(cell).ok_or_else(|| ScenarioError::NonNumericCell {
            row: row + 1,
            value: cell.to_string(),
        })?;
        withdrawals.push(amount);
    }

    Ok(withdrawals)
}

/// Read withdrawals from a CSV file
pub fn read_withdrawal_table(path: &Path, column: &str) -> Result<Vec<f64>, ScenarioError> {
    let file = File::open(path)?;
    parse_withdrawal_table(file, column)
}
