// this_file: crates/platen-batch/src/rows.rs

//! Where data rows come from.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;

use crate::error::BatchError;
use crate::types::{Row, Table};

/// Anything that can produce a table of rows.
pub trait RowSource {
    /// Loads every row, in source order.
    fn load(&self) -> Result<Table, BatchError>;
}

impl RowSource for Table {
    fn load(&self) -> Result<Table, BatchError> {
        Ok(self.clone())
    }
}

/// Rows stored as JSON Lines: one object per line, keys are column names.
#[derive(Debug, Clone)]
pub struct JsonlRows {
    path: Utf8PathBuf,
}

impl JsonlRows {
    /// Data file at `path`
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Data file location
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl RowSource for JsonlRows {
    fn load(&self) -> Result<Table, BatchError> {
        let text = fs::read_to_string(&self.path).map_err(|e| BatchError::Data {
            path: self.path.to_string(),
            reason: e.to_string(),
        })?;
        parse_jsonl(&text).map_err(|reason| BatchError::Data {
            path: self.path.to_string(),
            reason,
        })
    }
}

/// Parses JSON Lines into a table.
///
/// Blank lines are skipped. Columns are listed in order of first
/// appearance across all rows. Any line that is not a JSON object makes
/// the whole source unusable.
pub fn parse_jsonl(text: &str) -> Result<Table, String> {
    let mut table = Table::default();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let value: Value =
            serde_json::from_str(line).map_err(|e| format!("line {}: {e}", number + 1))?;
        let Value::Object(fields) = value else {
            return Err(format!("line {}: expected a JSON object", number + 1));
        };

        let mut row = Row::default();
        for (column, value) in fields {
            if !table.columns.contains(&column) {
                table.columns.push(column.clone());
            }
            row.insert(column, cell_text(&value));
        }
        table.rows.push(row);
    }

    Ok(table)
}

/// Text of one cell. Numbers and booleans keep their JSON spelling.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
