//! In-memory table loaded from a CSV file

use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::DataError;

/// A single parsed cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Classify a raw field: blank, finite number, or free text
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Header row plus data rows, in file order
#[derive(Debug, Clone, Default, Serialize)]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl DataTable {
    /// Build a table from already-split rows. Short rows are padded with
    /// [`Cell::Empty`]; extra fields beyond the header are ignored.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Load a CSV file. The first record is the header row.
    pub fn from_csv_path(path: &Path) -> Result<Self, DataError> {
        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Load CSV from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = h.trim();
                if h.is_empty() {
                    format!("column_{}", i + 1)
                } else {
                    h.to_string()
                }
            })
            .collect();

        if headers.is_empty() {
            return Err(DataError::NoHeader);
        }

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            // Skip fully blank lines
            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            rows.push(record.iter().map(Cell::parse).collect());
        }

        Ok(Self::new(headers, rows))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by exact name, falling back to a case-insensitive match
    pub fn column_index(&self, name: &str) -> Result<usize, DataError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .or_else(|| {
                self.headers
                    .iter()
                    .position(|h| h.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| DataError::UnknownColumn {
                name: name.to_string(),
                available: self.headers.join(", "),
            })
    }

    /// Columns where at least one row holds a number
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(i, _)| self.rows.iter().any(|row| row[*i].as_number().is_some()))
            .map(|(_, h)| h.as_str())
            .collect()
    }

    /// Column to analyze when none is chosen: the first column whose first
    /// row is numeric, else the first column
    pub fn default_column(&self) -> Option<&str> {
        let first_row = self.rows.first();
        self.headers
            .iter()
            .enumerate()
            .find(|(i, _)| {
                first_row
                    .map(|row| row[*i].as_number().is_some())
                    .unwrap_or(false)
            })
            .or_else(|| self.headers.iter().enumerate().next())
            .map(|(_, h)| h.as_str())
    }

    /// Numeric values of one column in row order; non-numeric cells are dropped
    pub fn extract_sample(&self, column: &str) -> Result<Vec<f64>, DataError> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().filter_map(|row| row[idx].as_number()).collect())
    }

    /// Rows where any cell contains `term`, case-insensitive. An empty term
    /// matches every row.
    pub fn search(&self, term: &str) -> Vec<&[Cell]> {
        let needle = term.to_lowercase();
        self.rows
            .iter()
            .filter(|row| {
                needle.is_empty()
                    || row
                        .iter()
                        .any(|cell| cell.to_string().to_lowercase().contains(&needle))
            })
            .map(|row| row.as_slice())
            .collect()
    }
}
