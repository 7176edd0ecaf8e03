//! Whole-file overviews: per-column quick summaries and trend points

use serde::Serialize;

use super::{Cell, DataError, DataTable};
use crate::stats::{self, fixed};

/// Rows shown by a trend view when no limit is given
pub const DEFAULT_TREND_LIMIT: usize = 20;

/// Quick statistics for one numeric column
///
/// Uses the same median rule as [`stats::describe`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl ColumnSummary {
    /// Values formatted to two decimals, in column order: mean, median, min, max
    pub fn display_values(&self) -> [String; 4] {
        [
            fixed(self.mean, 2),
            fixed(self.median, 2),
            fixed(self.min, 2),
            fixed(self.max, 2),
        ]
    }
}

/// One point of a row-order trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Taken from the first column of the row; `"N/A"` when blank
    pub label: String,
    /// Parsed cell value, or 0 when the cell is not numeric
    pub value: f64,
}

impl DataTable {
    /// Quick summary of every numeric column
    pub fn column_summaries(&self) -> Vec<ColumnSummary> {
        self.numeric_columns()
            .into_iter()
            .filter_map(|column| {
                let values = self.extract_sample(column).ok()?;
                let described = stats::describe(&values).ok()?;
                Some(ColumnSummary {
                    column: column.to_string(),
                    mean: described.mean,
                    median: described.median,
                    min: described.min,
                    max: described.max,
                    count: described.n,
                })
            })
            .collect()
    }

    /// The first `limit` rows of `column` as label/value points
    pub fn trend(&self, column: &str, limit: usize) -> Result<Vec<TrendPoint>, DataError> {
        let idx = self.column_index(column)?;
        Ok(self
            .rows()
            .iter()
            .take(limit)
            .map(|row| TrendPoint {
                label: match row.first() {
                    Some(Cell::Empty) | None => "N/A".to_string(),
                    Some(cell) => cell.to_string(),
                },
                value: row[idx].as_number().unwrap_or(0.0),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataTable {
        DataTable::from_reader(
            "lot,value,note\nL1,4,ok\nL2,1,\n,3,late\nL4,x,\nL5,2,ok\n".as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_column_summaries_cover_numeric_columns_only() {
        let summaries = table().column_summaries();
        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!(s.column, "value");
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 2.5);
        // Even count: average of the central pair (2, 3)
        assert_eq!(s.median, 2.5);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
        assert_eq!(s.display_values(), ["2.50", "2.50", "1.00", "4.00"]);
    }

    #[test]
    fn test_trend_labels_and_zero_fill() {
        let points = table().trend("value", DEFAULT_TREND_LIMIT).unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0].label, "L1");
        assert_eq!(points[2].label, "N/A");
        assert_eq!(points[3].value, 0.0);
        assert_eq!(points[4].value, 2.0);
    }

    #[test]
    fn test_trend_respects_limit() {
        assert_eq!(table().trend("value", 2).unwrap().len(), 2);
    }

    #[test]
    fn test_trend_unknown_column() {
        assert!(matches!(
            table().trend("nope", 5),
            Err(DataError::UnknownColumn { .. })
        ));
    }
}
