use crate::data::model::{ColumnKind, Table};

use super::stats;

// ---------------------------------------------------------------------------
// Overview & Summary
// ---------------------------------------------------------------------------

/// Per-column type line of the overview (kind label plus non-null count).
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    pub non_null: usize,
}

/// Descriptive statistics for one numeric column, valid values only.
#[derive(Debug, Clone)]
pub struct NumericSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// The full overview report for one table.
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub rows: usize,
    pub cols: usize,
    pub missing_cells: usize,
    pub columns: Vec<ColumnSummary>,
    /// Empty when the table has no numeric columns; the UI reports that
    /// explicitly instead of erroring.
    pub numeric: Vec<NumericSummary>,
}

pub fn summarize(table: &Table) -> TableSummary {
    let columns: Vec<ColumnSummary> = table
        .columns
        .iter()
        .zip(&table.kinds)
        .map(|(c, k)| ColumnSummary {
            name: c.name.clone(),
            kind: *k,
            non_null: c.non_null_count(),
        })
        .collect();

    let missing_cells = table.columns.iter().map(|c| c.null_count()).sum();

    let numeric = table
        .numeric_columns()
        .into_iter()
        .filter_map(|col| {
            let mut values: Vec<f64> = col.cells.iter().filter_map(|c| c.as_f64()).collect();
            if values.is_empty() {
                return None;
            }
            values.sort_unstable_by(f64::total_cmp);
            Some(NumericSummary {
                name: col.name.clone(),
                count: values.len(),
                mean: stats::mean(&values),
                std: stats::sample_std(&values),
                min: values[0],
                q1: stats::percentile(&values, 25.0),
                median: stats::percentile(&values, 50.0),
                q3: stats::percentile(&values, 75.0),
                max: values[values.len() - 1],
            })
        })
        .collect();

    TableSummary {
        rows: table.row_count(),
        cols: table.column_count(),
        missing_cells,
        columns,
        numeric,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column};

    fn table() -> Table {
        Table::new(vec![
            Column::new(
                "likes",
                vec![
                    CellValue::Number(1.0),
                    CellValue::Number(2.0),
                    CellValue::Number(3.0),
                    CellValue::Number(4.0),
                ],
            ),
            Column::new(
                "platform",
                vec![
                    CellValue::Text("x".into()),
                    CellValue::Null,
                    CellValue::Text("y".into()),
                    CellValue::Text("x".into()),
                ],
            ),
            Column::new(
                "empty",
                vec![
                    CellValue::Null,
                    CellValue::Null,
                    CellValue::Null,
                    CellValue::Null,
                ],
            ),
        ])
    }

    #[test]
    fn shape_and_missing_cells() {
        let s = summarize(&table());
        assert_eq!(s.rows, 4);
        assert_eq!(s.cols, 3);
        assert_eq!(s.missing_cells, 5);
        assert_eq!(s.columns[1].non_null, 3);
    }

    #[test]
    fn numeric_describe_values() {
        let s = summarize(&table());
        assert_eq!(s.numeric.len(), 1);
        let n = &s.numeric[0];
        assert_eq!(n.count, 4);
        assert_eq!(n.mean, 2.5);
        assert_eq!(n.min, 1.0);
        assert_eq!(n.q1, 1.75);
        assert_eq!(n.median, 2.5);
        assert_eq!(n.q3, 3.25);
        assert_eq!(n.max, 4.0);
    }

    #[test]
    fn all_missing_column_is_excluded_without_error() {
        let s = summarize(&table());
        // "empty" is 100% missing: present in the type table, absent from
        // the numeric describe block.
        assert_eq!(s.columns[2].non_null, 0);
        assert_eq!(s.columns[2].kind, ColumnKind::Unresolved);
        assert!(s.numeric.iter().all(|n| n.name != "empty"));
    }

    #[test]
    fn no_numeric_columns_yields_empty_block() {
        let t = Table::new(vec![Column::new(
            "tag",
            vec![CellValue::Text("a".into()), CellValue::Text("b".into())],
        )]);
        assert!(summarize(&t).numeric.is_empty());
    }
}
