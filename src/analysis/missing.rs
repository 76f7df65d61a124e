use crate::data::model::Table;

/// Rows surfaced as examples of missing data.
pub const SAMPLE_ROWS: usize = 10;

/// Missing-value report: offending columns ranked by null count, plus the
/// first few rows containing at least one null.
#[derive(Debug, Clone)]
pub struct MissingReport {
    /// (column name, null count), count descending, only columns with nulls.
    pub per_column: Vec<(String, usize)>,
    /// Indices of up to [`SAMPLE_ROWS`] rows with a null cell, row order.
    pub sample_rows: Vec<usize>,
}

impl MissingReport {
    pub fn is_clean(&self) -> bool {
        self.per_column.is_empty()
    }
}

pub fn missing_report(table: &Table) -> MissingReport {
    let mut per_column: Vec<(String, usize)> = table
        .columns
        .iter()
        .map(|c| (c.name.clone(), c.null_count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    // Stable sort keeps column order for equal counts.
    per_column.sort_by(|a, b| b.1.cmp(&a.1));

    let sample_rows = (0..table.row_count())
        .filter(|&row| table.columns.iter().any(|c| c.cells[row].is_null()))
        .take(SAMPLE_ROWS)
        .collect();

    MissingReport {
        per_column,
        sample_rows,
    }
}
