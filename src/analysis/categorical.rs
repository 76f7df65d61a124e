use std::collections::HashMap;

use crate::data::model::{Column, Table};

/// Valid range for the top-N widget.
pub const TOP_N_RANGE: std::ops::RangeInclusive<usize> = 3..=50;
pub const DEFAULT_TOP_N: usize = 10;

/// Top-N category frequencies plus one example row per category.
#[derive(Debug, Clone)]
pub struct CategoryCounts {
    pub column: String,
    /// (value, count) in rank order: count descending, ties by first
    /// appearance in the column.
    pub entries: Vec<(String, usize)>,
    /// For each entry, in the same rank order, the index of the first row
    /// whose cell equals that value.
    pub sample_rows: Vec<usize>,
}

/// Frequencies of a column's non-null values, count descending, ties broken
/// by first-encountered order.
pub fn value_counts(col: &Column) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in col.text_values() {
        if !counts.contains_key(&value) {
            order.push(value.clone());
        }
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut entries: Vec<(String, usize)> = order
        .into_iter()
        .map(|v| {
            let n = counts[&v];
            (v, n)
        })
        .collect();
    // order is first-appearance, so a stable sort keeps ties in that order.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

/// Rank the column's values and surface the first matching row per top value.
/// None when the column is absent. `top_n` is taken as given; the widget
/// layer enforces [`TOP_N_RANGE`].
pub fn top_categories(table: &Table, col_name: &str, top_n: usize) -> Option<CategoryCounts> {
    let col = table.column(col_name)?;

    let mut entries = value_counts(col);
    entries.truncate(top_n);

    let sample_rows = entries
        .iter()
        .filter_map(|(value, _)| {
            col.cells
                .iter()
                .position(|c| c.as_text().as_deref() == Some(value.as_str()))
        })
        .collect();

    Some(CategoryCounts {
        column: col_name.to_string(),
        entries,
        sample_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn cat_col(values: &[&str]) -> Column {
        Column::new(
            "cat",
            values
                .iter()
                .map(|s| CellValue::Text(s.to_string()))
                .collect(),
        )
    }

    #[test]
    fn ranks_by_count_then_first_appearance() {
        let col = cat_col(&["a", "a", "b", "c", "a", "b"]);
        let counts = value_counts(&col);
        assert_eq!(
            counts,
            vec![
                ("a".to_string(), 3),
                ("b".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn tie_break_is_first_encountered() {
        let col = cat_col(&["z", "y", "z", "y", "x"]);
        let counts = value_counts(&col);
        assert_eq!(counts[0], ("z".to_string(), 2));
        assert_eq!(counts[1], ("y".to_string(), 2));
        assert_eq!(counts[2], ("x".to_string(), 1));
    }

    #[test]
    fn top_n_truncates_and_samples_first_rows() {
        let table = Table::new(vec![
            Column::new(
                "cat",
                ["a", "a", "b", "c", "a", "b"]
                    .iter()
                    .map(|s| CellValue::Text(s.to_string()))
                    .collect(),
            ),
            Column::new(
                "likes",
                (0..6).map(|i| CellValue::Number(i as f64)).collect(),
            ),
        ]);
        let top = top_categories(&table, "cat", 2).unwrap();
        assert_eq!(
            top.entries,
            vec![("a".to_string(), 3), ("b".to_string(), 2)]
        );
        assert_eq!(top.sample_rows, vec![0, 2]);
    }

    #[test]
    fn nulls_are_not_counted() {
        let col = Column::new(
            "cat",
            vec![
                CellValue::Text("a".into()),
                CellValue::Null,
                CellValue::Text("a".into()),
            ],
        );
        assert_eq!(value_counts(&col), vec![("a".to_string(), 2)]);
    }
}
