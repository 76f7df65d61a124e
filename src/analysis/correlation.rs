use crate::data::model::Column;

use super::stats;

/// Pairwise Pearson correlation matrix over numeric columns.
///
/// Symmetric; entries are NaN where a pair has fewer than two overlapping
/// valid rows or a side has zero variance.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, values.len() == columns.len() squared.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Compute the matrix. None when fewer than two columns are available, which
/// the caller reports as an insufficiency rather than an error.
pub fn correlation_matrix(columns: &[&Column]) -> Option<CorrelationMatrix> {
    if columns.len() < 2 {
        return None;
    }

    let numeric: Vec<Vec<Option<f64>>> = columns.iter().map(|c| c.numeric_values()).collect();
    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];

    for i in 0..n {
        for j in i..n {
            let pairs: Vec<(f64, f64)> = numeric[i]
                .iter()
                .zip(&numeric[j])
                .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                .collect();
            let r = if i == j {
                // Diagonal is exactly 1 unless the column is degenerate.
                if stats::pearson(&pairs).is_nan() {
                    f64::NAN
                } else {
                    1.0
                }
            } else {
                stats::pearson(&pairs)
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Some(CorrelationMatrix {
        columns: columns.iter().map(|c| c.name.clone()).collect(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn numeric_col(name: &str, values: &[Option<f64>]) -> Column {
        Column::new(
            name,
            values
                .iter()
                .map(|v| v.map_or(CellValue::Null, CellValue::Number))
                .collect(),
        )
    }

    #[test]
    fn single_column_is_insufficient() {
        let a = numeric_col("a", &[Some(1.0), Some(2.0)]);
        assert!(correlation_matrix(&[&a]).is_none());
        assert!(correlation_matrix(&[]).is_none());
    }

    #[test]
    fn perfectly_correlated_pair() {
        let a = numeric_col("a", &[Some(1.0), Some(2.0), Some(3.0)]);
        let b = numeric_col("b", &[Some(2.0), Some(4.0), Some(6.0)]);
        let m = correlation_matrix(&[&a, &b]).unwrap();
        assert_eq!(m.columns, vec!["a", "b"]);
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 1), 1.0);
        assert!((m.get(0, 1) - 1.0).abs() < 1e-12);
        assert_eq!(m.get(0, 1), m.get(1, 0));
    }

    #[test]
    fn zero_variance_column_yields_nan_entries() {
        let a = numeric_col("a", &[Some(1.0), Some(2.0), Some(3.0)]);
        let c = numeric_col("c", &[Some(5.0), Some(5.0), Some(5.0)]);
        let m = correlation_matrix(&[&a, &c]).unwrap();
        assert!(m.get(0, 1).is_nan());
        assert!(m.get(1, 1).is_nan());
        assert_eq!(m.get(0, 0), 1.0);
    }

    #[test]
    fn pairwise_complete_rows_only() {
        // Overlap of a and b is rows 0 and 2: (1,4), (3,8) -> r = 1.
        let a = numeric_col("a", &[Some(1.0), Some(2.0), Some(3.0)]);
        let b = numeric_col("b", &[Some(4.0), None, Some(8.0)]);
        let m = correlation_matrix(&[&a, &b]).unwrap();
        assert!((m.get(0, 1) - 1.0).abs() < 1e-12);
    }
}
