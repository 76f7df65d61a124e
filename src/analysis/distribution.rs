use crate::data::model::Column;

use super::stats::{self, TrendLine};

// ---------------------------------------------------------------------------
// Histogram with marginal box stats
// ---------------------------------------------------------------------------

/// Valid range for the histogram bin-count widget.
pub const BIN_RANGE: std::ops::RangeInclusive<usize> = 5..=200;
pub const DEFAULT_BINS: usize = 30;

/// Five-number summary backing the marginal box overlay.
#[derive(Debug, Clone, Copy)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Equal-width histogram of one numeric column.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub column: String,
    /// bin_edges.len() == counts.len() + 1
    pub bin_edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub box_stats: BoxStats,
}

/// Bin a numeric column's valid values. None when the column has no numeric
/// values to bin.
pub fn histogram(col: &Column, bins: usize) -> Option<Histogram> {
    let bins = bins.clamp(*BIN_RANGE.start(), *BIN_RANGE.end());
    let mut values: Vec<f64> = col.cells.iter().filter_map(|c| c.as_f64()).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(f64::total_cmp);
    let (lo, hi) = (values[0], values[values.len() - 1]);

    // All-equal values collapse to a single bin around the value.
    let (bins, width) = if hi == lo {
        (1usize, 1.0)
    } else {
        (bins, (hi - lo) / bins as f64)
    };

    let mut counts = vec![0usize; bins];
    for &v in &values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let bin_edges = (0..=bins).map(|i| lo + i as f64 * width).collect();

    Some(Histogram {
        column: col.name.clone(),
        bin_edges,
        counts,
        box_stats: BoxStats {
            min: lo,
            q1: stats::percentile(&values, 25.0),
            median: stats::percentile(&values, 50.0),
            q3: stats::percentile(&values, 75.0),
            max: hi,
        },
    })
}

// ---------------------------------------------------------------------------
// Scatter with OLS trend line
// ---------------------------------------------------------------------------

/// Scatter of two numeric columns, rows where both cells are valid.
#[derive(Debug, Clone)]
pub struct Scatter {
    pub x_column: String,
    pub y_column: String,
    pub points: Vec<[f64; 2]>,
    pub trend: Option<TrendLine>,
}

pub fn scatter(x: &Column, y: &Column) -> Scatter {
    let pairs: Vec<(f64, f64)> = x
        .cells
        .iter()
        .zip(&y.cells)
        .filter_map(|(a, b)| Some((a.as_f64()?, b.as_f64()?)))
        .collect();
    let trend = stats::ols(&pairs);
    Scatter {
        x_column: x.name.clone(),
        y_column: y.name.clone(),
        points: pairs.iter().map(|&(a, b)| [a, b]).collect(),
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn numeric_col(name: &str, values: &[f64]) -> Column {
        Column::new(
            name,
            values.iter().map(|&v| CellValue::Number(v)).collect(),
        )
    }

    #[test]
    fn histogram_counts_known_values() {
        let col = numeric_col("v", &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 5.0, 9.9, 10.0]);
        let h = histogram(&col, 5).unwrap();
        assert_eq!(h.counts.len(), 5);
        assert_eq!(h.bin_edges.len(), 6);
        assert_eq!(h.counts.iter().sum::<usize>(), 9);
        // [0,2) has 0,1; last bin [8,10] has 9.9 and 10.
        assert_eq!(h.counts[0], 2);
        assert_eq!(h.counts[4], 2);
        assert_eq!(h.box_stats.min, 0.0);
        assert_eq!(h.box_stats.max, 10.0);
    }

    #[test]
    fn histogram_of_constant_column_is_single_bin() {
        let col = numeric_col("v", &[3.0, 3.0, 3.0]);
        let h = histogram(&col, 50).unwrap();
        assert_eq!(h.counts, vec![3]);
    }

    #[test]
    fn histogram_requires_numeric_values() {
        let col = Column::new("t", vec![CellValue::Text("a".into()), CellValue::Null]);
        assert!(histogram(&col, 10).is_none());
    }

    #[test]
    fn bin_count_is_clamped() {
        let col = numeric_col("v", &[0.0, 1.0, 2.0, 3.0]);
        let h = histogram(&col, 1).unwrap();
        assert_eq!(h.counts.len(), *BIN_RANGE.start());
    }

    #[test]
    fn scatter_skips_incomplete_rows_and_fits_trend() {
        let x = Column::new(
            "x",
            vec![
                CellValue::Number(0.0),
                CellValue::Number(1.0),
                CellValue::Null,
                CellValue::Number(3.0),
            ],
        );
        let y = Column::new(
            "y",
            vec![
                CellValue::Number(1.0),
                CellValue::Number(3.0),
                CellValue::Number(99.0),
                CellValue::Number(7.0),
            ],
        );
        let s = scatter(&x, &y);
        assert_eq!(s.points.len(), 3);
        let trend = s.trend.unwrap();
        assert!((trend.slope - 2.0).abs() < 1e-12);
        assert!((trend.intercept - 1.0).abs() < 1e-12);
    }
}
