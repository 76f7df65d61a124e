use chrono::NaiveDateTime;

use crate::data::model::{parse_timestamp, Table};

// ---------------------------------------------------------------------------
// Time-series explorer
// ---------------------------------------------------------------------------

/// Valid range for the rolling-window widget.
pub const WINDOW_RANGE: std::ops::RangeInclusive<usize> = 1..=100;
pub const DEFAULT_WINDOW: usize = 7;

/// A value series over time: rows with an unparseable timestamp dropped,
/// remainder stable-sorted ascending. Value gaps (nulls) are retained so the
/// rolling mean can skip them.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    pub datetime_column: String,
    pub value_column: String,
    pub points: Vec<(NaiveDateTime, Option<f64>)>,
}

impl TimeSeries {
    pub fn non_null_count(&self) -> usize {
        self.points.iter().filter(|(_, v)| v.is_some()).count()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|(_, v)| *v).collect()
    }
}

/// Coerce the chosen datetime column and pair it with the chosen value
/// column. None when either column is absent.
pub fn time_series(table: &Table, dt_col: &str, val_col: &str) -> Option<TimeSeries> {
    let dt = table.column(dt_col)?;
    let val = table.column(val_col)?;

    let mut points: Vec<(NaiveDateTime, Option<f64>)> = dt
        .cells
        .iter()
        .zip(&val.cells)
        .filter_map(|(d, v)| {
            let ts = d.as_text().and_then(|s| parse_timestamp(&s))?;
            Some((ts, v.as_f64()))
        })
        .collect();
    points.sort_by_key(|(ts, _)| *ts);

    Some(TimeSeries {
        datetime_column: dt_col.to_string(),
        value_column: val_col.to_string(),
        points,
    })
}

/// Trailing rolling mean with a minimum-period floor of one sample. Nulls
/// inside the window are skipped; an all-null window yields None.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let start = (i + 1).saturating_sub(window);
            let in_window: Vec<f64> = values[start..=i].iter().flatten().copied().collect();
            if in_window.is_empty() {
                None
            } else {
                Some(in_window.iter().sum::<f64>() / in_window.len() as f64)
            }
        })
        .collect()
}
