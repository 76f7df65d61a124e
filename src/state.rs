use std::sync::Arc;

use crate::analysis::categorical::DEFAULT_TOP_N;
use crate::analysis::distribution::DEFAULT_BINS;
use crate::analysis::timeseries::DEFAULT_WINDOW;
use crate::data::loader::LoadCache;
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. The loaded table is shared
/// read-only via `Arc`; widget selections live here and are re-validated
/// whenever the column selection changes.
pub struct AppState {
    /// Injectable memoization of the load step, keyed by content hash.
    pub cache: LoadCache,

    /// Loaded dataset (None until the user opens a file).
    pub table: Option<Arc<Table>>,

    /// Column names chosen for analysis, in table order.
    pub selected_columns: Vec<String>,

    /// Cached projection of `table` onto `selected_columns`.
    pub working: Option<Arc<Table>>,

    /// Whether the data preview section is shown.
    pub show_preview: bool,

    // Per-explorer widget selections.
    pub hist_column: Option<String>,
    pub hist_bins: usize,
    pub scatter_x: Option<String>,
    pub scatter_y: Option<String>,
    pub datetime_column: Option<String>,
    pub value_column: Option<String>,
    pub rolling_window: usize,
    pub categorical_column: Option<String>,
    pub top_n: usize,
    pub text_column: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            cache: LoadCache::new(),
            table: None,
            selected_columns: Vec::new(),
            working: None,
            show_preview: true,
            hist_column: None,
            hist_bins: DEFAULT_BINS,
            scatter_x: None,
            scatter_y: None,
            datetime_column: None,
            value_column: None,
            rolling_window: DEFAULT_WINDOW,
            categorical_column: None,
            top_n: DEFAULT_TOP_N,
            text_column: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table: select every column and reset widget
    /// choices to their defaults.
    pub fn set_table(&mut self, table: Arc<Table>) {
        self.selected_columns = table
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        self.table = Some(table);
        self.hist_column = None;
        self.scatter_x = None;
        self.scatter_y = None;
        self.datetime_column = None;
        self.value_column = None;
        self.categorical_column = None;
        self.text_column = None;
        self.status_message = None;
        self.reproject();
    }

    /// Toggle one column in the analysis selection.
    pub fn toggle_column(&mut self, name: &str) {
        if let Some(pos) = self.selected_columns.iter().position(|c| c == name) {
            self.selected_columns.remove(pos);
        } else if let Some(table) = &self.table {
            // Reinsert preserving table order.
            self.selected_columns = table
                .column_names()
                .into_iter()
                .filter(|c| *c == name || self.selected_columns.iter().any(|s| s.as_str() == *c))
                .map(str::to_string)
                .collect();
        }
        self.reproject();
    }

    pub fn select_all_columns(&mut self) {
        if let Some(table) = &self.table {
            self.selected_columns = table
                .column_names()
                .into_iter()
                .map(str::to_string)
                .collect();
        }
        self.reproject();
    }

    pub fn select_no_columns(&mut self) {
        self.selected_columns.clear();
        self.reproject();
    }

    /// Recompute the working projection after a selection change.
    pub fn reproject(&mut self) {
        let Some(table) = &self.table else {
            self.working = None;
            return;
        };
        if self.selected_columns.len() == table.column_count() {
            self.working = Some(Arc::clone(table));
        } else {
            self.working = Some(Arc::new(table.select(&self.selected_columns)));
        }
        self.ensure_choices();
    }

    /// Clamp widget column choices to what the working projection offers,
    /// falling back to the defaults the dashboard opens with.
    fn ensure_choices(&mut self) {
        let Some(table) = &self.working else {
            return;
        };

        let numeric: Vec<String> = table
            .numeric_columns()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        let textual: Vec<String> = table
            .textual_columns()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        let datetimes: Vec<String> = table
            .datetime_candidates()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let pick = |current: &mut Option<String>, options: &[String], default_idx: usize| {
            let valid = current
                .as_ref()
                .is_some_and(|c| options.iter().any(|o| o == c));
            if !valid {
                *current = options.get(default_idx).or_else(|| options.first()).cloned();
            }
        };

        pick(&mut self.hist_column, &numeric, 0);
        pick(&mut self.scatter_x, &numeric, 0);
        pick(&mut self.scatter_y, &numeric, 1);
        pick(&mut self.datetime_column, &datetimes, 0);
        pick(&mut self.value_column, &numeric, 0);
        pick(&mut self.categorical_column, &textual, 0);
        pick(&mut self.text_column, &textual, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column};

    fn sample_table() -> Arc<Table> {
        Arc::new(Table::new(vec![
            Column::new(
                "likes",
                vec![CellValue::Number(1.0), CellValue::Number(2.0)],
            ),
            Column::new(
                "shares",
                vec![CellValue::Number(3.0), CellValue::Number(4.0)],
            ),
            Column::new(
                "platform",
                vec![CellValue::Text("x".into()), CellValue::Text("x".into())],
            ),
        ]))
    }

    #[test]
    fn set_table_selects_everything_and_defaults_widgets() {
        let mut state = AppState::default();
        state.set_table(sample_table());
        assert_eq!(state.selected_columns, vec!["likes", "shares", "platform"]);
        assert_eq!(state.hist_column.as_deref(), Some("likes"));
        assert_eq!(state.scatter_x.as_deref(), Some("likes"));
        assert_eq!(state.scatter_y.as_deref(), Some("shares"));
        assert_eq!(state.categorical_column.as_deref(), Some("platform"));
    }

    #[test]
    fn deselecting_a_column_invalidates_choices() {
        let mut state = AppState::default();
        state.set_table(sample_table());
        state.toggle_column("likes");
        assert_eq!(state.selected_columns, vec!["shares", "platform"]);
        // hist choice falls back to the remaining numeric column.
        assert_eq!(state.hist_column.as_deref(), Some("shares"));
        let working = state.working.as_ref().unwrap();
        assert_eq!(working.column_count(), 2);
    }

    #[test]
    fn toggling_back_restores_table_order() {
        let mut state = AppState::default();
        state.set_table(sample_table());
        state.toggle_column("likes");
        state.toggle_column("likes");
        assert_eq!(state.selected_columns, vec!["likes", "shares", "platform"]);
    }

    #[test]
    fn empty_selection_keeps_empty_working_table() {
        let mut state = AppState::default();
        state.set_table(sample_table());
        state.select_no_columns();
        assert_eq!(state.working.as_ref().unwrap().column_count(), 0);
    }
}
