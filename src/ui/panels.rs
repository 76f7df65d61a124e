use eframe::egui::{self, Color32, ComboBox, Grid, RichText, ScrollArea, Slider, Ui};

use crate::analysis::categorical::{self, TOP_N_RANGE};
use crate::analysis::correlation;
use crate::analysis::distribution::{self, BIN_RANGE};
use crate::analysis::missing;
use crate::analysis::summary;
use crate::analysis::text;
use crate::analysis::timeseries::{self, WINDOW_RANGE};
use crate::data::model::Table;
use crate::state::AppState;

use super::plot;

/// Rows shown in the data preview and in per-section row samples.
const PREVIEW_ROWS: usize = 10;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} rows × {} columns loaded, {} selected",
                table.row_count(),
                table.column_count(),
                state.selected_columns.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CSV data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    let Some(path) = file else {
        return;
    };

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Failed to read {}: {e}", path.display());
            state.status_message = Some(format!("Error: {e}"));
            return;
        }
    };

    match state.cache.load(&bytes) {
        Ok(table) => {
            log::info!(
                "Loaded {} rows × {} columns from {}",
                table.row_count(),
                table.column_count(),
                path.display()
            );
            state.set_table(table);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.checkbox(&mut state.show_preview, "Show head (first 10 rows)");
    ui.separator();

    ui.strong("Columns to focus on");
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_columns();
        }
        if ui.small_button("None").clicked() {
            state.select_no_columns();
        }
    });

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (col, kind) in table.columns.iter().zip(&table.kinds) {
                let mut checked = state.selected_columns.iter().any(|c| c == &col.name);
                let label = format!("{}  ({kind})", col.name);
                if ui.checkbox(&mut checked, label).changed() {
                    state.toggle_column(&col.name);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Central panel – explorer sections
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV file to explore it  (File → Open CSV…)");
        });
        return;
    }

    if state.selected_columns.is_empty() {
        ui.label(
            RichText::new("Select at least one column from the side panel to proceed.")
                .color(Color32::YELLOW),
        );
        return;
    }

    let Some(table) = state.working.clone() else {
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if state.show_preview {
                ui.heading("Data preview");
                let rows: Vec<usize> = (0..table.row_count().min(PREVIEW_ROWS)).collect();
                row_grid(ui, &table, &rows, "preview");
                ui.separator();
            }

            section_overview(ui, &table);
            ui.separator();
            section_missing(ui, &table);
            ui.separator();
            section_distribution(ui, state, &table);
            ui.separator();
            section_correlation(ui, &table);
            ui.separator();
            section_timeseries(ui, state, &table);
            ui.separator();
            section_categorical(ui, state, &table);
            ui.separator();
            section_text(ui, state, &table);
        });
}

// ---- Overview & Summary ----

fn section_overview(ui: &mut Ui, table: &Table) {
    ui.heading("Overview & Summary");

    let report = summary::summarize(table);

    ui.horizontal(|ui: &mut Ui| {
        metric(ui, "Rows", &report.rows.to_string());
        metric(ui, "Columns", &report.cols.to_string());
        metric(ui, "Missing cells", &report.missing_cells.to_string());
    });

    ui.strong("Data types");
    Grid::new("dtypes").striped(true).show(ui, |ui: &mut Ui| {
        ui.strong("column");
        ui.strong("dtype");
        ui.strong("non-null");
        ui.end_row();
        for col in &report.columns {
            ui.label(&col.name);
            ui.label(col.kind.to_string());
            ui.label(col.non_null.to_string());
            ui.end_row();
        }
    });

    ui.strong("Descriptive statistics (numerical)");
    if report.numeric.is_empty() {
        ui.label("No numerical columns detected.");
        return;
    }
    Grid::new("describe").striped(true).show(ui, |ui: &mut Ui| {
        for header in ["column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"] {
            ui.strong(header);
        }
        ui.end_row();
        for n in &report.numeric {
            ui.label(&n.name);
            ui.label(n.count.to_string());
            for v in [n.mean, n.std, n.min, n.q1, n.median, n.q3, n.max] {
                ui.label(format_stat(v));
            }
            ui.end_row();
        }
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(label);
        ui.label(RichText::new(value).heading());
    });
    ui.add_space(24.0);
}

fn format_stat(v: f64) -> String {
    if v.is_nan() {
        "–".to_string()
    } else {
        format!("{v:.3}")
    }
}

// ---- Missing values ----

fn section_missing(ui: &mut Ui, table: &Table) {
    ui.heading("Missing Values");

    let report = missing::missing_report(table);
    if report.is_clean() {
        ui.label("No missing values detected.");
        return;
    }

    plot::ranked_bar_chart(ui, "missing_counts", "missing", &report.per_column);

    ui.strong(format!(
        "Rows with missing values (top {})",
        missing::SAMPLE_ROWS
    ));
    row_grid(ui, table, &report.sample_rows, "missing_rows");
}

// ---- Numerical distributions ----

fn section_distribution(ui: &mut Ui, state: &mut AppState, table: &Table) {
    ui.heading("Numerical Distributions");

    let numeric = table.numeric_columns();
    if numeric.is_empty() {
        ui.label("No numerical columns to plot.");
        return;
    }
    let names: Vec<String> = numeric.iter().map(|c| c.name.clone()).collect();

    ui.horizontal(|ui: &mut Ui| {
        column_picker(ui, "hist_col", "Histogram column", &mut state.hist_column, &names);
        ui.add(Slider::new(&mut state.hist_bins, BIN_RANGE).text("bins"));
    });

    if let Some(col) = state.hist_column.as_ref().and_then(|n| table.column(n)) {
        if let Some(hist) = distribution::histogram(col, state.hist_bins) {
            plot::histogram_chart(ui, &hist);
        }
    }

    if names.len() >= 2 {
        ui.strong("Scatter plot between two numerical columns");
        ui.horizontal(|ui: &mut Ui| {
            column_picker(ui, "scatter_x", "X column", &mut state.scatter_x, &names);
            column_picker(ui, "scatter_y", "Y column", &mut state.scatter_y, &names);
        });
        if let (Some(x), Some(y)) = (
            state.scatter_x.as_ref().and_then(|n| table.column(n)),
            state.scatter_y.as_ref().and_then(|n| table.column(n)),
        ) {
            plot::scatter_chart(ui, &distribution::scatter(x, y));
        }
    }
}

// ---- Correlation ----

fn section_correlation(ui: &mut Ui, table: &Table) {
    ui.heading("Correlation (numerical)");

    match correlation::correlation_matrix(&table.numeric_columns()) {
        Some(matrix) => plot::correlation_grid(ui, &matrix),
        None => {
            ui.label("Need at least two numerical columns for correlation.");
        }
    }
}

// ---- Time series ----

fn section_timeseries(ui: &mut Ui, state: &mut AppState, table: &Table) {
    ui.heading("Time-series explorer");

    let candidates: Vec<String> = table
        .datetime_candidates()
        .iter()
        .map(|s| s.to_string())
        .collect();
    if candidates.is_empty() {
        ui.label("No datetime-like columns detected.");
        return;
    }

    let numeric: Vec<String> = table
        .numeric_columns()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    if numeric.is_empty() {
        ui.label("No numeric columns to plot against datetime.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        column_picker(ui, "dt_col", "Datetime column", &mut state.datetime_column, &candidates);
        column_picker(ui, "ts_val", "Value column", &mut state.value_column, &numeric);
        ui.add(Slider::new(&mut state.rolling_window, WINDOW_RANGE).text("rolling window"));
    });

    let (Some(dt_col), Some(val_col)) = (&state.datetime_column, &state.value_column) else {
        return;
    };
    let Some(series) = timeseries::time_series(table, dt_col, val_col) else {
        return;
    };

    let rolling = if series.non_null_count() >= state.rolling_window {
        Some(timeseries::rolling_mean(&series.values(), state.rolling_window))
    } else {
        None
    };
    plot::timeseries_chart(ui, &series, rolling.as_deref());
}

// ---- Categorical ----

fn section_categorical(ui: &mut Ui, state: &mut AppState, table: &Table) {
    ui.heading("Categorical columns");

    let textual: Vec<String> = table
        .textual_columns()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    if textual.is_empty() {
        ui.label("No categorical columns detected.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        column_picker(ui, "cat_col", "Categorical column", &mut state.categorical_column, &textual);
        ui.add(Slider::new(&mut state.top_n, TOP_N_RANGE).text("top N"));
    });

    let Some(col_name) = state.categorical_column.clone() else {
        return;
    };
    let Some(top) = categorical::top_categories(table, &col_name, state.top_n) else {
        return;
    };

    plot::ranked_bar_chart(ui, "category_counts", "count", &top.entries);

    ui.strong("Sample rows for each top category");
    row_grid(ui, table, &top.sample_rows, "category_rows");
}

// ---- Text analysis ----

fn section_text(ui: &mut Ui, state: &mut AppState, table: &Table) {
    ui.heading("Simple Text Analysis");

    let textual: Vec<String> = table
        .textual_columns()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    if textual.is_empty() {
        ui.label("No text columns detected.");
        return;
    }

    column_picker(ui, "text_col", "Text column", &mut state.text_column, &textual);

    let Some(col) = state.text_column.as_ref().and_then(|n| table.column(n)) else {
        return;
    };
    let Some(sample) = text::text_sample(col) else {
        ui.label("Selected column contains no textual data.");
        return;
    };

    ui.strong("Wordcloud (top words)");
    plot::word_cloud_panel(ui, &text::word_cloud(&sample));

    ui.strong("Top words");
    plot::ranked_bar_chart(ui, "word_counts", "count", &text::top_words(&sample));
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

/// ComboBox over column names bound to an optional selection.
fn column_picker(
    ui: &mut Ui,
    id: &str,
    label: &str,
    selection: &mut Option<String>,
    options: &[String],
) {
    let current = selection.clone().unwrap_or_default();
    ui.label(label);
    ComboBox::from_id_salt(id)
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for name in options {
                if ui.selectable_label(current == *name, name).clicked() {
                    *selection = Some(name.clone());
                }
            }
        });
}

/// Render the given rows of a table as a striped grid.
fn row_grid(ui: &mut Ui, table: &Table, rows: &[usize], id: &str) {
    if rows.is_empty() {
        return;
    }
    ScrollArea::horizontal()
        .id_salt(format!("{id}_scroll"))
        .show(ui, |ui: &mut Ui| {
            Grid::new(id).striped(true).show(ui, |ui: &mut Ui| {
                ui.strong("#");
                for name in table.column_names() {
                    ui.strong(name);
                }
                ui.end_row();
                for &row in rows {
                    ui.label(row.to_string());
                    for col in &table.columns {
                        let cell = &col.cells[row];
                        if cell.is_null() {
                            ui.label(RichText::new("null").weak());
                        } else {
                            ui.label(cell.to_string());
                        }
                    }
                    ui.end_row();
                }
            });
        });
}
