use chrono::DateTime;
use eframe::egui::{self, Align2, Color32, FontId, Sense, Ui, Vec2};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use crate::analysis::correlation::CorrelationMatrix;
use crate::analysis::distribution::{Histogram, Scatter};
use crate::analysis::text::WordCloud;
use crate::analysis::timeseries::TimeSeries;
use crate::color;

// ---------------------------------------------------------------------------
// Histogram with marginal box plot
// ---------------------------------------------------------------------------

pub fn histogram_chart(ui: &mut Ui, hist: &Histogram) {
    let width = if hist.bin_edges.len() > 1 {
        hist.bin_edges[1] - hist.bin_edges[0]
    } else {
        1.0
    };
    let bars: Vec<Bar> = hist
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let center = hist.bin_edges[i] + width / 2.0;
            Bar::new(center, count as f64)
                .width(width)
                .fill(Color32::LIGHT_BLUE)
        })
        .collect();

    let max_count = hist.counts.iter().copied().max().unwrap_or(0) as f64;
    let b = &hist.box_stats;
    let box_elem = BoxElem::new(
        max_count * 1.12,
        BoxSpread::new(b.min, b.q1, b.median, b.q3, b.max),
    )
    .box_width(max_count * 0.08)
    .whisker_width(max_count * 0.05)
    .fill(Color32::from_rgb(120, 160, 220));

    Plot::new(format!("hist_{}", hist.column))
        .height(260.0)
        .x_axis_label(&hist.column)
        .y_axis_label("count")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(&hist.column));
            plot_ui.box_plot(BoxPlot::new(vec![box_elem]).horizontal().name("box"));
        });
}

// ---------------------------------------------------------------------------
// Scatter with trend line
// ---------------------------------------------------------------------------

pub fn scatter_chart(ui: &mut Ui, scatter: &Scatter) {
    let points: PlotPoints = scatter.points.iter().copied().collect();

    let trend_line = scatter.trend.map(|t| {
        let (lo, hi) = scatter
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[0]), hi.max(p[0]))
            });
        let pts: PlotPoints = vec![
            [lo, t.slope * lo + t.intercept],
            [hi, t.slope * hi + t.intercept],
        ]
        .into_iter()
        .collect();
        Line::new(pts)
            .name("OLS fit")
            .color(Color32::RED)
            .width(1.5)
    });

    Plot::new(format!("scatter_{}_{}", scatter.x_column, scatter.y_column))
        .height(260.0)
        .legend(Legend::default())
        .x_axis_label(&scatter.x_column)
        .y_axis_label(&scatter.y_column)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .radius(2.5)
                    .color(Color32::LIGHT_BLUE)
                    .name(format!("{} vs {}", scatter.y_column, scatter.x_column)),
            );
            if let Some(line) = trend_line {
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Time series with rolling mean overlay
// ---------------------------------------------------------------------------

pub fn timeseries_chart(ui: &mut Ui, series: &TimeSeries, rolling: Option<&[Option<f64>]>) {
    let raw: PlotPoints = series
        .points
        .iter()
        .filter_map(|(ts, v)| Some([ts.and_utc().timestamp() as f64, (*v)?]))
        .collect();

    let rolling_line = rolling.map(|means| {
        let pts: PlotPoints = series
            .points
            .iter()
            .zip(means)
            .filter_map(|((ts, _), m)| Some([ts.and_utc().timestamp() as f64, (*m)?]))
            .collect();
        Line::new(pts)
            .name("rolling mean")
            .color(Color32::from_rgb(230, 140, 40))
            .width(1.5)
    });

    Plot::new(format!("ts_{}_{}", series.datetime_column, series.value_column))
        .height(260.0)
        .legend(Legend::default())
        .x_axis_label(&series.datetime_column)
        .y_axis_label(&series.value_column)
        .x_axis_formatter(|mark, _range| {
            DateTime::from_timestamp(mark.value as i64, 0)
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(raw)
                    .name(&series.value_column)
                    .color(Color32::LIGHT_BLUE)
                    .width(1.5),
            );
            if let Some(line) = rolling_line {
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Ranked bar chart (categories, word counts, missing counts)
// ---------------------------------------------------------------------------

pub fn ranked_bar_chart(ui: &mut Ui, id: &str, value_label: &str, entries: &[(String, usize)]) {
    let palette = color::generate_palette(entries.len());
    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, (_, count))| {
            Bar::new(i as f64, *count as f64)
                .width(0.7)
                .fill(palette[i])
        })
        .collect();

    let labels: Vec<String> = entries.iter().map(|(name, _)| name.clone()).collect();
    Plot::new(id.to_string())
        .height(240.0)
        .y_axis_label(value_label)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Correlation heat grid
// ---------------------------------------------------------------------------

pub fn correlation_grid(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.columns.len();
    let label_w = 90.0_f32;
    let avail = ui.available_width();
    let cell = ((avail - label_w) / n as f32).clamp(28.0, 64.0);

    let size = Vec2::new(label_w + cell * n as f32, label_w * 0.4 + cell * n as f32);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let font = FontId::proportional(11.0);
    let grid_origin = rect.min + Vec2::new(label_w, label_w * 0.4);

    // Column headers, truncated to keep the grid compact.
    for (j, name) in matrix.columns.iter().enumerate() {
        let label: String = name.chars().take(10).collect();
        painter.text(
            grid_origin + Vec2::new(j as f32 * cell + cell / 2.0, -6.0),
            Align2::CENTER_BOTTOM,
            label,
            font.clone(),
            ui.visuals().text_color(),
        );
    }

    for (i, name) in matrix.columns.iter().enumerate() {
        let label: String = name.chars().take(12).collect();
        painter.text(
            egui::pos2(rect.min.x + label_w - 6.0, grid_origin.y + i as f32 * cell + cell / 2.0),
            Align2::RIGHT_CENTER,
            label,
            font.clone(),
            ui.visuals().text_color(),
        );

        for j in 0..n {
            let value = matrix.get(i, j);
            let cell_rect = egui::Rect::from_min_size(
                grid_origin + Vec2::new(j as f32 * cell, i as f32 * cell),
                Vec2::splat(cell - 1.0),
            );
            let fill = color::diverging(value);
            painter.rect_filled(cell_rect, 2.0, fill);
            let text = if value.is_nan() {
                "–".to_string()
            } else {
                format!("{value:.2}")
            };
            painter.text(
                cell_rect.center(),
                Align2::CENTER_CENTER,
                text,
                font.clone(),
                color::contrast_text(fill),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Word cloud
// ---------------------------------------------------------------------------

pub fn word_cloud_panel(ui: &mut Ui, cloud: &WordCloud) {
    let scale = (ui.available_width() / cloud.width).min(1.0);
    let size = Vec2::new(cloud.width * scale, cloud.height * scale);
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, 4.0, Color32::WHITE);

    let palette = color::generate_palette(cloud.words.len().max(1));
    for (i, word) in cloud.words.iter().enumerate() {
        painter.text(
            rect.min + Vec2::new(word.x * scale, word.y * scale),
            Align2::LEFT_TOP,
            &word.text,
            FontId::proportional(word.size * scale),
            palette[i % palette.len()],
        );
    }
}
