use eframe::egui::{self, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

use crate::chart::ChartDescription;
use crate::color::{series_color, PAPER_BACKGROUND, PLOT_BACKGROUND};
use crate::state::AppState;

/// Total width taken by one category's group of bars.
const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Production chart (central panel)
// ---------------------------------------------------------------------------

/// Render the production chart in the central panel.
pub fn production_plot(ui: &mut Ui, state: &AppState) {
    let Some(chart) = &state.chart else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view production data  (File → Open…)");
        });
        return;
    };

    egui::Frame::default()
        .fill(PAPER_BACKGROUND)
        .show(ui, |ui: &mut Ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(egui::RichText::new(&chart.title).color(egui::Color32::BLACK));
            });
            ui.visuals_mut().extreme_bg_color = PLOT_BACKGROUND;
            grouped_bars(ui, chart);
        });
}

/// Offset of series `index` (of `count`) from its category centre.
pub fn bar_offset(index: usize, count: usize) -> f64 {
    let width = GROUP_WIDTH / count as f64;
    (index as f64 - (count as f64 - 1.0) / 2.0) * width
}

fn grouped_bars(ui: &mut Ui, chart: &ChartDescription) {
    let categories = chart.categories.clone();
    let count = chart.series.len().max(1);
    let bar_width = GROUP_WIDTH / count as f64;

    Plot::new("production_plot")
        .legend(Legend::default())
        .x_axis_label(chart.layout.x_axis_title.clone())
        .y_axis_label(chart.layout.y_axis_title.clone())
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&categories, mark.value))
        .show_background(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (s_idx, series) in chart.series.iter().enumerate() {
                let offset = bar_offset(s_idx, count);
                let bars: Vec<Bar> = series
                    .values
                    .iter()
                    .zip(&chart.categories)
                    .enumerate()
                    .map(|(c_idx, (&value, category))| {
                        Bar::new(c_idx as f64 + offset, value)
                            .width(bar_width)
                            .name(category)
                    })
                    .collect();

                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(&series.name)
                        .color(series_color(series.color)),
                );
            }
        });
}

/// Category name under integer grid marks, nothing elsewhere.
fn category_label(categories: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories
        .get(rounded as usize)
        .cloned()
        .unwrap_or_default()
}
