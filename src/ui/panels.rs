use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader::load_table;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – item and month selectors
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let labels = state.labels();
    ui.heading(&labels.heading);
    ui.label(RichText::new(&labels.subheading).strong());
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };
    let item_ids = table.item_ids().to_vec();

    // ---- Item selector (clearable) ----
    let mut selected_item = state.criteria.item_id.clone();
    let selected_text = selected_item
        .as_ref()
        .map(|id| labels.item_label(id))
        .unwrap_or_else(|| labels.item_placeholder.clone());
    egui::ComboBox::from_id_salt("item_selector")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected_item, None, &labels.all_items);
            for id in &item_ids {
                let text = RichText::new(labels.item_label(id)).color(state.item_colors.color_for(id));
                ui.selectable_value(&mut selected_item, Some(id.clone()), text);
            }
        });
    if selected_item.is_some() && ui.small_button("✕ Clear").clicked() {
        selected_item = None;
    }
    state.select_item(selected_item);

    ui.add_space(12.0);

    // ---- Month selector ----
    let mut month = state.criteria.month;
    egui::ComboBox::from_id_salt("month_selector")
        .selected_text(labels.month_name(month).unwrap_or_default())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for (idx, name) in labels.months.iter().enumerate() {
                ui.selectable_value(&mut month, idx as u32 + 1, name);
            }
        });
    state.select_month(month);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(table), Some(chart)) = (&state.table, &state.chart) {
            ui.label(format!(
                "{} records loaded, {} shown",
                table.len(),
                chart.categories.len()
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
        .set_title("Open production data")
        .add_filter("Supported files", &["csv", "txt", "json", "parquet", "pq"])
        .add_filter("Delimited text", &["csv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match load_table(&path, &state.load_options) {
            Ok(table) => state.set_table(table),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
