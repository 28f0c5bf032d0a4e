use crate::chart::{ChartBuilder, ChartDescription};
use crate::color::ColorMap;
use crate::data::filter::FilterCriteria;
use crate::data::loader::LoadOptions;
use crate::data::model::{CellValue, ProductionTable};
use crate::labels::Labels;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Prepared table (None until a file is loaded).
    pub table: Option<ProductionTable>,

    /// Current item + month selection.
    pub criteria: FilterCriteria,

    /// Chart for the current selection.
    pub chart: Option<ChartDescription>,

    /// Swatch per item identifier.
    pub item_colors: ColorMap,

    pub builder: ChartBuilder,

    /// How File → Open reads delimited files.
    pub load_options: LoadOptions,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            criteria: FilterCriteria::default(),
            chart: None,
            item_colors: ColorMap::default(),
            builder: ChartBuilder::default(),
            load_options: LoadOptions::default(),
            status_message: None,
        }
    }
}

impl AppState {
    pub fn labels(&self) -> &'static Labels {
        self.builder.labels()
    }

    /// Ingest a newly prepared table and draw the current selection.
    pub fn set_table(&mut self, table: ProductionTable) {
        self.item_colors = ColorMap::new(table.item_ids());
        if let Some(item) = &self.criteria.item_id {
            if !table.item_ids().contains(item) {
                log::info!("Item {item} is not in the new table, selection cleared");
                self.criteria.item_id = None;
            }
        }
        self.table = Some(table);
        self.status_message = None;
        self.rebuild_chart();
    }

    pub fn select_item(&mut self, item_id: Option<CellValue>) {
        if self.criteria.item_id != item_id {
            self.criteria.item_id = item_id;
            self.rebuild_chart();
        }
    }

    pub fn select_month(&mut self, month: u32) {
        if self.criteria.month != month {
            self.criteria.month = month;
            self.rebuild_chart();
        }
    }

    /// Recompute the chart after a selection change.
    pub fn rebuild_chart(&mut self) {
        let Some(table) = &self.table else {
            self.chart = None;
            return;
        };
        match self.builder.build(table.records(), &self.criteria) {
            Ok(chart) => {
                log::debug!(
                    "Chart '{}' with {} categories",
                    chart.title,
                    chart.categories.len()
                );
                self.chart = Some(chart);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to build chart: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.chart = None;
            }
        }
    }
}
