use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::chart::SeriesColor;
use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Series colours and chart background
// ---------------------------------------------------------------------------

/// Render colour of a series colour identity (80 % opaque).
pub fn series_color(color: SeriesColor) -> Color32 {
    match color {
        SeriesColor::Neutral => Color32::from_rgba_unmultiplied(200, 200, 200, 204),
        SeriesColor::Green => Color32::from_rgba_unmultiplied(100, 200, 100, 204),
        SeriesColor::Blue => Color32::from_rgba_unmultiplied(100, 150, 250, 204),
        SeriesColor::Orange => Color32::from_rgba_unmultiplied(250, 150, 100, 204),
    }
}

/// Background behind the whole chart.
pub const PAPER_BACKGROUND: Color32 = Color32::WHITE;

/// Background of the plotting area.
pub const PLOT_BACKGROUND: Color32 = Color32::from_rgb(240, 240, 240);

// ---------------------------------------------------------------------------
// Item swatches
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.65, 0.5).into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

/// Maps each item identifier to a distinct swatch for the item selector.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<CellValue, Color32>,
}

impl ColorMap {
    pub fn new(item_ids: &[CellValue]) -> Self {
        let mapping = item_ids
            .iter()
            .cloned()
            .zip(generate_palette(item_ids.len()))
            .collect();
        ColorMap { mapping }
    }

    pub fn color_for(&self, item_id: &CellValue) -> Color32 {
        self.mapping.get(item_id).copied().unwrap_or(Color32::GRAY)
    }
}
