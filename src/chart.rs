use serde::Serialize;
use thiserror::Error;

use crate::data::filter::{filter_records, FilterCriteria};
use crate::data::model::ProductionRecord;
use crate::labels::{Labels, Locale};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// The interaction layer offered a month outside the calendar.
    #[error("month {0} is outside 1-12, no month name to show")]
    InvalidMonthIndex(u32),
}

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

/// Color identity of a series. The presentation layer picks the actual color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesColor {
    Neutral,
    Green,
    Blue,
    Orange,
}

/// The four quantities compared for each item, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesKind {
    YearlyPlan,
    ActualCumulative,
    PlanForMonth,
    ActualForMonth,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 4] = [
        SeriesKind::YearlyPlan,
        SeriesKind::ActualCumulative,
        SeriesKind::PlanForMonth,
        SeriesKind::ActualForMonth,
    ];

    pub fn value(self, record: &ProductionRecord) -> f64 {
        match self {
            SeriesKind::YearlyPlan => record.plan_year,
            SeriesKind::ActualCumulative => record.actual_cumulative,
            SeriesKind::PlanForMonth => record.plan_month,
            SeriesKind::ActualForMonth => record.actual_month,
        }
    }

    pub fn color(self) -> SeriesColor {
        match self {
            SeriesKind::YearlyPlan => SeriesColor::Neutral,
            SeriesKind::ActualCumulative => SeriesColor::Green,
            SeriesKind::PlanForMonth => SeriesColor::Blue,
            SeriesKind::ActualForMonth => SeriesColor::Orange,
        }
    }

    pub fn label(self, labels: &Labels) -> &str {
        match self {
            SeriesKind::YearlyPlan => &labels.yearly_plan,
            SeriesKind::ActualCumulative => &labels.actual_cumulative,
            SeriesKind::PlanForMonth => &labels.plan_for_month,
            SeriesKind::ActualForMonth => &labels.actual_for_month,
        }
    }
}

/// One bar series: one value per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarSeries {
    pub kind: SeriesKind,
    pub name: String,
    pub color: SeriesColor,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BarMode {
    /// Series drawn side by side within each category.
    Group,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLayout {
    pub bar_mode: BarMode,
    pub x_axis_title: String,
    pub y_axis_title: String,
}

/// Everything the presentation layer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDescription {
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
    pub layout: ChartLayout,
    pub is_empty: bool,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builds chart descriptions with one set of display labels.
#[derive(Debug, Clone, Copy)]
pub struct ChartBuilder {
    labels: &'static Labels,
}

impl Default for ChartBuilder {
    fn default() -> Self {
        Self::new(Locale::En.labels())
    }
}

impl ChartBuilder {
    pub fn new(labels: &'static Labels) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &'static Labels {
        self.labels
    }

    /// Filter `records` by `criteria` and lay the matches out as a grouped
    /// bar chart. Fails only on a month outside 1–12.
    pub fn build(
        &self,
        records: &[ProductionRecord],
        criteria: &FilterCriteria,
    ) -> Result<ChartDescription, ChartError> {
        let month_name = self
            .labels
            .month_name(criteria.month)
            .ok_or(ChartError::InvalidMonthIndex(criteria.month))?;

        let matching = filter_records(records, criteria);
        if matching.is_empty() {
            return Ok(self.empty());
        }

        let categories = matching.iter().map(|r| r.name.clone()).collect();
        let series = SeriesKind::ALL
            .iter()
            .map(|&kind| BarSeries {
                kind,
                name: kind.label(self.labels).to_string(),
                color: kind.color(),
                values: matching.iter().map(|r| kind.value(r)).collect(),
            })
            .collect();

        Ok(ChartDescription {
            title: self.labels.chart_title(month_name),
            categories,
            series,
            layout: self.layout(),
            is_empty: false,
        })
    }

    fn empty(&self) -> ChartDescription {
        ChartDescription {
            title: self.labels.no_data.clone(),
            categories: Vec::new(),
            series: Vec::new(),
            layout: self.layout(),
            is_empty: true,
        }
    }

    fn layout(&self) -> ChartLayout {
        ChartLayout {
            bar_mode: BarMode::Group,
            x_axis_title: self.labels.item_axis.clone(),
            y_axis_title: self.labels.value_axis.clone(),
        }
    }
}

/// [`ChartBuilder::build`] with English labels.
pub fn build(
    records: &[ProductionRecord],
    criteria: &FilterCriteria,
) -> Result<ChartDescription, ChartError> {
    ChartBuilder::default().build(records, criteria)
}
