use std::io::Write;

use production_dashboard::chart::{build, ChartError, SeriesKind};
use production_dashboard::data::filter::FilterCriteria;
use production_dashboard::data::loader::{load_table, LoadOptions};
use production_dashboard::data::model::CellValue;

const DATA: &str = "\
Name;KolPlanYear;KolFaktVs;KolPlanM;KolFaktM;M;Graphic;Comment
Part A;100;80;10;8;9;1;on track
Part B;200;150;20;18;9;2;
Part A;100;70;10;9;8;1;
Part C;300;;30;25;9;2;no cumulative yet
";

fn load() -> production_dashboard::data::model::ProductionTable {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(DATA.as_bytes()).unwrap();
    load_table(file.path(), &LoadOptions::default()).unwrap()
}

#[test]
fn file_to_chart_for_all_items() {
    let table = load();
    assert_eq!(table.len(), 3);
    assert_eq!(table.item_ids(), &[CellValue::Integer(1), CellValue::Integer(2)]);

    let chart = build(table.records(), &FilterCriteria::default()).unwrap();
    assert!(!chart.is_empty);
    assert_eq!(chart.title, "Data for September");
    assert_eq!(chart.categories, ["Part A", "Part B"]);

    let yearly = chart
        .series
        .iter()
        .find(|s| s.kind == SeriesKind::YearlyPlan)
        .unwrap();
    assert_eq!(yearly.name, "Yearly plan");
    assert_eq!(yearly.values, [100.0, 200.0]);
}

#[test]
fn file_to_chart_for_one_item() {
    let table = load();
    let criteria = FilterCriteria::for_month(9).with_item(CellValue::Integer(1));
    let chart = build(table.records(), &criteria).unwrap();
    assert_eq!(chart.categories, ["Part A"]);
    assert_eq!(chart.series[0].values, [100.0]);
}

#[test]
fn month_without_rows_is_empty() {
    let table = load();
    let chart = build(table.records(), &FilterCriteria::for_month(12)).unwrap();
    assert!(chart.is_empty);
    assert!(chart.series.is_empty());
    assert!(chart.categories.is_empty());
}

#[test]
fn invalid_month_is_an_error() {
    let table = load();
    assert_eq!(
        build(table.records(), &FilterCriteria::for_month(0)),
        Err(ChartError::InvalidMonthIndex(0))
    );
}

#[test]
fn extra_columns_survive_preparation() {
    let table = load();
    assert_eq!(
        table.records()[0].extra.get("Comment"),
        Some(&CellValue::Text("on track".into()))
    );
    assert_eq!(table.records()[1].extra.get("Comment"), Some(&CellValue::Null));
}
