//! Writes a sample production dataset as `Data_test.csv` (semicolon
//! separated, UTF-8) and `Data_test.parquet` into the current directory, or
//! into the directory given as the first argument.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

struct Item {
    name: &'static str,
    schedule: i64,
    yearly_plan: f64,
}

const ITEMS: &[Item] = &[
    Item { name: "Housing 40-12", schedule: 101, yearly_plan: 1200.0 },
    Item { name: "Flange DN50", schedule: 101, yearly_plan: 2400.0 },
    Item { name: "Shaft 3K-7", schedule: 102, yearly_plan: 600.0 },
    Item { name: "Gear Z32", schedule: 102, yearly_plan: 960.0 },
    Item { name: "Bracket B4", schedule: 103, yearly_plan: 3600.0 },
];

struct Row {
    name: &'static str,
    schedule: i64,
    month: i64,
    plan_year: f64,
    actual_cumulative: f64,
    plan_month: f64,
    actual_month: Option<f64>,
}

/// Monthly plan is an even split of the year; actuals drift around it with
/// a deterministic per-item pattern. Every 17th row has no monthly actual so
/// the file exercises row dropping.
fn generate_rows() -> Vec<Row> {
    let mut rows = Vec::new();
    for (i, item) in ITEMS.iter().enumerate() {
        let plan_month = item.yearly_plan / 12.0;
        let mut cumulative = 0.0;
        for month in 1..=12i64 {
            let drift = ((i as i64 * 7 + month * 5) % 11 - 5) as f64 / 25.0;
            let actual = (plan_month * (1.0 + drift)).round();
            cumulative += actual;
            let missing = (rows.len() + 1) % 17 == 0;
            rows.push(Row {
                name: item.name,
                schedule: item.schedule,
                month,
                plan_year: item.yearly_plan,
                actual_cumulative: cumulative,
                plan_month: plan_month.round(),
                actual_month: (!missing).then_some(actual),
            });
        }
    }
    rows
}

fn write_csv(rows: &[Row], path: &PathBuf) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["Name", "Graphic", "M", "KolPlanYear", "KolFaktVs", "KolPlanM", "KolFaktM"])?;
    for r in rows {
        writer.write_record([
            r.name.to_string(),
            r.schedule.to_string(),
            r.month.to_string(),
            r.plan_year.to_string(),
            r.actual_cumulative.to_string(),
            r.plan_month.to_string(),
            r.actual_month.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &PathBuf) -> Result<()> {
    let float_field = |name: &str, nullable| Field::new(name, DataType::Float64, nullable);
    let schema = Arc::new(Schema::new(vec![
        Field::new("Name", DataType::Utf8, false),
        Field::new("Graphic", DataType::Int64, false),
        Field::new("M", DataType::Int64, false),
        float_field("KolPlanYear", false),
        float_field("KolFaktVs", false),
        float_field("KolPlanM", false),
        float_field("KolFaktM", true),
    ]));

    let floats = |f: fn(&Row) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(rows.iter().map(|r| r.name).collect::<Vec<_>>())),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.schedule).collect::<Vec<_>>())),
        Arc::new(Int64Array::from(rows.iter().map(|r| r.month).collect::<Vec<_>>())),
        floats(|r| r.plan_year),
        floats(|r| r.actual_cumulative),
        floats(|r| r.plan_month),
        Arc::new(Float64Array::from(
            rows.iter().map(|r| r.actual_month).collect::<Vec<_>>(),
        )),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let dir = std::env::args().nth(1).map(PathBuf::from).unwrap_or_default();
    let rows = generate_rows();

    let csv_path = dir.join("Data_test.csv");
    write_csv(&rows, &csv_path)?;
    let parquet_path = dir.join("Data_test.parquet");
    write_parquet(&rows, &parquet_path)?;

    println!(
        "Wrote {} rows for {} items to {} and {}",
        rows.len(),
        ITEMS.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
