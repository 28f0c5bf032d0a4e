use super::model::{CellValue, ProductionRecord, ProductionTable, RawRow};

// ---------------------------------------------------------------------------
// Required source columns
// ---------------------------------------------------------------------------

pub const COL_NAME: &str = "Name";
pub const COL_PLAN_YEAR: &str = "KolPlanYear";
pub const COL_ACTUAL_CUMULATIVE: &str = "KolFaktVs";
pub const COL_PLAN_MONTH: &str = "KolPlanM";
pub const COL_ACTUAL_MONTH: &str = "KolFaktM";
pub const COL_MONTH: &str = "M";
pub const COL_ITEM_ID: &str = "Graphic";

/// Columns a row must carry to make it into the prepared table.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_NAME,
    COL_PLAN_YEAR,
    COL_ACTUAL_CUMULATIVE,
    COL_PLAN_MONTH,
    COL_ACTUAL_MONTH,
    COL_MONTH,
    COL_ITEM_ID,
];

// ---------------------------------------------------------------------------
// Preparation
// ---------------------------------------------------------------------------

/// Turn loose rows into the prepared table.
///
/// Rows missing any required column are dropped whole; the survivors keep
/// their input order.
pub fn prepare(rows: Vec<RawRow>) -> ProductionTable {
    let total = rows.len();
    let records: Vec<ProductionRecord> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(idx, row)| to_record(idx, row))
        .collect();

    log::debug!(
        "Prepared {} of {} rows ({} dropped)",
        records.len(),
        total,
        total - records.len()
    );
    ProductionTable::from_records(records)
}

/// Validate a single row. `None` when any required field is missing or
/// cannot be read as its strong type.
pub fn to_record(idx: usize, mut row: RawRow) -> Option<ProductionRecord> {
    let mut take = |col: &str| row.remove(col).filter(|v| !v.is_null());

    let name = take(COL_NAME);
    let plan_year = take(COL_PLAN_YEAR);
    let actual_cumulative = take(COL_ACTUAL_CUMULATIVE);
    let plan_month = take(COL_PLAN_MONTH);
    let actual_month = take(COL_ACTUAL_MONTH);
    let month = take(COL_MONTH);
    let item_id = take(COL_ITEM_ID);

    let (
        Some(name),
        Some(plan_year),
        Some(actual_cumulative),
        Some(plan_month),
        Some(actual_month),
        Some(month),
        Some(item_id),
    ) = (
        name,
        plan_year,
        actual_cumulative,
        plan_month,
        actual_month,
        month,
        item_id,
    )
    else {
        return None;
    };

    let record = (|| {
        Some(ProductionRecord {
            name: name_text(&name)?,
            item_id: item_id.normalized(),
            month: month.as_integer()?,
            plan_year: plan_year.as_f64()?,
            actual_cumulative: actual_cumulative.as_f64()?,
            plan_month: plan_month.as_f64()?,
            actual_month: actual_month.as_f64()?,
            extra: row,
        })
    })();

    if record.is_none() {
        log::warn!("Row {idx}: required field has an unusable value, row dropped");
    }
    record
}

fn name_text(value: &CellValue) -> Option<String> {
    let text = match value {
        CellValue::Text(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}
