use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt8Type,
};
use encoding_rs::{Encoding, UTF_8};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, ProductionTable, RawRow};
use super::prepare::{prepare, REQUIRED_COLUMNS};

/// Cell texts read back as missing values (the pandas `read_csv` defaults).
const MISSING_SENTINELS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How delimited text files are read.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            encoding: UTF_8,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load raw production rows from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – delimited text with a header row
/// * `.json`         – `[{ "Name": "...", "M": 9, ... }, ...]`
/// * `.parquet`      – flat scalar columns
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<Vec<RawRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" | "txt" => load_csv(path, options),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;
    log::info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load a file and prepare it in one go.
pub fn load_table(path: &Path, options: &LoadOptions) -> Result<ProductionTable> {
    let table = prepare(load_file(path, options)?);
    log::info!(
        "Loaded {} records for {} items",
        table.len(),
        table.item_ids().len()
    );
    Ok(table)
}

fn require_columns<'a>(present: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let present: Vec<&str> = present.into_iter().collect();
    match REQUIRED_COLUMNS.iter().find(|col| !present.contains(*col)) {
        Some(col) => bail!("Missing required column '{col}'"),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, options: &LoadOptions) -> Result<Vec<RawRow>> {
    let bytes = std::fs::read(path).context("reading CSV file")?;
    parse_csv(&bytes, options)
}

/// Decode and parse delimited text. Every column becomes a cell; typing is
/// guessed per cell.
pub fn parse_csv(bytes: &[u8], options: &LoadOptions) -> Result<Vec<RawRow>> {
    let (text, used, had_errors) = options.encoding.decode(bytes);
    if had_errors {
        log::warn!("Some bytes could not be decoded as {}", used.name());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    require_columns(headers.iter().map(String::as_str))?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), guess_cell_type(value)))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if MISSING_SENTINELS.contains(&s) {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return float_cell(f);
    }
    // Decimal comma, as written by spreadsheet exports with `;` separators.
    if s.matches(',').count() == 1 {
        if let Ok(f) = s.replace(',', ".").parse::<f64>() {
            return float_cell(f);
        }
    }
    match s {
        "true" | "True" | "TRUE" => CellValue::Bool(true),
        "false" | "False" | "FALSE" => CellValue::Bool(false),
        _ => CellValue::Text(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Keys may be missing per row; preparation drops such rows.
fn load_json(path: &Path) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

pub fn parse_json(text: &str) -> Result<Vec<RawRow>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<RawRow> {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            Ok(obj
                .iter()
                .map(|(key, val)| (key.clone(), json_to_cell(val)))
                .collect())
        })
        .collect()
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one scalar column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    require_columns(builder.schema().fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        for row in 0..batch.num_rows() {
            let cells: RawRow = schema
                .fields()
                .iter()
                .zip(batch.columns())
                .map(|(field, col)| (field.name().clone(), extract_cell(col, row)))
                .collect();
            rows.push(cells);
        }
    }
    Ok(rows)
}

/// Read a single cell of an Arrow column. Unsupported types come back as
/// text naming the type.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|a| CellValue::Text(a.value(row).to_string())),
        DataType::Int8 => col
            .as_primitive_opt::<Int8Type>()
            .map(|a| CellValue::Integer(a.value(row).into())),
        DataType::Int16 => col
            .as_primitive_opt::<Int16Type>()
            .map(|a| CellValue::Integer(a.value(row).into())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| CellValue::Integer(a.value(row).into())),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::UInt8 => col
            .as_primitive_opt::<UInt8Type>()
            .map(|a| CellValue::Integer(a.value(row).into())),
        DataType::UInt16 => col
            .as_primitive_opt::<UInt16Type>()
            .map(|a| CellValue::Integer(a.value(row).into())),
        DataType::UInt32 => col
            .as_primitive_opt::<UInt32Type>()
            .map(|a| CellValue::Integer(a.value(row).into())),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| float_cell(a.value(row).into())),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| float_cell(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };
    cell.unwrap_or_else(|| CellValue::Text(format!("{:?}", col.data_type())))
}

/// NaN is a gap, whether pandas wrote it to Parquet or a CSV spelled it
/// in a way the sentinel list does not cover (`NAN`, `+nan`).
fn float_cell(v: f64) -> CellValue {
    if v.is_nan() {
        CellValue::Null
    } else {
        CellValue::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "Name;Graphic;M;KolPlanYear;KolFaktVs;KolPlanM;KolFaktM;Workshop";

    fn write_temp(suffix: &str, bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn semicolon_csv_round_trips_into_prepared_table() {
        let text = format!(
            "{HEADER}\n\
             Part A;1;9;100;80;10;8;W1\n\
             Part B;2;9;200,5;150;20;18;\n\
             Part C;;9;1;1;1;1;W3\n"
        );
        let file = write_temp(".csv", text.as_bytes());
        let rows = load_file(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1]["Workshop"], CellValue::Null);
        assert_eq!(rows[1]["KolPlanYear"], CellValue::Float(200.5));

        let table = prepare(rows);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].item_id, CellValue::Integer(1));
        assert_eq!(
            table.records()[0].extra.get("Workshop"),
            Some(&CellValue::Text("W1".into()))
        );
    }

    #[test]
    fn sentinels_read_as_missing() {
        for s in ["", "NA", "NaN", "null", "<NA>", "#NA", "-nan", "-NaN", "NAN", "+nan"] {
            assert_eq!(guess_cell_type(s), CellValue::Null, "{s:?}");
        }
        assert_eq!(guess_cell_type("-"), CellValue::Text("-".into()));
        assert_eq!(guess_cell_type("12"), CellValue::Integer(12));
        assert_eq!(guess_cell_type("1.5"), CellValue::Float(1.5));
        assert_eq!(guess_cell_type("Bolt M8"), CellValue::Text("Bolt M8".into()));
    }

    #[test]
    fn nan_spellings_drop_their_rows() {
        let text = format!(
            "{HEADER}\n\
             Part A;1;9;NAN;80;10;8;W1\n\
             Part B;-nan;9;1;1;1;1;W2\n\
             Part C;3;9;1;1;1;1;W3\n"
        );
        let table = prepare(parse_csv(text.as_bytes(), &LoadOptions::default()).unwrap());
        let names: Vec<&str> = table.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Part C"]);
        assert_eq!(table.item_ids(), &[CellValue::Integer(3)]);
    }

    #[test]
    fn short_rows_are_dropped_not_fatal() {
        let text = format!(
            "{HEADER}\n\
             Part A;1;9\n\
             Part B;2;9;200;150;20;18;W2\n"
        );
        let rows = parse_csv(text.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(!rows[0].contains_key("KolPlanYear"));

        let table = prepare(rows);
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].name, "Part B");
    }

    #[test]
    fn custom_delimiter_and_encoding() {
        let text = "Name,Graphic,M,KolPlanYear,KolFaktVs,KolPlanM,KolFaktM\n\
                    Деталь,7,3,10,5,2,1\n";
        let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode(text);
        let options = LoadOptions {
            delimiter: b',',
            encoding: encoding_rs::WINDOWS_1251,
        };
        let rows = parse_csv(&bytes, &options).unwrap();
        assert_eq!(rows[0]["Name"], CellValue::Text("Деталь".into()));
        assert_eq!(rows[0]["M"], CellValue::Integer(3));
    }

    #[test]
    fn missing_required_column_is_a_load_error() {
        let text = "Name;Graphic;M;KolPlanYear;KolFaktVs;KolPlanM\nA;1;9;1;1;1\n";
        let err = parse_csv(text.as_bytes(), &LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains("KolFaktM"), "{err}");
    }

    #[test]
    fn json_records() {
        let rows = parse_json(
            r#"[
                {"Name": "Part A", "Graphic": 1, "M": 9, "KolPlanYear": 100,
                 "KolFaktVs": 80.5, "KolPlanM": 10, "KolFaktM": 8},
                {"Name": "Part B", "Graphic": 2, "M": 9, "KolPlanYear": null}
            ]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        let table = prepare(rows);
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].actual_cumulative, 80.5);
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        assert!(parse_json(r#"{"Name": "x"}"#).is_err());
        assert!(parse_json("[1, 2]").is_err());
    }

    #[test]
    fn parquet_scalar_columns() {
        use std::sync::Arc;

        use arrow::array::{Float64Array, Int32Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let float_field = |name: &str| Field::new(name, DataType::Float64, true);
        let schema = Arc::new(Schema::new(vec![
            Field::new("Name", DataType::Utf8, true),
            Field::new("Graphic", DataType::Int32, true),
            Field::new("M", DataType::Int32, true),
            float_field("KolPlanYear"),
            float_field("KolFaktVs"),
            float_field("KolPlanM"),
            float_field("KolFaktM"),
        ]));
        let floats = |v: [Option<f64>; 3]| Arc::new(Float64Array::from(v.to_vec())) as ArrayRef;
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("Part A"), Some("Part B"), None])),
                Arc::new(Int32Array::from(vec![1, 2, 3])),
                Arc::new(Int32Array::from(vec![9, 9, 9])),
                floats([Some(100.0), Some(f64::NAN), Some(1.0)]),
                floats([Some(80.0), Some(1.0), Some(1.0)]),
                floats([Some(10.0), Some(1.0), None]),
                floats([Some(8.0), Some(1.0), Some(1.0)]),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let rows = load_file(file.path(), &LoadOptions::default()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["Graphic"], CellValue::Integer(1));
        assert_eq!(rows[1]["KolPlanYear"], CellValue::Null);

        let table = prepare(rows);
        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].name, "Part A");
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".xlsx", b"");
        let err = load_file(file.path(), &LoadOptions::default()).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
