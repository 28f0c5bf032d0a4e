use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a raw input row
// ---------------------------------------------------------------------------

/// A dynamically-typed cell as it comes out of a delimited file, JSON or
/// Parquet. `Null` is the missing-value sentinel.
///
/// Item identifiers are `CellValue`s too, so it must be `Ord` + `Hash`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        use CellValue::*;
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Missing value: `Null`, or a NaN float.
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Integer view of the cell. Floats qualify only when they carry no
    /// fractional part (columns with gaps are often read back as `9.0`).
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    /// Collapse integral floats onto integers so `1.0` and `1` compare equal.
    pub fn normalized(self) -> CellValue {
        match self.as_integer() {
            Some(i) if matches!(self, CellValue::Float(_)) => CellValue::Integer(i),
            _ => self,
        }
    }
}

/// One loosely-typed input row: column name → cell.
pub type RawRow = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// ProductionRecord – one row of the prepared table
// ---------------------------------------------------------------------------

/// A fully-populated production row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionRecord {
    /// Item display label (`Name`).
    pub name: String,
    /// Product / schedule identifier (`Graphic`).
    pub item_id: CellValue,
    /// Calendar month (`M`). Not range-checked.
    pub month: i64,
    /// Cumulative plan for the year (`KolPlanYear`).
    pub plan_year: f64,
    /// Cumulative actual to date (`KolFaktVs`).
    pub actual_cumulative: f64,
    /// Plan for the month (`KolPlanM`).
    pub plan_month: f64,
    /// Actual for the month (`KolFaktM`).
    pub actual_month: f64,
    /// Every other column of the source row, untouched.
    pub extra: RawRow,
}

// ---------------------------------------------------------------------------
// ProductionTable – the prepared, read-only dataset
// ---------------------------------------------------------------------------

/// The prepared dataset. Built once, never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct ProductionTable {
    records: Vec<ProductionRecord>,
    item_ids: Vec<CellValue>,
}

impl ProductionTable {
    /// Index the distinct item identifiers in order of first appearance.
    pub fn from_records(records: Vec<ProductionRecord>) -> Self {
        let mut seen = BTreeSet::new();
        let item_ids = records
            .iter()
            .filter(|r| seen.insert(r.item_id.clone()))
            .map(|r| r.item_id.clone())
            .collect();
        ProductionTable { records, item_ids }
    }

    pub fn records(&self) -> &[ProductionRecord] {
        &self.records
    }

    /// Distinct item identifiers, first appearance first.
    pub fn item_ids(&self) -> &[CellValue] {
        &self.item_ids
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
