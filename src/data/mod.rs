/// Data layer: row types, loading, preparation and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<RawRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  prepare  │  drop incomplete rows → ProductionTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  month + optional item → matching records
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod prepare;
