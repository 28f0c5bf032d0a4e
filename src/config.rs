use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use encoding_rs::Encoding;

use crate::data::filter::{FilterCriteria, DEFAULT_MONTH};
use crate::data::loader::LoadOptions;
use crate::data::model::CellValue;
use crate::labels::Locale;

/// Production plan-vs-actual dashboard.
#[derive(Debug, Parser)]
#[command(name = "production-dashboard", version, about)]
pub struct Cli {
    /// Data file loaded at startup (.csv, .json or .parquet).
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Field separator of delimited text files.
    #[arg(long, default_value_t = ';')]
    pub delimiter: char,

    /// Text encoding of delimited files (WHATWG label, e.g. utf-8, windows-1251).
    #[arg(long, default_value = "utf-8")]
    pub encoding: String,

    /// Initially selected month.
    #[arg(long, default_value_t = DEFAULT_MONTH, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: u32,

    /// Initially selected item identifier.
    #[arg(long)]
    pub item: Option<String>,

    #[arg(long, value_enum, default_value_t = Locale::En)]
    pub locale: Locale,

    /// Write the chart for the selection as JSON to this path ("-" for
    /// stdout) and exit without opening a window.
    #[arg(long, requires = "data")]
    pub export: Option<PathBuf>,
}

impl Cli {
    pub fn load_options(&self) -> Result<LoadOptions> {
        if !self.delimiter.is_ascii() {
            bail!("Delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        let encoding = Encoding::for_label(self.encoding.as_bytes())
            .with_context(|| format!("Unknown encoding '{}'", self.encoding))?;
        Ok(LoadOptions {
            delimiter: self.delimiter as u8,
            encoding,
        })
    }

    /// Selection given on the command line. The item text is typed the
    /// same way loaded cells are, so `--item 3` matches a numeric id.
    pub fn criteria(&self) -> FilterCriteria {
        let criteria = FilterCriteria::for_month(self.month);
        match self.item.as_deref() {
            Some(item) => criteria.with_item(parse_item_id(item)),
            None => criteria,
        }
    }
}

fn parse_item_id(s: &str) -> CellValue {
    let s = s.trim();
    match s.parse::<i64>() {
        Ok(i) => CellValue::Integer(i),
        Err(_) => match s.parse::<f64>() {
            Ok(f) => CellValue::Float(f).normalized(),
            Err(_) => CellValue::Text(s.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("production-dashboard").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.criteria(), FilterCriteria::default());
        assert_eq!(cli.locale, Locale::En);
        let opts = cli.load_options().unwrap();
        assert_eq!(opts.delimiter, b';');
        assert_eq!(opts.encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn selection_and_loading_flags() {
        let cli = parse(&[
            "--data", "plan.csv", "--month", "3", "--item", "12", "--delimiter", ",",
            "--encoding", "cp1251", "--locale", "ru",
        ]);
        assert_eq!(
            cli.criteria(),
            FilterCriteria::for_month(3).with_item(CellValue::Integer(12))
        );
        assert_eq!(cli.locale, Locale::Ru);
        let opts = cli.load_options().unwrap();
        assert_eq!(opts.delimiter, b',');
        assert_eq!(opts.encoding, encoding_rs::WINDOWS_1251);
    }

    #[test]
    fn text_item_ids_stay_text() {
        let cli = parse(&["--item", "G-7"]);
        assert_eq!(cli.criteria().item_id, Some(CellValue::Text("G-7".into())));
    }

    #[test]
    fn rejects_bad_input() {
        let argv = |args: &[&str]| {
            Cli::try_parse_from(std::iter::once("production-dashboard").chain(args.iter().copied()))
        };
        assert!(argv(&["--month", "13"]).is_err());
        assert!(argv(&["--month", "0"]).is_err());
        assert!(argv(&["--export", "-"]).is_err());
        assert!(parse(&["--encoding", "klingon"]).load_options().is_err());
        assert!(parse(&["--delimiter", "§"]).load_options().is_err());
    }
}
