//! Loaded equity dataset.
//!
//! [`EquityTable`] is the only holder of equity records during a run. It is
//! built once from a CSV file (or an in-memory DataFrame), validated row by
//! row into [`EquityRecord`]s, and then passed by reference to the scorer and
//! the VaR step.
//!
//! # Expected Schema
//!
//! Column names are matched case-insensitively against these aliases:
//!
//! | Field          | Accepted headers                 |
//! |----------------|----------------------------------|
//! | ticker         | `Kode`, `ticker`, `symbol`       |
//! | return on assets | `RoA`, `roa`, `return_on_assets` |
//! | market cap     | `Market Cap`, `market_cap`       |
//! | return on equity | `RoE`, `roe`, `return_on_equity` |
//! | subsector      | `Sub Sektor`, `subsector`, `sector` |
//! | reference date | `Date`, `date`                   |
//!
//! Extra columns are ignored.

use crate::error::{ParesError, Result};
use crate::types::{Date, EquityRecord, Fundamentals};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

const TICKER_COLUMNS: &[&str] = &["Kode", "ticker", "symbol"];
const ROA_COLUMNS: &[&str] = &["RoA", "return_on_assets"];
const MARKET_CAP_COLUMNS: &[&str] = &["Market Cap", "market_cap", "marketcap"];
const ROE_COLUMNS: &[&str] = &["RoE", "return_on_equity"];
const SUBSECTOR_COLUMNS: &[&str] = &["Sub Sektor", "subsector", "sub_sector", "sector"];
const DATE_COLUMNS: &[&str] = &["Date"];

/// The validated equity dataset for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct EquityTable {
    records: Vec<EquityRecord>,
}

impl EquityTable {
    /// Creates a table from already-validated records.
    pub const fn new(records: Vec<EquityRecord>) -> Self {
        Self { records }
    }

    /// Loads and validates a comma-delimited file with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a required
    /// column is missing, or any row fails validation.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        debug!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "read equity dataset"
        );

        Self::from_dataframe(&df)
    }

    /// Validates a DataFrame into typed records.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing or any row has a
    /// null, non-finite, or unparseable value.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let tickers = string_values(find_column(df, TICKER_COLUMNS)?)?;
        let roa = float_values(find_column(df, ROA_COLUMNS)?)?;
        let market_cap = float_values(find_column(df, MARKET_CAP_COLUMNS)?)?;
        let roe = float_values(find_column(df, ROE_COLUMNS)?)?;
        let subsectors = string_values(find_column(df, SUBSECTOR_COLUMNS)?)?;
        let dates = string_values(find_column(df, DATE_COLUMNS)?)?;

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let ticker = required_text(&tickers[row], row, "ticker")?;
            let fundamentals = Fundamentals::new(
                required_number(roa[row], row, "RoA")?,
                required_number(market_cap[row], row, "Market Cap")?,
                required_number(roe[row], row, "RoE")?,
            );
            let subsector = required_text(&subsectors[row], row, "subsector")?;
            let raw_date = required_text(&dates[row], row, "date")?;
            let date = parse_reference_date(raw_date).map_err(|e| {
                ParesError::InvalidData(format!("row {}: {e}", row + 1))
            })?;

            records.push(EquityRecord::new(ticker, fundamentals, subsector, date));
        }

        debug!(records = records.len(), "validated equity records");
        Ok(Self::new(records))
    }

    /// All records, in dataset order.
    pub fn records(&self) -> &[EquityRecord] {
        &self.records
    }

    /// Iterate over records in dataset order.
    pub fn iter(&self) -> std::slice::Iter<'_, EquityRecord> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record with the given ticker.
    pub fn get(&self, ticker: &str) -> Option<&EquityRecord> {
        self.records.iter().find(|r| r.ticker() == ticker)
    }

    /// First record with the given ticker, or [`ParesError::SymbolNotFound`].
    ///
    /// # Errors
    ///
    /// Returns an error if no record has this ticker.
    pub fn require(&self, ticker: &str) -> Result<&EquityRecord> {
        self.get(ticker)
            .ok_or_else(|| ParesError::SymbolNotFound(ticker.to_string()))
    }
}

impl<'a> IntoIterator for &'a EquityTable {
    type Item = &'a EquityRecord;
    type IntoIter = std::slice::Iter<'a, EquityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Parse a reference date in `YYYY-MM-DD` form.
///
/// A trailing time component (`2023-12-29 00:00:00`, `2023-12-29T00:00:00`)
/// is accepted and ignored.
///
/// # Errors
///
/// Returns [`ParesError::InvalidDate`] if the leading date cannot be parsed.
pub fn parse_reference_date(raw: &str) -> Result<Date> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split_once([' ', 'T'])
        .map_or(trimmed, |(date, _)| date);

    Date::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| ParesError::InvalidDate(format!("'{raw}': {e}")))
}

/// Find the first column matching `aliases`, earlier aliases taking priority
/// over column order in the file.
fn find_column<'a>(df: &'a DataFrame, aliases: &[&str]) -> Result<&'a Column> {
    let names = df.get_column_names();
    let name = aliases
        .iter()
        .find_map(|alias| {
            names
                .iter()
                .find(|name| name.as_str().trim().eq_ignore_ascii_case(alias))
        })
        .ok_or_else(|| ParesError::MissingColumn(aliases[0].to_string()))?;

    Ok(df.column(name.as_str())?)
}

fn float_values(column: &Column) -> Result<Vec<Option<f64>>> {
    let series = column.as_materialized_series().cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

fn string_values(column: &Column) -> Result<Vec<Option<String>>> {
    let series = column.as_materialized_series().cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

fn required_text<'a>(value: &'a Option<String>, row: usize, field: &str) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ParesError::InvalidData(format!(
            "row {}: missing {field}",
            row + 1
        ))),
    }
}

fn required_number(value: Option<f64>, row: usize, field: &str) -> Result<f64> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(ParesError::InvalidData(format!(
            "row {}: {field} is not finite ({v})",
            row + 1
        ))),
        None => Err(ParesError::InvalidData(format!(
            "row {}: missing {field}",
            row + 1
        ))),
    }
}
