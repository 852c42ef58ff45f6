//! Data loading utilities for the pares CLI.

use chrono::NaiveDate;
use pares_traits::{EquityTable, Metric, ParesError, TargetProfile};
use std::path::Path;
use tracing::info;

/// Values supplied on the command line that replace the target's dataset values.
#[derive(Debug, Clone, Default)]
pub(crate) struct TargetOverrides {
    pub(crate) metrics: Vec<(Metric, f64)>,
    pub(crate) subsector: Option<String>,
}

/// Load and validate the equity dataset.
pub(crate) fn load_table(path: &Path) -> Result<EquityTable, ParesError> {
    let table = EquityTable::from_csv_path(path)?;
    info!(path = %path.display(), equities = table.len(), "loaded equity dataset");
    Ok(table)
}

/// Build the target profile from its dataset record plus overrides.
///
/// The ticker and subsector are trimmed the same way the loader trims them.
///
/// A target missing from the dataset is an error even when every value is
/// overridden: its reference date anchors the VaR window.
pub(crate) fn resolve_target(
    table: &EquityTable,
    ticker: &str,
    overrides: &TargetOverrides,
) -> Result<TargetProfile, ParesError> {
    let record = table.require(ticker.trim())?;

    let mut target = TargetProfile::from_record(record);
    for &(metric, value) in &overrides.metrics {
        target = target.with_metric(metric, value);
    }
    if let Some(subsector) = overrides.subsector.as_deref().map(str::trim) {
        target = target.with_subsector(subsector);
    }

    Ok(target)
}

/// Parse a date string in YYYY-MM-DD format.
pub(crate) fn parse_date(date_str: &str) -> Result<NaiveDate, ParesError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| ParesError::InvalidDate(format!("'{date_str}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use pares_traits::{EquityRecord, Fundamentals};

    fn table() -> EquityTable {
        EquityTable::new(vec![EquityRecord::new(
            "ARCI.JK",
            Fundamentals::new(20.55, 2_793_937_500_000.0, 130.73),
            "Basic Materials",
            NaiveDate::from_ymd_opt(2023, 12, 29).unwrap(),
        )])
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_date_invalid() {
        let result = parse_date("invalid");
        assert!(matches!(result, Err(ParesError::InvalidDate(_))));
    }

    #[test]
    fn test_resolve_target_from_record() {
        let target = resolve_target(&table(), "ARCI.JK", &TargetOverrides::default()).unwrap();
        assert_eq!(target.subsector, "Basic Materials");
        assert_eq!(target.fundamentals.market_cap, 2_793_937_500_000.0);
    }

    #[test]
    fn test_resolve_target_applies_overrides() {
        let overrides = TargetOverrides {
            metrics: vec![(Metric::ReturnOnEquity, 100.0)],
            subsector: Some("Gold".to_string()),
        };
        let target = resolve_target(&table(), "ARCI.JK", &overrides).unwrap();
        assert_eq!(target.fundamentals.return_on_equity, 100.0);
        assert_eq!(target.fundamentals.return_on_assets, 20.55);
        assert_eq!(target.subsector, "Gold");
    }

    #[test]
    fn test_resolve_target_trims_inputs() {
        let overrides = TargetOverrides {
            metrics: Vec::new(),
            subsector: Some(" Basic Materials\t".to_string()),
        };
        let target = resolve_target(&table(), "  ARCI.JK ", &overrides).unwrap();
        assert_eq!(target.ticker, "ARCI.JK");
        assert_eq!(target.subsector, "Basic Materials");
    }

    #[test]
    fn test_missing_target_is_fatal() {
        let err = resolve_target(&table(), "NOPE.JK", &TargetOverrides::default()).unwrap_err();
        assert!(matches!(err, ParesError::SymbolNotFound(ref s) if s == "NOPE.JK"));
    }
}
