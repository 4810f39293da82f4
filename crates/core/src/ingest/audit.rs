//! Feed-quality checks. Findings are reported, never enforced.

use crate::domain::stock::StockRecord;
use crate::ingest::types::FactorFinding;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

pub const FACTOR_RANGE: RangeInclusive<f64> = 0.0..=5.0;

pub fn out_of_range_factors(records: &[StockRecord]) -> Vec<FactorFinding> {
    records
        .iter()
        .flat_map(|r| {
            r.factors()
                .into_iter()
                .filter(|(_, v)| !FACTOR_RANGE.contains(v))
                .map(|(factor, value)| FactorFinding {
                    ticker: r.ticker.clone(),
                    factor,
                    value,
                })
        })
        .collect()
}

/// Tickers that appear more than once, each listed once.
pub fn duplicate_tickers(records: &[StockRecord]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut dupes = BTreeSet::new();
    for r in records {
        if !seen.insert(r.ticker.as_str()) {
            dupes.insert(r.ticker.clone());
        }
    }
    dupes.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::tests::record_with;

    #[test]
    fn flags_each_out_of_range_factor() {
        let mut bad = record_with("BAD", 3.0, 1.0);
        bad.value_rank = 5.5;
        bad.insider_activity = -0.1;
        let findings = out_of_range_factors(&[record_with("OK", 5.0, 1.0), bad]);

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].factor, "valueRank");
        assert_eq!(findings[1].factor, "insiderActivity");
        assert!(findings.iter().all(|f| f.ticker == "BAD"));
    }

    #[test]
    fn nan_factor_is_out_of_range() {
        let mut r = record_with("NAN", 3.0, 1.0);
        r.roic_strength = f64::NAN;
        assert_eq!(out_of_range_factors(&[r]).len(), 1);
    }

    #[test]
    fn reports_duplicate_tickers_once() {
        let records = vec![
            record_with("AAA", 1.0, 1.0),
            record_with("BBB", 1.0, 1.0),
            record_with("AAA", 2.0, 1.0),
            record_with("AAA", 3.0, 1.0),
        ];
        assert_eq!(duplicate_tickers(&records), vec!["AAA".to_string()]);
    }
}
