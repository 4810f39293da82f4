//! Ranking engine: orders view models by a selectable key.

use crate::domain::view_model::StockViewModel;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    UndervaluationScore,
    Price,
    ValueRank,
    QualitySummary,
    ExpectedReturn,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::UndervaluationScore,
        SortKey::Price,
        SortKey::ValueRank,
        SortKey::QualitySummary,
        SortKey::ExpectedReturn,
    ];

    /// Control value, matching the view model's field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::UndervaluationScore => "undervaluationScore",
            SortKey::Price => "price",
            SortKey::ValueRank => "valueRank",
            SortKey::QualitySummary => "qualitySummary",
            SortKey::ExpectedReturn => "expectedReturn",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::UndervaluationScore => "Undervaluation Score",
            SortKey::Price => "Price",
            SortKey::ValueRank => "Value Rank",
            SortKey::QualitySummary => "Quality",
            SortKey::ExpectedReturn => "Expected Return",
        }
    }

    pub fn parse(value: &str) -> Option<SortKey> {
        let key = match value.trim() {
            "undervaluationScore" | "score" => SortKey::UndervaluationScore,
            "price" => SortKey::Price,
            "valueRank" | "value-rank" => SortKey::ValueRank,
            "qualitySummary" | "quality" => SortKey::QualitySummary,
            "expectedReturn" | "expected-return" => SortKey::ExpectedReturn,
            _ => return None,
        };
        Some(key)
    }

    /// Unknown control values fall back to the default key.
    pub fn parse_or_default(value: &str) -> SortKey {
        SortKey::parse(value).unwrap_or_else(|| {
            tracing::warn!(sort_key = value, "unknown sort key; using default");
            SortKey::default()
        })
    }

    pub fn ascending(&self) -> bool {
        matches!(self, SortKey::Price)
    }

    pub fn value_of(&self, vm: &StockViewModel) -> f64 {
        match self {
            SortKey::UndervaluationScore => vm.undervaluation_score as f64,
            SortKey::Price => vm.record.price,
            SortKey::ValueRank => vm.record.value_rank,
            // Displayed one-decimal figure, so rows showing the same text tie.
            SortKey::QualitySummary => vm.quality_summary.parse().unwrap_or(f64::NAN),
            SortKey::ExpectedReturn => vm.record.expected_return,
        }
    }
}

/// Case-insensitive first, then byte order, so distinct tickers never tie.
fn compare_tickers(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn compare(a: &StockViewModel, b: &StockViewModel, key: SortKey) -> Ordering {
    let (av, bv) = (key.value_of(a), key.value_of(b));
    let by_value = if key.ascending() {
        av.total_cmp(&bv)
    } else {
        bv.total_cmp(&av)
    };

    by_value.then_with(|| compare_tickers(a.ticker(), b.ticker()))
}

pub fn rank_stocks(mut view_models: Vec<StockViewModel>, key: SortKey) -> Vec<StockViewModel> {
    view_models.sort_by(|a, b| compare(a, b, key));
    view_models
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::derive_view_model;
    use crate::factor::tests::record_with;

    fn tickers(vms: &[StockViewModel]) -> Vec<&str> {
        vms.iter().map(|vm| vm.ticker()).collect()
    }

    fn sample() -> Vec<StockViewModel> {
        vec![
            derive_view_model(&record_with("AAA", 5.0, 10.0)),
            derive_view_model(&record_with("BBB", 0.0, 5.0)),
            derive_view_model(&record_with("CCC", 2.5, 7.0)),
        ]
    }

    #[test]
    fn default_key_sorts_score_descending() {
        let ranked = rank_stocks(sample(), SortKey::default());
        assert_eq!(tickers(&ranked), vec!["AAA", "CCC", "BBB"]);
    }

    #[test]
    fn price_sorts_ascending() {
        let ranked = rank_stocks(sample(), SortKey::Price);
        assert_eq!(tickers(&ranked), vec!["BBB", "CCC", "AAA"]);
        assert!(ranked.windows(2).all(|w| w[0].record.price <= w[1].record.price));
    }

    #[test]
    fn other_keys_sort_non_increasing() {
        for key in SortKey::ALL.into_iter().filter(|k| !k.ascending()) {
            let ranked = rank_stocks(sample(), key);
            assert!(
                ranked
                    .windows(2)
                    .all(|w| key.value_of(&w[0]) >= key.value_of(&w[1])),
                "{key:?} not descending"
            );
        }
    }

    #[test]
    fn ties_break_by_ascending_ticker() {
        let vms = vec![
            derive_view_model(&record_with("zeta", 3.0, 10.0)),
            derive_view_model(&record_with("Beta", 3.0, 10.0)),
            derive_view_model(&record_with("alpha", 3.0, 10.0)),
        ];
        let ranked = rank_stocks(vms.clone(), SortKey::default());
        assert_eq!(tickers(&ranked), vec!["alpha", "Beta", "zeta"]);

        let ranked = rank_stocks(vms, SortKey::Price);
        assert_eq!(tickers(&ranked), vec!["alpha", "Beta", "zeta"]);
    }

    #[test]
    fn quality_ties_on_displayed_value_break_by_ticker() {
        let mut zzz = record_with("ZZZ", 3.0, 1.0);
        zzz.fcf_quality = 3.84;
        zzz.roic_strength = 3.84;
        let mut aaa = record_with("AAA", 3.0, 1.0);
        aaa.fcf_quality = 3.81;
        aaa.roic_strength = 3.81;

        let ranked = rank_stocks(
            vec![derive_view_model(&zzz), derive_view_model(&aaa)],
            SortKey::QualitySummary,
        );
        assert_eq!(ranked[0].quality_summary, "3.8");
        assert_eq!(ranked[1].quality_summary, "3.8");
        assert_eq!(tickers(&ranked), vec!["AAA", "ZZZ"]);
    }

    #[test]
    fn nan_values_still_give_a_total_order() {
        let mut odd = record_with("NAN", 3.0, f64::NAN);
        odd.value_rank = f64::NAN;
        let vms = vec![
            derive_view_model(&record_with("AAA", 3.0, 2.0)),
            derive_view_model(&odd),
            derive_view_model(&record_with("BBB", 3.0, 1.0)),
        ];

        let ranked = rank_stocks(vms.clone(), SortKey::Price);
        assert_eq!(tickers(&ranked), vec!["BBB", "AAA", "NAN"]);
        let mut reversed = vms;
        reversed.reverse();
        assert_eq!(tickers(&rank_stocks(reversed, SortKey::Price)), vec!["BBB", "AAA", "NAN"]);
    }

    #[test]
    fn order_is_independent_of_input_order() {
        let mut reversed = sample();
        reversed.reverse();
        assert_eq!(
            tickers(&rank_stocks(sample(), SortKey::ValueRank)),
            tickers(&rank_stocks(reversed, SortKey::ValueRank))
        );
    }

    #[test]
    fn parse_accepts_field_names_and_aliases() {
        assert_eq!(SortKey::parse("undervaluationScore"), Some(SortKey::UndervaluationScore));
        assert_eq!(SortKey::parse("score"), Some(SortKey::UndervaluationScore));
        assert_eq!(SortKey::parse("value-rank"), Some(SortKey::ValueRank));
        assert_eq!(SortKey::parse("quality"), Some(SortKey::QualitySummary));
        assert_eq!(SortKey::parse("price"), Some(SortKey::Price));
        assert_eq!(SortKey::parse("marketCap"), None);
    }

    #[test]
    fn unknown_key_falls_back_to_score() {
        assert_eq!(SortKey::parse_or_default("bogus"), SortKey::UndervaluationScore);
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse_or_default(key.as_str()), key);
        }
    }
}
