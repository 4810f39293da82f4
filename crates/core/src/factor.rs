//! Factor model: undervaluation score, risk tier and quality summary.
//!
//! Every function here is pure. Factor values outside 0-5 are passed through
//! unchanged; see `ingest::audit` for where they get reported.

use crate::decimal::to_fixed_1;
use crate::domain::stock::StockRecord;
use crate::domain::view_model::{RiskLevel, StockViewModel};

/// Factors arrive on a 0-5 scale; the score works on 0-100.
const HUNDRED_SCALE: f64 = 20.0;

/// Weights applied to each rescaled factor. Defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorWeights {
    pub value_rank: f64,
    pub expected_return: f64,
    pub fcf_quality: f64,
    pub roic_strength: f64,
    pub balance_sheet_strength: f64,
    pub revenue_durability: f64,
    pub insider_activity: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        FactorWeights {
            value_rank: 0.25,
            expected_return: 0.20,
            fcf_quality: 0.15,
            roic_strength: 0.15,
            balance_sheet_strength: 0.10,
            revenue_durability: 0.10,
            insider_activity: 0.05,
        }
    }
}

impl FactorWeights {
    pub fn total(&self) -> f64 {
        self.value_rank
            + self.expected_return
            + self.fcf_quality
            + self.roic_strength
            + self.balance_sheet_strength
            + self.revenue_durability
            + self.insider_activity
    }
}

/// Inclusive lower bounds on average quality, checked from `low` downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    pub low: f64,
    pub moderate: f64,
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            low: 4.3,
            moderate: 3.3,
            high: 2.5,
        }
    }
}

impl RiskThresholds {
    pub fn classify(&self, avg_quality: f64) -> RiskLevel {
        if avg_quality >= self.low {
            RiskLevel::Low
        } else if avg_quality >= self.moderate {
            RiskLevel::Moderate
        } else if avg_quality >= self.high {
            RiskLevel::High
        } else {
            RiskLevel::Speculative
        }
    }
}

/// Model configuration carried by the table session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FactorModel {
    pub weights: FactorWeights,
    pub thresholds: RiskThresholds,
}

impl FactorModel {
    pub fn derive(&self, record: &StockRecord) -> StockViewModel {
        StockViewModel {
            record: record.clone(),
            undervaluation_score: undervaluation_score(record, &self.weights),
            risk_level: risk_level(record, &self.thresholds),
            quality_summary: quality_summary(record),
        }
    }
}

fn to_hundred_scale(score: f64) -> f64 {
    score * HUNDRED_SCALE
}

/// Weighted sum of the rescaled factors, rounded half away from zero
/// (`f64::round`).
pub fn undervaluation_score(record: &StockRecord, weights: &FactorWeights) -> i64 {
    let total = weights.value_rank * to_hundred_scale(record.value_rank)
        + weights.expected_return * to_hundred_scale(record.expected_return)
        + weights.fcf_quality * to_hundred_scale(record.fcf_quality)
        + weights.roic_strength * to_hundred_scale(record.roic_strength)
        + weights.balance_sheet_strength * to_hundred_scale(record.balance_sheet_strength)
        + weights.revenue_durability * to_hundred_scale(record.revenue_durability)
        + weights.insider_activity * to_hundred_scale(record.insider_activity);

    total.round() as i64
}

/// Mean of fcf quality, roic strength, revenue durability and balance sheet strength.
pub fn average_quality(record: &StockRecord) -> f64 {
    (record.fcf_quality
        + record.roic_strength
        + record.revenue_durability
        + record.balance_sheet_strength)
        / 4.0
}

pub fn risk_level(record: &StockRecord, thresholds: &RiskThresholds) -> RiskLevel {
    thresholds.classify(average_quality(record))
}

/// Mean of fcf quality and roic strength as a numeric sort value.
pub fn quality_value(record: &StockRecord) -> f64 {
    (record.fcf_quality + record.roic_strength) / 2.0
}

/// [`quality_value`] with one fractional digit, halves rounded up.
pub fn quality_summary(record: &StockRecord) -> String {
    to_fixed_1(quality_value(record))
}

/// Derives a view model with the default weights and thresholds.
pub fn derive_view_model(record: &StockRecord) -> StockViewModel {
    FactorModel::default().derive(record)
}
