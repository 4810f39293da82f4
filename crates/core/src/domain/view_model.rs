use crate::domain::stock::StockRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display-ready row, rebuilt from a [`StockRecord`] on every render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockViewModel {
    #[serde(flatten)]
    pub record: StockRecord,
    pub undervaluation_score: i64,
    pub risk_level: RiskLevel,
    pub quality_summary: String,
}

impl StockViewModel {
    pub fn ticker(&self) -> &str {
        &self.record.ticker
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Speculative,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Speculative => "Speculative",
        }
    }

    /// CSS class suffix for the risk badge.
    pub fn css_key(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Speculative => "speculative",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
