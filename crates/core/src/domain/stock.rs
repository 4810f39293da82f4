use serde::{Deserialize, Serialize};
use std::fmt;

/// One instrument as delivered by the feed. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    pub ticker: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub last_updated: String,

    // Normalized factor scores, 0-5.
    pub value_rank: f64,
    pub expected_return: f64,
    pub fcf_quality: f64,
    pub roic_strength: f64,
    pub balance_sheet_strength: f64,
    pub revenue_durability: f64,
    #[serde(default)]
    pub insider_activity: f64,

    pub dcf: DcfRange,
}

/// Fair-value estimates under three scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcfRange {
    pub conservative: DcfEstimate,
    pub base: DcfEstimate,
    pub aggressive: DcfEstimate,
}

/// A scenario's fair value: a single number, or a `"low-high"` band as
/// written by the feed generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DcfEstimate {
    Value(f64),
    Band(DcfBand),
}

impl From<f64> for DcfEstimate {
    fn from(v: f64) -> Self {
        DcfEstimate::Value(v)
    }
}

impl fmt::Display for DcfEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DcfEstimate::Value(v) => write!(f, "{v}"),
            DcfEstimate::Band(b) => write!(f, "{b}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DcfBand {
    pub low: f64,
    pub high: f64,
}

impl TryFrom<String> for DcfBand {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let (low, high) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("DCF band must look like \"low-high\" (got {s:?})"))?;
        let low: f64 = low
            .trim()
            .parse()
            .map_err(|_| format!("invalid DCF band low value in {s:?}"))?;
        let high: f64 = high
            .trim()
            .parse()
            .map_err(|_| format!("invalid DCF band high value in {s:?}"))?;
        if low > high {
            return Err(format!("DCF band low exceeds high in {s:?}"));
        }
        Ok(DcfBand { low, high })
    }
}

impl From<DcfBand> for String {
    fn from(b: DcfBand) -> Self {
        b.to_string()
    }
}

impl fmt::Display for DcfBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

impl StockRecord {
    /// The seven factors in display order, paired with their feed field names.
    pub fn factors(&self) -> [(&'static str, f64); 7] {
        [
            ("valueRank", self.value_rank),
            ("expectedReturn", self.expected_return),
            ("fcfQuality", self.fcf_quality),
            ("roicStrength", self.roic_strength),
            ("balanceSheetStrength", self.balance_sheet_strength),
            ("revenueDurability", self.revenue_durability),
            ("insiderActivity", self.insider_activity),
        ]
    }
}
