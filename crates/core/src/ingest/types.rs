use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Why the feed could not be turned into a record set.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("feed request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("feed returned HTTP {status}")]
    Status { status: u16 },

    #[error("failed to read feed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("feed payload is not a stock record array: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A factor value outside the documented 0-5 range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorFinding {
    pub ticker: String,
    pub factor: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub record_count: usize,
    pub out_of_range: Vec<FactorFinding>,
    pub duplicate_tickers: Vec<String>,
}
