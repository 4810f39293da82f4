pub mod audit;
pub mod provider;
pub mod types;

use crate::ingest::provider::FeedSource;
use crate::ingest::types::{LoadError, LoadReport};
use crate::rank::SortKey;
use crate::session::TableSession;

/// Loads the feed into `session`, moving it through Loading to Ready or Error.
///
/// On success the table is rendered with the default sort key. Failures are
/// logged and leave the session showing the error message; there is no retry.
pub async fn load(
    session: &mut TableSession,
    source: &dyn FeedSource,
) -> Result<LoadReport, LoadError> {
    session.show_loading();
    let location = source.describe();
    tracing::info!(source = %location, "loading stock feed");

    let records = match source.fetch_records().await {
        Ok(records) => records,
        Err(err) => {
            tracing::error!(source = %location, error = %err, "failed to load stock data");
            session.show_error();
            return Err(err);
        }
    };

    let report = LoadReport {
        source: location,
        loaded_at: chrono::Utc::now(),
        record_count: records.len(),
        out_of_range: audit::out_of_range_factors(&records),
        duplicate_tickers: audit::duplicate_tickers(&records),
    };

    for finding in &report.out_of_range {
        tracing::warn!(
            ticker = %finding.ticker,
            factor = finding.factor,
            value = finding.value,
            "factor outside 0-5; passing through"
        );
    }
    if !report.duplicate_tickers.is_empty() {
        tracing::warn!(tickers = ?report.duplicate_tickers, "duplicate tickers in feed");
    }

    session.set_records(records);
    session.render(SortKey::default());
    tracing::info!(record_count = report.record_count, "stock feed loaded");

    Ok(report)
}
