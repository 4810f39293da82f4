//! Table session: the application state behind one rendered table.
//!
//! Owns the raw records for the session lifetime. Every full render derives
//! view models afresh; toggles only edit the detail row.

use crate::detail::{transition, DetailEffect, DetailEvent, DetailState};
use crate::domain::stock::StockRecord;
use crate::factor::FactorModel;
use crate::rank::{rank_stocks, SortKey};
use crate::render::{build_detail_card, build_summary_row, TableBody};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadPhase {
    Loading,
    Error,
    Ready,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("table is not ready (phase {0:?})")]
    NotReady(LoadPhase),

    #[error("no row for ticker {0}")]
    UnknownTicker(String),
}

#[derive(Debug, Clone)]
pub struct TableSession {
    records: Vec<StockRecord>,
    model: FactorModel,
    sort_key: SortKey,
    detail: DetailState,
    phase: LoadPhase,
    body: TableBody,
}

impl Default for TableSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSession {
    pub fn new() -> Self {
        Self::with_model(FactorModel::default())
    }

    pub fn with_model(model: FactorModel) -> Self {
        Self {
            records: Vec::new(),
            model,
            sort_key: SortKey::default(),
            detail: DetailState::Collapsed,
            phase: LoadPhase::Loading,
            body: TableBody::loading(),
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn body(&self) -> &TableBody {
        &self.body
    }

    pub fn show_loading(&mut self) {
        self.phase = LoadPhase::Loading;
        self.detail = DetailState::Collapsed;
        self.body = TableBody::loading();
    }

    pub fn show_error(&mut self) {
        self.phase = LoadPhase::Error;
        self.detail = DetailState::Collapsed;
        self.body = TableBody::error();
    }

    /// Replaces the record set and marks the session ready. Does not render.
    pub fn set_records(&mut self, records: Vec<StockRecord>) {
        self.records = records;
        self.phase = LoadPhase::Ready;
    }

    /// Full re-render with `sort_key`. Always leaves every row collapsed.
    /// Ignored outside the Ready phase so the loading/error message stays up.
    pub fn render(&mut self, sort_key: SortKey) {
        if self.phase != LoadPhase::Ready {
            tracing::debug!(phase = ?self.phase, "render skipped; table not ready");
            return;
        }

        let (next, _) = transition(&self.detail, &DetailEvent::FullRender);
        self.detail = next;
        self.sort_key = sort_key;

        let view_models = self.records.iter().map(|r| self.model.derive(r)).collect();
        let ranked = rank_stocks(view_models, sort_key);

        self.body.clear();
        for vm in &ranked {
            self.body.push_summary(build_summary_row(vm));
        }
        tracing::debug!(sort_key = sort_key.as_str(), rows = ranked.len(), "table rendered");
    }

    /// Row click: expands, collapses, or moves the single detail row.
    pub fn toggle_row(&mut self, ticker: &str) -> Result<(), SessionError> {
        if self.phase != LoadPhase::Ready {
            return Err(SessionError::NotReady(self.phase));
        }
        if self.body.position_of_summary(ticker).is_none() {
            return Err(SessionError::UnknownTicker(ticker.to_string()));
        }

        let (next, effects) = transition(&self.detail, &DetailEvent::RowClick(ticker.to_string()));
        for effect in effects {
            match effect {
                DetailEffect::RemoveDetail(t) => {
                    self.body.remove_detail(&t);
                }
                DetailEffect::InsertDetail(t) => self.insert_detail(&t)?,
            }
        }
        self.detail = next;
        Ok(())
    }

    fn insert_detail(&mut self, ticker: &str) -> Result<(), SessionError> {
        let record = self
            .records
            .iter()
            .find(|r| r.ticker == ticker)
            .ok_or_else(|| SessionError::UnknownTicker(ticker.to_string()))?;

        let card = build_detail_card(&self.model.derive(record));
        if !self.body.insert_detail_after(card) {
            return Err(SessionError::UnknownTicker(ticker.to_string()));
        }
        Ok(())
    }
}
