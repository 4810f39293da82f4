//! Single-expanded-row state machine.
//!
//! `transition` is pure: it returns the next state plus the row edits the
//! render pipeline has to apply, so it can be tested without a table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "ticker", rename_all = "camelCase")]
pub enum DetailState {
    #[default]
    Collapsed,
    Expanded(String),
}

impl DetailState {
    pub fn expanded_ticker(&self) -> Option<&str> {
        match self {
            DetailState::Collapsed => None,
            DetailState::Expanded(t) => Some(t),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEvent {
    RowClick(String),
    /// A sort change rebuilt the whole table.
    FullRender,
}

/// Row edit produced by a transition, applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEffect {
    RemoveDetail(String),
    InsertDetail(String),
}

pub fn transition(state: &DetailState, event: &DetailEvent) -> (DetailState, Vec<DetailEffect>) {
    match (state, event) {
        // The rebuilt table carries no detail rows, so there is nothing to remove.
        (_, DetailEvent::FullRender) => (DetailState::Collapsed, Vec::new()),
        (DetailState::Collapsed, DetailEvent::RowClick(t)) => (
            DetailState::Expanded(t.clone()),
            vec![DetailEffect::InsertDetail(t.clone())],
        ),
        (DetailState::Expanded(open), DetailEvent::RowClick(t)) if open == t => (
            DetailState::Collapsed,
            vec![DetailEffect::RemoveDetail(open.clone())],
        ),
        (DetailState::Expanded(open), DetailEvent::RowClick(t)) => (
            DetailState::Expanded(t.clone()),
            vec![
                DetailEffect::RemoveDetail(open.clone()),
                DetailEffect::InsertDetail(t.clone()),
            ],
        ),
    }
}
