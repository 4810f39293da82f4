//! Render tree for the table body.
//!
//! Rows are plain data. `html` and `text` turn a [`TableBody`] into markup or
//! a terminal table; nothing in here touches the factor model's state.

pub mod currency;
pub mod html;
pub mod text;

use crate::decimal::to_fixed_1;
use crate::domain::view_model::StockViewModel;
use serde::{Deserialize, Serialize};

pub use currency::format_currency;

/// Columns in a summary row; detail and message rows span all of them.
pub const COLUMN_COUNT: usize = 10;

pub const LOADING_MESSAGE: &str = "Loading stock data...";
pub const ERROR_MESSAGE: &str = "Failed to load stock data. Please try refreshing the page.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub class: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub ticker: String,
    pub category: Badge,
    pub name: String,
    pub price: String,
    pub value: Badge,
    pub value_rank: String,
    pub quality_summary: String,
    pub undervaluation_score: i64,
    pub risk: Badge,
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailField {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailCard {
    pub ticker: String,
    pub title: String,
    pub fields: Vec<DetailField>,
}

impl DetailCard {
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRow {
    pub text: String,
    pub col_span: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TableRow {
    Summary(SummaryRow),
    Detail(DetailCard),
    Message(MessageRow),
}

/// Children of the table body container, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableBody {
    pub rows: Vec<TableRow>,
}

impl TableBody {
    pub fn message(text: &str) -> Self {
        TableBody {
            rows: vec![TableRow::Message(MessageRow {
                text: text.to_string(),
                col_span: COLUMN_COUNT,
            })],
        }
    }

    pub fn loading() -> Self {
        TableBody::message(LOADING_MESSAGE)
    }

    pub fn error() -> Self {
        TableBody::message(ERROR_MESSAGE)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn push_summary(&mut self, row: SummaryRow) {
        self.rows.push(TableRow::Summary(row));
    }

    pub fn summary_tickers(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                TableRow::Summary(s) => Some(s.ticker.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn detail_rows(&self) -> Vec<&DetailCard> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                TableRow::Detail(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn position_of_summary(&self, ticker: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| matches!(row, TableRow::Summary(s) if s.ticker == ticker))
    }

    /// Inserts `card` directly after its summary row. Returns false when the
    /// summary row is not in the body.
    pub fn insert_detail_after(&mut self, card: DetailCard) -> bool {
        let Some(pos) = self.position_of_summary(&card.ticker) else {
            return false;
        };
        self.rows.insert(pos + 1, TableRow::Detail(card));
        true
    }

    pub fn remove_detail(&mut self, ticker: &str) -> bool {
        let before = self.rows.len();
        self.rows
            .retain(|row| !matches!(row, TableRow::Detail(d) if d.ticker == ticker));
        self.rows.len() != before
    }
}

pub fn build_summary_row(vm: &StockViewModel) -> SummaryRow {
    let r = &vm.record;
    SummaryRow {
        ticker: r.ticker.clone(),
        category: Badge {
            class: format!("badge category-{}", r.category.to_lowercase()),
            text: r.category.clone(),
        },
        name: r.name.clone(),
        price: format_currency(r.price),
        value: Badge {
            class: "badge value".to_string(),
            text: r.dcf.base.to_string(),
        },
        value_rank: to_fixed_1(r.value_rank),
        quality_summary: vm.quality_summary.clone(),
        undervaluation_score: vm.undervaluation_score,
        risk: Badge {
            class: format!("badge risk-{}", vm.risk_level.css_key()),
            text: vm.risk_level.to_string(),
        },
        last_updated: r.last_updated.clone(),
    }
}

pub fn build_detail_card(vm: &StockViewModel) -> DetailCard {
    let r = &vm.record;
    let raw = [
        ("FCF Quality", r.fcf_quality),
        ("ROIC Strength", r.roic_strength),
        ("Revenue Durability", r.revenue_durability),
        ("Balance Sheet Strength", r.balance_sheet_strength),
        ("Insider Activity", r.insider_activity),
        ("Value Rank", r.value_rank),
        ("Expected Return", r.expected_return),
    ];

    let dcf = [
        ("DCF Conservative", r.dcf.conservative),
        ("DCF Base", r.dcf.base),
        ("DCF Aggressive", r.dcf.aggressive),
    ];

    let mut fields: Vec<DetailField> = dcf
        .iter()
        .map(|(label, value)| DetailField {
            label: label.to_string(),
            value: value.to_string(),
        })
        .chain(raw.iter().map(|(label, value)| DetailField {
            label: label.to_string(),
            value: value.to_string(),
        }))
        .collect();

    let derived = [
        ("Quality Summary", vm.quality_summary.clone()),
        ("Undervaluation Score", vm.undervaluation_score.to_string()),
        ("Risk Level", vm.risk_level.to_string()),
        ("Last Updated", r.last_updated.clone()),
    ];
    fields.extend(derived.into_iter().map(|(label, value)| DetailField {
        label: label.to_string(),
        value,
    }));

    DetailCard {
        ticker: r.ticker.clone(),
        title: format!("{} ({})", r.name, r.ticker),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stock::{DcfBand, DcfEstimate};
    use crate::factor::derive_view_model;
    use crate::factor::tests::record_with;

    #[test]
    fn summary_row_carries_display_columns() {
        let mut record = record_with("DUOL", 4.0, 1234.5);
        record.category = "Growth".to_string();
        record.dcf.base = DcfEstimate::Value(1500.0);
        let row = build_summary_row(&derive_view_model(&record));

        assert_eq!(row.category.class, "badge category-growth");
        assert_eq!(row.price, "$1,234.50");
        assert_eq!(row.value.text, "1500");
        assert_eq!(row.value_rank, "4.0");
        assert_eq!(row.quality_summary, "4.0");
        assert_eq!(row.undervaluation_score, 80);
        assert_eq!(row.risk.class, "badge risk-moderate");
        assert_eq!(row.risk.text, "Moderate");
        assert_eq!(row.last_updated, "2025-01-14");
    }

    #[test]
    fn value_rank_column_rounds_halves_up() {
        let mut record = record_with("ASML", 3.0, 700.0);
        record.value_rank = 3.25;
        let row = build_summary_row(&derive_view_model(&record));
        assert_eq!(row.value_rank, "3.3");
    }

    #[test]
    fn detail_card_lists_raw_and_derived_fields() {
        let mut record = record_with("CMG", 4.5, 50.0);
        record.dcf.conservative = DcfEstimate::Value(45.5);
        let card = build_detail_card(&derive_view_model(&record));

        assert_eq!(card.title, "CMG Inc (CMG)");
        assert_eq!(card.field("DCF Conservative"), Some("45.5"));
        assert_eq!(card.field("FCF Quality"), Some("4.5"));
        assert_eq!(card.field("Insider Activity"), Some("4.5"));
        assert_eq!(card.field("Undervaluation Score"), Some("90"));
        assert_eq!(card.field("Risk Level"), Some("Low"));
        assert_eq!(card.field("Last Updated"), Some("2025-01-14"));
        assert_eq!(card.fields.len(), 14);
    }

    #[test]
    fn dcf_bands_render_as_written() {
        let mut record = record_with("EFX", 3.0, 250.0);
        record.dcf.base = DcfEstimate::Band(DcfBand { low: 240.0, high: 275.5 });
        let vm = derive_view_model(&record);

        assert_eq!(build_summary_row(&vm).value.text, "240-275.5");
        assert_eq!(build_detail_card(&vm).field("DCF Base"), Some("240-275.5"));
    }

    #[test]
    fn detail_rows_insert_after_summary_and_remove() {
        let mut body = TableBody::default();
        for t in ["AAA", "BBB", "CCC"] {
            body.push_summary(build_summary_row(&derive_view_model(&record_with(t, 3.0, 1.0))));
        }

        let card = build_detail_card(&derive_view_model(&record_with("BBB", 3.0, 1.0)));
        assert!(body.insert_detail_after(card));
        assert!(matches!(&body.rows[2], TableRow::Detail(d) if d.ticker == "BBB"));
        assert_eq!(body.detail_rows().len(), 1);

        assert!(body.remove_detail("BBB"));
        assert!(body.detail_rows().is_empty());
        assert!(!body.remove_detail("BBB"));
    }

    #[test]
    fn insert_for_missing_summary_is_rejected() {
        let mut body = TableBody::default();
        let card = build_detail_card(&derive_view_model(&record_with("ZZZ", 3.0, 1.0)));
        assert!(!body.insert_detail_after(card));
        assert!(body.rows.is_empty());
    }

    #[test]
    fn message_bodies_span_every_column() {
        for body in [TableBody::loading(), TableBody::error()] {
            assert_eq!(body.rows.len(), 1);
            assert!(matches!(&body.rows[0], TableRow::Message(m) if m.col_span == COLUMN_COUNT));
        }
    }
}
