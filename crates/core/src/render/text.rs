use crate::render::{DetailCard, SummaryRow, TableBody, TableRow};

impl TableBody {
    /// Fixed-width rendering for terminals.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:<12} {:<8} {:<28} {:>12} {:>10} {:>5} {:>5} {:>5} {:<12} {}\n",
            "CATEGORY", "TICKER", "NAME", "PRICE", "DCF BASE", "VALUE", "QUAL", "SCORE", "RISK", "UPDATED"
        ));

        for row in &self.rows {
            match row {
                TableRow::Summary(s) => out.push_str(&summary_line(s)),
                TableRow::Detail(d) => out.push_str(&detail_block(d)),
                TableRow::Message(m) => out.push_str(&format!("{}\n", m.text)),
            }
        }
        out
    }
}

fn summary_line(s: &SummaryRow) -> String {
    format!(
        "{:<12} {:<8} {:<28} {:>12} {:>10} {:>5} {:>5} {:>5} {:<12} {}\n",
        truncate(&s.category.text, 12),
        s.ticker,
        truncate(&s.name, 28),
        s.price,
        s.value.text,
        s.value_rank,
        s.quality_summary,
        s.undervaluation_score,
        s.risk.text,
        s.last_updated,
    )
}

fn detail_block(d: &DetailCard) -> String {
    let mut out = format!("    {}\n", d.title);
    for f in &d.fields {
        out.push_str(&format!("      {:<24} {}\n", f.label, f.value));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::derive_view_model;
    use crate::factor::tests::record_with;
    use crate::render::{build_detail_card, build_summary_row};

    #[test]
    fn detail_block_follows_its_summary_line() {
        let vm = derive_view_model(&record_with("AAA", 5.0, 10.0));
        let mut body = TableBody::default();
        body.push_summary(build_summary_row(&vm));
        body.insert_detail_after(build_detail_card(&vm));

        let text = body.to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].contains("AAA"));
        assert!(lines[1].contains("$10.00"));
        assert_eq!(lines[2].trim(), "AAA Inc (AAA)");
        assert!(text.contains("Risk Level"));
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
