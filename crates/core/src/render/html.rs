//! Markup for the table body and the host page.

use crate::rank::SortKey;
use crate::render::{DetailCard, MessageRow, SummaryRow, TableBody, TableRow, COLUMN_COUNT};

const TABLE_HEADERS: [&str; COLUMN_COUNT] = [
    "Category",
    "Ticker",
    "Name",
    "Price",
    "DCF Base",
    "Value Rank",
    "Quality",
    "Score",
    "Risk",
    "Last Updated",
];

impl TableBody {
    /// `<tr>` elements for the `<tbody>` container.
    pub fn to_html(&self) -> String {
        self.rows.iter().map(render_row).collect()
    }
}

fn render_row(row: &TableRow) -> String {
    match row {
        TableRow::Summary(s) => render_summary_row(s),
        TableRow::Detail(d) => render_detail_row(d),
        TableRow::Message(m) => render_message_row(m),
    }
}

fn render_summary_row(s: &SummaryRow) -> String {
    format!(
        r#"<tr class="data-row" data-ticker="{ticker}">
  <td><span class="{category_class}">{category}</span></td>
  <td><a href="/rows/{ticker_path}/toggle">{ticker}</a></td>
  <td>{name}</td>
  <td>{price}</td>
  <td><span class="{value_class}">{value}</span></td>
  <td>{value_rank}</td>
  <td>{quality}</td>
  <td>{score}</td>
  <td><span class="{risk_class}">{risk}</span></td>
  <td>{last_updated}</td>
</tr>
"#,
        ticker = html_escape(&s.ticker),
        ticker_path = urlencoding::encode(&s.ticker),
        category_class = html_escape(&s.category.class),
        category = html_escape(&s.category.text),
        name = html_escape(&s.name),
        price = html_escape(&s.price),
        value_class = html_escape(&s.value.class),
        value = html_escape(&s.value.text),
        value_rank = html_escape(&s.value_rank),
        quality = html_escape(&s.quality_summary),
        score = s.undervaluation_score,
        risk_class = html_escape(&s.risk.class),
        risk = html_escape(&s.risk.text),
        last_updated = html_escape(&s.last_updated),
    )
}

fn render_detail_row(d: &DetailCard) -> String {
    let fields: String = d
        .fields
        .iter()
        .map(|f| {
            format!(
                r#"<div><span class="label">{}</span><span class="value">{}</span></div>"#,
                html_escape(&f.label),
                html_escape(&f.value),
            )
        })
        .collect();

    format!(
        r#"<tr class="detail-row" data-ticker="{ticker}"><td colspan="{span}"><div class="detail-card"><h4>{title}</h4>{fields}</div></td></tr>
"#,
        ticker = html_escape(&d.ticker),
        span = COLUMN_COUNT,
        title = html_escape(&d.title),
        fields = fields,
    )
}

fn render_message_row(m: &MessageRow) -> String {
    format!(
        r#"<tr class="message-row"><td colspan="{}" style="text-align: center; padding: 2rem; color: var(--muted);">{}</td></tr>
"#,
        m.col_span,
        html_escape(&m.text),
    )
}

/// Full page: sort selector plus the table with `body` already rendered.
pub fn render_page(body: &TableBody, current: SortKey) -> String {
    let options: String = SortKey::ALL
        .iter()
        .map(|key| {
            let selected = if *key == current { " selected" } else { "" };
            format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                key.as_str(),
                key.label(),
            )
        })
        .collect();

    let headers: String = TABLE_HEADERS
        .iter()
        .map(|h| format!("<th>{h}</th>"))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Undervaluation Table</title>
</head>
<body>
    <form method="get" action="/sort">
        <label for="sort-select">Sort by</label>
        <select id="sort-select" name="key">{options}</select>
        <button type="submit">Apply</button>
    </form>
    <table id="stock-table">
        <thead><tr>{headers}</tr></thead>
        <tbody>
{body}        </tbody>
    </table>
</body>
</html>"#,
        options = options,
        headers = headers,
        body = body.to_html(),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::derive_view_model;
    use crate::factor::tests::record_with;
    use crate::render::{build_detail_card, build_summary_row};

    #[test]
    fn summary_and_detail_rows_render_in_order() {
        let vm = derive_view_model(&record_with("AAA", 5.0, 10.0));
        let mut body = TableBody::default();
        body.push_summary(build_summary_row(&vm));
        body.insert_detail_after(build_detail_card(&vm));

        let html = body.to_html();
        let summary_at = html.find(r#"class="data-row""#).unwrap();
        let detail_at = html.find(r#"class="detail-row""#).unwrap();
        assert!(summary_at < detail_at);
        assert!(html.contains(r#"<span class="badge risk-low">Low</span>"#));
        assert!(html.contains(r#"colspan="10""#));
        assert!(html.contains("<td>$10.00</td>"));
    }

    #[test]
    fn escapes_feed_text() {
        let mut record = record_with("A&B", 3.0, 1.0);
        record.name = "<script>".to_string();
        let body = {
            let mut b = TableBody::default();
            b.push_summary(build_summary_row(&derive_view_model(&record)));
            b
        };

        let html = body.to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(r#"data-ticker="A&amp;B""#));
        assert!(html.contains("/rows/A%26B/toggle"));
    }

    #[test]
    fn toggle_links_encode_path_separators() {
        let mut b = TableBody::default();
        b.push_summary(build_summary_row(&derive_view_model(&record_with("BRK/B", 3.0, 1.0))));
        assert!(b.to_html().contains(r#"href="/rows/BRK%2FB/toggle""#));
    }

    #[test]
    fn error_body_is_single_full_width_row() {
        let html = TableBody::error().to_html();
        assert_eq!(html.matches("<tr").count(), 1);
        assert!(html.contains(r#"colspan="10""#));
        assert!(html.contains("Failed to load stock data."));
    }

    #[test]
    fn page_marks_current_sort_key() {
        let page = render_page(&TableBody::loading(), SortKey::Price);
        assert!(page.contains(r#"<option value="price" selected>Price</option>"#));
        assert!(page.contains(r#"<select id="sort-select""#));
        assert!(page.contains("Loading stock data..."));
    }
}
