/// Formats `value` as US dollars with thousands separators and two decimals.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    format!("{sign}${}.{:02}", group_thousands(dollars), cents % 100)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
