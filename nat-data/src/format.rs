//! Number and hover-label formatting shared by the chart views and the CLI.

/// Format an integer with `,` as thousands separator (`1234567` -> `1,234,567`).
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Escape the characters that are significant in HTML text.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Hover text of one chart point: bold series name, year, grouped count.
///
/// The result is HTML; the name and year are escaped.
pub fn hover_label(nationality: &str, year: &str, count: u64) -> String {
    format!(
        "<b>{}</b><br>Année: {}<br>Itérations: {}",
        escape_html(nationality),
        escape_html(year),
        group_thousands(count)
    )
}

/// Format a mean with one decimal and grouped integer part (`1234.56` -> `1,234.6`).
pub fn format_mean(mean: f64) -> String {
    let rounded = (mean * 10.0).round() / 10.0;
    let whole = rounded.trunc().max(0.0) as u64;
    let tenths = ((rounded - rounded.trunc()) * 10.0).round().abs() as u64;
    format!("{}.{}", group_thousands(whole), tenths.min(9))
}
