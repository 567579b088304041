//! pt-BR number formatting and HTML escaping for report bodies.

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// `R$ 63.000,00`, with the non-breaking space browsers emit for pt-BR.
pub fn format_brl(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    format!(
        "{sign}R$\u{a0}{},{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

/// One decimal place, comma separator: `8,5`.
pub fn format_decimal(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let tenths = (value.abs() * 10.0).round() as u64;
    format!("{sign}{},{}", group_thousands(tenths / 10), tenths % 10)
}

pub fn format_integer(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(value.abs().round() as u64))
}

/// Missing or non-finite values render as `-`.
pub fn format_optional_currency(value: Option<f64>) -> String {
    match value.filter(|value| value.is_finite()) {
        Some(value) => format_brl(value),
        None => "-".to_string(),
    }
}

pub fn format_optional_decimal(value: Option<f64>, suffix: &str) -> String {
    match value.filter(|value| value.is_finite()) {
        Some(value) => format!("{}{suffix}", format_decimal(value)),
        None => "-".to_string(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}
