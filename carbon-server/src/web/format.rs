//! pt-BR display formatting for numbers and currency.
//!
//! Matches the conventions the UI has always shown: `.` as the thousands
//! separator, `,` as the decimal separator, `R$` for BRL amounts.

/// Format a number with pt-BR separators and a fixed number of decimals.
///
/// Non-finite values format as an empty string (nothing to display).
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return String::new();
    }
    // Collapse negative zero so a rounded -0.0 doesn't display as "-0,00".
    let value = if value == 0.0 { 0.0 } else { value };

    let formatted = format!("{value:.decimals$}");
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped},{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Format a BRL currency amount: `R$ 1.234,56`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    format!("R$ {}", format_number(value, 2))
}
