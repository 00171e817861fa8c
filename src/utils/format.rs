//! Number formatting for markup attributes, axis labels and tooltip text

use thousands::Separable;

/// Format a number the way it appears in a markup attribute: shortest
/// round-trip representation, no trailing `.0`
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Avoids "-0"
        return "0".to_string();
    }
    format!("{}", value)
}

/// en-US locale formatting: thousands separators, at most three fraction
/// digits, trailing zeros dropped. `18064.7` -> `18,064.7`
pub fn format_locale(value: f64) -> String {
    let fixed = format!("{:.3}", value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    trimmed.separate_with_commas()
}

/// Fixed-point formatting with thousands separators, `precision` fraction digits
pub fn format_grouped(value: f64, precision: usize) -> String {
    let fixed = format!("{:.*}", precision, value);
    // Negative zero after rounding
    if fixed.starts_with('-') && fixed[1..].chars().all(|c| c == '0' || c == '.') {
        return fixed[1..].separate_with_commas();
    }
    fixed.separate_with_commas()
}
