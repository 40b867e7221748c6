//! # Number Formatting
//!
//! Render results the way the calculators display them: currency with
//! thousands separators, percentages, and a placeholder for values that
//! could not be computed.
//!
//! ```rust
//! use fincalc_core::config::DisplaySettings;
//! use fincalc_core::format::{format_currency, format_optional_currency};
//!
//! let display = DisplaySettings::default();
//! assert_eq!(format_currency(1995.9124, &display), "$1,995.91");
//! assert_eq!(format_currency(-1234567.0, &display), "-$1,234,567.00");
//! assert_eq!(format_optional_currency(None, &display), "—");
//! ```

use crate::config::DisplaySettings;

/// Insert `,` every three digits of an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a plain number with thousands separators and fixed decimals.
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let mut out = group_thousands(int_part);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    // Avoid "-0.00"
    let rounds_to_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !rounds_to_zero {
        out.insert(0, '-');
    }
    out
}

/// Format a currency amount, e.g. `$1,995.91` or `-$12.00`.
pub fn format_currency(value: f64, display: &DisplaySettings) -> String {
    if !value.is_finite() {
        return display.placeholder.clone();
    }
    let number = format_number(value, display.decimals);
    match number.strip_prefix('-') {
        Some(rest) => format!("-{}{}", display.currency_symbol, rest),
        None => format!("{}{}", display.currency_symbol, number),
    }
}

/// Format a percentage with two decimals, e.g. `7.25%`.
pub fn format_percent(value: f64, display: &DisplaySettings) -> String {
    if !value.is_finite() {
        return display.placeholder.clone();
    }
    format!("{}%", format_number(value, 2))
}

/// Currency or placeholder.
pub fn format_optional_currency(value: Option<f64>, display: &DisplaySettings) -> String {
    match value {
        Some(v) => format_currency(v, display),
        None => display.placeholder.clone(),
    }
}

/// Any displayable value or placeholder.
pub fn format_optional<T: std::fmt::Display>(value: Option<T>, display: &DisplaySettings) -> String {
    match value {
        Some(v) => v.to_string(),
        None => display.placeholder.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0, 2), "0.00");
        assert_eq!(format_number(-0.001, 2), "0.00");
        assert_eq!(format_number(1666.666, 2), "1,666.67");
        assert_eq!(format_number(1000000.0, 0), "1,000,000");
    }

    #[test]
    fn test_currency_symbol_override() {
        let display = DisplaySettings {
            currency_symbol: "€".to_string(),
            decimals: 0,
            placeholder: "n/a".to_string(),
        };
        assert_eq!(format_currency(2500.4, &display), "€2,500");
        assert_eq!(format_currency(f64::NAN, &display), "n/a");
    }

    #[test]
    fn test_format_percent() {
        let display = DisplaySettings::default();
        assert_eq!(format_percent(7.254, &display), "7.25%");
        assert_eq!(format_percent(f64::INFINITY, &display), "—");
    }

    #[test]
    fn test_format_optional() {
        let display = DisplaySettings::default();
        assert_eq!(format_optional(Some(42), &display), "42");
        assert_eq!(format_optional::<u32>(None, &display), "—");
    }
}
