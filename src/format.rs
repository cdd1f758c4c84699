//! Number formatting shared by the widgets.
//!
//! Two flavours: the plain form the calculator shows and stores in its
//! history, and a grouped form with thousand separators used for conversion
//! results.

/// Format a number the way the calculator displays it.
///
/// Shortest decimal that round-trips, no trailing `.0`, `NaN` for the
/// invalid-arithmetic sentinel and `Infinity`/`-Infinity` for overflow.
/// Magnitudes of `1e21` and up, or below `1e-6`, switch to exponent form.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        // Covers -0.0 as well
        "0".to_string()
    } else {
        let magnitude = value.abs();
        if (1e-6..1e21).contains(&magnitude) {
            format!("{}", value)
        } else {
            exponential(value)
        }
    }
}

/// `1e+21`, `1.5e-7`: shortest mantissa, signed exponent.
fn exponential(value: f64) -> String {
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}

/// Parse a display string into a number.
///
/// Anything that isn't a number becomes `NaN` rather than an error, so a
/// malformed display just keeps flowing through the arithmetic.
pub fn parse_number(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Format a number with thousand separators and at most
/// `max_fraction_digits` fractional digits (trailing zeros dropped).
pub fn format_grouped(value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return format_number(value);
    }

    let digits = max_fraction_digits.min(15);
    let formatted = format!("{:.*}", digits, value.abs());
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    let (int_part, dec_part) = match trimmed.find('.') {
        Some(dot_pos) => trimmed.split_at(dot_pos),
        None => (trimmed, ""),
    };

    // Rounding can turn a tiny negative into zero; don't print "-0"
    let is_negative = value < 0.0 && trimmed != "0";
    let grouped = group_thousands(int_part);

    if is_negative {
        format!("-{}{}", grouped, dec_part)
    } else {
        format!("{}{}", grouped, dec_part)
    }
}

/// Insert a comma every three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
