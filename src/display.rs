//! Pure display formatting for quotes.
//!
//! Stateless helpers turning numeric quote fields into the strings the
//! presentation layer renders. Same input always yields the same output;
//! nothing here reads shared state, so the functions are safe to call
//! from any thread.

use crate::defs::COMPACT_THRESHOLD;

/// Formats a value as US-dollar currency.
///
/// With `compact` set and a magnitude of at least one million the value
/// is abbreviated with an M/B/T suffix and at most two fractional digits
/// (`$1.27T`, `$3.5M`). Otherwise the value is rendered with thousands
/// grouping and a fixed number of fractional digits: four below one
/// dollar, two from one dollar up.
///
/// # Examples
///
/// ```
/// use market_ticker::display::format_currency;
/// assert_eq!(format_currency(64289.78, false), "$64,289.78");
/// assert_eq!(format_currency(0.4523, false), "$0.4523");
/// assert_eq!(format_currency(1265789012345.0, true), "$1.27T");
/// ```
pub fn format_currency(value: f64, compact: bool) -> String {
    if compact && value >= COMPACT_THRESHOLD {
        return format!("${}", compact_magnitude(value));
    }

    let decimals = if value < 1.0 { 4 } else { 2 };
    format!("${}", group_thousands(&format!("{:.*}", decimals, value)))
}

/// Formats a percentage move: `+` prefix when non-negative, `%` suffix,
/// exactly two fractional digits.
///
/// The input is expected to be rounded to two decimals already (the
/// perturbation model does this); negative zero renders as `+0.00%`.
///
/// # Examples
///
/// ```
/// use market_ticker::display::format_change_pct;
/// assert_eq!(format_change_pct(2.34), "+2.34%");
/// assert_eq!(format_change_pct(-1.12), "-1.12%");
/// ```
pub fn format_change_pct(change_pct: f64) -> String {
    if change_pct >= 0.0 {
        // abs() turns -0.0 into 0.0 so the sign never doubles up.
        format!("+{:.2}%", change_pct.abs())
    } else {
        format!("{:.2}%", change_pct)
    }
}

/// Scales a value of at least one million into M/B/T notation with at
/// most two fractional digits, trailing zeros trimmed.
fn compact_magnitude(value: f64) -> String {
    let (scaled, suffix) = if value >= 1e12 {
        (value / 1e12, "T")
    } else if value >= 1e9 {
        (value / 1e9, "B")
    } else {
        (value / 1e6, "M")
    };

    let mut body = format!("{:.2}", scaled);
    while body.ends_with('0') {
        body.pop();
    }
    if body.ends_with('.') {
        body.pop();
    }
    format!("{}{}", body, suffix)
}

/// Inserts `,` thousands separators into a `-?[0-9]+(\.[0-9]+)?` string.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
