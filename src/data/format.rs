//! Display formatting for stake amounts and uptime values.

use serde_json::Value;

/// Maximum number of fraction digits shown for a stake amount.
const MAX_FRACTION_DIGITS: u32 = 3;

/// 2^53: above this every f64 is a whole number.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Parse the longest leading decimal number in `s`, e.g. "12.5 AVAX" -> 12.5.
///
/// Leading whitespace is skipped. Returns `None` when no digits are found or
/// the result is not finite.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce a JSON value that may be a number or a numeric string.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Coerce a stake field, defaulting to zero when it cannot be parsed.
pub fn coerce_stake(value: Option<&Value>) -> f64 {
    value.and_then(coerce_number).unwrap_or(0.0)
}

/// Format a stake amount with thousands separators, e.g. 1234.5 -> "1,234.5".
///
/// At most three fraction digits are kept (rounded half away from zero) and
/// trailing zeros are trimmed.
pub fn format_stake(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let abs = value.abs();
    let (whole, fraction) = if abs < EXACT_INTEGER_LIMIT {
        let scale = 10u64.pow(MAX_FRACTION_DIGITS);
        let scaled = (abs * scale as f64).round() as u64;
        let digits = format!("{:0width$}", scaled % scale, width = MAX_FRACTION_DIGITS as usize);
        ((scaled / scale).to_string(), digits)
    } else {
        // Every f64 this large is an integer; render it exactly
        (format!("{:.0}", abs), String::new())
    };
    let fraction = fraction.trim_end_matches('0');

    let mut out = String::with_capacity(whole.len() + whole.len() / 3 + fraction.len() + 2);
    if value.is_sign_negative() && (whole != "0" || !fraction.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(&whole));

    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }

    out
}

/// Coerce and format a raw stake value; unparseable input formats as "0".
pub fn format_stake_value(value: &Value) -> String {
    format_stake(coerce_stake(Some(value)))
}

/// Format an uptime percentage without the percent sign.
pub fn format_uptime(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
