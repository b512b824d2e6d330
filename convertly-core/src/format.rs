//! Display-side number handling
//!
//! Parsing of user-typed input and rendering of conversion results. The
//! converters themselves only ever see `f64`.

/// Parse user input the lenient way a text field expects.
///
/// Surrounding whitespace is ignored and the longest numeric prefix is used,
/// so `"12abc"` reads as 12. Returns `None` when no number can be read.
pub fn parse_input(input: &str) -> Option<f64> {
    let s = input.trim();
    let end = numeric_prefix_len(s);
    if end == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

/// Length of the leading `[+-]digits[.digits][e[+-]digits]` run
fn numeric_prefix_len(s: &str) -> usize {
    let b = s.as_bytes();
    let mut i = 0;

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let frac_start = i + 1;
        let mut k = frac_start;
        while k < b.len() && b[k].is_ascii_digit() {
            k += 1;
        }
        if digits > 0 || k > frac_start {
            digits += k - frac_start;
            i = k;
        }
    }

    if digits == 0 {
        return 0;
    }

    // Exponent only counts when it has digits
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut k = i + 1;
        if k < b.len() && (b[k] == b'+' || b[k] == b'-') {
            k += 1;
        }
        let exp_start = k;
        while k < b.len() && b[k].is_ascii_digit() {
            k += 1;
        }
        if k > exp_start {
            i = k;
        }
    }

    i
}

/// Scientific notation with four fraction digits and a signed exponent
/// (`1.2346e+15`, `1.0000e-7`).
pub fn format_exponential(value: f64) -> String {
    let raw = format!("{:.4e}", value);
    match raw.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => raw,
    }
}

/// Render a conversion result for display.
///
/// Tiny and huge magnitudes switch to scientific notation. Everything else
/// gets 2 decimals, or 4 below 1, or 6 below 0.01, with trailing zeros
/// dropped.
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }

    let abs = value.abs();
    if abs < 0.00001 && value != 0.0 {
        return format_exponential(value);
    }
    if abs > 1e12 {
        return format_exponential(value);
    }

    let mut decimals = 2;
    if abs > 0.0 && abs < 1.0 {
        decimals = 4;
    }
    if abs > 0.0 && abs < 0.01 {
        decimals = 6;
    }

    let fixed = format!("{:.*}", decimals, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
