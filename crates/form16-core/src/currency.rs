//! Indian Rupee formatting
//!
//! Amounts arrive either as JSON numbers or as strings that may contain
//! thousands separators (`"2,000,000"`). They are rendered whole, rounded half
//! away from zero, with Indian digit grouping: the last three digits form one
//! group and every group above that has two digits (`20,00,000`).

use crate::analysis::Amount;

/// Marker shown for amounts that cannot be read as a number
pub const NOT_AVAILABLE: &str = "N/A";

/// Currency symbol prefixed to rendered amounts
pub const RUPEE: char = '₹';

/// Format an amount with the rupee symbol, or [`NOT_AVAILABLE`]
pub fn format_rupees(amount: Option<&Amount>) -> String {
    match amount.and_then(Amount::value) {
        Some(value) => format!("{}{}", RUPEE, format_indian(value)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format a finite number with Indian grouping and no fraction digits
///
/// Non-finite input yields [`NOT_AVAILABLE`].
pub fn format_indian(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let rounded = value.round();
    if rounded == 0.0 {
        return "0".to_string();
    }

    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_indian(&digits);
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Insert Indian group separators into a string of ASCII digits
pub fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (upper, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = upper.len();
    while end > 2 {
        groups.push(&upper[end - 2..end]);
        end -= 2;
    }
    groups.push(&upper[..end]);
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(last_three);
    out
}

/// Parse the longest numeric prefix of `input`, the way `parseFloat` does
///
/// Leading whitespace is skipped and trailing garbage is ignored, so
/// `"1500 INR"` reads as `1500`. Returns `None` when no digits are found or
/// the value is not finite.
pub fn parse_lenient(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_part = &s[int_start..pos];

    let mut frac_part = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_part = &s[frac_start..end];
        pos = end;
    }

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut exponent = "";
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        // A bare `e` is not part of the number
        if end > digits_start {
            exponent = &s[pos..end];
        }
    }

    let normalized = format!(
        "{}{}.{}{}",
        if negative { "-" } else { "" },
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part },
        exponent
    );

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
