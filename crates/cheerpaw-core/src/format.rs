//! Number formatting for displayed balances.
//!
//! Mirrors the `en-US` output of `Number.prototype.toLocaleString()`:
//! comma thousands separators, at most three fraction digits with trailing
//! zeros trimmed.

/// Group the digits of an integer: `1200` → `"1,200"`.
pub fn group_thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Format any number the way the site shows balances.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::new();
    let is_zero = int_part.chars().all(|c| c == '0') && frac.is_empty();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1200), "1,200");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_format_number_integers() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(1200.0), "1,200");
        assert_eq!(format_number(-7000.0), "-7,000");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_number_fractions() {
        assert_eq!(format_number(1200.5), "1,200.5");
        assert_eq!(format_number(0.12345), "0.123");
        assert_eq!(format_number(2.0004), "2");
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "∞");
    }
}
