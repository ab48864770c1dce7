//! Conversions between dollar amounts, integer cents and display strings.

/// Render integer cents as a US-dollar display string, e.g. `$1,234.56`
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let remainder = abs % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{remainder:02}")
}

/// Convert a dollar amount to integer cents, rounding to the nearest cent.
///
/// Returns `None` for NaN, infinities and values outside the `i64` range.
pub fn dollars_to_cents(dollars: f64) -> Option<i64> {
    if !dollars.is_finite() {
        return None;
    }
    let cents = (dollars * 100.0).round();
    if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
        return None;
    }
    Some(cents as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "$0.00");
        assert_eq!(format_currency(5), "$0.05");
        assert_eq!(format_currency(15795), "$157.95");
        assert_eq!(format_currency(123456), "$1,234.56");
        assert_eq!(format_currency(100000000), "$1,000,000.00");
        assert_eq!(format_currency(-2500), "-$25.00");
    }

    #[test]
    fn test_dollars_to_cents_rounds() {
        assert_eq!(dollars_to_cents(12.34), Some(1234));
        // 0.29 * 100 is 28.999999999999996 in binary floating point
        assert_eq!(dollars_to_cents(0.29), Some(29));
        assert_eq!(dollars_to_cents(1.005), Some(100));
        assert_eq!(dollars_to_cents(0.0), Some(0));
        assert_eq!(dollars_to_cents(-3.5), Some(-350));
    }

    #[test]
    fn test_dollars_to_cents_rejects_non_finite() {
        assert_eq!(dollars_to_cents(f64::NAN), None);
        assert_eq!(dollars_to_cents(f64::INFINITY), None);
        assert_eq!(dollars_to_cents(1e300), None);
    }
}
