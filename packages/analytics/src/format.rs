//! German-locale display formatting for KPI strings.

/// Formats a count with `.` thousands separators ("1.234.567").
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;

    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (idx + 3 - offset) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Formats a percentage with one decimal, a decimal comma, and a
/// ` %` suffix ("33,3 %").
#[must_use]
pub fn format_pct(value: f64) -> String {
    format!("{value:.1} %").replace('.', ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separates_thousands_with_dots() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1.000");
        assert_eq!(format_count(12_345), "12.345");
        assert_eq!(format_count(1_234_567), "1.234.567");
    }

    #[test]
    fn formats_percentages_with_decimal_comma() {
        assert_eq!(format_pct(0.0), "0,0 %");
        assert_eq!(format_pct(33.3), "33,3 %");
        assert_eq!(format_pct(100.0), "100,0 %");
    }
}
