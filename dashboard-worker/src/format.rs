//! Display formatting for metric values
//!
//! Every formatter is pure and total: missing or NaN input yields
//! [`NOT_AVAILABLE`] instead of a zero or a panic.
//!
//! Magnitude suffixes are checked largest first. Reordering the threshold
//! tables below changes results (1.5e9 would print as "$1500.00M").

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Sentinel for absent values
pub const NOT_AVAILABLE: &str = "N/A";

const CURRENCY_SUFFIXES: [(f64, &str); 4] = [(1.0e12, "T"), (1.0e9, "B"), (1.0e6, "M"), (1.0e3, "K")];

const VOLUME_SUFFIXES: [(f64, &str); 3] = [(1.0e9, "B"), (1.0e6, "M"), (1.0e3, "K")];

/// Indonesian short month names, as rendered by the `id-ID` locale
const ID_SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Number grouping conventions for a locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub group_separator: char,
    pub decimal_separator: char,
    pub currency_prefix: &'static str,
}

impl NumberLocale {
    /// `id-ID` with IDR, the sales dashboard locale
    pub const ID_ID: NumberLocale = NumberLocale {
        group_separator: '.',
        decimal_separator: ',',
        currency_prefix: "Rp\u{a0}",
    };

    /// `en-US`, used for volumes on the stock dashboard
    pub const EN_US: NumberLocale = NumberLocale {
        group_separator: ',',
        decimal_separator: '.',
        currency_prefix: "$",
    };
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Insert group separators into a run of ASCII digits
fn group_digits(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Locale-grouped integer, rounded half away from zero
pub fn format_grouped(value: f64, locale: NumberLocale) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}{}", group_digits(&digits, locale.group_separator))
}

/// Locale-grouped number with up to three fraction digits, trailing zeros trimmed
pub fn format_locale_number(value: f64, locale: NumberLocale) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');
    let sign = if value < 0.0 && (int_part != "0" || !frac.is_empty()) { "-" } else { "" };
    let grouped = group_digits(int_part, locale.group_separator);
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{}{frac}", locale.decimal_separator)
    }
}

/// Currency with zero decimal places in the given locale (`Rp 1.234.568`)
pub fn format_currency_in(value: f64, locale: NumberLocale) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let grouped = format_grouped(value.abs(), locale);
    if value.round() < 0.0 {
        format!("-{}{grouped}", locale.currency_prefix)
    } else {
        format!("{}{grouped}", locale.currency_prefix)
    }
}

/// IDR currency with zero decimal places
pub fn format_currency(value: f64) -> String {
    format_currency_in(value, NumberLocale::ID_ID)
}

/// Magnitude-abbreviated dollars when `is_currency`, else a plain 2-decimal number
pub fn format_value(value: Option<f64>, is_currency: bool) -> String {
    let Some(value) = present(value) else {
        return NOT_AVAILABLE.to_string();
    };
    if !is_currency {
        return format!("{value:.2}");
    }
    for (threshold, suffix) in CURRENCY_SUFFIXES {
        if value.abs() >= threshold {
            return format!("${:.2}{suffix}", value / threshold);
        }
    }
    format!("${value:.2}")
}

/// Fraction on a 0-1 scale shown as a percentage with 2 decimals
pub fn format_percentage(value: Option<f64>) -> String {
    match present(value) {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Share volume: B/M/K with 1 decimal, else an en-US grouped number
pub fn format_volume(value: Option<f64>) -> String {
    let Some(value) = present(value) else {
        return NOT_AVAILABLE.to_string();
    };
    for (threshold, suffix) in VOLUME_SUFFIXES {
        if value >= threshold {
            return format!("{:.1}{suffix}", value / threshold);
        }
    }
    format_locale_number(value, NumberLocale::EN_US)
}

/// Dollar price with 2 decimals
pub fn format_price(value: Option<f64>) -> String {
    match present(value) {
        Some(v) => format!("${v:.2}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// One-decimal ratio for headline tiles; zero counts as missing
pub fn format_ratio(value: Option<f64>) -> String {
    match present(value) {
        Some(v) if v != 0.0 => format!("{v:.1}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `value` as a percentage of `total` with 1 decimal
pub fn format_share(value: f64, total: f64) -> String {
    if total == 0.0 || !total.is_finite() || !value.is_finite() {
        return "0.0".to_string();
    }
    format!("{:.1}", value / total * 100.0)
}

/// Parse the timestamp shapes the backend emits
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%a, %d %b %Y %H:%M:%S GMT"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// en-US short date (`3/7/2024`); unparseable input is echoed back
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => format!("{}/{}/{}", dt.month(), dt.day(), dt.year()),
        None => raw.to_string(),
    }
}

/// `YYYY-MM` as an `id-ID` short month with 2-digit year (`Mei 24`)
pub fn format_month_label(raw: &str) -> String {
    let parsed = raw
        .trim()
        .split_once('-')
        .and_then(|(y, m)| Some((y.parse::<i32>().ok()?, m.get(..2).unwrap_or(m).parse::<usize>().ok()?)));
    match parsed {
        Some((year, month)) if (1..=12).contains(&month) => {
            format!("{} {:02}", ID_SHORT_MONTHS[month - 1], year.rem_euclid(100))
        }
        _ => raw.to_string(),
    }
}

/// Minimal HTML escaping for backend-provided text
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// First `max_chars` characters followed by `...`, or `None` when empty
pub fn truncate_summary(text: &str, max_chars: usize) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    let head: String = text.chars().take(max_chars).collect();
    Some(format!("{head}..."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_render_sentinel() {
        for value in [None, Some(f64::NAN)] {
            assert_eq!(format_value(value, true), "N/A");
            assert_eq!(format_value(value, false), "N/A");
            assert_eq!(format_percentage(value), "N/A");
            assert_eq!(format_volume(value), "N/A");
            assert_eq!(format_price(value), "N/A");
            assert_eq!(format_ratio(value), "N/A");
        }
    }

    #[test]
    fn test_format_value_currency_magnitudes() {
        assert_eq!(format_value(Some(1_500_000_000.0), true), "$1.50B");
        assert_eq!(format_value(Some(999.0), true), "$999.00");
        assert_eq!(format_value(Some(2_300_000_000_000.0), true), "$2.30T");
        assert_eq!(format_value(Some(45_670_000.0), true), "$45.67M");
        assert_eq!(format_value(Some(1_000.0), true), "$1.00K");
        assert_eq!(format_value(Some(-3_200_000.0), true), "$-3.20M");
    }

    #[test]
    fn test_format_value_largest_threshold_wins() {
        // Exactly on a boundary must pick the larger suffix
        assert_eq!(format_value(Some(1.0e9), true), "$1.00B");
        assert_eq!(format_value(Some(1.0e12), true), "$1.00T");
    }

    #[test]
    fn test_format_value_plain() {
        assert_eq!(format_value(Some(15.234), false), "15.23");
        assert_eq!(format_value(Some(1_500_000.0), false), "1500000.00");
        assert_eq!(format_value(Some(-0.5), false), "-0.50");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(Some(0.1234)), "12.34%");
        assert_eq!(format_percentage(Some(-0.05)), "-5.00%");
        assert_eq!(format_percentage(Some(0.0)), "0.00%");
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(Some(2_500.0)), "2.5K");
        assert_eq!(format_volume(Some(12_300_000.0)), "12.3M");
        assert_eq!(format_volume(Some(4_200_000_000.0)), "4.2B");
        assert_eq!(format_volume(Some(999.0)), "999");
        assert_eq!(format_volume(Some(0.0)), "0");
        assert_eq!(format_volume(Some(12.5)), "12.5");
    }

    #[test]
    fn test_format_currency_idr() {
        assert_eq!(format_currency(1_234_567.6), "Rp\u{a0}1.234.568");
        assert_eq!(format_currency(0.0), "Rp\u{a0}0");
        assert_eq!(format_currency(950.0), "Rp\u{a0}950");
        assert_eq!(format_currency(-15_000.0), "-Rp\u{a0}15.000");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_grouped(12_345.0, NumberLocale::ID_ID), "12.345");
        assert_eq!(format_grouped(1_000_000.0, NumberLocale::EN_US), "1,000,000");
        assert_eq!(format_grouped(100.0, NumberLocale::ID_ID), "100");
        assert_eq!(format_locale_number(1234.5, NumberLocale::EN_US), "1,234.5");
    }

    #[test]
    fn test_format_ratio_and_price() {
        assert_eq!(format_ratio(Some(23.456)), "23.5");
        assert_eq!(format_ratio(Some(0.0)), "N/A");
        assert_eq!(format_price(Some(182.5)), "$182.50");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(25.0, 100.0), "25.0");
        assert_eq!(format_share(1.0, 3.0), "33.3");
        assert_eq!(format_share(5.0, 0.0), "0.0");
    }

    #[test]
    fn test_dates() {
        assert_eq!(format_date("2024-03-07T00:00:00Z"), "3/7/2024");
        assert_eq!(format_date("2024-12-31"), "12/31/2024");
        assert_eq!(format_date("2024-01-02 09:30:00"), "1/2/2024");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(format_month_label("2024-05"), "Mei 24");
        assert_eq!(format_month_label("2023-12"), "Des 23");
        assert_eq!(format_month_label("2024-08-01"), "Agu 24");
        assert_eq!(format_month_label("2024-13"), "2024-13");
    }

    #[test]
    fn test_escape_and_truncate() {
        assert_eq!(escape_html("<b>A&B</b>"), "&lt;b&gt;A&amp;B&lt;/b&gt;");
        assert_eq!(truncate_summary("abcdef", 3).as_deref(), Some("abc..."));
        assert_eq!(truncate_summary("", 3), None);
    }
}
