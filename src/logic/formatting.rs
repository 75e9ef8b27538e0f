//! Formatting and display logic
//!
//! Pure functions for turning raw API values into display strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format an amount as Chilean pesos
///
/// Pesos have no minor unit, so the amount is rounded to an integer and
/// grouped with dots as thousands separators.
///
/// # Examples
/// ```
/// use tenderdesk::logic::formatting::format_currency;
///
/// assert_eq!(format_currency(0.0), "$0");
/// assert_eq!(format_currency(1234567.0), "$1.234.567");
/// assert_eq!(format_currency(-2500.4), "-$2.500");
/// ```
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Currency or `-` when the amount is missing
pub fn format_optional_currency(amount: Option<f64>) -> String {
    match amount {
        Some(amount) if amount != 0.0 => format_currency(amount),
        _ => "-".to_string(),
    }
}

pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format an ISO date as `dd-mm-yyyy`, `-` when missing or unreadable
///
/// # Examples
/// ```
/// use tenderdesk::logic::formatting::format_date;
///
/// assert_eq!(format_date(Some("2025-03-07T10:30:00")), "07-03-2025");
/// assert_eq!(format_date(Some("2025-12-01")), "01-12-2025");
/// assert_eq!(format_date(None), "-");
/// ```
pub fn format_date(value: Option<&str>) -> String {
    match value.filter(|v| !v.is_empty()).and_then(parse_timestamp) {
        Some(dt) => dt.format("%d-%m-%Y").to_string(),
        None => "-".to_string(),
    }
}

/// Format an ISO timestamp as `dd-mm-yyyy HH:MM`
pub fn format_datetime(value: Option<&str>) -> String {
    match value.filter(|v| !v.is_empty()).and_then(parse_timestamp) {
        Some(dt) => dt.format("%d-%m-%Y %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Format a byte count with binary units, two decimals at most
///
/// # Examples
/// ```
/// use tenderdesk::logic::formatting::format_file_size;
///
/// assert_eq!(format_file_size(None), "-");
/// assert_eq!(format_file_size(Some(0)), "-");
/// assert_eq!(format_file_size(Some(512)), "512 Bytes");
/// assert_eq!(format_file_size(Some(1536)), "1.5 KB");
/// assert_eq!(format_file_size(Some(1048576)), "1 MB");
/// ```
pub fn format_file_size(bytes: Option<u64>) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    let bytes = match bytes {
        Some(b) if b > 0 => b,
        _ => return "-".to_string(),
    };

    let mut exponent = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && exponent < UNITS.len() - 1 {
        value /= 1024.0;
        exponent += 1;
    }
    let value = (value * 100.0).round() / 100.0;

    format!("{} {}", format_number(value), UNITS[exponent])
}

/// Render a number without a trailing `.0` for whole values
///
/// # Examples
/// ```
/// use tenderdesk::logic::formatting::format_number;
///
/// assert_eq!(format_number(90.0), "90");
/// assert_eq!(format_number(33.5), "33.5");
/// ```
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Number or `-` when missing
pub fn format_optional_number(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "-".to_string())
}

/// Empty or missing text shown as `-`
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_small_values() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(1000.0), "$1.000");
    }

    #[test]
    fn test_format_currency_rounds() {
        assert_eq!(format_currency(1499.5), "$1.500");
        assert_eq!(format_currency(150000000.0), "$150.000.000");
    }

    #[test]
    fn test_format_optional_currency() {
        assert_eq!(format_optional_currency(None), "-");
        assert_eq!(format_optional_currency(Some(0.0)), "-");
        assert_eq!(format_optional_currency(Some(2500.0)), "$2.500");
    }

    #[test]
    fn test_format_date_variants() {
        assert_eq!(format_date(Some("2025-03-07T10:30:00.123456")), "07-03-2025");
        assert_eq!(format_date(Some("2025-03-07T10:30:00+00:00")), "07-03-2025");
        assert_eq!(format_date(Some("")), "-");
        assert_eq!(format_date(Some("not a date")), "-");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime(Some("2025-03-07T10:30:00")), "07-03-2025 10:30");
        assert_eq!(format_datetime(None), "-");
    }

    #[test]
    fn test_format_file_size_units() {
        assert_eq!(format_file_size(Some(1)), "1 Bytes");
        assert_eq!(format_file_size(Some(1024)), "1 KB");
        assert_eq!(format_file_size(Some(2_621_440)), "2.5 MB");
        assert_eq!(format_file_size(Some(1_073_741_824)), "1 GB");
    }

    #[test]
    fn test_format_file_size_caps_at_gb() {
        assert_eq!(format_file_size(Some(2 * 1_099_511_627_776)), "2048 GB");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(85.25), "85.25");
        assert_eq!(format_number(7.333333), "7.33");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("ACME")), "ACME");
    }
}
