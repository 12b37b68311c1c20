use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Pure value-normalization helpers (spec §4.7). Applied cell-by-cell by
/// the Executor immediately after a row is read off the wire; nothing
/// downstream sees a raw driver type.

pub fn round_decimal(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Zeroes sub-second precision and renders ISO-8601.
pub fn normalize_timestamp(value: NaiveDateTime) -> String {
    value
        .with_nanosecond(0)
        .unwrap_or(value)
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

/// Renders a bare `DATE` cell (no time-of-day component) as ISO-8601.
pub fn normalize_date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub fn normalize_string(value: &str, strip_strings: bool) -> String {
    if strip_strings {
        value.trim().to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_configured_precision() {
        assert_eq!(round_decimal(1.23456, 4), 1.2346);
        assert_eq!(round_decimal(1.0, 0), 1.0);
    }

    #[test]
    fn zeroes_sub_second_precision() {
        let with_nanos = NaiveDateTime::parse_from_str("2024-01-01 12:30:45.123456", "%Y-%m-%d %H:%M:%S%.f").unwrap();
        assert_eq!(normalize_timestamp(with_nanos), "2024-01-01T12:30:45");
    }

    #[test]
    fn renders_bare_date_without_time_of_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(normalize_date(date), "2024-01-01");
    }

    #[test]
    fn strips_when_configured() {
        assert_eq!(normalize_string("  hi  ", true), "hi");
        assert_eq!(normalize_string("  hi  ", false), "  hi  ");
    }
}
