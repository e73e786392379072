//! Cell parsers shared by the candle and fill readers.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Epoch values at or above this are milliseconds (13+ digits).
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Offset-carrying formats tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Naive formats.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a decimal in plain or scientific notation.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Parse epoch milliseconds, tolerating a trailing `.0`.
pub fn parse_millis(raw: &str) -> Option<i64> {
    let s = raw.trim();
    s.parse::<i64>().ok().or_else(|| {
        let d = parse_decimal(s)?;
        if d.fract().is_zero() {
            i64::try_from(d).ok()
        } else {
            None
        }
    })
}

/// Parse a candle time cell into a naive timestamp.
///
/// Offsets are stripped keeping the wall-clock value, so
/// `2021-10-01 08:00:00+08:00` becomes `2021-10-01 08:00:00`. Bare integers
/// are epoch seconds, or milliseconds when 13+ digits.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(epoch) = parse_millis(s) {
        let dt = if epoch.abs() >= MILLIS_THRESHOLD {
            DateTime::from_timestamp_millis(epoch)
        } else {
            DateTime::from_timestamp(epoch, 0)
        };
        return dt.map(|d| d.naive_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn decimal_plain_and_scientific() {
        assert_eq!(parse_decimal("43210.5"), Some(dec!(43210.5)));
        assert_eq!(parse_decimal(" 12 "), Some(dec!(12)));
        assert_eq!(parse_decimal("1.5e-3"), Some(dec!(0.0015)));
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn millis_accepts_float_form() {
        assert_eq!(parse_millis("1633046400000"), Some(1_633_046_400_000));
        assert_eq!(parse_millis("1633046400000.0"), Some(1_633_046_400_000));
        assert_eq!(parse_millis("1633046400000.5"), None);
    }

    #[test]
    fn timestamp_with_offset_keeps_wall_clock() {
        assert_eq!(
            parse_timestamp("2021-10-01 08:00:00+08:00"),
            Some(dt("2021-10-01 08:00:00"))
        );
        assert_eq!(
            parse_timestamp("2021-10-01T08:00:00+08:00"),
            Some(dt("2021-10-01 08:00:00"))
        );
        assert_eq!(
            parse_timestamp("2021-10-01 08:00:00+0800"),
            Some(dt("2021-10-01 08:00:00"))
        );
    }

    #[test]
    fn timestamp_naive_forms() {
        assert_eq!(
            parse_timestamp("2021-10-01 00:01:00"),
            Some(dt("2021-10-01 00:01:00"))
        );
        assert_eq!(
            parse_timestamp("2021-10-01T00:01:00"),
            Some(dt("2021-10-01 00:01:00"))
        );
        assert_eq!(parse_timestamp("2021-10-01"), Some(dt("2021-10-01 00:00:00")));
    }

    #[test]
    fn timestamp_epoch_seconds_and_millis() {
        assert_eq!(
            parse_timestamp("1633046400"),
            Some(dt("2021-10-01 00:00:00"))
        );
        assert_eq!(
            parse_timestamp("1633046460000"),
            Some(dt("2021-10-01 00:01:00"))
        );
    }

    #[test]
    fn timestamp_garbage_is_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
