use crate::utils::error::{BigPandaError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Formats accepted when the input carries no UTC offset. UTC is assumed.
const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S",
];

/// Parses an ISO-8601-ish datetime string. RFC 3339 is tried first; inputs
/// without an offset are interpreted as UTC.
pub fn parse_datetime(field: &str, value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Space-separated variant with an explicit offset
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(BigPandaError::DateTimeParse {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Epoch seconds rounded to the nearest second.
pub fn epoch_seconds(dt: DateTime<Utc>) -> i64 {
    (dt.timestamp_millis() as f64 / 1000.0).round() as i64
}

/// Fractional epoch seconds, millisecond precision.
pub fn epoch_seconds_f64(dt: DateTime<Utc>) -> f64 {
    dt.timestamp_millis() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_datetime("start_time", "2025-05-12T07:48:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 5, 12, 5, 48, 0).unwrap());
    }

    #[test]
    fn parses_rfc3339_utc() {
        let dt = parse_datetime("start_time", "2025-05-12T07:48:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 5, 12, 7, 48, 0).unwrap());
    }

    #[test]
    fn assumes_utc_without_offset() {
        let dt = parse_datetime("end_time", "2025-05-12 07:48:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 5, 12, 7, 48, 0).unwrap());

        let dt = parse_datetime("end_time", "2025-05-12T07:48").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 5, 12, 7, 48, 0).unwrap());
    }

    #[test]
    fn parses_date_only_as_midnight_utc() {
        let dt = parse_datetime("start_time", "2025-05-12").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_datetime("start_time", "not a date").unwrap_err();
        assert!(matches!(
            err,
            crate::utils::error::BigPandaError::DateTimeParse { ref field, .. } if field == "start_time"
        ));
    }

    #[test]
    fn epoch_seconds_rounds_to_nearest() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::milliseconds(700);
        assert_eq!(epoch_seconds(dt), dt.timestamp() + 1);

        let dt = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
            + chrono::Duration::milliseconds(200);
        assert_eq!(epoch_seconds(dt), dt.timestamp());
    }

    #[test]
    fn epoch_seconds_f64_keeps_milliseconds() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(epoch_seconds_f64(dt), 1_704_164_645.25);
    }
}
