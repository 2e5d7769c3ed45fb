//! Lenient local-time parsing.
//!
//! All timestamps at the engine boundary are ISO-8601-like strings with no
//! offset; they are localized into one configured timezone before any
//! comparison. The timezone is injected by the caller rather than read
//! from a module-level constant, so every operation stays reproducible.
//!
//! Accepted formats, in order: `%Y-%m-%dT%H:%M:%S`, then bare `%Y-%m-%d`
//! (interpreted as local midnight).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::TimeParseError;

/// Parse a timestamp string and localize it to `tz`.
pub fn parse_timestamp(raw: &str, tz: Tz) -> Result<DateTime<Tz>, TimeParseError> {
    let naive = parse_naive(raw)?;
    // Ambiguous local times (DST folds) resolve to the earlier instant.
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| TimeParseError::NonexistentLocalTime {
            raw: raw.to_string(),
            timezone: tz.name().to_string(),
        })
}

/// Calendar date portion of a timestamp, without localization.
pub fn parse_date_portion(raw: &str) -> Result<NaiveDate, TimeParseError> {
    parse_naive(raw).map(|dt| dt.date())
}

/// Localize `date` at `hour`:00 in `tz`.
pub fn at_hour(date: NaiveDate, hour: u32, tz: Tz) -> Option<DateTime<Tz>> {
    let naive = date.and_hms_opt(hour, 0, 0)?;
    tz.from_local_datetime(&naive).earliest()
}

/// Format a local timestamp the way the engine exchanges them
/// (naive local ISO, no offset suffix).
pub fn format_local(dt: &DateTime<Tz>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn parse_naive(raw: &str) -> Result<NaiveDateTime, TimeParseError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| TimeParseError::Unparseable {
            raw: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use chrono_tz::Asia::Shanghai;

    #[test]
    fn test_parse_datetime_format() {
        let dt = parse_timestamp("2025-03-03T14:30:00", Shanghai).unwrap();
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        let dt = parse_timestamp("2025-03-03", Shanghai).unwrap();
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.minute(), 0);
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(matches!(
            parse_timestamp("not-a-date", Shanghai),
            Err(TimeParseError::Unparseable { .. })
        ));
        assert!(parse_timestamp("03/03/2025", Shanghai).is_err());
    }

    #[test]
    fn test_date_portion_from_datetime() {
        let date = parse_date_portion("2025-03-03T23:59:59").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
    }

    #[test]
    fn test_at_hour() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let dt = at_hour(date, 9, Shanghai).unwrap();
        assert_eq!(dt.hour(), 9);
        assert_eq!(format_local(&dt), "2025-03-03T09:00:00");
    }

    #[test]
    fn test_format_round_trip() {
        let raw = "2025-03-03T09:15:00";
        let dt = parse_timestamp(raw, Shanghai).unwrap();
        assert_eq!(format_local(&dt), raw);
    }
}
