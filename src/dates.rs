// src/dates.rs
//! Date helpers shared by extraction (query window) and transformation
//! (timestamp parsing, retention threshold).

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Calendar date `days_back` days before `today`.
pub fn days_before(today: NaiveDate, days_back: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days_back)))
        .unwrap_or(NaiveDate::MIN)
}

/// `YYYY-MM-DD` string for the date `days_back` days before the local today.
pub fn date_str(days_back: u32) -> String {
    days_before(Local::now().date_naive(), days_back)
        .format("%Y-%m-%d")
        .to_string()
}

/// Midnight UTC of the date `max_age_days` before `today`.
pub fn threshold(today: NaiveDate, max_age_days: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&days_before(today, max_age_days).and_time(NaiveTime::MIN))
}

/// Parse a `publishedAt` value into a UTC timestamp.
///
/// Accepts RFC 3339 (`2025-12-01T20:07:40Z`), the space-separated form produced
/// when timestamps round-trip through CSV (`2025-12-01 20:07:40+00:00`), naive
/// date-times (read as UTC) and bare dates. Anything else yields `None`.
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%.f%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN)))
}
