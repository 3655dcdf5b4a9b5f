//! Time utilities: "today" in the user's timezone and date parsing.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Calendar date right now in an IANA tz like "Australia/Melbourne".
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| Error::validation(format!("invalid timezone: {tz}")))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

/// Parse a YYYY-MM-DD date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| Error::validation(format!("invalid date '{s}': {e}")))
}

/// Date-only values are taken to start at UTC midnight.
pub fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-02-20").unwrap(), NaiveDate::from_ymd_opt(2026, 2, 20).unwrap());
        assert!(parse_date("20/02/2026").is_err());
    }

    #[test]
    fn test_utc_midnight() {
        let d = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
        assert_eq!(utc_midnight(d).to_rfc3339(), "2026-02-20T00:00:00+00:00");
    }

    #[test]
    fn test_today_rejects_bad_timezone() {
        assert!(today_in("Mars/Olympus").is_err());
        assert!(today_in("Australia/Melbourne").is_ok());
    }
}
