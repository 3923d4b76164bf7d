use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;

/// `created_at` layouts seen from the API, most common first.
/// RFC 2822 is tried after these.
const CREATED_AT_FORMATS: &[&str] = &["%a %b %d %H:%M:%S %z %Y", "%a %b %d %Y %H:%M:%S %z"];

/// A zero directly after the start of the string or a run of spaces.
static LEADING_ZERO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^| +)0").expect("leading zero regex should compile"));

/// How an absolute instant is turned into wall-clock time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum LocalZone {
    /// Add the host's *current* local-minus-UTC offset. Ignores DST changes
    /// between the post date and now.
    #[default]
    HostSkew,
    /// Look the instant up in the tz database.
    Named(Tz),
}

impl LocalZone {
    pub fn from_name(name: &str) -> Result<Self> {
        let tz: Tz = name
            .parse()
            .map_err(|e| anyhow!("unknown timezone {:?}: {}", name, e))?;
        Ok(Self::Named(tz))
    }
}

/// Parse a `created_at` value such as `Wed Jun 09 18:31:55 +0000 2010` into UTC.
pub fn parse_created_at(text: &str) -> Result<DateTime<Utc>> {
    for format in CREATED_AT_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    DateTime::parse_from_rfc2822(text)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("unrecognised created_at timestamp: {:?}", text))
}

/// The host's local-minus-UTC offset right now.
pub fn host_skew() -> TimeDelta {
    TimeDelta::seconds(i64::from(Local::now().offset().local_minus_utc()))
}

pub fn to_local(instant: DateTime<Utc>, zone: LocalZone) -> NaiveDateTime {
    match zone {
        LocalZone::HostSkew => instant.naive_utc() + host_skew(),
        LocalZone::Named(tz) => instant.with_timezone(&tz).naive_local(),
    }
}

/// `Wed Jun 9 2010`: abbreviated weekday and month, day without leading zero.
pub fn easy_to_read(local: &NaiveDateTime) -> String {
    let formatted = local.format("%a %b %d %Y").to_string();
    LEADING_ZERO.replace_all(&formatted, "$1").into_owned()
}

/// Parse, localize and format a `created_at` value in one step.
pub fn format_created_at(created_at: &str, zone: LocalZone) -> Result<String> {
    let instant = parse_created_at(created_at)?;
    Ok(easy_to_read(&to_local(instant, zone)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_parse_twitter_layout() {
        let dt = parse_created_at("Wed Jun 09 18:31:55 +0000 2010").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2010, 6, 9, 18, 31, 55).unwrap());
    }

    #[test]
    fn test_parse_subtracts_offset() {
        let dt = parse_created_at("Wed Jun 09 2010 23:31:55 +0500").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2010, 6, 9, 18, 31, 55).unwrap());
    }

    #[test]
    fn test_parse_rfc2822() {
        let dt = parse_created_at("Wed, 09 Jun 2010 18:31:55 +0000").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2010, 6, 9, 18, 31, 55).unwrap());
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_created_at("yesterday").is_err());
    }

    #[test]
    fn test_day_has_no_leading_zero() {
        let local = NaiveDate::from_ymd_opt(2010, 6, 9)
            .unwrap()
            .and_hms_opt(18, 31, 55)
            .unwrap();
        assert_eq!(easy_to_read(&local), "Wed Jun 9 2010");
    }

    #[test]
    fn test_two_digit_day_untouched() {
        let local = NaiveDate::from_ymd_opt(2010, 6, 16)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(easy_to_read(&local), "Wed Jun 16 2010");
    }

    #[test]
    fn test_named_zone_crosses_date_line() {
        let zone = LocalZone::from_name("Asia/Tokyo").unwrap();
        let formatted = format_created_at("Wed Jun 09 18:31:55 +0000 2010", zone).unwrap();
        assert_eq!(formatted, "Thu Jun 10 2010");
    }

    #[test]
    fn test_named_zone_utc() {
        let zone = LocalZone::from_name("UTC").unwrap();
        let formatted = format_created_at("Wed Jun 09 18:31:55 +0000 2010", zone).unwrap();
        assert_eq!(formatted, "Wed Jun 9 2010");
    }

    #[test]
    fn test_unknown_zone_rejected() {
        assert!(LocalZone::from_name("Mars/Olympus_Mons").is_err());
    }

    #[test]
    fn test_host_skew_matches_local_clock() {
        let instant = Utc.with_ymd_and_hms(2010, 6, 9, 12, 0, 0).unwrap();
        let local = to_local(instant, LocalZone::HostSkew);
        assert_eq!(local - instant.naive_utc(), host_skew());
    }
}
