//! Format checks for string-typed fields

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Offset-less timestamp layouts, read as UTC
const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        // dot-atom local part, hostname labels, at least one dot in the domain.
        // Letters and digits are Unicode classes so internationalized addresses pass.
        Regex::new(
            r"^[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+(\.[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+)*@[\p{L}\p{N}]([\p{L}\p{N}-]*[\p{L}\p{N}])?(\.[\p{L}\p{N}]([\p{L}\p{N}-]*[\p{L}\p{N}])?)+$",
        )
        .expect("email pattern compiles")
    })
}

/// Whether `s` is an email address of the form `local@domain.tld`
pub fn is_email(s: &str) -> bool {
    email_regex().is_match(s)
}

/// Parses a timestamp as UTC.
///
/// Accepts RFC 3339, ISO 8601 without an offset, and a bare `YYYY-MM-DD`
/// (midnight). Offset-less forms are taken to be UTC.
pub fn parse_date_time(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Whether `s` parses as a timestamp
pub fn is_date_time(s: &str) -> bool {
    parse_date_time(s).is_some()
}
