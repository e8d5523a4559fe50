// ABOUTME: Flexible date parsing for the dates shown in the review table.
// ABOUTME: Normalizes listing dates ("Jan 05, 2024", "Mar 2019", "1965") to the export's YYYY/MM/DD form.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::ExportError;

/// Output format of every date column in the export.
pub const EXPORT_DATE_FORMAT: &str = "%Y/%m/%d";

/// Full dates as the listing and the export render them.
const FULL_DATE_PATTERNS: &[&str] = &[
    "%b %d, %Y", // Jan 05, 2024
    "%b %e, %Y", // Jan 5, 2024
    "%B %d, %Y", // January 05, 2024
    "%B %e, %Y", // January 5, 2024
    "%b %e %Y",  // Jan 5 2024
    "%B %e %Y",  // January 5 2024
    "%d %b %Y",  // 05 Jan 2024
    "%d %B %Y",  // 05 January 2024
    "%e %b, %Y", // 5 Jan, 2024
    "%e %B, %Y", // 5 January, 2024
    "%Y/%m/%d",  // 2024/01/05
    "%Y-%m-%d",  // 2024-01-05
    "%m/%d/%Y",  // 01/05/2024
];

static ORDINAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap());

static SEPT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bsept\b").unwrap());

static MONTH_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)\.?,?\s+(\d{4})$").unwrap());

static YEAR_MONTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})$").unwrap());

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());

/// Drops day ordinals ("1st" to "1"), spells "Sept" the way chrono expects, and
/// collapses whitespace.
fn normalize_date_text(s: &str) -> String {
    let s = ORDINAL_RE.replace_all(s, "$1");
    let s = SEPT_RE.replace_all(&s, "Sep");
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a date as shown in the review table.
///
/// Full dates are tried first, then month-and-year ("Mar 2019", "2019-03") and
/// year-only ("1965") values, which resolve to the first day of the period. Anything
/// else falls back to `dateparser` for looser formats, except bare digit runs, which
/// it would read as Unix timestamps.
pub fn parse_listing_date(s: &str) -> Result<NaiveDate, ExportError> {
    let original = s.trim();
    let s = normalize_date_text(original);
    let s = s.as_str();
    let parse_err = || ExportError::DateParse(original.to_string());
    if s.is_empty() {
        return Err(parse_err());
    }

    for pat in FULL_DATE_PATTERNS {
        if let Ok(date) = NaiveDate::parse_from_str(s, pat) {
            return Ok(date);
        }
    }

    if let Some(caps) = MONTH_YEAR_RE.captures(s) {
        let padded = format!("1 {} {}", &caps[1], &caps[2]);
        for pat in ["%d %b %Y", "%d %B %Y"] {
            if let Ok(date) = NaiveDate::parse_from_str(&padded, pat) {
                return Ok(date);
            }
        }
    }

    if let Some(caps) = YEAR_MONTH_RE.captures(s) {
        let date = caps[1]
            .parse::<i32>()
            .ok()
            .zip(caps[2].parse::<u32>().ok())
            .and_then(|(year, month)| NaiveDate::from_ymd_opt(year, month, 1));
        return date.ok_or_else(parse_err);
    }

    if YEAR_RE.is_match(s) {
        return s
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .ok_or_else(parse_err);
    }

    if s.chars().all(|c| c.is_ascii_digit()) {
        return Err(parse_err());
    }

    // Parse in UTC so a midnight date is not shifted by the local offset.
    dateparser::parse_with_timezone(s, &Utc)
        .map(|dt| dt.date_naive())
        .map_err(|_| parse_err())
}

/// Reformats a listing date to `YYYY/MM/DD`, or `None` if it cannot be parsed.
pub fn reformat_date(s: &str) -> Option<String> {
    match parse_listing_date(s) {
        Ok(date) => Some(date.format(EXPORT_DATE_FORMAT).to_string()),
        Err(err) => {
            debug!(%err, "date left empty");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_short_month() {
        assert_eq!(reformat_date("Jan 05, 2024").as_deref(), Some("2024/01/05"));
        assert_eq!(reformat_date("Dec 1, 2019").as_deref(), Some("2019/12/01"));
    }

    #[test]
    fn test_long_month() {
        assert_eq!(
            reformat_date("September 14, 2021").as_deref(),
            Some("2021/09/14")
        );
    }

    #[test]
    fn test_iso_and_slash_dates() {
        assert_eq!(reformat_date("2020-02-29").as_deref(), Some("2020/02/29"));
        assert_eq!(reformat_date("2020/02/29").as_deref(), Some("2020/02/29"));
    }

    #[test]
    fn test_month_year_resolves_to_first_day() {
        assert_eq!(reformat_date("Mar 2019").as_deref(), Some("2019/03/01"));
        assert_eq!(reformat_date("March 2019").as_deref(), Some("2019/03/01"));
    }

    #[test]
    fn test_year_only_resolves_to_january_first() {
        assert_eq!(reformat_date("1965").as_deref(), Some("1965/01/01"));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(
            reformat_date("\n   Jan 05, 2024\n ").as_deref(),
            Some("2024/01/05")
        );
    }

    #[test]
    fn test_reformat_is_idempotent() {
        for input in ["Jan 05, 2024", "Mar 2019", "1965", "2001-07-04"] {
            let once = reformat_date(input).unwrap();
            let twice = reformat_date(&once).unwrap();
            assert_eq!(once, twice, "input {input:?}");
        }
    }

    #[test]
    fn test_listing_date_variants() {
        let cases = [
            ("Jan 5 2024", "2024/01/05"),
            ("January 5 2024", "2024/01/05"),
            ("5 Jan, 2024", "2024/01/05"),
            ("5 January, 2024", "2024/01/05"),
            ("1st Jan 2020", "2020/01/01"),
            ("January 2nd, 2020", "2020/01/02"),
            ("Mar 3rd 2021", "2021/03/03"),
            ("24th December 1999", "1999/12/24"),
            ("Sept 2019", "2019/09/01"),
            ("Sept 15, 2020", "2020/09/15"),
            ("Sep 15, 2020", "2020/09/15"),
            ("Mar. 2019", "2019/03/01"),
            ("2019-03", "2019/03/01"),
            ("Jan  05,   2024", "2024/01/05"),
        ];
        for (input, expected) in cases {
            assert_eq!(reformat_date(input).as_deref(), Some(expected), "input {input:?}");
        }
    }

    #[test]
    fn test_digit_runs_are_not_timestamps() {
        assert_eq!(reformat_date("1234567890"), None);
        assert_eq!(reformat_date("20240105"), None);
        assert_eq!(reformat_date("2019-13"), None);
    }

    #[test]
    fn test_unparseable_returns_none() {
        assert_eq!(reformat_date(""), None);
        assert_eq!(reformat_date("   "), None);
        assert_eq!(reformat_date("not set"), None);
        assert_eq!(reformat_date("[edit]"), None);
    }

    #[test]
    fn test_parse_error_carries_input() {
        match parse_listing_date("unknown") {
            Err(ExportError::DateParse(s)) => assert_eq!(s, "unknown"),
            other => panic!("expected DateParse, got {other:?}"),
        }
    }
}
