//! Date extraction and normalization.

use chrono::NaiveDate;
use regex::Regex;

use super::patterns::{
    ANY_DATE, DATE_DMY_DASH, DATE_DMY_DASH_SHORT, DATE_DMY_SLASH, DATE_DMY_SLASH_SHORT, DATE_ISO,
};
use super::FieldExtractor;

/// Field order inside a date shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateLayout {
    /// Day, month, four-digit year.
    DayMonthYear,
    /// Four-digit year, month, day.
    YearMonthDay,
    /// Day, month, two-digit year.
    DayMonthShortYear,
}

/// Date shapes in the order they are tried.
fn date_shapes() -> [(&'static Regex, DateLayout); 5] {
    [
        (&*DATE_DMY_SLASH, DateLayout::DayMonthYear),
        (&*DATE_DMY_DASH, DateLayout::DayMonthYear),
        (&*DATE_ISO, DateLayout::YearMonthDay),
        (&*DATE_DMY_SLASH_SHORT, DateLayout::DayMonthShortYear),
        (&*DATE_DMY_DASH_SHORT, DateLayout::DayMonthShortYear),
    ]
}

/// Normalize a raw date substring to a calendar date.
///
/// Each shape is tried in order against its first occurrence in the input;
/// a match that is not a real calendar date (day 32, month 13) moves on to
/// the next shape instead of failing. Returns `None` for empty input or
/// when no shape yields a valid date.
pub fn normalize_date<'a>(raw: impl Into<Option<&'a str>>) -> Option<NaiveDate> {
    let raw = raw.into()?.trim();
    if raw.is_empty() {
        return None;
    }

    date_shapes().into_iter().find_map(|(pattern, layout)| {
        let caps = pattern.captures(raw)?;
        let (first, second, third) = (&caps[1], &caps[2], &caps[3]);
        match layout {
            DateLayout::DayMonthYear => build_date(third.parse().ok()?, second, first),
            DateLayout::YearMonthDay => build_date(first.parse().ok()?, second, third),
            DateLayout::DayMonthShortYear => {
                build_date(expand_two_digit_year(third.parse().ok()?), second, first)
            }
        }
    })
}

fn build_date(year: i32, month: &str, day: &str) -> Option<NaiveDate> {
    if year < 1 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

/// Two-digit years below 69 are in the 2000s, the rest in the 1900s.
fn expand_two_digit_year(year: i32) -> i32 {
    if year < 69 { 2000 + year } else { 1900 + year }
}

/// Issue date extractor.
///
/// Takes the first date-shaped substring anywhere in the text, whatever
/// label precedes it, so a due date printed above the issue date wins.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = NaiveDate;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let raw = ANY_DATE.captures(text)?.get(1)?.as_str().trim();
        normalize_date(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_date_dmy() {
        assert_eq!(normalize_date("31/01/2025"), Some(ymd(2025, 1, 31)));
        assert_eq!(normalize_date("31-01-2025"), Some(ymd(2025, 1, 31)));
        assert_eq!(normalize_date("5/3/2024"), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn test_normalize_date_iso_is_idempotent() {
        let date = normalize_date("2025-01-31").unwrap();
        assert_eq!(date.to_string(), "2025-01-31");
        assert_eq!(normalize_date(date.to_string().as_str()), Some(date));
    }

    #[test]
    fn test_normalize_date_two_digit_year() {
        assert_eq!(normalize_date("15/01/24"), Some(ymd(2024, 1, 15)));
        assert_eq!(normalize_date("15-01-68"), Some(ymd(2068, 1, 15)));
        assert_eq!(normalize_date("15-01-69"), Some(ymd(1969, 1, 15)));
        assert_eq!(normalize_date("15/01/99"), Some(ymd(1999, 1, 15)));
    }

    #[test]
    fn test_normalize_date_invalid() {
        assert_eq!(normalize_date("not a date"), None);
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("   "), None);
        assert_eq!(normalize_date(None), None);
        assert_eq!(normalize_date("32/01/2025"), None);
        assert_eq!(normalize_date("31/02/2025"), None);
        assert_eq!(normalize_date("00/00/0000"), None);
    }

    #[test]
    fn test_invalid_shape_falls_through_to_next() {
        // DD/MM/YYYY matches an impossible date, the ISO shape still applies.
        assert_eq!(
            normalize_date("40/40/2025 ou 2025-02-14"),
            Some(ymd(2025, 2, 14))
        );
    }

    #[test]
    fn test_only_first_occurrence_of_a_shape_counts() {
        // The second DD/MM/YYYY date is never looked at.
        assert_eq!(normalize_date("32/01/2025 puis 15/02/2025"), None);
    }

    #[test]
    fn test_normalize_date_embedded_in_text() {
        assert_eq!(normalize_date("Date : 31/01/2025"), Some(ymd(2025, 1, 31)));
    }

    #[test]
    fn test_date_extractor_first_match_wins() {
        let extractor = DateExtractor::new();
        let text = "Echéance : 28/02/2025\nDate d'émission : 31/01/2025";
        assert_eq!(extractor.extract(text), Some(ymd(2025, 2, 28)));
    }

    #[test]
    fn test_date_extractor_iso() {
        let extractor = DateExtractor::new();
        assert_eq!(
            extractor.extract("Facture n° 2025-001 émise le 2025-01-31"),
            Some(ymd(2025, 1, 31))
        );
    }

    #[test]
    fn test_date_extractor_no_date() {
        assert_eq!(DateExtractor::new().extract("aucune date ici"), None);
    }
}
