//! Temporal-range resolution
//!
//! Absolute expressions split on the first separator found, tried in a
//! fixed priority order; relative expressions are day phrases resolved
//! against an anchor date. Single-day intent always resolves with
//! start == end - a lone date never widens to a span.

use caltrack_domain::{DateRange, RangeSpec};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use thiserror::Error;

/// Separators accepted in absolute expressions, in match priority order.
const SEPARATORS: [&str; 4] = ["\u{2026}", "..", " to ", "/"];

/// Range and date-expression failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The range discriminator is neither relative nor absolute
    #[error("unknown range type: {0}")]
    UnknownRangeType(String),

    /// A date token could not be parsed
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    BadDate(String),

    /// A relative phrase outside the supported grammar
    #[error("unrecognized date phrase: '{0}'")]
    BadPhrase(String),

    /// A target id is not a valid record id
    #[error("{0}")]
    BadId(String),
}

/// Resolve a raw range into an inclusive (start, end) day pair.
///
/// No ordering validation is performed: an inverted absolute span is
/// accepted as data and yields an empty result at filtering time, not an
/// error here.
pub fn resolve_range(spec: &RangeSpec, anchor: NaiveDate) -> Result<DateRange, ResolveError> {
    match spec.kind.as_str() {
        // "date" is a historical alias for "absolute"
        "absolute" | "date" => resolve_absolute(&spec.value),
        "relative" => Ok(DateRange::single(parse_day_phrase(&spec.value, anchor)?)),
        other => Err(ResolveError::UnknownRangeType(other.to_string())),
    }
}

/// Resolve a bare date expression from a target: an expression carrying a
/// recognized separator takes the absolute path, anything else collapses
/// to a single day.
pub fn resolve_date_expr(value: &str, anchor: NaiveDate) -> Result<DateRange, ResolveError> {
    if SEPARATORS.iter().any(|sep| value.contains(sep)) {
        resolve_absolute(value)
    } else {
        Ok(DateRange::single(parse_day_phrase(value, anchor)?))
    }
}

fn resolve_absolute(value: &str) -> Result<DateRange, ResolveError> {
    let parts: Vec<&str> = match SEPARATORS.iter().find(|sep| value.contains(*sep)) {
        Some(sep) => value.splitn(2, sep).map(str::trim).collect(),
        None => vec![value.trim()],
    };

    let start = parse_iso(parts[0])?;
    let end = match parts.get(1) {
        Some(token) => parse_iso(token)?,
        None => start,
    };
    Ok(DateRange { start, end })
}

fn parse_iso(token: &str) -> Result<NaiveDate, ResolveError> {
    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .map_err(|_| ResolveError::BadDate(token.to_string()))
}

/// Parse a natural-language day phrase against an anchor date.
///
/// Supported: today/now, yesterday, tomorrow, "N days ago", "in N days",
/// last/this/next <weekday>, a bare weekday (most recent occurrence on or
/// before the anchor), "<month> <day> [year]" and "<day> <month> [year]"
/// with ordinal suffixes, and ISO dates.
pub fn parse_day_phrase(raw: &str, anchor: NaiveDate) -> Result<NaiveDate, ResolveError> {
    let phrase = raw.trim().to_lowercase().replace(',', " ");
    if phrase.is_empty() {
        return Err(ResolveError::BadPhrase(raw.to_string()));
    }

    match phrase.as_str() {
        "today" | "now" => return Ok(anchor),
        "yesterday" => return Ok(anchor - Days::new(1)),
        "tomorrow" => return Ok(anchor + Days::new(1)),
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(phrase.trim(), "%Y-%m-%d") {
        return Ok(date);
    }

    let words: Vec<&str> = phrase.split_whitespace().collect();

    // "N days ago" / "in N days"
    if let [n, unit, "ago"] = words.as_slice() {
        if matches!(*unit, "day" | "days") {
            if let Ok(n) = n.parse::<u64>() {
                return Ok(anchor - Days::new(n));
            }
        }
    }
    if let ["in", n, unit] = words.as_slice() {
        if matches!(*unit, "day" | "days") {
            if let Ok(n) = n.parse::<u64>() {
                return Ok(anchor + Days::new(n));
            }
        }
    }

    // last/this/next <weekday>
    if let [qualifier, name] = words.as_slice() {
        if let Some(weekday) = parse_weekday(name) {
            match *qualifier {
                "last" => return Ok(weekday_before(anchor, weekday)),
                "next" => return Ok(weekday_after(anchor, weekday)),
                "this" => return Ok(weekday_in_week_of(anchor, weekday)),
                _ => {}
            }
        }
    }

    // A bare weekday looks backward: the most recent occurrence on or
    // before the anchor
    if let [name] = words.as_slice() {
        if let Some(weekday) = parse_weekday(name) {
            return Ok(weekday_on_or_before(anchor, weekday));
        }
    }

    if let Some(date) = parse_month_day(&words, anchor) {
        return Ok(date);
    }

    Err(ResolveError::BadPhrase(raw.to_string()))
}

fn parse_weekday(token: &str) -> Option<Weekday> {
    match token {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn weekday_on_or_before(anchor: NaiveDate, target: Weekday) -> NaiveDate {
    let back = (anchor.weekday().num_days_from_monday() + 7 - target.num_days_from_monday()) % 7;
    anchor - Days::new(back as u64)
}

fn weekday_before(anchor: NaiveDate, target: Weekday) -> NaiveDate {
    let candidate = weekday_on_or_before(anchor, target);
    if candidate == anchor {
        candidate - Days::new(7)
    } else {
        candidate
    }
}

fn weekday_after(anchor: NaiveDate, target: Weekday) -> NaiveDate {
    weekday_on_or_before(anchor, target) + Days::new(7)
}

fn weekday_in_week_of(anchor: NaiveDate, target: Weekday) -> NaiveDate {
    anchor.week(Weekday::Mon).first_day() + Days::new(target.num_days_from_monday() as u64)
}

fn parse_month(token: &str) -> Option<u32> {
    match token {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" | "sept" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

fn parse_day_number(token: &str) -> Option<u32> {
    let digits = token
        .strip_suffix("st")
        .or_else(|| token.strip_suffix("nd"))
        .or_else(|| token.strip_suffix("rd"))
        .or_else(|| token.strip_suffix("th"))
        .unwrap_or(token);
    let day = digits.parse::<u32>().ok()?;
    (1..=31).contains(&day).then_some(day)
}

fn parse_year(token: &str) -> Option<i32> {
    (token.len() == 4).then(|| token.parse::<i32>().ok()).flatten()
}

fn parse_month_day(words: &[&str], anchor: NaiveDate) -> Option<NaiveDate> {
    let (year, month, day) = match words {
        [a, b] => {
            if let (Some(m), Some(d)) = (parse_month(a), parse_day_number(b)) {
                (anchor.year(), m, d)
            } else if let (Some(d), Some(m)) = (parse_day_number(a), parse_month(b)) {
                (anchor.year(), m, d)
            } else {
                return None;
            }
        }
        [a, b, c] => {
            let y = parse_year(c)?;
            if let (Some(m), Some(d)) = (parse_month(a), parse_day_number(b)) {
                (y, m, d)
            } else if let (Some(d), Some(m)) = (parse_day_number(a), parse_month(b)) {
                (y, m, d)
            } else {
                return None;
            }
        }
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: any unseparated ISO date resolves with start == end.
        #[test]
        fn test_unseparated_date_collapses(y in 2000i32..2100, m in 1u32..=12, d in 1u32..=28) {
            let date = NaiveDate::from_ymd_opt(y, m, d).expect("day <= 28 is always valid");
            let value = date.format("%Y-%m-%d").to_string();
            let spec = RangeSpec { kind: "absolute".to_string(), value };
            let anchor = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

            let range = resolve_range(&spec, anchor).unwrap();
            prop_assert_eq!(range.start, date);
            prop_assert_eq!(range.end, date);
        }

        /// Property: a valid A..B span round-trips both tokens, even inverted.
        #[test]
        fn test_span_round_trips(a in 0i64..20000, b in 0i64..20000) {
            let epoch = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
            let start = epoch + chrono::Days::new(a as u64);
            let end = epoch + chrono::Days::new(b as u64);
            let value = format!("{} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"));
            let spec = RangeSpec { kind: "absolute".to_string(), value };
            let anchor = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

            let range = resolve_range(&spec, anchor).unwrap();
            prop_assert_eq!(range.start, start);
            prop_assert_eq!(range.end, end);
        }
    }
}
