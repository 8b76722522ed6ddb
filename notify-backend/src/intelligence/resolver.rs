//! Relative date resolver
//!
//! Resolves phrases like "tomorrow", "next friday", "at 3pm", "in 2 hours"
//! or "March 5th" against a reference instant. No timezone handling: all
//! arithmetic is on naive local time.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
use regex::Regex;
use std::sync::LazyLock;

use super::{DateResolver, Resolution};

static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})(?::([0-5]\d))?\s*(am|pm|a\.m\.|p\.m\.)?$").unwrap()
});
static WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(next|this|last)\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)$",
    )
    .unwrap()
});
static PERIOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(next|this|last)\s+(week|month|year)$").unwrap());
static OFFSET_IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^in\s+(\w+)\s+(min|minute|hour|day|week|month|year)s?$").unwrap()
});
static OFFSET_AGO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\s+(min|minute|hour|day|week|month|year)s?\s+ago$").unwrap()
});
static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());
static SLASH_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap());
static MONTH_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z]+)\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?$").unwrap()
});
static DAY_FIRST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:the\s+)?(\d{1,2})(?:st|nd|rd|th)?\s+(?:of\s+)?([a-z]+)(?:,?\s+(\d{4}))?$")
        .unwrap()
});

/// Chrono-backed resolver for the phrases the rule-based recognizer emits.
///
/// Day-level phrases keep the time of day of `now`; clock times land on
/// `now`'s date; absolute dates resolve to midnight.
#[derive(Debug, Default, Clone, Copy)]
pub struct RelativeDateResolver;

impl DateResolver for RelativeDateResolver {
    fn resolve(&self, phrase: &str, now: NaiveDateTime) -> Resolution {
        match resolve_phrase(&normalize(phrase), now) {
            Some(timestamp) => Resolution::Parsed { timestamp },
            None => Resolution::Unparsed,
        }
    }
}

/// Lowercase, collapse whitespace, drop a leading "at"/"on"
fn normalize(phrase: &str) -> String {
    let collapsed = phrase
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    for prefix in ["at ", "on "] {
        if let Some(rest) = collapsed.strip_prefix(prefix) {
            return rest.to_string();
        }
    }
    collapsed
}

fn resolve_phrase(phrase: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    resolve_keyword(phrase, now)
        .or_else(|| resolve_day_part(phrase, now))
        .or_else(|| resolve_clock_time(phrase, now))
        .or_else(|| resolve_weekday(phrase, now))
        .or_else(|| resolve_period(phrase, now))
        .or_else(|| resolve_offset(phrase, now))
        .or_else(|| resolve_absolute_date(phrase, now))
}

fn add_days(now: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    now.checked_add_signed(TimeDelta::try_days(days)?)
}

fn at_time(now: NaiveDateTime, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    now.date().and_hms_opt(hour, minute, 0)
}

fn resolve_keyword(phrase: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    match phrase {
        "today" => Some(now),
        "tomorrow" => add_days(now, 1),
        "yesterday" => add_days(now, -1),
        "day after tomorrow" | "the day after tomorrow" => add_days(now, 2),
        _ => None,
    }
}

fn resolve_day_part(phrase: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    match phrase {
        "midnight" => at_time(now, 0, 0),
        "this morning" => at_time(now, 9, 0),
        "noon" => at_time(now, 12, 0),
        "this afternoon" => at_time(now, 15, 0),
        "this evening" => at_time(now, 19, 0),
        "tonight" => at_time(now, 20, 0),
        _ => None,
    }
}

fn resolve_clock_time(phrase: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let caps = CLOCK_RE.captures(phrase)?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    let hour = match caps.get(3).map(|m| m.as_str()) {
        Some(meridiem) => {
            if hour == 0 || hour > 12 {
                return None;
            }
            if meridiem.starts_with('p') {
                hour % 12 + 12
            } else {
                hour % 12
            }
        }
        // A bare number isn't a time; 24h times need the minutes
        None if caps.get(2).is_none() => return None,
        None => hour,
    };

    at_time(now, hour, minute)
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn resolve_weekday(phrase: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let caps = WEEKDAY_RE.captures(phrase)?;
    let target = parse_weekday(caps.get(2)?.as_str())?;

    let today = now.weekday().num_days_from_monday() as i64;
    let wanted = target.num_days_from_monday() as i64;
    let ahead = (wanted - today).rem_euclid(7);
    let behind = (today - wanted).rem_euclid(7);

    // A bare weekday is the most recent one, today included
    let days = match caps.get(1).map(|m| m.as_str()) {
        Some("next") if ahead == 0 => 7,
        Some("next") => ahead,
        Some("last") if behind == 0 => -7,
        _ => -behind,
    };
    add_days(now, days)
}

fn shift_months(now: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let delta = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        now.checked_add_months(delta)
    } else {
        now.checked_sub_months(delta)
    }
}

fn resolve_period(phrase: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let caps = PERIOD_RE.captures(phrase)?;
    let sign: i64 = match caps.get(1)?.as_str() {
        "next" => 1,
        "last" => -1,
        _ => return Some(now),
    };
    match caps.get(2)?.as_str() {
        "week" => add_days(now, 7 * sign),
        "month" => shift_months(now, sign),
        "year" => shift_months(now, 12 * sign),
        _ => None,
    }
}

/// Parse a small count written as digits or a word ("a", "two", ...)
fn parse_count(word: &str) -> Option<i64> {
    if let Ok(n) = word.parse::<i64>() {
        return Some(n);
    }
    let n = match word {
        "a" | "an" | "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        _ => return None,
    };
    Some(n)
}

fn apply_offset(now: NaiveDateTime, count: i64, unit: &str) -> Option<NaiveDateTime> {
    match unit {
        "min" | "minute" => now.checked_add_signed(TimeDelta::try_minutes(count)?),
        "hour" => now.checked_add_signed(TimeDelta::try_hours(count)?),
        "day" => add_days(now, count),
        "week" => now.checked_add_signed(TimeDelta::try_weeks(count)?),
        "month" => shift_months(now, count),
        "year" => shift_months(now, count.checked_mul(12)?),
        _ => None,
    }
}

fn resolve_offset(phrase: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    if let Some(caps) = OFFSET_IN_RE.captures(phrase) {
        let count = parse_count(caps.get(1)?.as_str())?;
        return apply_offset(now, count, caps.get(2)?.as_str());
    }
    let caps = OFFSET_AGO_RE.captures(phrase)?;
    let count = parse_count(caps.get(1)?.as_str())?;
    apply_offset(now, -count, caps.get(2)?.as_str())
}

/// Month number from a full or abbreviated English month name
fn parse_month(name: &str) -> Option<u32> {
    const NAMES: [&str; 12] = [
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december",
    ];
    if name.len() < 3 {
        return None;
    }
    NAMES
        .iter()
        .position(|full| full.starts_with(name))
        .map(|i| i as u32 + 1)
}

fn midnight(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

fn resolve_absolute_date(phrase: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    if let Some(caps) = ISO_DATE_RE.captures(phrase) {
        return midnight(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        );
    }
    if let Some(caps) = SLASH_DATE_RE.captures(phrase) {
        return midnight(
            caps[3].parse().ok()?,
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
        );
    }

    let (month, day, year) = if let Some(caps) = MONTH_FIRST_RE.captures(phrase) {
        (caps.get(1)?, caps.get(2)?, caps.get(3))
    } else {
        let caps = DAY_FIRST_RE.captures(phrase)?;
        (caps.get(2)?, caps.get(1)?, caps.get(3))
    };
    let year = match year {
        Some(y) => y.as_str().parse().ok()?,
        None => now.year(),
    };
    midnight(year, parse_month(month.as_str())?, day.as_str().parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wednesday 2026-10-14 10:30:00
    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn resolve(phrase: &str) -> Option<String> {
        match RelativeDateResolver.resolve(phrase, now()) {
            Resolution::Parsed { timestamp } => {
                Some(timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
            }
            Resolution::Unparsed => None,
        }
    }

    #[test]
    fn test_keywords_keep_time_of_day() {
        assert_eq!(resolve("today").as_deref(), Some("2026-10-14 10:30:00"));
        assert_eq!(resolve("Tomorrow").as_deref(), Some("2026-10-15 10:30:00"));
        assert_eq!(resolve("yesterday").as_deref(), Some("2026-10-13 10:30:00"));
        assert_eq!(resolve("the day after tomorrow").as_deref(), Some("2026-10-16 10:30:00"));
    }

    #[test]
    fn test_clock_times() {
        assert_eq!(resolve("3pm").as_deref(), Some("2026-10-14 15:00:00"));
        assert_eq!(resolve("at 3 PM").as_deref(), Some("2026-10-14 15:00:00"));
        assert_eq!(resolve("3:45 p.m.").as_deref(), Some("2026-10-14 15:45:00"));
        assert_eq!(resolve("12am").as_deref(), Some("2026-10-14 00:00:00"));
        assert_eq!(resolve("12pm").as_deref(), Some("2026-10-14 12:00:00"));
        assert_eq!(resolve("at 14:05").as_deref(), Some("2026-10-14 14:05:00"));
        assert_eq!(resolve("13pm"), None);
        assert_eq!(resolve("7"), None);
    }

    #[test]
    fn test_day_parts() {
        assert_eq!(resolve("noon").as_deref(), Some("2026-10-14 12:00:00"));
        assert_eq!(resolve("at midnight").as_deref(), Some("2026-10-14 00:00:00"));
        assert_eq!(resolve("tonight").as_deref(), Some("2026-10-14 20:00:00"));
        assert_eq!(resolve("this afternoon").as_deref(), Some("2026-10-14 15:00:00"));
    }

    #[test]
    fn test_weekdays() {
        // now is a Wednesday
        assert_eq!(resolve("friday").as_deref(), Some("2026-10-09 10:30:00"));
        assert_eq!(resolve("Monday").as_deref(), Some("2026-10-12 10:30:00"));
        assert_eq!(resolve("on Wednesday").as_deref(), Some("2026-10-14 10:30:00"));
        assert_eq!(resolve("on tuesday").as_deref(), Some("2026-10-13 10:30:00"));
        assert_eq!(resolve("next wednesday").as_deref(), Some("2026-10-21 10:30:00"));
        assert_eq!(resolve("next monday").as_deref(), Some("2026-10-19 10:30:00"));
        assert_eq!(resolve("last monday").as_deref(), Some("2026-10-12 10:30:00"));
        assert_eq!(resolve("last wednesday").as_deref(), Some("2026-10-07 10:30:00"));
    }

    #[test]
    fn test_periods() {
        assert_eq!(resolve("next week").as_deref(), Some("2026-10-21 10:30:00"));
        assert_eq!(resolve("last month").as_deref(), Some("2026-09-14 10:30:00"));
        assert_eq!(resolve("next year").as_deref(), Some("2027-10-14 10:30:00"));
        assert_eq!(resolve("this week").as_deref(), Some("2026-10-14 10:30:00"));
    }

    #[test]
    fn test_offsets() {
        assert_eq!(resolve("in 2 hours").as_deref(), Some("2026-10-14 12:30:00"));
        assert_eq!(resolve("in an hour").as_deref(), Some("2026-10-14 11:30:00"));
        assert_eq!(resolve("in three days").as_deref(), Some("2026-10-17 10:30:00"));
        assert_eq!(resolve("2 weeks ago").as_deref(), Some("2026-09-30 10:30:00"));
        assert_eq!(resolve("in 15 minutes").as_deref(), Some("2026-10-14 10:45:00"));
        assert_eq!(resolve("in many days"), None);
    }

    #[test]
    fn test_absolute_dates() {
        assert_eq!(resolve("2027-03-05").as_deref(), Some("2027-03-05 00:00:00"));
        assert_eq!(resolve("03/05/2027").as_deref(), Some("2027-03-05 00:00:00"));
        assert_eq!(resolve("March 5th").as_deref(), Some("2026-03-05 00:00:00"));
        assert_eq!(resolve("on Mar. 5, 2027").as_deref(), Some("2027-03-05 00:00:00"));
        assert_eq!(resolve("the 5th of March 2027").as_deref(), Some("2027-03-05 00:00:00"));
        assert_eq!(resolve("2027-02-30"), None);
        assert_eq!(resolve("13/01/2027"), None);
    }

    #[test]
    fn test_unresolvable() {
        assert_eq!(resolve("the weekend"), None);
        assert_eq!(resolve("this quarter"), None);
        assert_eq!(resolve("whenever"), None);
        assert_eq!(resolve(""), None);
    }
}
