//! Due date resolution
//!
//! Combines a relative date phrase ("tomorrow", "next friday") and a clock
//! time ("6pm", "14:30", "morning") into one normalized date string:
//! - date and time: `YYYY-MM-DDTHH:MM:SS`
//! - date only: `YYYY-MM-DD`
//! - time only: the time applied to today's date
//!
//! Weekday indices follow Monday=0 through Sunday=6.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

static MERIDIEM_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})(?:[:.](\d{2}))?\s*(am|pm)\b").expect("valid meridiem time regex")
});
static CLOCK_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").expect("valid clock time regex"));
static TIME_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(morning|noon|lunch|afternoon|evening|tonight|night)\b")
        .expect("valid time keyword regex")
});

static DAY_AFTER_TOMORROW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bday after tomorrow\b").expect("valid regex"));
static TOMORROW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\btomorrow\b").expect("valid regex"));
static TODAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:today|tonight|eod|end of (?:the )?day)\b").expect("valid regex")
});
static NEXT_WEEK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bnext week\b").expect("valid regex"));
static NEXT_MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bnext month\b").expect("valid regex"));
static NEXT_WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bnext (monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .expect("valid regex")
});
static THIS_WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bthis (monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .expect("valid regex")
});
static WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .expect("valid regex")
});

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

/// Days from `today` to the next `target` weekday, in 0..=6
fn days_until(today: NaiveDate, target: Weekday) -> i64 {
    let current = today.weekday().num_days_from_monday() as i64;
    let wanted = target.num_days_from_monday() as i64;
    (wanted - current).rem_euclid(7)
}

fn captured_weekday(re: &Regex, lower: &str) -> Option<Weekday> {
    re.captures(lower)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_weekday(m.as_str()))
}

/// Extract the first clock time mentioned in a lower-cased fragment
///
/// Tries `H[:MM] am|pm`, then 24-hour `HH:MM`, then time-of-day keywords.
pub fn extract_time(lower: &str) -> Option<NaiveTime> {
    for caps in MERIDIEM_TIME_RE.captures_iter(lower) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        if !(1..=12).contains(&hour) || minute > 59 {
            continue;
        }
        let hour = match (&caps[3], hour) {
            ("am", 12) => 0,
            ("am", h) => h,
            ("pm", 12) => 12,
            (_, h) => h + 12,
        };
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }

    for caps in CLOCK_TIME_RE.captures_iter(lower) {
        let hour: u32 = caps[1].parse().ok()?;
        let minute: u32 = caps[2].parse().ok()?;
        if hour <= 23 && minute <= 59 {
            return NaiveTime::from_hms_opt(hour, minute, 0);
        }
    }

    let keyword = TIME_KEYWORD_RE.captures(lower)?;
    let hour = match &keyword[1] {
        "morning" => 9,
        "noon" | "lunch" => 12,
        "afternoon" => 14,
        "evening" => 18,
        _ => 20,
    };
    NaiveTime::from_hms_opt(hour, 0, 0)
}

/// Resolve a relative date phrase in a lower-cased fragment against `today`
pub fn relative_date(lower: &str, today: NaiveDate) -> Option<NaiveDate> {
    let offset = if DAY_AFTER_TOMORROW_RE.is_match(lower) {
        2
    } else if TOMORROW_RE.is_match(lower) {
        1
    } else if TODAY_RE.is_match(lower) {
        0
    } else if NEXT_WEEK_RE.is_match(lower) {
        7
    } else if NEXT_MONTH_RE.is_match(lower) {
        30
    } else if let Some(day) = captured_weekday(&NEXT_WEEKDAY_RE, lower) {
        days_until(today, day) + 7
    } else if let Some(day) = captured_weekday(&THIS_WEEKDAY_RE, lower) {
        days_until(today, day)
    } else if let Some(day) = captured_weekday(&WEEKDAY_RE, lower) {
        match days_until(today, day) {
            0 => 7,
            n => n,
        }
    } else {
        return None;
    };
    today.checked_add_signed(Duration::days(offset))
}

/// Build the normalized due date for a fragment, if one can be resolved
pub fn build_date(fragment: &str, now: NaiveDateTime) -> Option<String> {
    let lower = fragment.to_lowercase();
    let today = now.date();
    let built = match (relative_date(&lower, today), extract_time(&lower)) {
        (Some(date), Some(time)) => date.and_time(time).format(DATETIME_FORMAT).to_string(),
        (Some(date), None) => date.format(DATE_FORMAT).to_string(),
        (None, Some(time)) => today.and_time(time).format(DATETIME_FORMAT).to_string(),
        (None, None) => return None,
    };
    validate_due_date(&built)
}

/// Strictly validate a due date string
///
/// Accepts `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS` only when formatting the
/// parsed value reproduces the input exactly. Anything else is discarded.
pub fn validate_due_date(value: &str) -> Option<String> {
    let value = value.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
        && dt.format(DATETIME_FORMAT).to_string() == value
    {
        return Some(value.to_string());
    }
    if let Ok(d) = NaiveDate::parse_from_str(value, DATE_FORMAT)
        && d.format(DATE_FORMAT).to_string() == value
    {
        return Some(value.to_string());
    }
    None
}

/// Whether a validated due date carries a clock time
pub fn has_time(due_date: &str) -> bool {
    due_date.contains('T')
}
