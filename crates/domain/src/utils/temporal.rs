//! Temporal resolver.
//!
//! Converts loosely-specified date/time tokens ("tomorrow", "next friday",
//! ISO dates, bare "HH:MM" times) into absolute UTC instants, and derives
//! event end instants from durations.
//!
//! Unrecognized date strings resolve to "today" rather than erroring; the
//! extraction confidence score already carries the uncertainty downstream.

use chrono::{Datelike, DateTime, Duration, NaiveDate, TimeZone, Utc, Weekday};

/// Resolve optional date and time parts against the current instant.
///
/// See [`resolve_date_time_from`] for the resolution rules.
pub fn resolve_date_time(date: Option<&str>, time: Option<&str>) -> DateTime<Utc> {
    resolve_date_time_from(date, time, Utc::now())
}

/// Resolve optional date and time parts against an explicit reference
/// instant.
///
/// Date part: absent means "today"; recognized relative phrases are
/// `today`, `tomorrow`, `next week` (+7 days), and `next <weekday>`;
/// otherwise an ISO calendar date, then a best-effort generic parse, then
/// "today". `next <weekday>` invoked on that same weekday yields the
/// occurrence 7 days out, never 0.
///
/// Time part: "HH:MM" 24-hour, overwriting the hour and minute of the
/// resolved date and zeroing smaller components; absent or unparseable
/// leaves the resolved wall-clock time standing.
pub fn resolve_date_time_from(
    date: Option<&str>,
    time: Option<&str>,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    let mut resolved = match date {
        Some(raw) if !raw.trim().is_empty() => resolve_date(raw.trim(), now),
        _ => now,
    };

    if let Some(raw) = time {
        if let Some((hour, minute)) = parse_time_of_day(raw) {
            resolved = with_time_of_day(resolved, hour, minute);
        }
    }

    resolved
}

/// Derive an event end instant; pure addition, no timezone adjustment.
///
/// Callers substitute the default duration before calling; a non-positive
/// duration is the caller's bug, not handled here.
pub fn calculate_end(start: DateTime<Utc>, duration_minutes: i64) -> DateTime<Utc> {
    start + Duration::minutes(duration_minutes)
}

fn resolve_date(raw: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let lower = raw.to_lowercase();

    match lower.as_str() {
        "today" => return now,
        "tomorrow" => return now + Duration::days(1),
        "next week" => return now + Duration::days(7),
        _ => {}
    }

    if let Some(rest) = lower.strip_prefix("next ") {
        if let Some(weekday) = parse_weekday(rest.trim()) {
            return next_weekday(now, weekday);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(&lower, "%Y-%m-%d") {
        return on_date(date, now);
    }

    generic_parse(raw, now)
}

/// Strictly future occurrence of the target weekday: 1..=7 days ahead.
fn next_weekday(now: DateTime<Utc>, target: Weekday) -> DateTime<Utc> {
    let current = i64::from(now.weekday().num_days_from_sunday());
    let target = i64::from(target.num_days_from_sunday());
    let mut ahead = (target - current).rem_euclid(7);
    if ahead == 0 {
        ahead = 7;
    }
    now + Duration::days(ahead)
}

fn parse_weekday(raw: &str) -> Option<Weekday> {
    match raw {
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

/// Best-effort parse of non-ISO date strings; falls back to "today".
fn generic_parse(raw: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return instant.with_timezone(&Utc);
    }

    for format in ["%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return on_date(date, now);
        }
    }

    now
}

/// Place the reference wall-clock time onto a bare calendar date.
fn on_date(date: NaiveDate, now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(now.time()))
}

fn parse_time_of_day(raw: &str) -> Option<(u32, u32)> {
    let (hour, minute) = raw.trim().split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}

fn with_time_of_day(instant: DateTime<Utc>, hour: u32, minute: u32) -> DateTime<Utc> {
    instant
        .date_naive()
        .and_hms_opt(hour, minute, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or(instant)
}
