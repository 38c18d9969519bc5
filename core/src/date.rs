//! Parsing for `Last-Modified` style dates.
//!
//! Accepts the RFC 1123 layout `Wed, 01 Jan 2000 00:00:00 GMT`. The weekday
//! has to be a real abbreviation but is not checked against the date, since
//! servers get it wrong often enough. Runs of whitespace count as one space.
//!
//! Otherwise the layout is strict: weekday and month names are matched
//! case-sensitively, every numeric field has its full width, and the zone
//! must be `GMT` or `UTC`. Other zone abbreviations are rejected rather than
//! read as a zero offset, which keeps to the GMT-only HTTP-date grammar.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse an HTTP date. `None` for anything that is not a well-formed
/// RFC 1123 date in `GMT` or `UTC`.
pub fn parse_http_date(value: &str) -> Option<SystemTime> {
    let mut fields = value.split_whitespace();

    let weekday = fields.next()?.strip_suffix(',')?;
    if !WEEKDAYS.contains(&weekday) {
        return None;
    }

    let day = fixed_digits(fields.next()?, 2)?;
    let month = fields.next()?;
    let month = MONTHS.iter().position(|m| *m == month)? as u32 + 1;
    let year = fixed_digits(fields.next()?, 4)? as i64;

    let mut clock = fields.next()?.split(':');
    let hour = fixed_digits(clock.next()?, 2)?;
    let minute = fixed_digits(clock.next()?, 2)?;
    let second = fixed_digits(clock.next()?, 2)?;
    if clock.next().is_some() || hour > 23 || minute > 59 || second > 59 {
        return None;
    }

    if !matches!(fields.next()?, "GMT" | "UTC") || fields.next().is_some() {
        return None;
    }
    if day == 0 || day > days_in_month(year, month) {
        return None;
    }

    let days = days_from_civil(year, month, day);
    let secs = days * 86_400 + i64::from(hour * 3600 + minute * 60 + second);
    if secs >= 0 {
        UNIX_EPOCH.checked_add(Duration::from_secs(secs.unsigned_abs()))
    } else {
        UNIX_EPOCH.checked_sub(Duration::from_secs(secs.unsigned_abs()))
    }
}

fn fixed_digits(field: &str, width: usize) -> Option<u32> {
    if field.len() != width || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

// Days since 1970-01-01 in the proleptic Gregorian calendar.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = (if year >= 0 { year } else { year - 399 }) / 400;
    let year_of_era = year - era * 400;
    let month = i64::from(month);
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}
