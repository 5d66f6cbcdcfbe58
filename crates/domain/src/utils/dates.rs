//! Business-calendar utilities.
//!
//! Pure date arithmetic plus the two timezone conversions the rest of the
//! system is built on: an instant to its business-local `(date, time)`
//! components, and a business-local pair back to the absolute instant. The
//! offset is always derived from the timezone rules for that instant, never
//! hardcoded.
//!
//! Parsing is strict: malformed input returns `InvalidDateFormat` instead of
//! falling back to a best-effort guess, so the caller decides what to do with
//! bad data.

use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::errors::{Result, VitraError};

/// Parse a strict `YYYY-MM-DD` date string.
///
/// # Errors
/// Returns `VitraError::InvalidDateFormat` for anything that is not a valid,
/// zero-padded ISO calendar date.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    let parsed = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| invalid_date(input, "expected YYYY-MM-DD"))?;

    // parse_from_str tolerates unpadded components; round-trip to keep the
    // accepted grammar unambiguous.
    if parsed.format("%Y-%m-%d").to_string() != input {
        return Err(invalid_date(input, "expected YYYY-MM-DD"));
    }

    Ok(parsed)
}

/// Parse a strict `YYYY-MM-DD HH:MM` (or `YYYY-MM-DDTHH:MM`) local date-time,
/// with optional seconds.
///
/// # Errors
/// Returns `VitraError::InvalidDateFormat` when no accepted layout matches.
pub fn parse_local_date_time(input: &str) -> Result<NaiveDateTime> {
    const LAYOUTS: [&str; 4] =
        ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

    for layout in LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, layout) {
            return Ok(parsed);
        }
    }

    Err(invalid_date(input, "expected YYYY-MM-DD HH:MM"))
}

fn invalid_date(input: &str, expected: &str) -> VitraError {
    VitraError::InvalidDateFormat(format!("'{input}' ({expected})"))
}

/// Business-local calendar date an instant falls on.
pub fn local_date_of(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Format an instant as `YYYY-MM-DD` in the business-local calendar.
pub fn to_iso_date(instant: DateTime<Utc>, tz: Tz) -> String {
    local_date_of(instant, tz).format("%Y-%m-%d").to_string()
}

/// Business-local `(date, time)` components of an instant.
pub fn instant_to_local(instant: DateTime<Utc>, tz: Tz) -> (NaiveDate, NaiveTime) {
    let local = instant.with_timezone(&tz);
    (local.date_naive(), local.time())
}

/// Absolute instant of a business-local `(date, time)` pair.
///
/// Daylight-saving policy: an ambiguous local time (clocks fell back) maps to
/// the earlier of the two instants; a nonexistent local time (clocks sprang
/// forward) shifts forward across the gap.
///
/// # Errors
/// Returns `VitraError::InvalidDateFormat` when the timezone rules admit no
/// instant near the requested pair.
pub fn local_to_instant(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<DateTime<Utc>> {
    let naive = date.and_time(time);

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Ok(instant.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _latest) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let shifted = naive + TimeDelta::hours(1);
            tz.from_local_datetime(&shifted)
                .earliest()
                .map(|instant| instant.with_timezone(&Utc))
                .ok_or_else(|| {
                    VitraError::InvalidDateFormat(format!("no instant for {naive} in {tz}"))
                })
        }
    }
}

/// First day of the week containing `date`.
pub fn start_of_week(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday() as i64
        - first_day.num_days_from_monday() as i64)
        % 7;
    add_days(date, -offset)
}

/// Shift a date by `n` calendar days (negative moves backward).
///
/// Saturates at the calendar bounds instead of overflowing.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date.checked_add_signed(TimeDelta::days(n)).unwrap_or(if n >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Shift a date by `n` calendar months (negative moves backward), clamping to
/// the last valid day of the target month: Jan 31 + 1 month is Feb 29/28,
/// never a rollover into March.
pub fn add_months(date: NaiveDate, n: i32) -> NaiveDate {
    let shifted = if n >= 0 {
        date.checked_add_months(Months::new(n.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(n.unsigned_abs()))
    };
    shifted.unwrap_or(if n >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let next_month = add_months(start_of_month(date), 1);
    next_month.pred_opt().unwrap_or(date)
}

/// `count` consecutive calendar dates starting at `start`, in order.
pub fn dates_range(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    (0..count as i64).map(|offset| add_days(start, offset)).collect()
}

/// Every calendar date in the inclusive `[start, end]` interval, in order.
///
/// # Errors
/// Returns `VitraError::Validation` when `end < start`.
pub fn date_range_inclusive(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    if end < start {
        return Err(VitraError::Validation(format!(
            "Range end {end} precedes start {start}"
        )));
    }

    let count = (end - start).num_days() as usize + 1;
    Ok(dates_range(start, count))
}
