//! Conversions between local wall-clock representations and UTC instants.
//!
//! All functions are pure: the clinic timezone arrives as an explicit
//! argument, never from ambient state. Daylight-saving transitions are
//! resolved by the timezone rules themselves. An ambiguous wall-clock time
//! (clocks rolled back) resolves to its earliest occurrence; a wall-clock
//! time erased by a forward transition resolves by retrying one hour later.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike, Utc,
};
use chrono_tz::Tz;

/// Local calendar/clock components of an instant in a given timezone,
/// as a booking UI displays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalWallClock {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

/// First valid instant of `date` in `tz`. Total for legal calendar dates:
/// if midnight was erased by a forward transition, the day starts at the
/// first wall-clock time that exists.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    resolve_forward(midnight, tz)
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

/// Last second of `date` in `tz` (23:59:59 local), resolved the same way
/// as [`start_of_day`] when that wall-clock time does not exist.
pub fn end_of_day(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let end = match NaiveTime::from_hms_opt(23, 59, 59) {
        Some(time) => date.and_time(time),
        None => date.and_time(NaiveTime::MIN),
    };
    resolve_forward(end, tz)
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| end.and_utc())
}

/// Local calendar/clock components of `instant` in `tz`.
pub fn to_local_wall_clock(instant: DateTime<Utc>, tz: Tz) -> LocalWallClock {
    let local = instant.with_timezone(&tz);
    LocalWallClock {
        year: local.year(),
        month: local.month(),
        day: local.day(),
        hour: local.hour(),
        minute: local.minute(),
    }
}

/// Instant for local wall-clock `time` on `date` in `tz`. `None` only when
/// the wall-clock time does not exist in `tz` and neither does the time one
/// hour later (the standard forward-transition width).
pub fn from_local_wall_clock(date: NaiveDate, time: NaiveTime, tz: Tz) -> Option<DateTime<Utc>> {
    let naive = date.and_time(time);
    resolve_local(naive, tz)
        .or_else(|| resolve_local(naive + Duration::hours(1), tz))
        .map(|local| local.with_timezone(&Utc))
}

fn resolve_local(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(local) => Some(local),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

/// Walks forward in quarter-hour steps until the wall-clock time exists.
/// A civil day never loses more than a few hours to a transition, so the
/// walk is bounded to 24 hours.
fn resolve_forward(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    let mut candidate = naive;
    for _ in 0..96 {
        if let Some(local) = resolve_local(candidate, tz) {
            return Some(local);
        }
        candidate += Duration::minutes(15);
    }
    None
}
