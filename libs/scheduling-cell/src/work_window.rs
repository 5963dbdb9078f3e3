//! Resolves a professional's open work intervals for one calendar date.

use chrono::{Datelike, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::models::{BreakWindow, Professional, WorkInterval};
use crate::time;
use crate::vacation;

/// Ordered, non-overlapping open intervals for `date`: shift windows minus
/// breaks minus vacation, anchored to instants in `tz`.
///
/// A day is open if the weekly pattern marks it open OR an active weekend
/// shift covers it (Saturday/Sunday). The two gates are independent; either
/// alone admits the day.
pub fn open_intervals(professional: &Professional, date: NaiveDate, tz: Tz) -> Vec<WorkInterval> {
    if vacation::is_on_vacation(professional, date) {
        return Vec::new();
    }

    let schedule = &professional.schedule;
    let weekday = date.weekday().num_days_from_sunday() as usize;
    let is_weekend = weekday == 0 || weekday == 6;

    let weekday_open = schedule.working_days[weekday];
    let weekend_open = is_weekend && schedule.has_weekend_shift();
    if !weekday_open && !weekend_open {
        return Vec::new();
    }

    let mut candidates: Vec<(NaiveTime, NaiveTime)> = Vec::new();
    if let Some(shift) = &schedule.first_shift {
        candidates.push((shift.start, shift.end));
    }
    if let Some(shift) = &schedule.second_shift {
        candidates.push((shift.start, shift.end));
    }
    if is_weekend {
        if let Some(shift) = &schedule.weekend_shift {
            candidates.push((shift.start, shift.end));
        }
    }

    let mut pieces: Vec<(NaiveTime, NaiveTime)> = Vec::new();
    for window in candidates {
        subtract_breaks(window, &schedule.breaks, &mut pieces);
    }

    let mut intervals: Vec<WorkInterval> = pieces
        .into_iter()
        .filter_map(|(start, end)| anchor(date, start, end, tz))
        .filter(|interval| interval.end > interval.start)
        .collect();

    merge_ascending(&mut intervals);
    intervals
}

/// Removes every break from one candidate window, collecting the surviving
/// pieces. A break straddling the window boundary truncates the window; a
/// break fully outside it leaves it untouched.
fn subtract_breaks(
    window: (NaiveTime, NaiveTime),
    breaks: &[BreakWindow],
    out: &mut Vec<(NaiveTime, NaiveTime)>,
) {
    let mut pieces = vec![window];
    for brk in breaks {
        if brk.end <= brk.start {
            continue;
        }
        let mut next = Vec::with_capacity(pieces.len() + 1);
        for (start, end) in pieces {
            if brk.end <= start || brk.start >= end {
                next.push((start, end));
                continue;
            }
            if brk.start > start {
                next.push((start, brk.start));
            }
            if brk.end < end {
                next.push((brk.end, end));
            }
        }
        pieces = next;
    }
    out.extend(pieces);
}

/// Anchors a local wall-clock piece to instants. Pieces with a bound the
/// timezone cannot resolve are dropped; an inverted piece (shift stored with
/// end before start) comes out inverted and is discarded by the caller.
fn anchor(date: NaiveDate, start: NaiveTime, end: NaiveTime, tz: Tz) -> Option<WorkInterval> {
    let start = time::from_local_wall_clock(date, start, tz)?;
    let end = time::from_local_wall_clock(date, end, tz)?;
    Some(WorkInterval { start, end })
}

/// Sorts by start and coalesces overlapping or touching intervals.
fn merge_ascending(intervals: &mut Vec<WorkInterval>) {
    intervals.sort_by_key(|interval| interval.start);
    let mut merged: Vec<WorkInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals.drain(..) {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                if interval.end > last.end {
                    last.end = interval.end;
                }
            }
            _ => merged.push(interval),
        }
    }
    *intervals = merged;
}
