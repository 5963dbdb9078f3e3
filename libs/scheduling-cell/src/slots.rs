//! Bookable slot enumeration.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use crate::conflict;
use crate::models::{Appointment, Professional};
use crate::work_window;

/// Candidate start times for an appointment of `duration_minutes` on `date`,
/// ascending, stepped at `granularity_minutes` from the start of each open
/// work interval. A candidate is admitted only if it ends inside its
/// interval and does not conflict with `existing` (callers drop cancelled
/// rows first).
///
/// Lazy and recomputed per call; there is no cache to invalidate. A
/// non-positive duration or granularity yields an empty sequence rather
/// than an error, since both are reachable from unvalidated UI input.
pub fn available_slots<'a>(
    professional: &Professional,
    date: NaiveDate,
    duration_minutes: i64,
    existing: &'a [Appointment],
    tz: Tz,
    granularity_minutes: i64,
) -> impl Iterator<Item = DateTime<Utc>> + 'a {
    let intervals = if duration_minutes <= 0 || granularity_minutes <= 0 {
        Vec::new()
    } else {
        work_window::open_intervals(professional, date, tz)
    };

    let professional_id = professional.id;
    let duration = Duration::minutes(duration_minutes);
    let step = Duration::minutes(granularity_minutes);

    intervals
        .into_iter()
        .flat_map(move |interval| SlotWalk {
            cursor: interval.start,
            interval_end: interval.end,
            step,
            duration,
        })
        .filter(move |start| !candidate_conflicts(*start, duration, professional_id, existing))
}

fn candidate_conflicts(
    start: DateTime<Utc>,
    duration: Duration,
    professional_id: Uuid,
    existing: &[Appointment],
) -> bool {
    conflict::has_conflict(start, start + duration, professional_id, existing, None)
}

/// Steps through one work interval, yielding starts whose end still fits.
struct SlotWalk {
    cursor: DateTime<Utc>,
    interval_end: DateTime<Utc>,
    step: Duration,
    duration: Duration,
}

impl Iterator for SlotWalk {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor + self.duration > self.interval_end {
            return None;
        }
        let slot = self.cursor;
        self.cursor += self.step;
        Some(slot)
    }
}
