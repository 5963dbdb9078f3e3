//! Vacation window evaluation.
//!
//! The effective window runs one day earlier than the stored bounds at both
//! ends, inclusive. That convention matches what the rest of the product
//! already shows users; changing it here would silently move real bookings.

use chrono::NaiveDate;

use crate::models::{Professional, VacationWindow, WorkSchedule};

/// Effective vacation window for a schedule: `[start - 1 day, end - 1 day]`,
/// inclusive. `None` when vacation is not configured (inactive flag or a
/// missing bound leaves `schedule.vacation` unset at the parse boundary).
pub fn effective_window(schedule: &WorkSchedule) -> Option<VacationWindow> {
    let span = schedule.vacation.as_ref()?;
    Some(VacationWindow {
        start_date: span.start_date.pred_opt().unwrap_or(span.start_date),
        end_date: span.end_date.pred_opt().unwrap_or(span.end_date),
    })
}

/// Whether `date` falls inside the professional's effective vacation window.
/// Compared as calendar dates, never as instants, so the verdict cannot
/// drift with the display timezone.
pub fn is_on_vacation(professional: &Professional, date: NaiveDate) -> bool {
    effective_window(&professional.schedule)
        .map(|window| window.contains(date))
        .unwrap_or(false)
}
