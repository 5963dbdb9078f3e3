//! Appointment conflict detection.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::Appointment;

/// Half-open overlap: `[s1,e1)` and `[s2,e2)` collide iff `s1 < e2 && s2 < e1`.
/// One appointment ending exactly when another starts is not a conflict.
pub fn intervals_overlap(
    start1: DateTime<Utc>,
    end1: DateTime<Utc>,
    start2: DateTime<Utc>,
    end2: DateTime<Utc>,
) -> bool {
    start1 < end2 && start2 < end1
}

/// Whether the candidate interval collides with any appointment of
/// `professional_id` in `existing`. Status-agnostic: callers drop cancelled
/// rows first. An inverted candidate (end at or before start) never
/// conflicts. `exclude_appointment_id` skips the appointment being edited.
pub fn has_conflict(
    candidate_start: DateTime<Utc>,
    candidate_end: DateTime<Utc>,
    professional_id: Uuid,
    existing: &[Appointment],
    exclude_appointment_id: Option<Uuid>,
) -> bool {
    overlapping(
        candidate_start,
        candidate_end,
        professional_id,
        existing,
        exclude_appointment_id,
    )
    .next()
    .is_some()
}

/// The appointments that make the candidate interval illegal, in input
/// order. Same rules as [`has_conflict`].
pub fn overlapping<'a>(
    candidate_start: DateTime<Utc>,
    candidate_end: DateTime<Utc>,
    professional_id: Uuid,
    existing: &'a [Appointment],
    exclude_appointment_id: Option<Uuid>,
) -> impl Iterator<Item = &'a Appointment> {
    let valid = candidate_end > candidate_start;
    existing.iter().filter(move |appointment| {
        valid
            && appointment.professional_id == professional_id
            && Some(appointment.id) != exclude_appointment_id
            && intervals_overlap(
                candidate_start,
                candidate_end,
                appointment.start_time,
                appointment.end_time,
            )
    })
}
