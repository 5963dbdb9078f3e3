//! Status-transition rules for appointments.

use scheduling_cell::models::AppointmentStatus;

use crate::models::AppointmentError;

/// The statuses an appointment may move to from `current`. Completed,
/// cancelled and no-show are terminal; cancellation is always a status
/// change, never a delete.
pub fn valid_transitions(current: AppointmentStatus) -> Vec<AppointmentStatus> {
    match current {
        AppointmentStatus::Scheduled => vec![
            AppointmentStatus::Confirmed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ],
        AppointmentStatus::Confirmed => vec![
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NoShow,
        ],
        AppointmentStatus::Completed
        | AppointmentStatus::Cancelled
        | AppointmentStatus::NoShow => Vec::new(),
    }
}

pub fn validate_transition(
    from: AppointmentStatus,
    to: AppointmentStatus,
) -> Result<(), AppointmentError> {
    if valid_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(AppointmentError::InvalidStatusTransition { from, to })
    }
}
