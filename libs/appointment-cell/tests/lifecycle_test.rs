use assert_matches::assert_matches;

use appointment_cell::models::AppointmentError;
use appointment_cell::services::lifecycle::{valid_transitions, validate_transition};
use scheduling_cell::models::AppointmentStatus;

use AppointmentStatus::{Cancelled, Completed, Confirmed, NoShow, Scheduled};

#[test]
fn test_scheduled_can_confirm_cancel_or_no_show() {
    let next = valid_transitions(Scheduled);

    assert!(next.contains(&Confirmed));
    assert!(next.contains(&Cancelled));
    assert!(next.contains(&NoShow));
    assert!(!next.contains(&Completed));
}

#[test]
fn test_confirmed_can_complete_cancel_or_no_show() {
    let next = valid_transitions(Confirmed);

    assert!(next.contains(&Completed));
    assert!(next.contains(&Cancelled));
    assert!(next.contains(&NoShow));
    assert!(!next.contains(&Scheduled));
}

#[test]
fn test_terminal_statuses_allow_nothing() {
    for status in [Completed, Cancelled, NoShow] {
        assert!(valid_transitions(status).is_empty(), "{} is terminal", status);
    }
}

#[test]
fn test_validate_transition_accepts_legal_moves() {
    assert!(validate_transition(Scheduled, Confirmed).is_ok());
    assert!(validate_transition(Confirmed, Completed).is_ok());
    assert!(validate_transition(Scheduled, Cancelled).is_ok());
}

#[test]
fn test_validate_transition_rejects_illegal_moves() {
    assert_matches!(
        validate_transition(Completed, Confirmed),
        Err(AppointmentError::InvalidStatusTransition { .. })
    );
    assert_matches!(
        validate_transition(Cancelled, Scheduled),
        Err(AppointmentError::InvalidStatusTransition { .. })
    );
    assert_matches!(
        validate_transition(Scheduled, Completed),
        Err(AppointmentError::InvalidStatusTransition { .. })
    );
}

#[test]
fn test_no_status_transitions_to_itself() {
    for status in [Scheduled, Confirmed, Completed, Cancelled, NoShow] {
        assert!(!valid_transitions(status).contains(&status));
    }
}
