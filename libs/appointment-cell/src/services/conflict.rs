use tracing::debug;

use scheduling_cell::conflict;
use shared_config::AppConfig;

use crate::models::{AppointmentError, ConflictCheckRequest, ConflictCheckResponse};
use crate::services::booking::BookingService;

/// Read-side conflict check for the booking UI: returns the verdict plus
/// the rows that caused it.
pub struct ConflictCheckService {
    booking: BookingService,
}

impl ConflictCheckService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            booking: BookingService::new(config),
        }
    }

    pub async fn check(
        &self,
        request: ConflictCheckRequest,
    ) -> Result<ConflictCheckResponse, AppointmentError> {
        debug!(
            "Conflict check for professional {} in {}..{}",
            request.professional_id, request.start_time, request.end_time
        );

        // An inverted candidate can reach us from unvalidated UI input;
        // it never conflicts with anything.
        if request.end_time <= request.start_time {
            return Ok(ConflictCheckResponse {
                has_conflict: false,
                conflicting_appointments: Vec::new(),
            });
        }

        let existing = self
            .booking
            .overlap_window(
                request.professional_id,
                request.start_time,
                request.end_time,
            )
            .await?;

        let conflicting_appointments: Vec<_> = conflict::overlapping(
            request.start_time,
            request.end_time,
            request.professional_id,
            &existing,
            request.exclude_appointment_id,
        )
        .cloned()
        .collect();

        Ok(ConflictCheckResponse {
            has_conflict: !conflicting_appointments.is_empty(),
            conflicting_appointments,
        })
    }
}
