use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use professional_cell::models::ProfessionalError;
use professional_cell::services::ProfessionalService;
use scheduling_cell::conflict;
use scheduling_cell::models::{Appointment, AppointmentStatus};
use shared_config::AppConfig;
use shared_database::StorageClient;

use crate::models::{AppointmentError, BookAppointmentRequest, RescheduleRequest};
use crate::services::lifecycle;

/// The booking write path. Conflict checks here are advisory fast feedback;
/// the data store's own overlap constraint stays the authoritative guard
/// against two racing submissions.
pub struct BookingService {
    storage: StorageClient,
    professionals: ProfessionalService,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            storage: StorageClient::new(config),
            professionals: ProfessionalService::new(config),
        }
    }

    pub async fn book(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        if request.duration_minutes <= 0 {
            return Err(AppointmentError::InvalidTime(
                "duration_minutes must be positive".to_string(),
            ));
        }
        let end_time = request.start_time + Duration::minutes(request.duration_minutes);

        self.professionals
            .get_professional(request.professional_id)
            .await
            .map_err(|err| match err {
                ProfessionalError::NotFound => AppointmentError::ProfessionalNotFound,
                ProfessionalError::Storage(msg) => AppointmentError::Storage(msg),
            })?;

        self.ensure_no_conflict(request.professional_id, request.start_time, end_time, None)
            .await?;

        let now = Utc::now();
        let row = json!({
            "professional_id": request.professional_id,
            "patient_id": request.patient_id,
            "procedure_id": request.procedure_id,
            "start_time": request.start_time.to_rfc3339(),
            "end_time": end_time.to_rfc3339(),
            "status": AppointmentStatus::Scheduled.to_string(),
            "price": request.price,
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339()
        });

        let created: Vec<Appointment> = self
            .storage
            .insert("appointments", row)
            .await
            .map_err(|e| AppointmentError::Storage(e.to_string()))?;
        let appointment = created
            .into_iter()
            .next()
            .ok_or_else(|| AppointmentError::Storage("Insert returned no row".to_string()))?;

        info!(
            "Booked appointment {} for professional {} at {}",
            appointment.id, appointment.professional_id, appointment.start_time
        );
        Ok(appointment)
    }

    pub async fn reschedule(
        &self,
        id: Uuid,
        request: RescheduleRequest,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.get(id).await?;
        if current.status.is_terminal() {
            return Err(AppointmentError::NotReschedulable(current.status));
        }

        let duration_minutes = request
            .duration_minutes
            .unwrap_or_else(|| current.duration_minutes());
        if duration_minutes <= 0 {
            return Err(AppointmentError::InvalidTime(
                "duration_minutes must be positive".to_string(),
            ));
        }
        let end_time = request.start_time + Duration::minutes(duration_minutes);

        self.ensure_no_conflict(
            current.professional_id,
            request.start_time,
            end_time,
            Some(id),
        )
        .await?;

        let updated = self
            .patch(
                id,
                json!({
                    "start_time": request.start_time.to_rfc3339(),
                    "end_time": end_time.to_rfc3339(),
                    "updated_at": Utc::now().to_rfc3339()
                }),
            )
            .await?;

        info!("Rescheduled appointment {} to {}", id, request.start_time);
        Ok(updated)
    }

    /// Soft-cancel: a status change, never a delete, so history survives.
    pub async fn cancel(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        self.update_status(id, AppointmentStatus::Cancelled).await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.get(id).await?;
        lifecycle::validate_transition(current.status, status)?;

        let updated = self
            .patch(
                id,
                json!({
                    "status": status.to_string(),
                    "updated_at": Utc::now().to_rfc3339()
                }),
            )
            .await?;

        info!("Appointment {} moved {} -> {}", id, current.status, status);
        Ok(updated)
    }

    pub async fn get(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        let rows: Vec<Appointment> = self
            .storage
            .fetch("appointments", &format!("id=eq.{}", id))
            .await
            .map_err(|e| AppointmentError::Storage(e.to_string()))?;
        rows.into_iter().next().ok_or(AppointmentError::NotFound)
    }

    pub async fn list(
        &self,
        professional_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let mut query = format!("professional_id=eq.{}", professional_id);
        if let Some(from) = from {
            query.push_str(&format!("&start_time=gte.{}", from.to_rfc3339()));
        }
        if let Some(to) = to {
            query.push_str(&format!("&start_time=lte.{}", to.to_rfc3339()));
        }
        query.push_str("&order=start_time.asc");

        self.storage
            .fetch("appointments", &query)
            .await
            .map_err(|e| AppointmentError::Storage(e.to_string()))
    }

    /// Fetches the appointments whose interval overlaps the candidate
    /// window (half-open on both sides), drops cancelled rows, and runs the
    /// conflict rule.
    async fn ensure_no_conflict(
        &self,
        professional_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        exclude_appointment_id: Option<Uuid>,
    ) -> Result<(), AppointmentError> {
        let existing = self
            .overlap_window(professional_id, start_time, end_time)
            .await?;

        if conflict::has_conflict(
            start_time,
            end_time,
            professional_id,
            &existing,
            exclude_appointment_id,
        ) {
            debug!(
                "Conflict for professional {} in {}..{}",
                professional_id, start_time, end_time
            );
            return Err(AppointmentError::Conflict);
        }
        Ok(())
    }

    pub(crate) async fn overlap_window(
        &self,
        professional_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let query = format!(
            "professional_id=eq.{}&start_time=lt.{}&end_time=gt.{}&order=start_time.asc",
            professional_id,
            end_time.to_rfc3339(),
            start_time.to_rfc3339()
        );
        let rows: Vec<Appointment> = self
            .storage
            .fetch("appointments", &query)
            .await
            .map_err(|e| AppointmentError::Storage(e.to_string()))?;

        Ok(rows
            .into_iter()
            .filter(|appointment| !appointment.status.is_cancelled())
            .collect())
    }

    async fn patch(
        &self,
        id: Uuid,
        body: serde_json::Value,
    ) -> Result<Appointment, AppointmentError> {
        let rows: Vec<Appointment> = self
            .storage
            .update("appointments", &format!("id=eq.{}", id), body)
            .await
            .map_err(|e| AppointmentError::Storage(e.to_string()))?;
        rows.into_iter().next().ok_or(AppointmentError::NotFound)
    }
}
