use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scheduling_cell::models::{Appointment, AppointmentStatus};
use shared_models::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub professional_id: Uuid,
    pub patient_id: Uuid,
    pub procedure_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleRequest {
    pub start_time: DateTime<Utc>,
    /// Keeps the current duration when absent.
    pub duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckRequest {
    pub professional_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub exclude_appointment_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    pub has_conflict: bool,
    pub conflicting_appointments: Vec<Appointment>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Professional not found")]
    ProfessionalNotFound,

    #[error("Appointment conflicts with an existing booking")]
    Conflict,

    #[error("Invalid appointment time: {0}")]
    InvalidTime(String),

    #[error("Appointment cannot move from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Appointment in status {0} cannot be rescheduled")]
    NotReschedulable(AppointmentStatus),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
            AppointmentError::ProfessionalNotFound => {
                AppError::NotFound("Professional not found".to_string())
            }
            AppointmentError::Conflict => {
                AppError::Conflict("Appointment conflicts with an existing booking".to_string())
            }
            AppointmentError::InvalidTime(msg) => AppError::BadRequest(msg),
            err @ AppointmentError::InvalidStatusTransition { .. } => {
                AppError::Validation(err.to_string())
            }
            err @ AppointmentError::NotReschedulable(_) => AppError::Validation(err.to_string()),
            AppointmentError::Storage(msg) => AppError::Database(msg),
        }
    }
}
