use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use scheduling_cell::models::Appointment;
use scheduling_cell::{slots, time, vacation, work_window};
use shared_config::AppConfig;
use shared_database::StorageClient;

use crate::models::{DaySchedule, ProfessionalError};
use crate::services::professional::ProfessionalService;

/// Composes the scheduling engine for the HTTP surface: fetches the
/// professional and the day's appointments, then runs the pure computation.
/// Results are advisory; the data store's overlap constraint remains the
/// authoritative guard at write time.
pub struct AvailabilityService {
    professionals: ProfessionalService,
    storage: StorageClient,
    config: AppConfig,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            professionals: ProfessionalService::new(config),
            storage: StorageClient::new(config),
            config: config.clone(),
        }
    }

    /// Vacation flag plus ordered open work intervals for one date, the
    /// bands a booking calendar renders.
    pub async fn day_schedule(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<DaySchedule, ProfessionalError> {
        debug!("Computing day schedule for {} on {}", professional_id, date);

        let professional = self.professionals.get_professional(professional_id).await?;
        let tz = self.config.tz();

        Ok(DaySchedule {
            professional_id,
            date,
            on_vacation: vacation::is_on_vacation(&professional, date),
            work_intervals: work_window::open_intervals(&professional, date, tz),
        })
    }

    /// Bookable start times for one date, ascending. Cancelled appointments
    /// stay in storage for history and are dropped here before the engine
    /// runs.
    pub async fn available_slots(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
        duration_minutes: i64,
        granularity_override: Option<i64>,
    ) -> Result<Vec<DateTime<Utc>>, ProfessionalError> {
        debug!(
            "Computing available slots for {} on {} ({} min)",
            professional_id, date, duration_minutes
        );

        let professional = self.professionals.get_professional(professional_id).await?;
        let tz = self.config.tz();
        let granularity = granularity_override
            .filter(|minutes| *minutes > 0)
            .unwrap_or(self.config.slot_granularity_minutes);

        let appointments = self.day_appointments(professional_id, date).await?;

        Ok(slots::available_slots(
            &professional,
            date,
            duration_minutes,
            &appointments,
            tz,
            granularity,
        )
        .collect())
    }

    /// The professional's non-cancelled appointments starting inside the
    /// date's local day window.
    async fn day_appointments(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, ProfessionalError> {
        let tz = self.config.tz();
        let day_start = time::start_of_day(date, tz);
        let day_end = time::end_of_day(date, tz);

        let query = format!(
            "professional_id=eq.{}&start_time=gte.{}&start_time=lte.{}&order=start_time.asc",
            professional_id,
            day_start.to_rfc3339(),
            day_end.to_rfc3339()
        );
        let appointments: Vec<Appointment> = self
            .storage
            .fetch("appointments", &query)
            .await
            .map_err(|e| ProfessionalError::Storage(e.to_string()))?;

        Ok(appointments
            .into_iter()
            .filter(|appointment| !appointment.status.is_cancelled())
            .collect())
    }
}
