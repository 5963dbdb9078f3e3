use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::AppError;

use crate::services::{AvailabilityService, ProfessionalService};

#[derive(Debug, Deserialize)]
pub struct WorkIntervalsQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct AvailableSlotsQuery {
    pub date: Option<NaiveDate>,
    pub duration_minutes: Option<i64>,
    pub granularity_minutes: Option<i64>,
}

#[axum::debug_handler]
pub async fn list_professionals(
    State(state): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let service = ProfessionalService::new(&state);
    let professionals = service.list_professionals().await?;

    let total = professionals.len();
    Ok(Json(json!({
        "professionals": professionals,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn get_professional(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = ProfessionalService::new(&state);
    let professional = service.get_professional(professional_id).await?;

    Ok(Json(json!(professional)))
}

#[axum::debug_handler]
pub async fn get_work_intervals(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<WorkIntervalsQuery>,
) -> Result<Json<Value>, AppError> {
    let date = query
        .date
        .ok_or_else(|| AppError::BadRequest("Missing required query parameter: date".to_string()))?;

    let service = AvailabilityService::new(&state);
    let schedule = service.day_schedule(professional_id, date).await?;

    Ok(Json(json!(schedule)))
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<Value>, AppError> {
    let date = query
        .date
        .ok_or_else(|| AppError::BadRequest("Missing required query parameter: date".to_string()))?;
    let duration_minutes = query.duration_minutes.ok_or_else(|| {
        AppError::BadRequest("Missing required query parameter: duration_minutes".to_string())
    })?;
    if duration_minutes <= 0 {
        return Err(AppError::BadRequest(
            "duration_minutes must be positive".to_string(),
        ));
    }

    let service = AvailabilityService::new(&state);
    let slots = service
        .available_slots(
            professional_id,
            date,
            duration_minutes,
            query.granularity_minutes,
        )
        .await?;

    let total = slots.len();
    Ok(Json(json!({
        "professional_id": professional_id,
        "date": date,
        "duration_minutes": duration_minutes,
        "available_slots": slots,
        "total": total
    })))
}
