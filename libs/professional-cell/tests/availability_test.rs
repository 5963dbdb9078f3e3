use assert_matches::assert_matches;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use professional_cell::models::ProfessionalError;
use professional_cell::services::{AvailabilityService, ProfessionalService};
use shared_config::AppConfig;

struct TestSetup {
    mock_server: MockServer,
    config: AppConfig,
}

impl TestSetup {
    async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let config = AppConfig {
            storage_url: mock_server.uri(),
            storage_service_key: "test-service-key".to_string(),
            clinic_timezone: "UTC".to_string(),
            slot_granularity_minutes: 30,
        };
        Self {
            mock_server,
            config,
        }
    }

    async fn mock_professional(&self, id: Uuid) {
        Mock::given(method("GET"))
            .and(path("/rest/v1/professionals"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![json!({
                "id": id,
                "full_name": "Carla Mendes",
                "specialty": "Dermatology",
                "working_days": [false, true, true, true, true, true, false],
                "first_shift_start": "08:00",
                "first_shift_end": "12:00",
                "break_times": [{ "start": "10:00", "end": "10:30" }],
                "created_at": Utc::now(),
                "updated_at": Utc::now()
            })]))
            .mount(&self.mock_server)
            .await;
    }

    async fn mock_appointments(&self, body: Vec<serde_json::Value>) {
        Mock::given(method("GET"))
            .and(path("/rest/v1/appointments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }
}

fn appointment_row(professional_id: Uuid, start: &str, end: &str, status: &str) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "professional_id": professional_id,
        "patient_id": Uuid::new_v4(),
        "procedure_id": Uuid::new_v4(),
        "start_time": start,
        "end_time": end,
        "status": status,
        "price": 120.0,
        "created_at": Utc::now(),
        "updated_at": Utc::now()
    })
}

// 2025-06-02 is a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

#[tokio::test]
async fn test_get_professional_parses_the_row_at_the_boundary() {
    let setup = TestSetup::new().await;
    let id = Uuid::new_v4();
    setup.mock_professional(id).await;

    let service = ProfessionalService::new(&setup.config);
    let professional = service.get_professional(id).await.unwrap();

    assert_eq!(professional.id, id);
    assert!(professional.schedule.first_shift.is_some());
    assert_eq!(professional.schedule.breaks.len(), 1);
}

#[tokio::test]
async fn test_get_professional_maps_empty_result_to_not_found() {
    let setup = TestSetup::new().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/professionals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<serde_json::Value>::new()))
        .mount(&setup.mock_server)
        .await;

    let service = ProfessionalService::new(&setup.config);
    let result = service.get_professional(Uuid::new_v4()).await;

    assert_matches!(result, Err(ProfessionalError::NotFound));
}

#[tokio::test]
async fn test_day_schedule_reports_intervals_around_the_break() {
    let setup = TestSetup::new().await;
    let id = Uuid::new_v4();
    setup.mock_professional(id).await;

    let service = AvailabilityService::new(&setup.config);
    let schedule = service.day_schedule(id, monday()).await.unwrap();

    assert!(!schedule.on_vacation);
    assert_eq!(schedule.work_intervals.len(), 2);
    assert_eq!(
        schedule.work_intervals[0].end,
        Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()
    );
    assert_eq!(
        schedule.work_intervals[1].start,
        Utc.with_ymd_and_hms(2025, 6, 2, 10, 30, 0).unwrap()
    );
}

#[tokio::test]
async fn test_available_slots_excludes_booked_times() {
    let setup = TestSetup::new().await;
    let id = Uuid::new_v4();
    setup.mock_professional(id).await;
    setup
        .mock_appointments(vec![appointment_row(
            id,
            "2025-06-02T09:00:00Z",
            "2025-06-02T09:30:00Z",
            "confirmed",
        )])
        .await;

    let service = AvailabilityService::new(&setup.config);
    let slots = service.available_slots(id, monday(), 30, None).await.unwrap();

    assert!(!slots.contains(&Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap()));
    assert!(slots.contains(&Utc.with_ymd_and_hms(2025, 6, 2, 8, 30, 0).unwrap()));
    assert!(slots.contains(&Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap()));
}

#[tokio::test]
async fn test_cancelled_appointments_do_not_block_slots() {
    let setup = TestSetup::new().await;
    let id = Uuid::new_v4();
    setup.mock_professional(id).await;
    setup
        .mock_appointments(vec![appointment_row(
            id,
            "2025-06-02T09:00:00Z",
            "2025-06-02T09:30:00Z",
            "cancelled",
        )])
        .await;

    let service = AvailabilityService::new(&setup.config);
    let slots = service.available_slots(id, monday(), 30, None).await.unwrap();

    assert!(slots.contains(&Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap()));
}

#[tokio::test]
async fn test_granularity_override_changes_the_step() {
    let setup = TestSetup::new().await;
    let id = Uuid::new_v4();
    setup.mock_professional(id).await;
    setup.mock_appointments(Vec::new()).await;

    let service = AvailabilityService::new(&setup.config);
    let coarse = service
        .available_slots(id, monday(), 30, Some(60))
        .await
        .unwrap();
    let fine = service.available_slots(id, monday(), 30, None).await.unwrap();

    assert!(coarse.len() < fine.len());
    assert!(coarse.contains(&Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap()));
    assert!(!coarse.contains(&Utc.with_ymd_and_hms(2025, 6, 2, 8, 30, 0).unwrap()));
}

#[tokio::test]
async fn test_storage_failure_surfaces_as_storage_error() {
    let setup = TestSetup::new().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/professionals"))
        .respond_with(ResponseTemplate::new(500).set_body_string("storage down"))
        .mount(&setup.mock_server)
        .await;

    let service = ProfessionalService::new(&setup.config);
    let result = service.get_professional(Uuid::new_v4()).await;

    assert_matches!(result, Err(ProfessionalError::Storage(_)));
}
