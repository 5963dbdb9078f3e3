use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::models::ConflictCheckRequest;
use appointment_cell::services::ConflictCheckService;
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

    async fn mock_appointments(&self, body: Vec<serde_json::Value>) {
        Mock::given(method("GET"))
            .and(path("/rest/v1/appointments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.mock_server)
            .await;
    }
}

fn instant(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, hour, minute, 0).unwrap()
}

fn appointment_row(
    id: Uuid,
    professional_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    status: &str,
) -> serde_json::Value {
    json!({
        "id": id,
        "professional_id": professional_id,
        "patient_id": Uuid::new_v4(),
        "procedure_id": Uuid::new_v4(),
        "start_time": start,
        "end_time": end,
        "status": status,
        "price": null,
        "created_at": Utc::now(),
        "updated_at": Utc::now()
    })
}

fn request(professional_id: Uuid, start: DateTime<Utc>, end: DateTime<Utc>) -> ConflictCheckRequest {
    ConflictCheckRequest {
        professional_id,
        start_time: start,
        end_time: end,
        exclude_appointment_id: None,
    }
}

#[tokio::test]
async fn test_overlap_reports_the_conflicting_rows() {
    let setup = TestSetup::new().await;
    let professional_id = Uuid::new_v4();
    let existing_id = Uuid::new_v4();
    setup
        .mock_appointments(vec![appointment_row(
            existing_id,
            professional_id,
            instant(9, 0),
            instant(9, 30),
            "confirmed",
        )])
        .await;

    let service = ConflictCheckService::new(&setup.config);
    let response = service
        .check(request(professional_id, instant(9, 15), instant(9, 45)))
        .await
        .unwrap();

    assert!(response.has_conflict);
    assert_eq!(response.conflicting_appointments.len(), 1);
    assert_eq!(response.conflicting_appointments[0].id, existing_id);
}

#[tokio::test]
async fn test_touching_intervals_do_not_conflict() {
    let setup = TestSetup::new().await;
    let professional_id = Uuid::new_v4();
    setup
        .mock_appointments(vec![appointment_row(
            Uuid::new_v4(),
            professional_id,
            instant(9, 0),
            instant(9, 30),
            "confirmed",
        )])
        .await;

    let service = ConflictCheckService::new(&setup.config);
    let response = service
        .check(request(professional_id, instant(9, 30), instant(10, 0)))
        .await
        .unwrap();

    assert!(!response.has_conflict);
    assert!(response.conflicting_appointments.is_empty());
}

#[tokio::test]
async fn test_cancelled_rows_never_count_as_conflicts() {
    let setup = TestSetup::new().await;
    let professional_id = Uuid::new_v4();
    setup
        .mock_appointments(vec![appointment_row(
            Uuid::new_v4(),
            professional_id,
            instant(9, 0),
            instant(9, 30),
            "cancelled",
        )])
        .await;

    let service = ConflictCheckService::new(&setup.config);
    let response = service
        .check(request(professional_id, instant(9, 0), instant(9, 30)))
        .await
        .unwrap();

    assert!(!response.has_conflict);
}

#[tokio::test]
async fn test_excluded_appointment_is_skipped() {
    let setup = TestSetup::new().await;
    let professional_id = Uuid::new_v4();
    let existing_id = Uuid::new_v4();
    setup
        .mock_appointments(vec![appointment_row(
            existing_id,
            professional_id,
            instant(9, 0),
            instant(9, 30),
            "confirmed",
        )])
        .await;

    let service = ConflictCheckService::new(&setup.config);
    let response = service
        .check(ConflictCheckRequest {
            professional_id,
            start_time: instant(9, 0),
            end_time: instant(9, 30),
            exclude_appointment_id: Some(existing_id),
        })
        .await
        .unwrap();

    assert!(!response.has_conflict);
}

#[tokio::test]
async fn test_inverted_candidate_short_circuits_without_a_fetch() {
    // No appointment mock mounted: an inverted candidate must not reach
    // storage at all.
    let setup = TestSetup::new().await;
    let professional_id = Uuid::new_v4();

    let service = ConflictCheckService::new(&setup.config);
    let response = service
        .check(request(professional_id, instant(10, 0), instant(9, 0)))
        .await
        .unwrap();

    assert!(!response.has_conflict);
    assert!(response.conflicting_appointments.is_empty());
}
