mod common;

use common::mock_server::{activity_json, SustainMock};
use serde_json::json;
use sustain::activities::{ActivityLog, Confirmation};
use sustain::types::{ActivityDraft, Category};
use sustain::Error;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_refresh_preserves_backend_order() {
    let mock = SustainMock::start().await;
    mock.mount_json(
        "GET",
        "/api/activities",
        200,
        json!([
            activity_json(2, "water", "Shorter shower", 20.0, "L"),
            activity_json(1, "energy", "Turned off lights", 2.5, "kWh"),
        ]),
    )
    .await;

    let mut log = ActivityLog::new(mock.client());
    log.refresh().await.unwrap();

    assert_eq!(log.activities().len(), 2);
    assert_eq!(log.activities()[0].id, 2);
    assert_eq!(log.activities()[1].id, 1);
}

#[tokio::test]
async fn test_fetch_single_activity_by_id() {
    let mock = SustainMock::start().await;
    mock.mount_json(
        "GET",
        "/api/activities/7",
        200,
        activity_json(7, "waste", "Composted food scraps", 1.2, "kg"),
    )
    .await;

    let client = mock.client();
    let activity = client.activity(7).await.unwrap();

    assert_eq!(activity.id, 7);
    assert_eq!(activity.category, Category::Waste);
    assert_eq!(activity.action, "Composted food scraps");
    assert_eq!(activity.value, 1.2);
    assert_eq!(activity.unit, "kg");
}

#[tokio::test]
async fn test_fetch_missing_activity_surfaces_detail() {
    let mock = SustainMock::start().await;
    mock.mount_json(
        "GET",
        "/api/activities/99",
        404,
        json!({ "detail": "Activity not found" }),
    )
    .await;

    let client = mock.client();
    let err = client.activity(99).await.unwrap_err();
    assert_eq!(err.to_string(), "Activity not found");
}

#[tokio::test]
async fn test_refresh_failure_leaves_previous_list() {
    let mock = SustainMock::start().await;
    Mock::given(method("GET"))
        .and(path("/api/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([activity_json(
            1,
            "energy",
            "Turned off lights",
            2.5,
            "kWh"
        )])))
        .up_to_n_times(1)
        .mount(&mock.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/activities"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock.server)
        .await;

    let mut log = ActivityLog::new(mock.client());
    log.refresh().await.unwrap();
    assert_eq!(log.activities().len(), 1);

    assert!(log.refresh().await.is_err());
    assert_eq!(log.activities().len(), 1);
    assert_eq!(log.activities()[0].id, 1);
}

#[tokio::test]
async fn test_create_with_empty_fields_never_calls_backend() {
    let mock = SustainMock::start().await;
    let log = ActivityLog::new(mock.client());

    let mut draft = ActivityDraft::new();
    draft.value = "2.5".to_string();
    assert!(matches!(log.create(&draft).await, Err(Error::Validation(_))));

    let mut draft = ActivityDraft::new();
    draft.action = "Turned off lights".to_string();
    assert!(matches!(log.create(&draft).await, Err(Error::Validation(_))));

    assert_eq!(mock.request_count().await, 0);
}

#[tokio::test]
async fn test_create_then_refresh_contains_item_once() {
    let mock = SustainMock::start().await;
    Mock::given(method("POST"))
        .and(path("/api/activities"))
        .and(body_partial_json(json!({
            "category": "energy",
            "action": "Turned off lights",
            "value": 2.5,
            "unit": "kWh",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(activity_json(
            10,
            "energy",
            "Turned off lights",
            2.5,
            "kWh",
        )))
        .mount(&mock.server)
        .await;
    mock.mount_json(
        "GET",
        "/api/activities",
        200,
        json!([activity_json(10, "energy", "Turned off lights", 2.5, "kWh")]),
    )
    .await;

    let mut log = ActivityLog::new(mock.client());
    let mut draft = ActivityDraft::new();
    draft.set_category(Category::Energy);
    draft.action = "Turned off lights".to_string();
    draft.value = "2.5".to_string();

    let created = log.create(&draft).await.unwrap();
    assert_eq!(created.id, 10);
    assert_eq!(created.value, 2.5);

    // The mutation handler's explicit refresh step.
    log.refresh().await.unwrap();
    let matching: Vec<_> = log
        .activities()
        .iter()
        .filter(|a| a.id == 10 && a.action == "Turned off lights" && a.value == 2.5)
        .collect();
    assert_eq!(matching.len(), 1);
}

#[tokio::test]
async fn test_delete_denied_makes_no_call() {
    let mock = SustainMock::start().await;
    let mut log = ActivityLog::new(mock.client());

    let issued = log.delete(1, Confirmation::Denied).await.unwrap();
    assert!(!issued);
    assert_eq!(mock.request_count().await, 0);
}

#[tokio::test]
async fn test_delete_granted_removes_item_by_id() {
    let mock = SustainMock::start().await;
    mock.mount_json(
        "GET",
        "/api/activities",
        200,
        json!([
            activity_json(2, "water", "Shorter shower", 20.0, "L"),
            activity_json(1, "energy", "Turned off lights", 2.5, "kWh"),
        ]),
    )
    .await;
    mock.mount_empty("DELETE", "/api/activities/1", 204).await;

    let mut log = ActivityLog::new(mock.client());
    log.refresh().await.unwrap();

    let issued = log.delete(1, Confirmation::Granted).await.unwrap();
    assert!(issued);
    assert!(log.activities().iter().all(|a| a.id != 1));
    assert_eq!(log.activities().len(), 1);
}

#[tokio::test]
async fn test_delete_failure_leaves_list_unchanged() {
    let mock = SustainMock::start().await;
    mock.mount_json(
        "GET",
        "/api/activities",
        200,
        json!([activity_json(1, "energy", "Turned off lights", 2.5, "kWh")]),
    )
    .await;
    mock.mount_json(
        "DELETE",
        "/api/activities/1",
        404,
        json!({ "detail": "Activity not found" }),
    )
    .await;

    let mut log = ActivityLog::new(mock.client());
    log.refresh().await.unwrap();

    let err = log.delete(1, Confirmation::Granted).await.unwrap_err();
    assert_eq!(err.to_string(), "Activity not found");
    assert_eq!(log.activities().len(), 1);
}
