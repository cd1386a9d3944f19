mod common;

use common::mock_server::{activity_json, SustainMock};
use serde_json::json;
use sustain::dashboard;
use sustain::types::Category;

fn stats_body() -> serde_json::Value {
    json!({
        "total_activities": 3,
        "energy_saved": 12.5,
        "water_saved": 40.0,
        "transport_emissions": 8.2,
        "waste_reduced": 1.4,
        "recent_activities": [
            activity_json(3, "transport", "Cycled to work", 8.2, "km"),
        ],
    })
}

#[tokio::test]
async fn test_load_joins_stats_and_recommendations() {
    let mock = SustainMock::start().await;
    mock.mount_json("GET", "/api/dashboard", 200, stats_body()).await;
    mock.mount_json(
        "GET",
        "/api/recommendations",
        200,
        json!({
            "recommendations": [{
                "category": "water",
                "title": "Monitor Water Conservation",
                "description": "Track your water usage to reduce waste.",
                "priority": "high",
            }],
        }),
    )
    .await;

    let client = mock.client();
    let data = dashboard::load(&client).await.unwrap();

    assert_eq!(data.stats.total_activities, 3);
    assert_eq!(data.stats.energy_saved, 12.5);
    assert_eq!(data.stats.recent_activities.len(), 1);
    assert_eq!(data.recommendations.len(), 1);
    assert_eq!(data.recommendations[0].category, Category::Water);
    assert_eq!(data.recommendations[0].priority.as_deref(), Some("high"));
}

#[tokio::test]
async fn test_load_fails_when_either_read_fails() {
    let mock = SustainMock::start().await;
    mock.mount_json("GET", "/api/dashboard", 200, stats_body()).await;
    mock.mount_empty("GET", "/api/recommendations", 500).await;

    let client = mock.client();
    assert!(dashboard::load(&client).await.is_err());
}
