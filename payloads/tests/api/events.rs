use payloads::EventId;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{method, path},
};

use crate::helpers::{assert_status_code, event_a, event_b, spawn_app};

#[tokio::test]
async fn list_events() -> anyhow::Result<()> {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(vec![event_a(), event_b()]),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let events = app.client.list_events().await?;
    assert_eq!(events, vec![event_a(), event_b()]);

    Ok(())
}

#[tokio::test]
async fn list_events_tolerates_missing_optional_fields() -> anyhow::Result<()> {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "abc",
            "title": "Open Mic",
            "venue": "The Vanguard",
            "image_url": "https://img.example.com/mic.jpg",
            "ticket_url": "https://tickets.example.com/mic",
        }])))
        .mount(&app.server)
        .await;

    let events = app.client.list_events().await?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, EventId::from("abc"));
    assert_eq!(events[0].date, None);
    assert!(events[0].description.is_empty());

    Ok(())
}

#[tokio::test]
async fn get_event() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let event = event_a();

    Mock::given(method("GET"))
        .and(path(format!("/events/{}", event.id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(&event))
        .mount(&app.server)
        .await;

    let fetched = app.client.get_event(&event.id).await?;
    assert_eq!(fetched, event);

    Ok(())
}

#[tokio::test]
async fn get_missing_event() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/events/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"detail": "Event not found"})),
        )
        .mount(&app.server)
        .await;

    let result = app.client.get_event(&EventId::from("missing")).await;
    assert_status_code(result, StatusCode::NOT_FOUND);
}
