use payloads::{APIClient, ClientError, EventId, responses};
use reqwest::StatusCode;
use wiremock::MockServer;

/// A mock events service together with a client pointed at it.
pub struct TestApp {
    pub server: MockServer,
    pub client: APIClient,
}

pub async fn spawn_app() -> TestApp {
    let server = MockServer::start().await;
    let client = APIClient::new(server.uri());
    TestApp { server, client }
}

pub fn assert_status_code<T>(
    result: Result<T, ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}

pub fn event_a() -> responses::Event {
    responses::Event {
        id: EventId::from("665f1c2a9b1e8a0012345678"),
        title: "Harbour Lights Festival".into(),
        description: "Live music on the foreshore.".into(),
        date: Some("2025-05-28T20:30:00".into()),
        venue: "Barangaroo Reserve".into(),
        image_url: "https://img.example.com/harbour.jpg".into(),
        ticket_url: "https://tickets.example.com/harbour".into(),
        source_url: None,
    }
}

pub fn event_b() -> responses::Event {
    responses::Event {
        id: EventId::from("665f1c2a9b1e8a0087654321"),
        title: "Late Night Comedy".into(),
        description: String::new(),
        date: Some("Tomorrow at 9:00 PM".into()),
        venue: "Enmore Theatre".into(),
        image_url: "https://img.example.com/comedy.jpg".into(),
        ticket_url: "https://tickets.example.com/comedy".into(),
        source_url: Some("https://source.example.com/comedy".into()),
    }
}
