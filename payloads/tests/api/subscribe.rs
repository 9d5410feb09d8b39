use payloads::{ClientError, requests};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{body_json, method, path},
};

use crate::helpers::{assert_status_code, spawn_app};

#[tokio::test]
async fn submit_email() -> anyhow::Result<()> {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/submit-email"))
        .and(body_json(json!({"email": "a@b.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&app.server)
        .await;

    let body = requests::SubmitEmail {
        email: "a@b.com".into(),
    };
    app.client.submit_email(&body).await?;

    Ok(())
}

#[tokio::test]
async fn submit_email_rejected_with_detail() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/submit-email"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "invalid email"})),
        )
        .mount(&app.server)
        .await;

    let body = requests::SubmitEmail {
        email: "not-an-email".into(),
    };
    let result = app.client.submit_email(&body).await;

    match result {
        Err(error @ ClientError::APIError(..)) => {
            assert_eq!(error.status(), Some(StatusCode::BAD_REQUEST));
            assert_eq!(error.detail().as_deref(), Some("invalid email"));
        }
        _ => panic!("Expected APIError"),
    }
}

#[tokio::test]
async fn send_then_verify_otp() -> anyhow::Result<()> {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/send-otp"))
        .and(body_json(json!({"email": "a@b.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&app.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/verify-otp"))
        .and(body_json(json!({"email": "a@b.com", "otp": "000000"})))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "Invalid OTP"})),
        )
        .mount(&app.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/verify-otp"))
        .and(body_json(json!({"email": "a@b.com", "otp": "424242"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&app.server)
        .await;

    app.client
        .send_otp(&requests::SendOtp {
            email: "a@b.com".into(),
        })
        .await?;

    let wrong = app
        .client
        .verify_otp(&requests::VerifyOtp {
            email: "a@b.com".into(),
            otp: "000000".into(),
        })
        .await;
    match &wrong {
        Err(error) => {
            assert_eq!(error.detail().as_deref(), Some("Invalid OTP"))
        }
        Ok(()) => panic!("Expected the wrong code to be rejected"),
    }
    assert_status_code(wrong, StatusCode::BAD_REQUEST);

    app.client
        .verify_otp(&requests::VerifyOtp {
            email: "a@b.com".into(),
            otp: "424242".into(),
        })
        .await?;

    Ok(())
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    // Nothing listens on port 1, so the connection is refused.
    let client = payloads::APIClient::new("http://127.0.0.1:1");
    let result = client
        .submit_email(&requests::SubmitEmail {
            email: "a@b.com".into(),
        })
        .await;

    match result {
        Err(error @ ClientError::Network(_)) => {
            assert_eq!(error.detail(), None);
            assert_eq!(
                error.to_string(),
                "Network error. Please check your connection."
            );
        }
        _ => panic!("Expected a network error"),
    }
}
