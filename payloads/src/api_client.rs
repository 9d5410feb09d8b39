use crate::{EventId, requests, responses};
use reqwest::StatusCode;
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the events service.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/{path}", self.address.trim_end_matches('/'))
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.inner_client
            .post(self.format_url(path))
            .json(body)
            .send()
            .await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        self.inner_client.get(self.format_url(path)).send().await
    }
}

/// Methods on the events service
impl APIClient {
    /// List every upcoming event.
    pub async fn list_events(
        &self,
    ) -> Result<Vec<responses::Event>, ClientError> {
        let response = self.empty_get("events").await?;
        ok_body(response).await
    }

    pub async fn get_event(
        &self,
        event_id: &EventId,
    ) -> Result<responses::Event, ClientError> {
        let response = self.empty_get(&format!("events/{event_id}")).await?;
        ok_body(response).await
    }

    /// Register an email address without verification.
    pub async fn submit_email(
        &self,
        details: &requests::SubmitEmail,
    ) -> Result<(), ClientError> {
        let response = self.post("submit-email", details).await?;
        ok_empty(response).await
    }

    /// Request a one-time passcode for the given address.
    pub async fn send_otp(
        &self,
        details: &requests::SendOtp,
    ) -> Result<(), ClientError> {
        let response = self.post("send-otp", details).await?;
        ok_empty(response).await
    }

    /// Verify a passcode previously sent with [`APIClient::send_otp`].
    pub async fn verify_otp(
        &self,
        details: &requests::VerifyOtp,
    ) -> Result<(), ClientError> {
        let response = self.post("verify-otp", details).await?;
        ok_empty(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    /// The reason the service gave for rejecting the request, if the body
    /// carried a string `detail` field.
    pub fn detail(&self) -> Option<String> {
        match self {
            ClientError::APIError(_, body) => {
                serde_json::from_str::<responses::ErrorDetail>(body)
                    .ok()?
                    .message()
                    .map(str::to_string)
            }
            ClientError::Network(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::APIError(status, _) => Some(*status),
            ClientError::Network(error) => error.status(),
        }
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}
