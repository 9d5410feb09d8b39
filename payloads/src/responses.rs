use crate::EventId;
use serde::{Deserialize, Serialize};

/// An event as listed by the events service.
///
/// `date` is kept as the raw string the service scraped. It is usually an
/// ISO 8601 date-time, but can be a relative phrase like "Tomorrow at 12:00
/// PM", and is absent when the source page had no date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
    pub venue: String,
    pub image_url: String,
    pub ticket_url: String,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Body of a rejected request.
///
/// `detail` is usually a human readable string, but validation failures
/// return a list of field errors instead, so it is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorDetail {
    /// The reason to show a visitor, if the service gave a plain string.
    pub fn message(&self) -> Option<&str> {
        match &self.detail {
            Some(serde_json::Value::String(message))
                if !message.trim().is_empty() =>
            {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}
