//! Wire types shared between the events front-end and the events service,
//! plus the HTTP client that speaks them.

use derive_more::Display;
use serde::{Deserialize, Serialize};

pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};

/// Identifier of an event record as issued by the events service.
///
/// The service stores events in a document database, so ids are opaque
/// strings rather than integers.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct EventId(pub String);

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
