//! Pure JSON decoders from the EventSub wire protocol to typed records.
//!
//! Every decoder here is stateless: given a [`serde_json::Value`] it either
//! produces a typed record or a [`DecodeError`] pointing at the failing
//! field. Nothing in this module performs I/O.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use twitch_api::secret::Secret;

pub mod automod;
pub mod ban;
pub mod chat_user_message;
pub mod moderate;
pub mod suspicious_user;
pub mod update;

pub use twitch_api::events::types::Subscription;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("expected a JSON object at the payload root")]
    ExpectedObject,
    #[error("missing required field `{0}`")]
    FieldMissing(&'static str),
    #[error("unknown variant `{0}`")]
    UnknownVariant(String),
    #[error("missing payload for action `{0}`")]
    MissingVariantPayload(String),
    #[error("invalid timestamp: {0}")]
    BadTimestamp(#[from] chrono::ParseError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// `metadata` of every frame, common to all five `message_type`s.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    pub message_id: String,
    pub message_type: String,
    pub message_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub subscription_type: Option<String>,
    #[serde(default)]
    pub subscription_version: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    SessionWelcome,
    SessionKeepalive,
    SessionReconnect,
    Notification,
    Revocation,
}

impl Metadata {
    /// `None` for any `message_type` string outside the five the wire
    /// protocol defines — the caller surfaces this as `UnknownMessageType`.
    pub fn message_type(&self) -> Option<MessageType> {
        Some(match self.message_type.as_str() {
            "session_welcome" => MessageType::SessionWelcome,
            "session_keepalive" => MessageType::SessionKeepalive,
            "session_reconnect" => MessageType::SessionReconnect,
            "notification" => MessageType::Notification,
            "revocation" => MessageType::Revocation,
            _ => return None,
        })
    }
}

/// The root `{metadata, payload}` object carried by every frame.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    pub metadata: Metadata,
    pub payload: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionWelcomePayload {
    pub session: SessionWelcomeInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionWelcomeInfo {
    pub id: Secret,
    pub status: String,
    pub keepalive_timeout_seconds: u32,
    #[serde(default)]
    pub reconnect_url: Option<Secret>,
    pub connected_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionReconnectPayload {
    pub session: SessionReconnectInfo,
}

/// Shares its shape with [`SessionWelcomeInfo`] except `keepalive_timeout_seconds`
/// is not resent and `reconnect_url` is always present (`session-welcome.hpp`
/// in the original source models both messages with the same payload type).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionReconnectInfo {
    pub id: Secret,
    pub status: String,
    #[serde(default)]
    pub keepalive_timeout_seconds: Option<u32>,
    pub reconnect_url: Secret,
    pub connected_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationPayload {
    pub subscription: SubscriptionInfo,
    pub event: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevocationPayload {
    pub subscription: SubscriptionInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscriptionInfo {
    pub id: Secret,
    pub status: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub version: String,
    pub cost: u32,
    pub condition: Value,
    pub transport: TransportInfo,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportInfo {
    pub method: String,
    #[serde(default)]
    pub session_id: Option<Secret>,
}

/// Decodes `event` into `T` iff `(type_, version)` matches `T::TYPE`/`T::VERSION`.
///
/// Returns `Ok(None)` for a type mismatch (the caller tries the next handler
/// table row); a version mismatch for a matching type is a decode error
/// since it means the handler table and the server disagree about the shape.
pub fn parse_event<T: Subscription>(
    type_: &str,
    version: &str,
    event: &Value,
) -> Result<Option<T>> {
    if type_ != T::TYPE {
        return Ok(None);
    }
    if version != T::VERSION {
        return Err(DecodeError::UnknownVariant(format!("{type_}@{version}")));
    }
    Ok(Some(serde_json::from_value(event.clone())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_requires_subscription_fields_only_for_notification() {
        let welcome: Metadata = serde_json::from_value(serde_json::json!({
            "message_id": "abc",
            "message_type": "session_welcome",
            "message_timestamp": "2023-05-14T12:31:47.995262791Z",
        }))
        .unwrap();
        assert_eq!(welcome.message_type(), Some(MessageType::SessionWelcome));
        assert!(welcome.subscription_type.is_none());
    }

    #[test]
    fn unknown_message_type_is_none() {
        let meta: Metadata = serde_json::from_value(serde_json::json!({
            "message_id": "abc",
            "message_type": "something_else",
            "message_timestamp": "2023-05-14T12:31:47.995262791Z",
        }))
        .unwrap();
        assert_eq!(meta.message_type(), None);
    }

    #[test]
    fn envelope_root_must_be_an_object() {
        let err = serde_json::from_value::<Envelope>(serde_json::json!([1, 2, 3])).unwrap_err();
        assert!(err.is_data());
    }
}
