//! One live WebSocket: welcome → keepalive → reconnect.
//!
//! [`handle_message`] is the pure, unit-tested heart of the state machine;
//! [`Session::run`] wraps it with the actual socket, keepalive timer, and
//! listener dispatch.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use thiserror::Error;
use tokio::{net::TcpStream, sync::mpsc, time::Instant};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream,
    tungstenite::{Message as WsMessage, client::IntoClientRequest, http::HeaderValue},
};
use url::Url;

use crate::{
    codec::{
        self, DecodeError, Envelope, MessageType, NotificationPayload, RevocationPayload,
        SessionReconnectInfo, SessionReconnectPayload, SessionWelcomeInfo, SessionWelcomePayload,
        SubscriptionInfo,
    },
    handler_table::dispatch_notification,
    listener::Listener,
};

const KEEPALIVE_SLACK: Duration = Duration::from_secs(1);
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Handshaking,
    Ready,
    Reconnecting,
    Closing,
    Closed,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("connect: {0}")]
    Connect(#[source] tokio_tungstenite::tungstenite::Error),
    #[error("connect or handshake did not complete within the deadline")]
    HandshakeTimeout,
    #[error("read: {0}")]
    Read(#[source] tokio_tungstenite::tungstenite::Error),
    #[error("received a binary frame ({0} bytes); only text frames are valid")]
    UnexpectedBinaryFrame(usize),
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),
    #[error("keepalive timeout")]
    KeepaliveTimeout,
}

impl From<DecodeError> for SessionError {
    fn from(err: DecodeError) -> Self {
        SessionError::ProtocolViolation(err.to_string())
    }
}

/// What a single parsed frame asks the Session to do next.
#[derive(Debug)]
pub enum Effect {
    Welcome(SessionWelcomeInfo),
    KeepaliveReset,
    Reconnect(SessionReconnectInfo),
    Notification {
        type_: String,
        version: String,
        event: Value,
    },
    Revocation(SubscriptionInfo),
}

fn accepted_states(message_type: MessageType) -> &'static [SessionState] {
    match message_type {
        MessageType::SessionWelcome => &[SessionState::Handshaking],
        MessageType::SessionReconnect => &[SessionState::Ready],
        MessageType::SessionKeepalive | MessageType::Notification | MessageType::Revocation => {
            &[SessionState::Ready, SessionState::Reconnecting]
        }
    }
}

/// Parses and validates a single frame against the current state. Every
/// error here is fatal to the Session (root-not-object, missing
/// metadata/payload, unknown message type, message received in the wrong
/// state) — the per-event-type schema errors that are allowed to be
/// non-fatal live one layer up, in [`crate::handler_table::dispatch_notification`].
pub fn handle_message(
    state: SessionState,
    raw: &str,
) -> Result<(SessionState, codec::Metadata, Effect), SessionError> {
    let envelope: Envelope =
        serde_json::from_str(raw).map_err(|err| SessionError::ProtocolViolation(err.to_string()))?;

    let Some(message_type) = envelope.metadata.message_type() else {
        return Err(SessionError::ProtocolViolation(format!(
            "unknown message type: {}",
            envelope.metadata.message_type
        )));
    };

    if !accepted_states(message_type).contains(&state) {
        return Err(SessionError::ProtocolViolation(format!(
            "{message_type:?} received in state {state:?}"
        )));
    }

    let metadata = envelope.metadata;

    Ok(match message_type {
        MessageType::SessionWelcome => {
            let payload: SessionWelcomePayload = serde_json::from_value(envelope.payload)
                .map_err(|err| SessionError::ProtocolViolation(err.to_string()))?;
            (SessionState::Ready, metadata, Effect::Welcome(payload.session))
        }
        MessageType::SessionKeepalive => (state, metadata, Effect::KeepaliveReset),
        MessageType::SessionReconnect => {
            let payload: SessionReconnectPayload = serde_json::from_value(envelope.payload)
                .map_err(|err| SessionError::ProtocolViolation(err.to_string()))?;
            (
                SessionState::Reconnecting,
                metadata,
                Effect::Reconnect(payload.session),
            )
        }
        MessageType::Notification => {
            let payload: NotificationPayload = serde_json::from_value(envelope.payload)
                .map_err(|err| SessionError::ProtocolViolation(err.to_string()))?;
            (
                state,
                metadata,
                Effect::Notification {
                    type_: payload.subscription.type_,
                    version: payload.subscription.version,
                    event: payload.event,
                },
            )
        }
        MessageType::Revocation => {
            let payload: RevocationPayload = serde_json::from_value(envelope.payload)
                .map_err(|err| SessionError::ProtocolViolation(err.to_string()))?;
            (state, metadata, Effect::Revocation(payload.subscription))
        }
    })
}

/// High-level events a running Session reports to its owner (the
/// Controller), which has no direct reference back into the Session itself —
/// only this channel.
#[derive(Debug)]
pub enum SessionEvent {
    Welcome { session_id: String },
    Reconnect { url: Url },
    Revoked(SubscriptionInfo),
    Closed(Option<SessionError>),
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Owns one live WebSocket connection to the EventSub endpoint.
pub struct Session {
    state: SessionState,
    keepalive_timeout: Option<Duration>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Connecting,
            keepalive_timeout: None,
        }
    }

    /// Begins the connection and runs the read loop to completion, reporting
    /// high-level events on `events_tx` and typed notifications on
    /// `listener`. Returns once the Session has closed for any reason.
    pub async fn run(
        &mut self,
        host: &str,
        port: u16,
        path: &str,
        user_agent: &str,
        listener: &mut dyn Listener,
        events_tx: mpsc::UnboundedSender<SessionEvent>,
    ) {
        let url = format!("wss://{host}:{port}{path}");
        let outcome = tokio::time::timeout(HANDSHAKE_TIMEOUT, self.connect(&url, user_agent)).await;

        let mut ws = match outcome {
            Ok(Ok(ws)) => ws,
            Ok(Err(err)) => {
                let _ = events_tx.send(SessionEvent::Closed(Some(err)));
                return;
            }
            Err(_) => {
                let _ = events_tx.send(SessionEvent::Closed(Some(SessionError::HandshakeTimeout)));
                return;
            }
        };

        self.state = SessionState::Handshaking;
        let mut keepalive_deadline: Option<Instant> = None;

        let close_reason = loop {
            let sleep = async {
                match keepalive_deadline {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                frame = ws.next() => {
                    match frame {
                        None => break None,
                        Some(Ok(WsMessage::Text(text))) => {
                            match handle_message(self.state, text.as_str()) {
                                Ok((next_state, metadata, effect)) => {
                                    self.state = next_state;
                                    if let Some(keepalive_timeout) = self.keepalive_timeout {
                                        keepalive_deadline =
                                            Some(Instant::now() + keepalive_timeout + KEEPALIVE_SLACK);
                                    }
                                    self.apply_effect(metadata, effect, listener, &events_tx);
                                }
                                Err(err) => break Some(err),
                            }
                        }
                        Some(Ok(WsMessage::Binary(data))) => {
                            break Some(SessionError::UnexpectedBinaryFrame(data.len()));
                        }
                        Some(Ok(WsMessage::Ping(data))) => {
                            if ws.send(WsMessage::Pong(data)).await.is_err() {
                                break Some(SessionError::Read(
                                    tokio_tungstenite::tungstenite::Error::ConnectionClosed,
                                ));
                            }
                        }
                        Some(Ok(WsMessage::Pong(_))) => {}
                        Some(Ok(WsMessage::Close(_))) => break None,
                        Some(Ok(WsMessage::Frame(_))) => unreachable!("raw websocket frame"),
                        Some(Err(err)) => break Some(SessionError::Read(err)),
                    }
                }
                () = sleep, if keepalive_deadline.is_some() => {
                    break Some(SessionError::KeepaliveTimeout);
                }
            }
        };

        self.state = SessionState::Closed;
        let _ = events_tx.send(SessionEvent::Closed(close_reason));
    }

    async fn connect(&self, url: &str, user_agent: &str) -> Result<WsStream, SessionError> {
        let mut request = url
            .into_client_request()
            .map_err(SessionError::Connect)?;
        request.headers_mut().insert(
            tokio_tungstenite::tungstenite::http::header::USER_AGENT,
            HeaderValue::from_str(user_agent).unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        let (ws, _response) = tokio_tungstenite::connect_async(request)
            .await
            .map_err(SessionError::Connect)?;
        Ok(ws)
    }

    fn apply_effect(
        &mut self,
        metadata: codec::Metadata,
        effect: Effect,
        listener: &mut dyn Listener,
        events_tx: &mpsc::UnboundedSender<SessionEvent>,
    ) {
        match effect {
            Effect::Welcome(welcome) => {
                self.keepalive_timeout =
                    Some(Duration::from_secs(welcome.keepalive_timeout_seconds as u64));
                let session_id = welcome.id.access_secret_value().to_owned();
                listener.on_session_welcome(&metadata, &welcome);
                let _ = events_tx.send(SessionEvent::Welcome { session_id });
            }
            Effect::KeepaliveReset => {}
            Effect::Reconnect(info) => {
                if let Ok(url) = Url::parse(info.reconnect_url.access_secret_value()) {
                    let _ = events_tx.send(SessionEvent::Reconnect { url });
                }
            }
            Effect::Notification {
                type_,
                version,
                event,
            } => {
                listener.on_notification(&metadata, &event);
                dispatch_notification(listener, &metadata, &type_, &version, &event);
            }
            Effect::Revocation(subscription) => {
                let _ = events_tx.send(SessionEvent::Revoked(subscription));
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn welcome_frame(session_id: &str, keepalive_timeout_seconds: u32) -> String {
        serde_json::json!({
            "metadata": {
                "message_id": "96a3f3b5-5dec-4445-8e98-13f4fa123500",
                "message_type": "session_welcome",
                "message_timestamp": "2023-05-14T12:31:47.995262791Z",
            },
            "payload": {
                "session": {
                    "id": session_id,
                    "status": "connected",
                    "keepalive_timeout_seconds": keepalive_timeout_seconds,
                    "reconnect_url": null,
                    "connected_at": "2023-05-14T12:31:47.995262791Z",
                },
            },
        })
        .to_string()
    }

    /// E2E-1: session_welcome → Ready, keepalive timeout captured.
    #[test]
    fn welcome_transitions_to_ready() {
        let frame = welcome_frame("44f8cbce_c7ee958a", 10);
        let (state, _metadata, effect) = handle_message(SessionState::Handshaking, &frame).unwrap();
        assert_eq!(state, SessionState::Ready);
        match effect {
            Effect::Welcome(welcome) => {
                assert_eq!(welcome.id.access_secret_value(), "44f8cbce_c7ee958a");
                assert_eq!(welcome.keepalive_timeout_seconds, 10);
                assert!(welcome.reconnect_url.is_none());
            }
            other => panic!("unexpected effect: {other:?}"),
        }
    }

    #[test]
    fn welcome_received_outside_handshaking_is_protocol_violation() {
        let frame = welcome_frame("abc", 10);
        let err = handle_message(SessionState::Ready, &frame).unwrap_err();
        assert!(matches!(err, SessionError::ProtocolViolation(_)));
    }

    /// E2E-5: an unrecognized message_type never panics or succeeds; it
    /// closes the Session (the raw `on_notification` path, if any, is only
    /// reachable for well-formed `notification` frames).
    #[test]
    fn unknown_message_type_is_protocol_violation() {
        let frame = serde_json::json!({
            "metadata": {
                "message_id": "1",
                "message_type": "something_new",
                "message_timestamp": "2023-05-14T12:31:47.995262791Z",
            },
            "payload": {},
        })
        .to_string();
        let err = handle_message(SessionState::Ready, &frame).unwrap_err();
        assert!(matches!(err, SessionError::ProtocolViolation(_)));
    }

    /// E2E-6: a malformed root (array instead of object) is a protocol
    /// violation, not a panic.
    #[test]
    fn non_object_root_is_protocol_violation() {
        let frame = serde_json::json!([1, 2, 3]).to_string();
        let err = handle_message(SessionState::Handshaking, &frame).unwrap_err();
        assert!(matches!(err, SessionError::ProtocolViolation(_)));
    }

    #[test]
    fn notification_in_ready_keeps_state() {
        let frame = serde_json::json!({
            "metadata": {
                "message_id": "1",
                "message_type": "notification",
                "message_timestamp": "2023-05-14T12:31:47.995262791Z",
                "subscription_type": "channel.ban",
                "subscription_version": "1",
            },
            "payload": {
                "subscription": {
                    "id": "sub-1",
                    "status": "enabled",
                    "type": "channel.ban",
                    "version": "1",
                    "cost": 0,
                    "condition": {},
                    "transport": {"method": "websocket", "session_id": "s1"},
                    "created_at": "2023-05-14T12:31:47.995262791Z",
                },
                "event": {},
            },
        })
        .to_string();
        let (state, _metadata, effect) = handle_message(SessionState::Ready, &frame).unwrap();
        assert_eq!(state, SessionState::Ready);
        assert!(matches!(effect, Effect::Notification { .. }));
    }

    #[test]
    fn reconnect_transitions_to_reconnecting_and_keeps_reading() {
        let frame = serde_json::json!({
            "metadata": {
                "message_id": "1",
                "message_type": "session_reconnect",
                "message_timestamp": "2023-05-14T12:31:47.995262791Z",
            },
            "payload": {
                "session": {
                    "id": "old-session",
                    "status": "reconnecting",
                    "reconnect_url": "wss://eventsub.wss.twitch.tv/ws?id=new",
                    "connected_at": "2023-05-14T12:31:47.995262791Z",
                },
            },
        })
        .to_string();
        let (state, _metadata, effect) = handle_message(SessionState::Ready, &frame).unwrap();
        assert_eq!(state, SessionState::Reconnecting);
        assert!(matches!(effect, Effect::Reconnect(_)));

        // The overlap window: notifications keep arriving while Reconnecting.
        let notification = serde_json::json!({
            "metadata": {
                "message_id": "2",
                "message_type": "notification",
                "message_timestamp": "2023-05-14T12:31:48.995262791Z",
                "subscription_type": "channel.ban",
                "subscription_version": "1",
            },
            "payload": {
                "subscription": {
                    "id": "sub-1", "status": "enabled", "type": "channel.ban", "version": "1",
                    "cost": 0, "condition": {},
                    "transport": {"method": "websocket", "session_id": "s1"},
                    "created_at": "2023-05-14T12:31:47.995262791Z",
                },
                "event": {},
            },
        })
        .to_string();
        let (state, _metadata, _) = handle_message(state, &notification).unwrap();
        assert_eq!(state, SessionState::Reconnecting);
    }
}
