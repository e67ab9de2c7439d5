//! Fans subscriptions out across a pool of [`Session`]s, creating new ones on
//! demand and retrying placement with backoff when none has room yet.
//!
//! Grounded in the source's `Controller`: `subscribe()` refcounts under a
//! mutex and posts a placement task on the 0→1 transition; placement buckets
//! connections into dead / open-but-not-ready / ready and either calls Helix
//! on the first ready one, creates a new connection, or requeues.
//!
//! One deliberate departure from the source: recoverable Helix errors here
//! retry with exponential backoff and jitter (base 2s, capped at 60s, reset
//! on success) rather than the source's flat 2-second retry.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, Weak},
    time::Duration,
};

use rand::Rng;
use reqwest::StatusCode;
use serde::Serialize;
use tokio::sync::{mpsc, Mutex as AsyncMutex};
use twitch_api::{
    client::AuthenticatedClient,
    error::ApiError,
    events::subscription::{CreateSubscriptionRequest, DeleteSubscriptionRequest, TransportRequest},
    secret::Secret,
};

use crate::{
    codec::Subscription,
    config::ControllerConfig,
    listener::{Listener, SharedListener},
    session::{Session, SessionEvent},
    subscription_request::{
        ActiveSubscriptionRecord, RecordState, ReleaseRef, SubscriptionHandle, SubscriptionRequest,
        SubscriptionTable, new_table,
    },
};

const INITIAL_BACKOFF: Duration = Duration::from_secs(2);
const MAX_BACKOFF: Duration = Duration::from_secs(60);
const NO_CONNECTION_RETRY: Duration = Duration::from_millis(500);
const NOT_READY_RETRY: Duration = Duration::from_millis(250);

struct ConnectionSlot {
    session_id: Option<String>,
    subscription_count: usize,
    dead: bool,
}

/// Owns every live [`Session`] and the subscription refcount table; the only
/// handle application code needs to keep subscriptions alive.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<Inner>,
}

struct Inner {
    config: ControllerConfig,
    client: AsyncMutex<AuthenticatedClient>,
    table: Arc<SubscriptionTable>,
    connections: Mutex<HashMap<u64, ConnectionSlot>>,
    next_connection_id: Mutex<u64>,
    self_weak: Mutex<Option<Weak<Inner>>>,
    listener: SharedListener,
}

impl ReleaseRef for Inner {
    fn remove_ref(&self, request: &SubscriptionRequest) {
        let mut table = self.table.lock().unwrap();
        let Some(record) = table.get_mut(request) else {
            return;
        };
        record.ref_count -= 1;
        if record.ref_count > 0 {
            return;
        }
        let server_subscription_id = record.server_subscription_id.take();
        let session_id = record.session_id.take();
        table.remove(request);
        drop(table);

        if let Some(session_id) = &session_id {
            if let Some(slot) = self.connections.lock().unwrap().values_mut().find(|slot| {
                slot.session_id.as_deref() == Some(session_id.as_str())
            }) {
                slot.subscription_count = slot.subscription_count.saturating_sub(1);
            }
        }

        if let Some(id) = server_subscription_id {
            let inner = self.clone_weak();
            tokio::spawn(async move {
                if let Some(inner) = inner.upgrade() {
                    inner.unsubscribe(id).await;
                }
            });
        }
    }
}

impl Inner {
    fn clone_weak(&self) -> Weak<Inner> {
        self.self_weak.lock().unwrap().clone().unwrap()
    }

    async fn unsubscribe(&self, server_subscription_id: String) {
        let req = DeleteSubscriptionRequest {
            id: Secret::new(server_subscription_id),
        };
        let mut client = self.client.lock().await;
        if let Err(err) = client.send(&req).await {
            eprintln!("eventsub: unsubscribe failed: {err}");
        }
    }
}

impl Controller {
    /// `listener` is the single sink for every typed notification across
    /// every connection this Controller opens, including ones it creates on
    /// its own for capacity or as a reconnect handoff's replacement half.
    pub fn new(config: ControllerConfig, client: AuthenticatedClient, listener: Box<dyn Listener>) -> Self {
        let inner = Arc::new(Inner {
            config,
            client: AsyncMutex::new(client),
            table: new_table(),
            connections: Mutex::new(HashMap::new()),
            next_connection_id: Mutex::new(0),
            self_weak: Mutex::new(None),
            listener: SharedListener::new(listener),
        });
        *inner.self_weak.lock().unwrap() = Some(Arc::downgrade(&inner));
        Self { inner }
    }

    /// Ensures a subscription for `T` with `condition` is (or becomes) active,
    /// returning a refcounted handle. A duplicate request for the same
    /// `(type, version, condition)` shares the same refcount instead of
    /// issuing a second Helix call.
    pub fn subscribe<T>(&self, owner_user_id: impl Into<String>, condition: T::Condition) -> SubscriptionHandle
    where
        T: Subscription + Send + 'static,
        T::Condition: Clone + Send + Sync + 'static,
    {
        let conditions = condition_pairs(&condition);
        let request = SubscriptionRequest::new(T::TYPE, T::VERSION, owner_user_id, conditions);

        let needs_place = {
            let mut table = self.inner.table.lock().unwrap();
            let record = table.entry(request.clone()).or_insert_with(ActiveSubscriptionRecord::new);
            let needs_place = record.ref_count == 0;
            record.ref_count += 1;
            needs_place
        };

        let controller: Weak<dyn ReleaseRef> = self.inner.clone_weak();
        let handle = SubscriptionHandle {
            request: request.clone(),
            controller,
        };

        if needs_place {
            let inner = self.inner.clone();
            tokio::spawn(place::<T>(inner, request, condition, INITIAL_BACKOFF));
        }

        handle
    }

    /// Starts a new [`Session`] connected to the configured EventSub endpoint
    /// and drives it in a background task, relaying its events into the
    /// Controller's own bookkeeping.
    pub fn start(&self) {
        spawn_session_inner(self.inner.clone(), None);
    }
}

fn condition_pairs<C: Serialize>(condition: &C) -> Vec<(String, String)> {
    let value = serde_json::to_value(condition).unwrap_or(serde_json::Value::Null);
    match value {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn spawn_session_inner(inner: Arc<Inner>, reconnect_url: Option<url::Url>) {
    let connection_id = {
        let mut next = inner.next_connection_id.lock().unwrap();
        let id = *next;
        *next += 1;
        id
    };
    inner.connections.lock().unwrap().insert(
        connection_id,
        ConnectionSlot {
            session_id: None,
            subscription_count: 0,
            dead: false,
        },
    );

    tokio::spawn(async move {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let inner_for_events = inner.clone();
        let events_task = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_session_event(&inner_for_events, connection_id, event).await;
            }
        });

        let mut session = Session::new();
        let host = inner.config.host.clone();
        let port = inner.config.port;
        let path = inner.config.path.clone();
        let user_agent = inner.config.user_agent.clone();
        let mut listener = inner.listener.clone();

        match reconnect_url {
            Some(url) => {
                session
                    .run(
                        url.host_str().unwrap_or(&host),
                        url.port().unwrap_or(port),
                        url.path(),
                        &user_agent,
                        &mut listener,
                        tx,
                    )
                    .await;
            }
            None => {
                session.run(&host, port, &path, &user_agent, &mut listener, tx).await;
            }
        }

        let _ = events_task.await;

        if let Some(slot) = inner.connections.lock().unwrap().get_mut(&connection_id) {
            slot.dead = true;
        }
    });
}

async fn handle_session_event(inner: &Arc<Inner>, connection_id: u64, event: SessionEvent) {
    match event {
        SessionEvent::Welcome { session_id } => {
            if let Some(slot) = inner.connections.lock().unwrap().get_mut(&connection_id) {
                slot.session_id = Some(session_id);
            }
        }
        SessionEvent::Reconnect { url } => {
            // The old Session keeps reading (it stays registered as a live
            // connection) while a fresh one takes over at `url`.
            spawn_session_inner(inner.clone(), Some(url));
        }
        SessionEvent::Revoked(subscription) => {
            let mut table = inner.table.lock().unwrap();
            table.retain(|_, record| {
                record.server_subscription_id.as_deref() != Some(subscription.id.access_secret_value())
            });
        }
        SessionEvent::Closed(err) => {
            if let Some(err) = err {
                eprintln!("eventsub: session {connection_id} closed: {err}");
            }
            if let Some(slot) = inner.connections.lock().unwrap().get_mut(&connection_id) {
                slot.dead = true;
            }
        }
    }
}

enum Bucket {
    Ready(String),
    NoneReady { not_ready: usize, at_capacity: bool },
}

fn bucket_connections(inner: &Inner) -> Bucket {
    let connections = inner.connections.lock().unwrap();
    let mut not_ready = 0usize;
    let mut live = 0usize;
    for slot in connections.values() {
        if slot.dead {
            continue;
        }
        live += 1;
        match &slot.session_id {
            None => not_ready += 1,
            Some(session_id) => {
                if slot.subscription_count < inner.config.max_subscriptions_per_session {
                    return Bucket::Ready(session_id.clone());
                }
            }
        }
    }
    Bucket::NoneReady {
        not_ready,
        at_capacity: live >= inner.config.max_sessions,
    }
}

/// Recursive placement: a requeue/backoff retry re-enters this after a delay,
/// so the connection bucket counts are always read fresh.
///
/// Unlike the source, there is no separate queued-subscriptions map to
/// dedup against: `Controller::subscribe` only starts this chain on a
/// request's 0→1 refcount transition, and every retry re-enters through
/// `schedule` rather than spawning a second, concurrent chain — so a given
/// request never has more than one placement attempt in flight.
fn place<T>(
    inner: Arc<Inner>,
    request: SubscriptionRequest,
    condition: T::Condition,
    backoff: Duration,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>>
where
    T: Subscription + Send + 'static,
    T::Condition: Clone + Send + Sync + 'static,
{
    Box::pin(async move {
        if !inner.table.lock().unwrap().contains_key(&request) {
            return; // every ref was dropped before this fired
        }

        match bucket_connections(&inner) {
            Bucket::Ready(session_id) => {
                create_subscription::<T>(inner, request, condition, session_id, backoff).await;
            }
            Bucket::NoneReady {
                not_ready: 0,
                at_capacity,
            } => {
                if at_capacity {
                    eprintln!(
                        "eventsub: at max_sessions ({}), no room for a new connection",
                        inner.config.max_sessions
                    );
                } else {
                    spawn_session_inner(inner.clone(), None);
                }
                schedule(inner, request, condition, NO_CONNECTION_RETRY, backoff);
            }
            Bucket::NoneReady { not_ready, .. } => {
                if not_ready > 1 {
                    eprintln!("eventsub: {not_ready} open-but-not-ready connections");
                }
                schedule(inner, request, condition, NOT_READY_RETRY, backoff);
            }
        }
    })
}

fn schedule<T>(inner: Arc<Inner>, request: SubscriptionRequest, condition: T::Condition, delay: Duration, backoff: Duration)
where
    T: Subscription + Send + 'static,
    T::Condition: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        place::<T>(inner, request, condition, backoff).await;
    });
}

fn jittered(base: Duration) -> Duration {
    let millis = (base.as_millis() as u64).max(1);
    Duration::from_millis(rand::thread_rng().gen_range(0..=millis))
}

async fn create_subscription<T>(
    inner: Arc<Inner>,
    request: SubscriptionRequest,
    condition: T::Condition,
    session_id: String,
    backoff: Duration,
) where
    T: Subscription + Send + 'static,
    T::Condition: Clone + Send + Sync + 'static,
{
    {
        let mut table = inner.table.lock().unwrap();
        if let Some(record) = table.get_mut(&request) {
            record.state = RecordState::Creating;
        } else {
            return;
        }
    }

    let transport = TransportRequest::WebSocket {
        session_id: Secret::new(session_id.clone()),
    };
    let Ok(create_req) = CreateSubscriptionRequest::new::<T>(&condition, transport) else {
        eprintln!("eventsub: failed to encode subscription condition for {}", T::TYPE);
        return;
    };

    let result = {
        let mut client = inner.client.lock().await;
        client.send(&create_req).await
    };

    match result {
        Ok(response) => {
            let server_id = response
                .data
                .first()
                .map(|info| info.id.access_secret_value().to_owned());
            let mut table = inner.table.lock().unwrap();
            if let Some(record) = table.get_mut(&request) {
                record.state = RecordState::Active;
                record.server_subscription_id = server_id;
                record.session_id = Some(session_id.clone());
            }
            drop(table);

            if let Some(slot) = inner
                .connections
                .lock()
                .unwrap()
                .values_mut()
                .find(|slot| slot.session_id.as_deref() == Some(session_id.as_str()))
            {
                slot.subscription_count += 1;
            }
        }
        Err(err) => match classify(&err) {
            Classification::Fatal => {
                eprintln!("eventsub: subscribe {}@{} failed permanently: {err}", T::TYPE, T::VERSION);
                let mut table = inner.table.lock().unwrap();
                if let Some(record) = table.get_mut(&request) {
                    record.state = RecordState::Failed;
                }
            }
            Classification::Conflict => {
                // The session already has this subscription; our bookkeeping
                // is ahead of the server's. Not retried, not fatal — mark it
                // Active and bound to this session so refcounting and future
                // placement behave as if the create had succeeded.
                eprintln!("eventsub: subscribe {}@{} conflict: {err}", T::TYPE, T::VERSION);
                let mut table = inner.table.lock().unwrap();
                if let Some(record) = table.get_mut(&request) {
                    record.state = RecordState::Active;
                    record.session_id = Some(session_id.clone());
                }
                drop(table);

                if let Some(slot) = inner
                    .connections
                    .lock()
                    .unwrap()
                    .values_mut()
                    .find(|slot| slot.session_id.as_deref() == Some(session_id.as_str()))
                {
                    slot.subscription_count += 1;
                }
            }
            Classification::Retryable => {
                eprintln!("eventsub: subscribe {}@{} failed, retrying: {err}", T::TYPE, T::VERSION);
                let next_backoff = (backoff * 2).min(MAX_BACKOFF);
                let delay = jittered(backoff);
                schedule::<T>(inner, request, condition, delay, next_backoff);
            }
        },
    }
}

enum Classification {
    Fatal,
    Conflict,
    Retryable,
}

fn classify(err: &ApiError) -> Classification {
    match err {
        ApiError::ErrorResponse(status, _) => match *status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Classification::Fatal,
            StatusCode::CONFLICT => Classification::Conflict,
            _ => Classification::Retryable,
        },
        _ => Classification::Retryable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twitch_api::error::ErrorResponse;

    fn error_response(status: StatusCode) -> ApiError {
        ApiError::ErrorResponse(
            status,
            ErrorResponse {
                status,
                message: "nope".into(),
                data: Default::default(),
            },
        )
    }

    #[test]
    fn classify_4xx_auth_errors_as_fatal() {
        for status in [StatusCode::BAD_REQUEST, StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            assert!(matches!(classify(&error_response(status)), Classification::Fatal));
        }
    }

    #[test]
    fn classify_conflict_as_conflict() {
        assert!(matches!(
            classify(&error_response(StatusCode::CONFLICT)),
            Classification::Conflict
        ));
    }

    #[test]
    fn classify_other_statuses_as_retryable() {
        for status in [StatusCode::TOO_MANY_REQUESTS, StatusCode::INTERNAL_SERVER_ERROR] {
            assert!(matches!(classify(&error_response(status)), Classification::Retryable));
        }
    }

    #[test]
    fn condition_pairs_stringifies_object_fields() {
        #[derive(Serialize)]
        struct Condition {
            broadcaster_user_id: String,
            max_events: u32,
        }

        let pairs = condition_pairs(&Condition {
            broadcaster_user_id: "123".into(),
            max_events: 5,
        });

        assert_eq!(
            pairs,
            vec![
                ("broadcaster_user_id".to_string(), "123".to_string()),
                ("max_events".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn jittered_never_exceeds_base() {
        let base = Duration::from_millis(2000);
        for _ in 0..100 {
            assert!(jittered(base) <= base);
        }
    }

    #[test]
    fn jittered_zero_base_stays_within_one_millisecond() {
        for _ in 0..100 {
            assert!(jittered(Duration::from_millis(0)) <= Duration::from_millis(1));
        }
    }
}
