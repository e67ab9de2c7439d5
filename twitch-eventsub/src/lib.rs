//! EventSub-over-WebSocket client: connects to Twitch's EventSub WebSocket
//! endpoint, keeps one or more [`Session`]s alive, and dispatches typed
//! notifications to an application-supplied [`Listener`].
//!
//! [`Controller`] is the entry point: it owns the connection pool and the
//! REST calls needed to create and tear down subscriptions, fanning requests
//! out across [`Session`]s as they come up.
//!
//! [`Session`]: session::Session
//! [`Listener`]: listener::Listener
//! [`Controller`]: controller::Controller

pub mod codec;
pub mod config;
pub mod controller;
pub mod handler_table;
pub mod listener;
pub mod session;
pub mod subscription_request;

pub use controller::Controller;
pub use listener::Listener;
pub use subscription_request::{SubscriptionHandle, SubscriptionRequest};
