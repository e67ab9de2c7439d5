#[macro_use]
mod macros;

pub mod auth;
pub mod channel;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod follower;
pub mod pagination;
pub mod secret;
pub mod stream;
pub mod user;

pub use serde_json::json;
