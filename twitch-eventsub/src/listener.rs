//! The capability set a Session drives on every parsed frame.
//!
//! Implementors override only the events they care about; every method has a
//! no-op default, matching `channel.follow` being dropped from the handler
//! table without forcing every caller to stub out a method for it.

use serde_json::Value;

use twitch_api::events::{
    chat::{message::ChatMessage, notification::ChatNotification},
    stream::{StreamOffline, StreamOnline},
};

use crate::codec::{
    Metadata, SessionWelcomeInfo,
    automod::{AutomodMessageHold, AutomodMessageUpdate},
    ban::ChannelBan,
    chat_user_message::{ChannelChatUserMessageHold, ChannelChatUserMessageUpdate},
    moderate::ChannelModerate,
    suspicious_user::{ChannelSuspiciousUserMessage, ChannelSuspiciousUserUpdate},
    update::ChannelUpdate,
};

pub trait Listener: Send {
    fn on_session_welcome(&mut self, _metadata: &Metadata, _welcome: &SessionWelcomeInfo) {}

    /// Invoked for every `notification` frame, strictly before any typed
    /// method for the same frame, regardless of whether the handler table
    /// recognizes `(subscription_type, subscription_version)`.
    fn on_notification(&mut self, _metadata: &Metadata, _event: &Value) {}

    fn on_channel_ban(&mut self, _metadata: &Metadata, _event: &ChannelBan) {}
    fn on_stream_online(&mut self, _metadata: &Metadata, _event: &StreamOnline) {}
    fn on_stream_offline(&mut self, _metadata: &Metadata, _event: &StreamOffline) {}
    fn on_channel_chat_notification(&mut self, _metadata: &Metadata, _event: &ChatNotification) {}
    fn on_channel_update(&mut self, _metadata: &Metadata, _event: &ChannelUpdate) {}
    fn on_channel_chat_message(&mut self, _metadata: &Metadata, _event: &ChatMessage) {}
    fn on_channel_moderate(&mut self, _metadata: &Metadata, _event: &ChannelModerate) {}
    fn on_automod_message_hold(&mut self, _metadata: &Metadata, _event: &AutomodMessageHold) {}
    fn on_automod_message_update(&mut self, _metadata: &Metadata, _event: &AutomodMessageUpdate) {}
    fn on_channel_suspicious_user_message(
        &mut self,
        _metadata: &Metadata,
        _event: &ChannelSuspiciousUserMessage,
    ) {
    }
    fn on_channel_suspicious_user_update(
        &mut self,
        _metadata: &Metadata,
        _event: &ChannelSuspiciousUserUpdate,
    ) {
    }
    fn on_channel_chat_user_message_hold(
        &mut self,
        _metadata: &Metadata,
        _event: &ChannelChatUserMessageHold,
    ) {
    }
    fn on_channel_chat_user_message_update(
        &mut self,
        _metadata: &Metadata,
        _event: &ChannelChatUserMessageUpdate,
    ) {
    }
}

/// Lets one application-provided [`Listener`] be driven by every [`Session`]
/// a Controller runs, including ones it opens on its own (for capacity, or as
/// the replacement half of a reconnect handoff) — there is exactly one
/// listener per Controller, not one per connection.
///
/// [`Session`]: crate::session::Session
#[derive(Clone)]
pub(crate) struct SharedListener(std::sync::Arc<std::sync::Mutex<Box<dyn Listener>>>);

impl SharedListener {
    pub(crate) fn new(listener: Box<dyn Listener>) -> Self {
        Self(std::sync::Arc::new(std::sync::Mutex::new(listener)))
    }
}

macro_rules! forward {
    ($name:ident, $event:ty) => {
        fn $name(&mut self, metadata: &Metadata, event: &$event) {
            self.0.lock().unwrap().$name(metadata, event);
        }
    };
}

impl Listener for SharedListener {
    forward!(on_session_welcome, SessionWelcomeInfo);
    forward!(on_notification, Value);
    forward!(on_channel_ban, ChannelBan);
    forward!(on_stream_online, StreamOnline);
    forward!(on_stream_offline, StreamOffline);
    forward!(on_channel_chat_notification, ChatNotification);
    forward!(on_channel_update, ChannelUpdate);
    forward!(on_channel_chat_message, ChatMessage);
    forward!(on_channel_moderate, ChannelModerate);
    forward!(on_automod_message_hold, AutomodMessageHold);
    forward!(on_automod_message_update, AutomodMessageUpdate);
    forward!(on_channel_suspicious_user_message, ChannelSuspiciousUserMessage);
    forward!(on_channel_suspicious_user_update, ChannelSuspiciousUserUpdate);
    forward!(on_channel_chat_user_message_hold, ChannelChatUserMessageHold);
    forward!(on_channel_chat_user_message_update, ChannelChatUserMessageUpdate);
}
