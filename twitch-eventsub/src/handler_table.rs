//! Compile-time `(subscription_type, subscription_version) -> (decode, dispatch)`
//! table. Adding a new subscription type is adding one match arm.
//!
//! An unrecognized `(type, version)` is not an error: the raw
//! `on_notification` callback has already fired by the time this runs.

use serde_json::Value;

use twitch_api::events::{
    chat::{message::ChatMessage, notification::ChatNotification},
    stream::{StreamOffline, StreamOnline},
};

use crate::{
    codec::{
        Metadata, automod::AutomodMessageHold, automod::AutomodMessageUpdate, ban::ChannelBan,
        chat_user_message::ChannelChatUserMessageHold,
        chat_user_message::ChannelChatUserMessageUpdate, moderate::ChannelModerate,
        suspicious_user::ChannelSuspiciousUserMessage, suspicious_user::ChannelSuspiciousUserUpdate,
        update::ChannelUpdate,
    },
    listener::Listener,
};

/// Decodes `event` against every known handler row matching `type_`, and
/// invokes the listener's typed method on success. Decode failure is logged
/// and the notification is dropped; it never closes the Session.
pub fn dispatch_notification(
    listener: &mut dyn Listener,
    metadata: &Metadata,
    type_: &str,
    version: &str,
    event: &Value,
) {
    macro_rules! row {
        ($ty:ty, $method:ident) => {
            match serde_json::from_value::<$ty>(event.clone()) {
                Ok(decoded) => {
                    listener.$method(metadata, &decoded);
                    return;
                }
                Err(err) => {
                    eprintln!("eventsub: failed to decode {type_}@{version}: {err}");
                    return;
                }
            }
        };
    }

    match (type_, version) {
        ("channel.ban", "1") => row!(ChannelBan, on_channel_ban),
        ("stream.online", "1") => row!(StreamOnline, on_stream_online),
        ("stream.offline", "1") => row!(StreamOffline, on_stream_offline),
        ("channel.chat.notification", "1") => {
            row!(ChatNotification, on_channel_chat_notification)
        }
        ("channel.update", "1") => row!(ChannelUpdate, on_channel_update),
        ("channel.chat.message", "1") => row!(ChatMessage, on_channel_chat_message),
        ("channel.moderate", "2") => row!(ChannelModerate, on_channel_moderate),
        ("automod.message.hold", "2") => row!(AutomodMessageHold, on_automod_message_hold),
        ("automod.message.update", "2") => {
            row!(AutomodMessageUpdate, on_automod_message_update)
        }
        ("channel.suspicious_user.message", "1") => {
            row!(ChannelSuspiciousUserMessage, on_channel_suspicious_user_message)
        }
        ("channel.suspicious_user.update", "1") => {
            row!(ChannelSuspiciousUserUpdate, on_channel_suspicious_user_update)
        }
        ("channel.chat.user_message_hold", "1") => {
            row!(ChannelChatUserMessageHold, on_channel_chat_user_message_hold)
        }
        ("channel.chat.user_message_update", "1") => {
            row!(ChannelChatUserMessageUpdate, on_channel_chat_user_message_update)
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[derive(Default)]
    struct RecordingListener {
        raw_calls: u32,
        typed_calls: u32,
    }

    impl Listener for RecordingListener {
        fn on_notification(&mut self, _metadata: &Metadata, _event: &Value) {
            self.raw_calls += 1;
        }

        fn on_channel_ban(&mut self, _metadata: &Metadata, _event: &ChannelBan) {
            self.typed_calls += 1;
        }
    }

    fn metadata() -> Metadata {
        Metadata {
            message_id: "1".into(),
            message_type: "notification".into(),
            message_timestamp: Utc.with_ymd_and_hms(2023, 5, 14, 12, 31, 47).unwrap(),
            subscription_type: Some("channel.ban".into()),
            subscription_version: Some("1".into()),
        }
    }

    /// Testable Property 5: a sample fixture for a declared `(type, version)`
    /// decodes cleanly and invokes the typed method exactly once.
    #[test]
    fn handler_table_entry_dispatches_typed_method() {
        let event = serde_json::json!({
            "broadcaster_user_id": "1", "broadcaster_user_login": "a", "broadcaster_user_name": "A",
            "moderator_user_id": "2", "moderator_user_login": "b", "moderator_user_name": "B",
            "user_id": "3", "user_login": "c", "user_name": "C",
            "reason": null,
            "banned_at": "2023-05-14T12:31:47.995262791Z",
            "ends_at": null,
            "is_permanent": true,
        });
        let mut listener = RecordingListener::default();
        let metadata = metadata();
        listener.on_notification(&metadata, &event);
        dispatch_notification(&mut listener, &metadata, "channel.ban", "1", &event);
        assert_eq!(listener.raw_calls, 1);
        assert_eq!(listener.typed_calls, 1);
    }

    #[test]
    fn unknown_handler_table_entry_is_not_an_error() {
        let mut listener = RecordingListener::default();
        let metadata = metadata();
        dispatch_notification(&mut listener, &metadata, "channel.follow", "2", &serde_json::json!({}));
        assert_eq!(listener.typed_calls, 0);
    }
}
