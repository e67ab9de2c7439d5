//! `channel.chat.user_message_hold@1` and `channel.chat.user_message_update@1`

use serde::{Deserialize, Serialize};

use super::Subscription;
use twitch_api::events::chat::ChatMessageMessage;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelChatUserMessageHold {
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub message_id: String,
    pub message: ChatMessageMessage,
}

impl Subscription for ChannelChatUserMessageHold {
    const TYPE: &'static str = "channel.chat.user_message_hold";
    const VERSION: &'static str = "1";
    type Condition = ChatUserMessageCondition;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UserMessageStatus {
    #[serde(rename = "approved")]
    Approved,
    #[serde(rename = "denied")]
    Denied,
    #[default]
    #[serde(rename = "invalid", other)]
    Invalid,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelChatUserMessageUpdate {
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub status: UserMessageStatus,
    pub message_id: String,
    pub message: ChatMessageMessage,
}

impl Subscription for ChannelChatUserMessageUpdate {
    const TYPE: &'static str = "channel.chat.user_message_update";
    const VERSION: &'static str = "1";
    type Condition = ChatUserMessageCondition;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatUserMessageCondition {
    pub broadcaster_user_id: String,
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_decodes() {
        let event: ChannelChatUserMessageHold = serde_json::from_value(serde_json::json!({
            "broadcaster_user_id": "1", "broadcaster_user_login": "a", "broadcaster_user_name": "A",
            "user_id": "2", "user_login": "b", "user_name": "B",
            "message_id": "abc-123",
            "message": {"text": "hello chat", "fragments": []},
        }))
        .unwrap();
        assert_eq!(event.message_id, "abc-123");
    }

    #[test]
    fn update_approved_and_denied() {
        let approved: ChannelChatUserMessageUpdate = serde_json::from_value(serde_json::json!({
            "broadcaster_user_id": "1", "broadcaster_user_login": "a", "broadcaster_user_name": "A",
            "user_id": "2", "user_login": "b", "user_name": "B",
            "status": "approved",
            "message_id": "abc-123",
            "message": {"text": "hello chat", "fragments": []},
        }))
        .unwrap();
        assert_eq!(approved.status, UserMessageStatus::Approved);

        let denied: ChannelChatUserMessageUpdate = serde_json::from_value(serde_json::json!({
            "broadcaster_user_id": "1", "broadcaster_user_login": "a", "broadcaster_user_name": "A",
            "user_id": "2", "user_login": "b", "user_name": "B",
            "status": "denied",
            "message_id": "abc-123",
            "message": {"text": "hello chat", "fragments": []},
        }))
        .unwrap();
        assert_eq!(denied.status, UserMessageStatus::Denied);
    }
}
