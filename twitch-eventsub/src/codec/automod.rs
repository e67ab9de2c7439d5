//! `automod.message.hold@2` and `automod.message.update@2`
//!
//! `reason` is a tag-field discriminated union (`automod` vs `blocked_term`),
//! grounded on `automod-message.hpp`.

use serde::{Deserialize, Serialize};

use super::Subscription;
use twitch_api::events::chat::ChatMessageMessage;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Boundary {
    pub start_pos: u32,
    pub end_pos: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FoundTerm {
    pub term_id: String,
    pub boundary: Boundary,
    pub owner_broadcaster_user_id: String,
    pub owner_broadcaster_user_login: String,
    pub owner_broadcaster_user_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "reason")]
pub enum AutomodHoldReason {
    #[serde(rename = "automod")]
    Automod {
        category: String,
        level: u32,
        boundaries: Vec<Boundary>,
    },
    #[serde(rename = "blocked_term")]
    BlockedTerm { terms_found: Vec<FoundTerm> },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutomodMessageHold {
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub message_id: String,
    pub message: ChatMessageMessage,
    pub held_at: String,
    #[serde(flatten)]
    pub reason: AutomodHoldReason,
}

impl Subscription for AutomodMessageHold {
    const TYPE: &'static str = "automod.message.hold";
    const VERSION: &'static str = "2";
    type Condition = AutomodCondition;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AutomodMessageStatus {
    #[serde(rename = "Approved")]
    Approved,
    #[serde(rename = "Denied")]
    Denied,
    #[default]
    #[serde(rename = "Expired", other)]
    Expired,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutomodMessageUpdate {
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub moderator_user_id: String,
    pub moderator_user_login: String,
    pub moderator_user_name: String,
    pub message_id: String,
    pub message: ChatMessageMessage,
    pub status: AutomodMessageStatus,
    pub held_at: String,
    #[serde(flatten)]
    pub reason: AutomodHoldReason,
}

impl Subscription for AutomodMessageUpdate {
    const TYPE: &'static str = "automod.message.update";
    const VERSION: &'static str = "2";
    type Condition = AutomodCondition;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomodCondition {
    pub broadcaster_user_id: String,
    pub moderator_user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_decodes_automod_reason() {
        let event: AutomodMessageHold = serde_json::from_value(serde_json::json!({
            "broadcaster_user_id": "1", "broadcaster_user_login": "a", "broadcaster_user_name": "A",
            "user_id": "2", "user_login": "b", "user_name": "B",
            "message_id": "m1",
            "message": {"text": "bad word", "fragments": []},
            "held_at": "2023-05-20T12:30:55Z",
            "reason": "automod",
            "category": "profanity",
            "level": 2,
            "boundaries": [{"start_pos": 0, "end_pos": 3}],
        }))
        .unwrap();
        assert!(matches!(event.reason, AutomodHoldReason::Automod { level: 2, .. }));
    }

    #[test]
    fn hold_decodes_blocked_term_reason() {
        let event: AutomodMessageHold = serde_json::from_value(serde_json::json!({
            "broadcaster_user_id": "1", "broadcaster_user_login": "a", "broadcaster_user_name": "A",
            "user_id": "2", "user_login": "b", "user_name": "B",
            "message_id": "m1",
            "message": {"text": "banned term", "fragments": []},
            "held_at": "2023-05-20T12:30:55Z",
            "reason": "blocked_term",
            "terms_found": [{
                "term_id": "t1",
                "boundary": {"start_pos": 0, "end_pos": 5},
                "owner_broadcaster_user_id": "1",
                "owner_broadcaster_user_login": "a",
                "owner_broadcaster_user_name": "A",
            }],
        }))
        .unwrap();
        assert!(matches!(event.reason, AutomodHoldReason::BlockedTerm { .. }));
    }

    #[test]
    fn update_unknown_status_falls_back_to_expired() {
        let status: AutomodMessageStatus =
            serde_json::from_value(serde_json::json!("SomethingNew")).unwrap();
        assert_eq!(status, AutomodMessageStatus::Expired);
    }
}
