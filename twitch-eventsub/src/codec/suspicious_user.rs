//! `channel.suspicious_user.message@1` and `channel.suspicious_user.update@1`
//!
//! Shared enums, grounded on `suspicious-users.hpp`: all three are
//! future-compatible — an unrecognized server string maps to a declared
//! default variant rather than erroring.

use serde::{Deserialize, Serialize};

use super::Subscription;
use twitch_api::events::chat::ChatMessageMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "none", other)]
    None,
    #[serde(rename = "active_monitoring")]
    ActiveMonitoring,
    #[serde(rename = "restricted")]
    Restricted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SuspiciousType {
    #[default]
    #[serde(rename = "unknown", other)]
    Unknown,
    #[serde(rename = "manual")]
    Manual,
    #[serde(rename = "ban_evader_detector")]
    BanEvaderDetector,
    #[serde(rename = "shared_channel_ban")]
    SharedChannelBan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BanEvasionEvaluation {
    #[default]
    #[serde(rename = "unknown", other)]
    Unknown,
    #[serde(rename = "possible")]
    Possible,
    #[serde(rename = "likely")]
    Likely,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelSuspiciousUserMessage {
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub low_trust_status: Status,
    pub shared_ban_channel_ids: Vec<String>,
    pub types: Vec<SuspiciousType>,
    pub ban_evasion_evaluation: BanEvasionEvaluation,
    pub message: ChatMessageMessage,
}

impl Subscription for ChannelSuspiciousUserMessage {
    const TYPE: &'static str = "channel.suspicious_user.message";
    const VERSION: &'static str = "1";
    type Condition = SuspiciousUserCondition;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelSuspiciousUserUpdate {
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub moderator_user_id: String,
    pub moderator_user_login: String,
    pub moderator_user_name: String,
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub low_trust_status: Status,
}

impl Subscription for ChannelSuspiciousUserUpdate {
    const TYPE: &'static str = "channel.suspicious_user.update";
    const VERSION: &'static str = "1";
    type Condition = SuspiciousUserCondition;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspiciousUserCondition {
    pub broadcaster_user_id: String,
    pub moderator_user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_status_falls_back_to_default() {
        let status: Status = serde_json::from_value(serde_json::json!("something_new")).unwrap();
        assert_eq!(status, Status::None);
    }

    #[test]
    fn message_decodes_with_restricted_status() {
        let event: ChannelSuspiciousUserMessage = serde_json::from_value(serde_json::json!({
            "broadcaster_user_id": "1", "broadcaster_user_login": "a", "broadcaster_user_name": "A",
            "user_id": "2", "user_login": "b", "user_name": "B",
            "low_trust_status": "restricted",
            "shared_ban_channel_ids": ["3"],
            "types": ["ban_evader_detector"],
            "ban_evasion_evaluation": "likely",
            "message": {"text": "hi", "fragments": []},
        }))
        .unwrap();
        assert_eq!(event.low_trust_status, Status::Restricted);
        assert_eq!(event.ban_evasion_evaluation, BanEvasionEvaluation::Likely);
    }
}
