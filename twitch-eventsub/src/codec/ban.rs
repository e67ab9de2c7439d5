//! `channel.ban@1`

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Subscription;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelBan {
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub moderator_user_id: String,
    pub moderator_user_login: String,
    pub moderator_user_name: String,
    pub user_id: String,
    pub user_login: String,
    pub user_name: String,
    pub reason: String,
    pub banned_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
    pub is_permanent: bool,
}

impl ChannelBan {
    /// `ends_at - banned_at`, defined only for non-permanent bans.
    pub fn timeout_duration(&self) -> Option<Duration> {
        if self.is_permanent {
            None
        } else {
            self.ends_at.map(|ends_at| ends_at - self.banned_at)
        }
    }
}

impl Subscription for ChannelBan {
    const TYPE: &'static str = "channel.ban";
    const VERSION: &'static str = "1";
    type Condition = ChannelBanCondition;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelBanCondition {
    pub broadcaster_user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// E2E-2: `is_permanent: false`, a 10 minute ban window.
    #[test]
    fn timeout_duration_ten_minutes() {
        let event: ChannelBan = serde_json::from_value(serde_json::json!({
            "broadcaster_user_id": "1234",
            "broadcaster_user_login": "broadcaster",
            "broadcaster_user_name": "Broadcaster",
            "moderator_user_id": "5678",
            "moderator_user_login": "moderator",
            "moderator_user_name": "Moderator",
            "user_id": "9876",
            "user_login": "banned_user",
            "user_name": "Banned User",
            "reason": "This is a test event",
            "banned_at": "2023-05-20T12:30:55.518375571Z",
            "ends_at": "2023-05-20T12:40:55.518375571Z",
            "is_permanent": false,
        }))
        .unwrap();

        assert_eq!(event.reason, "This is a test event");
        assert_eq!(event.timeout_duration(), Some(Duration::seconds(600)));
    }

    #[test]
    fn permanent_ban_has_no_timeout_duration() {
        let event: ChannelBan = serde_json::from_value(serde_json::json!({
            "broadcaster_user_id": "1234",
            "broadcaster_user_login": "broadcaster",
            "broadcaster_user_name": "Broadcaster",
            "moderator_user_id": "5678",
            "moderator_user_login": "moderator",
            "moderator_user_name": "Moderator",
            "user_id": "9876",
            "user_login": "banned_user",
            "user_name": "Banned User",
            "reason": "rules",
            "banned_at": "2023-05-20T12:30:55Z",
            "ends_at": null,
            "is_permanent": true,
        }))
        .unwrap();

        assert_eq!(event.timeout_duration(), None);
    }

    #[test]
    fn required_field_null_is_rejected() {
        let err = serde_json::from_value::<ChannelBan>(serde_json::json!({
            "broadcaster_user_id": "1234",
            "broadcaster_user_login": "broadcaster",
            "broadcaster_user_name": "Broadcaster",
            "moderator_user_id": "5678",
            "moderator_user_login": "moderator",
            "moderator_user_name": "Moderator",
            "user_id": "9876",
            "user_login": "banned_user",
            "user_name": "Banned User",
            "reason": null,
            "banned_at": "2023-05-20T12:30:55Z",
            "is_permanent": true,
        }))
        .unwrap_err();
        assert!(err.is_data());
    }
}
