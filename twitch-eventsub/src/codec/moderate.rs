//! `channel.moderate@2`
//!
//! The wire payload is an action-sibling union: one JSON object carries an
//! `action` string plus a sibling object per possible action, all but one of
//! which are `null`. We decode `action` first and only then look at the one
//! sibling it names — the other nulls are never materialized into a value,
//! per the source's documented shape (`channel-moderate-v2.hpp`).

use serde::{Deserialize, Serialize};

use super::{DecodeError, Subscription};

macro_rules! user_triplet {
    ($($field:ident),* $(,)?) => {
        $(pub $field: String,)*
    };
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Followers {
    pub follow_duration_minutes: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slow {
    pub wait_time_seconds: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserTarget {
    user_triplet!(user_id, user_login, user_name);
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ban {
    user_triplet!(user_id, user_login, user_name);
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Timeout {
    user_triplet!(user_id, user_login, user_name);
    pub reason: Option<String>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Raid {
    user_triplet!(user_id, user_login, user_name);
    pub viewer_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeleteMessage {
    user_triplet!(user_id, user_login, user_name);
    pub message_id: String,
    pub message_body: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutomodTerms {
    pub action: String,
    pub list: String,
    pub terms: Vec<String>,
    pub from_automod: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnbanRequest {
    pub is_approved: bool,
    user_triplet!(user_id, user_login, user_name);
    pub moderator_message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Warn {
    user_triplet!(user_id, user_login, user_name);
    pub reason: Option<String>,
    #[serde(default)]
    pub chat_rules_cited: Option<Vec<String>>,
}

/// Exhaustive vocabulary of `channel.moderate@2` actions.
#[derive(Debug, Clone)]
pub enum Action {
    Ban(Ban),
    Timeout(Timeout),
    Unban(UserTarget),
    Untimeout(UserTarget),
    Clear,
    EmoteOnly,
    EmoteOnlyOff,
    Followers(Followers),
    FollowersOff,
    UniqueChat,
    UniqueChatOff,
    Slow(Slow),
    SlowOff,
    Subscribers,
    SubscribersOff,
    Unraid(UserTarget),
    DeleteMessage(DeleteMessage),
    Unvip(UserTarget),
    Vip(UserTarget),
    Raid(Raid),
    AddBlockedTerm(AutomodTerms),
    AddPermittedTerm(AutomodTerms),
    RemoveBlockedTerm(AutomodTerms),
    RemovePermittedTerm(AutomodTerms),
    Mod(UserTarget),
    Unmod(UserTarget),
    ApproveUnbanRequest(UnbanRequest),
    DenyUnbanRequest(UnbanRequest),
    Warn(Warn),
    /// Shape-identical to `Ban`; the source broadcaster (when the action
    /// originated from a different channel in a shared chat session) is
    /// carried on the parent `ChannelModerate`, not nested here.
    SharedChatBan(Ban),
    SharedChatTimeout(Timeout),
    SharedChatUnban(UserTarget),
    SharedChatUntimeout(UserTarget),
    SharedChatDelete(DeleteMessage),
    /// Forward-compatibility: an action string Twitch added after this was
    /// written. Carries the raw action name; no sibling is decoded.
    Unknown(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEvent {
    broadcaster_user_id: String,
    broadcaster_user_login: String,
    broadcaster_user_name: String,
    #[serde(default)]
    source_broadcaster_user_id: Option<String>,
    #[serde(default)]
    source_broadcaster_user_login: Option<String>,
    #[serde(default)]
    source_broadcaster_user_name: Option<String>,
    moderator_user_id: String,
    moderator_user_login: String,
    moderator_user_name: String,
    action: String,
    #[serde(default)]
    followers: Option<serde_json::Value>,
    #[serde(default)]
    slow: Option<serde_json::Value>,
    #[serde(default)]
    vip: Option<serde_json::Value>,
    #[serde(default)]
    unvip: Option<serde_json::Value>,
    #[serde(default, rename = "mod")]
    mod_: Option<serde_json::Value>,
    #[serde(default)]
    unmod: Option<serde_json::Value>,
    #[serde(default)]
    ban: Option<serde_json::Value>,
    #[serde(default)]
    unban: Option<serde_json::Value>,
    #[serde(default)]
    timeout: Option<serde_json::Value>,
    #[serde(default)]
    untimeout: Option<serde_json::Value>,
    #[serde(default)]
    raid: Option<serde_json::Value>,
    #[serde(default)]
    unraid: Option<serde_json::Value>,
    #[serde(default)]
    delete: Option<serde_json::Value>,
    #[serde(default)]
    automod_terms: Option<serde_json::Value>,
    #[serde(default)]
    unban_request: Option<serde_json::Value>,
    #[serde(default)]
    warn: Option<serde_json::Value>,
    #[serde(default)]
    shared_chat_ban: Option<serde_json::Value>,
    #[serde(default)]
    shared_chat_timeout: Option<serde_json::Value>,
    #[serde(default)]
    shared_chat_unban: Option<serde_json::Value>,
    #[serde(default)]
    shared_chat_untimeout: Option<serde_json::Value>,
    #[serde(default)]
    shared_chat_delete: Option<serde_json::Value>,
}

impl RawEvent {
    fn sibling(value: Option<serde_json::Value>, action: &str) -> super::Result<serde_json::Value> {
        value.ok_or_else(|| DecodeError::MissingVariantPayload(action.to_owned()))
    }

    fn decode_action(self) -> super::Result<Action> {
        let action = self.action.as_str();
        Ok(match action {
            "ban" => Action::Ban(serde_json::from_value(Self::sibling(self.ban, action)?)?),
            "timeout" => Action::Timeout(serde_json::from_value(Self::sibling(self.timeout, action)?)?),
            "unban" => Action::Unban(serde_json::from_value(Self::sibling(self.unban, action)?)?),
            "untimeout" => {
                Action::Untimeout(serde_json::from_value(Self::sibling(self.untimeout, action)?)?)
            }
            "clear" => Action::Clear,
            "emoteonly" => Action::EmoteOnly,
            "emoteonlyoff" => Action::EmoteOnlyOff,
            "followers" => {
                Action::Followers(serde_json::from_value(Self::sibling(self.followers, action)?)?)
            }
            "followersoff" => Action::FollowersOff,
            "uniquechat" => Action::UniqueChat,
            "uniquechatoff" => Action::UniqueChatOff,
            "slow" => Action::Slow(serde_json::from_value(Self::sibling(self.slow, action)?)?),
            "slowoff" => Action::SlowOff,
            "subscribers" => Action::Subscribers,
            "subscribersoff" => Action::SubscribersOff,
            "unraid" => Action::Unraid(serde_json::from_value(Self::sibling(self.unraid, action)?)?),
            "delete" => {
                Action::DeleteMessage(serde_json::from_value(Self::sibling(self.delete, action)?)?)
            }
            "unvip" => Action::Unvip(serde_json::from_value(Self::sibling(self.unvip, action)?)?),
            "vip" => Action::Vip(serde_json::from_value(Self::sibling(self.vip, action)?)?),
            "raid" => Action::Raid(serde_json::from_value(Self::sibling(self.raid, action)?)?),
            "add_blocked_term" => Action::AddBlockedTerm(serde_json::from_value(Self::sibling(
                self.automod_terms,
                action,
            )?)?),
            "add_permitted_term" => Action::AddPermittedTerm(serde_json::from_value(Self::sibling(
                self.automod_terms,
                action,
            )?)?),
            "remove_blocked_term" => Action::RemoveBlockedTerm(serde_json::from_value(Self::sibling(
                self.automod_terms,
                action,
            )?)?),
            "remove_permitted_term" => Action::RemovePermittedTerm(serde_json::from_value(
                Self::sibling(self.automod_terms, action)?,
            )?),
            "mod" => Action::Mod(serde_json::from_value(Self::sibling(self.mod_, action)?)?),
            "unmod" => Action::Unmod(serde_json::from_value(Self::sibling(self.unmod, action)?)?),
            "approve_unban_request" => Action::ApproveUnbanRequest(serde_json::from_value(
                Self::sibling(self.unban_request.clone(), action)?,
            )?),
            "deny_unban_request" => Action::DenyUnbanRequest(serde_json::from_value(Self::sibling(
                self.unban_request,
                action,
            )?)?),
            "warn" => Action::Warn(serde_json::from_value(Self::sibling(self.warn, action)?)?),
            "shared_chat_ban" => Action::SharedChatBan(serde_json::from_value(Self::sibling(
                self.shared_chat_ban,
                action,
            )?)?),
            "shared_chat_timeout" => Action::SharedChatTimeout(serde_json::from_value(
                Self::sibling(self.shared_chat_timeout, action)?,
            )?),
            "shared_chat_unban" => Action::SharedChatUnban(serde_json::from_value(Self::sibling(
                self.shared_chat_unban,
                action,
            )?)?),
            "shared_chat_untimeout" => Action::SharedChatUntimeout(serde_json::from_value(
                Self::sibling(self.shared_chat_untimeout, action)?,
            )?),
            "shared_chat_delete" => Action::SharedChatDelete(serde_json::from_value(
                Self::sibling(self.shared_chat_delete, action)?,
            )?),
            other => Action::Unknown(other.to_owned()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ChannelModerate {
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub moderator_user_id: String,
    pub moderator_user_login: String,
    pub moderator_user_name: String,
    pub source_broadcaster_user_id: Option<String>,
    pub source_broadcaster_user_login: Option<String>,
    pub source_broadcaster_user_name: Option<String>,
    pub action: Action,
}

impl ChannelModerate {
    /// All three `source_broadcaster_*` fields present and distinct from the
    /// receiving broadcaster.
    pub fn is_from_shared_chat(&self) -> bool {
        match &self.source_broadcaster_user_id {
            Some(id) => id != &self.broadcaster_user_id,
            None => false,
        }
    }
}

impl<'de> Deserialize<'de> for ChannelModerate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawEvent::deserialize(deserializer)?;
        let broadcaster_user_id = raw.broadcaster_user_id.clone();
        let broadcaster_user_login = raw.broadcaster_user_login.clone();
        let broadcaster_user_name = raw.broadcaster_user_name.clone();
        let moderator_user_id = raw.moderator_user_id.clone();
        let moderator_user_login = raw.moderator_user_login.clone();
        let moderator_user_name = raw.moderator_user_name.clone();
        let source_broadcaster_user_id = raw.source_broadcaster_user_id.clone();
        let source_broadcaster_user_login = raw.source_broadcaster_user_login.clone();
        let source_broadcaster_user_name = raw.source_broadcaster_user_name.clone();
        let action = raw.decode_action().map_err(serde::de::Error::custom)?;
        Ok(ChannelModerate {
            broadcaster_user_id,
            broadcaster_user_login,
            broadcaster_user_name,
            moderator_user_id,
            moderator_user_login,
            moderator_user_name,
            source_broadcaster_user_id,
            source_broadcaster_user_login,
            source_broadcaster_user_name,
            action,
        })
    }
}

impl Subscription for ChannelModerate {
    const TYPE: &'static str = "channel.moderate";
    const VERSION: &'static str = "2";
    type Condition = ChannelModerateCondition;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelModerateCondition {
    pub broadcaster_user_id: String,
    pub moderator_user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_fields() -> serde_json::Value {
        serde_json::json!({
            "broadcaster_user_id": "1", "broadcaster_user_login": "a", "broadcaster_user_name": "A",
            "moderator_user_id": "2", "moderator_user_login": "b", "moderator_user_name": "B",
        })
    }

    fn merge(mut base: serde_json::Value, extra: serde_json::Value) -> serde_json::Value {
        let (serde_json::Value::Object(base_map), serde_json::Value::Object(extra_map)) =
            (&mut base, extra)
        else {
            unreachable!()
        };
        base_map.extend(extra_map);
        base
    }

    /// E2E-3: `followers` action with `follow_duration_minutes: 10080`.
    #[test]
    fn followers_action() {
        let value = merge(
            base_fields(),
            serde_json::json!({
                "action": "followers",
                "followers": {"follow_duration_minutes": 10080},
            }),
        );
        let event: ChannelModerate = serde_json::from_value(value).unwrap();
        match event.action {
            Action::Followers(Followers {
                follow_duration_minutes,
            }) => assert_eq!(follow_duration_minutes, 10080),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    /// E2E-4: `delete` action, renamed to `DeleteMessage` in the typed model.
    #[test]
    fn delete_action_renamed_to_delete_message() {
        let value = merge(
            base_fields(),
            serde_json::json!({
                "action": "delete",
                "delete": {
                    "user_id": "9", "user_login": "spammer", "user_name": "Spammer",
                    "message_id": "msg-1", "message_body": "spam spam spam",
                },
            }),
        );
        let event: ChannelModerate = serde_json::from_value(value).unwrap();
        match event.action {
            Action::DeleteMessage(delete) => {
                assert_eq!(delete.user_id, "9");
                assert_eq!(delete.message_id, "msg-1");
                assert_eq!(delete.message_body, "spam spam spam");
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn no_payload_action_ignores_all_null_siblings() {
        let value = merge(
            base_fields(),
            serde_json::json!({
                "action": "clear",
                "followers": null,
                "slow": null,
                "ban": null,
            }),
        );
        let event: ChannelModerate = serde_json::from_value(value).unwrap();
        assert!(matches!(event.action, Action::Clear));
    }

    #[test]
    fn missing_sibling_for_its_action_is_an_error() {
        let value = merge(base_fields(), serde_json::json!({"action": "ban", "ban": null}));
        let err = serde_json::from_value::<ChannelModerate>(value).unwrap_err();
        assert!(err.to_string().contains("ban"));
    }

    #[test]
    fn unrecognized_action_is_forward_compatible() {
        let value = merge(base_fields(), serde_json::json!({"action": "something_new"}));
        let event: ChannelModerate = serde_json::from_value(value).unwrap();
        assert!(matches!(event.action, Action::Unknown(name) if name == "something_new"));
    }

    #[test]
    fn shared_chat_timeout_decodes_like_plain_timeout() {
        let mut value = merge(
            base_fields(),
            serde_json::json!({
                "action": "shared_chat_timeout",
                "shared_chat_timeout": {
                    "user_id": "9", "user_login": "spammer", "user_name": "Spammer",
                    "reason": "spam", "expires_at": "2024-01-01T00:00:00Z",
                },
            }),
        );
        value["source_broadcaster_user_id"] = serde_json::json!("99");
        value["source_broadcaster_user_login"] = serde_json::json!("other");
        value["source_broadcaster_user_name"] = serde_json::json!("Other");

        let event: ChannelModerate = serde_json::from_value(value).unwrap();
        match event.action {
            Action::SharedChatTimeout(Timeout { user_id, .. }) => assert_eq!(user_id, "9"),
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(event.source_broadcaster_user_id.as_deref(), Some("99"));
    }

    #[test]
    fn is_from_shared_chat_requires_distinct_broadcaster() {
        let mut value = merge(base_fields(), serde_json::json!({"action": "clear"}));
        let event: ChannelModerate = serde_json::from_value(value.clone()).unwrap();
        assert!(!event.is_from_shared_chat());

        value["source_broadcaster_user_id"] = serde_json::json!("99");
        value["source_broadcaster_user_login"] = serde_json::json!("other");
        value["source_broadcaster_user_name"] = serde_json::json!("Other");
        let event: ChannelModerate = serde_json::from_value(value).unwrap();
        assert!(event.is_from_shared_chat());
    }
}
