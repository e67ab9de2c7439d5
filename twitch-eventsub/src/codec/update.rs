//! `channel.update@1`

use serde::{Deserialize, Serialize};

use super::Subscription;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelUpdate {
    pub broadcaster_user_id: String,
    pub broadcaster_user_login: String,
    pub broadcaster_user_name: String,
    pub title: String,
    pub language: String,
    pub category_id: String,
    pub category_name: String,
    pub is_mature: bool,
}

impl Subscription for ChannelUpdate {
    const TYPE: &'static str = "channel.update";
    const VERSION: &'static str = "1";
    type Condition = ChannelUpdateCondition;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelUpdateCondition {
    pub broadcaster_user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_category_change() {
        let event: ChannelUpdate = serde_json::from_value(serde_json::json!({
            "broadcaster_user_id": "1337",
            "broadcaster_user_login": "cool_user",
            "broadcaster_user_name": "Cool_User",
            "title": "Best Stream Ever",
            "language": "en",
            "category_id": "21779",
            "category_name": "League of Legends",
            "is_mature": false,
        }))
        .unwrap();
        assert_eq!(event.category_name, "League of Legends");
    }
}
