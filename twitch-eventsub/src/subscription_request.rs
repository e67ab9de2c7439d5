//! Identity of a subscription the Controller is asked to maintain, and the
//! refcounted handle applications hold to keep it alive.

use std::sync::{Arc, Mutex, Weak};

/// Structural identity of a `channel.ban`-style subscription: type, version,
/// and an ordered list of condition key/value pairs. Equality and hashing
/// both use the insertion order of `conditions` — two requests built from the
/// same condition map in a different field order are NOT considered equal,
/// matching the source's plain `std::pair`/vector-based key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionRequest {
    pub subscription_type: &'static str,
    pub subscription_version: &'static str,
    pub owner_user_id: String,
    pub conditions: Vec<(String, String)>,
}

impl SubscriptionRequest {
    pub fn new(
        subscription_type: &'static str,
        subscription_version: &'static str,
        owner_user_id: impl Into<String>,
        conditions: Vec<(String, String)>,
    ) -> Self {
        Self {
            subscription_type,
            subscription_version,
            owner_user_id: owner_user_id.into(),
            conditions,
        }
    }
}

pub(crate) trait ReleaseRef: Send + Sync {
    fn remove_ref(&self, request: &SubscriptionRequest);
}

/// Reference-counted token for a live subscription. Dropping the last handle
/// for a given [`SubscriptionRequest`] triggers an unsubscribe.
pub struct SubscriptionHandle {
    pub(crate) request: SubscriptionRequest,
    pub(crate) controller: Weak<dyn ReleaseRef>,
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        if let Some(controller) = self.controller.upgrade() {
            controller.remove_ref(&self.request);
        }
    }
}

/// What the Controller tracks per distinct [`SubscriptionRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Pending,
    Creating,
    Active,
    Failed,
}

#[derive(Debug)]
pub(crate) struct ActiveSubscriptionRecord {
    pub ref_count: i64,
    pub state: RecordState,
    pub server_subscription_id: Option<String>,
    pub session_id: Option<String>,
}

impl ActiveSubscriptionRecord {
    pub fn new() -> Self {
        Self {
            ref_count: 0,
            state: RecordState::Pending,
            server_subscription_id: None,
            session_id: None,
        }
    }
}

pub(crate) type SubscriptionTable = Mutex<std::collections::HashMap<SubscriptionRequest, ActiveSubscriptionRecord>>;

pub(crate) fn new_table() -> Arc<SubscriptionTable> {
    Arc::new(Mutex::new(std::collections::HashMap::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_conditions_in_same_order_are_equal() {
        let a = SubscriptionRequest::new(
            "channel.ban",
            "1",
            "1",
            vec![("broadcaster_user_id".into(), "1".into())],
        );
        let b = SubscriptionRequest::new(
            "channel.ban",
            "1",
            "1",
            vec![("broadcaster_user_id".into(), "1".into())],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn differently_ordered_conditions_are_not_equal() {
        let a = SubscriptionRequest::new(
            "channel.moderate",
            "2",
            "1",
            vec![
                ("broadcaster_user_id".into(), "1".into()),
                ("moderator_user_id".into(), "2".into()),
            ],
        );
        let b = SubscriptionRequest::new(
            "channel.moderate",
            "2",
            "1",
            vec![
                ("moderator_user_id".into(), "2".into()),
                ("broadcaster_user_id".into(), "1".into()),
            ],
        );
        assert_ne!(a, b);
    }

    #[test]
    fn second_subscribe_for_same_request_shares_refcount() {
        let table = new_table();
        let request = SubscriptionRequest::new(
            "channel.chat.message",
            "1",
            "1",
            vec![("broadcaster_user_id".into(), "1".into())],
        );

        let first_needs_place = {
            let mut table = table.lock().unwrap();
            let record = table
                .entry(request.clone())
                .or_insert_with(ActiveSubscriptionRecord::new);
            let needs_place = record.ref_count == 0;
            record.ref_count += 1;
            needs_place
        };
        let second_needs_place = {
            let mut table = table.lock().unwrap();
            let record = table
                .entry(request.clone())
                .or_insert_with(ActiveSubscriptionRecord::new);
            let needs_place = record.ref_count == 0;
            record.ref_count += 1;
            needs_place
        };

        assert!(first_needs_place);
        assert!(!second_needs_place);
        assert_eq!(table.lock().unwrap().get(&request).unwrap().ref_count, 2);
    }
}
