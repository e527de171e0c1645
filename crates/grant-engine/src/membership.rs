//! Membership index.
//!
//! Answers group-membership questions for the engine by querying the record
//! store. Holds no state of its own beyond the store handle and the reserved
//! administrator group.

use grant_org::{GroupMembership, MembershipFilter};
use grant_store::{RecordStore, StoreResult};
use std::sync::Arc;

/// Group-membership queries over a [`RecordStore`].
#[derive(Clone)]
pub struct MembershipIndex {
    store: Arc<dyn RecordStore>,
    admin_group_id: String,
}

impl std::fmt::Debug for MembershipIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipIndex")
            .field("backend", &self.store.backend_name())
            .field("admin_group_id", &self.admin_group_id)
            .finish()
    }
}

impl MembershipIndex {
    /// Create an index over a store.
    pub fn new(store: Arc<dyn RecordStore>, admin_group_id: impl Into<String>) -> Self {
        Self {
            store,
            admin_group_id: admin_group_id.into(),
        }
    }

    /// The user's membership in a group, if any.
    pub async fn membership(
        &self,
        user_id: &str,
        group_id: &str,
    ) -> StoreResult<Option<GroupMembership>> {
        let filter = MembershipFilter::new()
            .with_user(user_id)
            .with_group(group_id);
        Ok(self.store.find_memberships(&filter).await?.into_iter().next())
    }

    /// Check if the user belongs to the reserved administrator group.
    pub async fn is_global_admin(&self, user_id: &str) -> StoreResult<bool> {
        Ok(self
            .membership(user_id, &self.admin_group_id)
            .await?
            .is_some())
    }

    /// Check if the user belongs to a group, as admin or not.
    pub async fn is_member(&self, user_id: &str, group_id: &str) -> StoreResult<bool> {
        Ok(self.membership(user_id, group_id).await?.is_some())
    }

    /// Check if the user administers a group.
    ///
    /// A missing group yields `false` without querying the store.
    pub async fn is_group_admin(&self, user_id: &str, group_id: Option<&str>) -> StoreResult<bool> {
        let Some(group_id) = group_id else {
            return Ok(false);
        };
        Ok(self
            .membership(user_id, group_id)
            .await?
            .map_or(false, |m| m.is_admin))
    }

    /// Every group the user belongs to.
    pub async fn groups_of(&self, user_id: &str) -> StoreResult<Vec<String>> {
        let filter = MembershipFilter::new().with_user(user_id);
        Ok(self
            .store
            .find_memberships(&filter)
            .await?
            .into_iter()
            .map(|m| m.group_id)
            .collect())
    }

    /// Evaluate a group-scoped administrative condition.
    ///
    /// - `Some(true)`: the user must administer the group.
    /// - `Some(false)`: membership in the group is enough.
    /// - `None` (flag absent), or no group: denied.
    pub async fn is_authorized_within_group(
        &self,
        user_id: &str,
        group_id: Option<&str>,
        require_admin: Option<bool>,
    ) -> StoreResult<bool> {
        let Some(group_id) = group_id else {
            return Ok(false);
        };
        match require_admin {
            Some(true) => self.is_group_admin(user_id, Some(group_id)).await,
            Some(false) => self.is_member(user_id, group_id).await,
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grant_org::ADMIN_GROUP_ID;
    use grant_store::MemoryRecordStore;

    async fn index() -> MembershipIndex {
        let store = MemoryRecordStore::new();
        store.put_membership(GroupMembership::new("root", ADMIN_GROUP_ID)).await;
        store
            .put_membership(GroupMembership::new("lead", "editors").as_admin())
            .await;
        store.put_membership(GroupMembership::new("member", "editors")).await;
        store.put_membership(GroupMembership::new("member", "readers")).await;
        MembershipIndex::new(Arc::new(store), ADMIN_GROUP_ID)
    }

    #[tokio::test]
    async fn test_global_admin() {
        let index = index().await;
        assert!(index.is_global_admin("root").await.unwrap());
        assert!(!index.is_global_admin("lead").await.unwrap());
    }

    #[tokio::test]
    async fn test_global_admin_uses_configured_group() {
        let store = MemoryRecordStore::new();
        store.put_membership(GroupMembership::new("root", "admins")).await;
        let index = MembershipIndex::new(Arc::new(store), "admins");

        assert!(index.is_global_admin("root").await.unwrap());
    }

    #[tokio::test]
    async fn test_group_admin() {
        let index = index().await;
        assert!(index.is_group_admin("lead", Some("editors")).await.unwrap());
        assert!(!index.is_group_admin("member", Some("editors")).await.unwrap());
        assert!(!index.is_group_admin("lead", Some("readers")).await.unwrap());
        assert!(!index.is_group_admin("lead", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_groups_of() {
        let index = index().await;
        let mut groups = index.groups_of("member").await.unwrap();
        groups.sort();
        assert_eq!(groups, vec!["editors", "readers"]);
        assert!(index.groups_of("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_authorized_within_group_requires_admin() {
        let index = index().await;
        let check = |user: &'static str| {
            let index = index.clone();
            async move {
                index
                    .is_authorized_within_group(user, Some("editors"), Some(true))
                    .await
                    .unwrap()
            }
        };

        assert!(check("lead").await);
        assert!(!check("member").await);
        assert!(!check("stranger").await);
    }

    #[tokio::test]
    async fn test_authorized_within_group_membership_suffices() {
        let index = index().await;

        assert!(index
            .is_authorized_within_group("member", Some("editors"), Some(false))
            .await
            .unwrap());
        assert!(index
            .is_authorized_within_group("lead", Some("editors"), Some(false))
            .await
            .unwrap());
        assert!(!index
            .is_authorized_within_group("stranger", Some("editors"), Some(false))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_authorized_within_group_denies_without_flag_or_group() {
        let index = index().await;

        assert!(!index
            .is_authorized_within_group("lead", Some("editors"), None)
            .await
            .unwrap());
        assert!(!index
            .is_authorized_within_group("lead", None, Some(true))
            .await
            .unwrap());
        assert!(!index
            .is_authorized_within_group("member", None, Some(false))
            .await
            .unwrap());
    }
}
