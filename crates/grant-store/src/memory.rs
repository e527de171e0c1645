//! In-memory record store.
//!
//! Suitable for single-process deployments and tests. State is lost on
//! process restart. Writes take a write lock per map, scans take a read lock,
//! so every scan observes a single point in time.

use async_trait::async_trait;
use grant_org::{GroupMembership, MembershipFilter};
use grant_rbac::{Permission, PermissionFilter};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::store::{RecordStore, StoreError, StoreResult};

/// In-memory record store implementation.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    /// Permission records by derived key
    permissions: Arc<RwLock<BTreeMap<String, Permission>>>,
    /// Membership records by (user_id, group_id)
    memberships: Arc<RwLock<HashMap<(String, String), GroupMembership>>>,
}

impl std::fmt::Debug for MemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRecordStore").finish()
    }
}

impl MemoryRecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a membership record, replacing any existing membership of the
    /// same user in the same group.
    pub async fn put_membership(&self, membership: GroupMembership) -> GroupMembership {
        let key = (membership.user_id.clone(), membership.group_id.clone());
        self.memberships
            .write()
            .await
            .insert(key, membership.clone());
        membership
    }

    /// Remove a user's membership in a group.
    ///
    /// # Returns
    ///
    /// The removed membership, if there was one
    pub async fn remove_membership(&self, user_id: &str, group_id: &str) -> Option<GroupMembership> {
        self.memberships
            .write()
            .await
            .remove(&(user_id.to_string(), group_id.to_string()))
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put_permission(&self, permission: Permission) -> StoreResult<Permission> {
        let replaced = self
            .permissions
            .write()
            .await
            .insert(permission.id.clone(), permission.clone());

        tracing::debug!(
            id = %permission.id,
            replaced = replaced.is_some(),
            "Stored permission"
        );

        Ok(permission)
    }

    async fn delete_permission(&self, id: &str) -> StoreResult<String> {
        match self.permissions.write().await.remove(id) {
            Some(_) => Ok(id.to_string()),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn find_permissions(&self, filter: &PermissionFilter) -> StoreResult<Vec<Permission>> {
        let permissions = self.permissions.read().await;
        Ok(permissions
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn find_memberships(
        &self,
        filter: &MembershipFilter,
    ) -> StoreResult<Vec<GroupMembership>> {
        let memberships = self.memberships.read().await;
        Ok(memberships
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
