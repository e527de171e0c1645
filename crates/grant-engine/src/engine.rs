//! Permission engine
//!
//! Resolves the caller's identity, checks administrative privilege and
//! answers create/delete/find/authorize requests against the record store.
//! The engine holds no state between calls; every decision is made from the
//! records the store returns for that call.

use grant_auth::IdentityResolver;
use grant_rbac::{Action, Permission, PermissionFilter, Subject};
use grant_store::{RecordStore, StoreError};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::conditions;
use crate::config::{ConfigError, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::membership::MembershipIndex;
use crate::params::PermissionParams;

/// The permission decision service.
///
/// Every public operation comes in two forms: one taking an access token,
/// which is resolved through the [`IdentityResolver`], and an `_as` form
/// taking an already-resolved user ID.
#[derive(Clone)]
pub struct PermissionEngine {
    config: EngineConfig,
    store: Arc<dyn RecordStore>,
    identity: Arc<dyn IdentityResolver>,
    memberships: MembershipIndex,
}

impl std::fmt::Debug for PermissionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionEngine")
            .field("config", &self.config)
            .field("backend", &self.store.backend_name())
            .finish()
    }
}

impl PermissionEngine {
    /// Create an engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration does not validate.
    pub fn new(
        config: EngineConfig,
        store: Arc<dyn RecordStore>,
        identity: Arc<dyn IdentityResolver>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let memberships = MembershipIndex::new(store.clone(), config.admin_group_id.clone());
        Ok(Self {
            config,
            store,
            identity,
            memberships,
        })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The membership index the engine consults.
    pub fn memberships(&self) -> &MembershipIndex {
        &self.memberships
    }

    /// Resolve an access token to a user ID.
    pub async fn resolve_identity(&self, access_token: &str) -> EngineResult<String> {
        Ok(self.identity.resolve(access_token).await?)
    }

    /// Check if the user belongs to the reserved administrator group.
    pub async fn is_global_admin(&self, user_id: &str) -> EngineResult<bool> {
        Ok(self.memberships.is_global_admin(user_id).await?)
    }

    /// Check if the user administers a group. `None` is never administered.
    pub async fn is_group_admin(&self, user_id: &str, group_id: Option<&str>) -> EngineResult<bool> {
        Ok(self.memberships.is_group_admin(user_id, group_id).await?)
    }

    /// See [`MembershipIndex::is_authorized_within_group`].
    pub async fn is_authorized_within_group(
        &self,
        user_id: &str,
        group_id: Option<&str>,
        require_admin: Option<bool>,
    ) -> EngineResult<bool> {
        Ok(self
            .memberships
            .is_authorized_within_group(user_id, group_id, require_admin)
            .await?)
    }

    /// See [`conditions::apply_conditions`].
    pub async fn apply_conditions(
        &self,
        records: Vec<Permission>,
        acting_user: Option<&str>,
    ) -> EngineResult<Vec<Permission>> {
        Ok(conditions::apply_conditions(&self.memberships, records, acting_user).await?)
    }

    // ---- Mutations ----

    /// Create a permission record on behalf of the token's owner.
    #[instrument(skip(self, access_token))]
    pub async fn create(
        &self,
        access_token: &str,
        params: PermissionParams,
    ) -> EngineResult<Permission> {
        let user_id = self.resolve_identity(access_token).await?;
        self.create_as(&user_id, params).await
    }

    /// Create a permission record on behalf of `user_id`.
    ///
    /// Global administrators may create anything. Anyone else needs a
    /// `create` permission on the same resource and value. Creating a record
    /// whose key already exists replaces it.
    pub async fn create_as(
        &self,
        user_id: &str,
        params: PermissionParams,
    ) -> EngineResult<Permission> {
        let permission = params.to_permission()?;
        self.authorize_mutation(user_id, &permission.resource, &permission.value)
            .await?;

        let created = self.store.put_permission(permission).await?;
        info!(id = %created.id, actor = %user_id, "Created permission");
        Ok(created)
    }

    /// Delete a permission record on behalf of the token's owner.
    #[instrument(skip(self, access_token))]
    pub async fn delete(
        &self,
        access_token: &str,
        params: PermissionParams,
    ) -> EngineResult<Option<String>> {
        let user_id = self.resolve_identity(access_token).await?;
        self.delete_as(&user_id, params).await
    }

    /// Delete a permission record on behalf of `user_id`.
    ///
    /// The record is addressed by `params.id`, or by the key derived from the
    /// params' fields. Non-administrators are gated on the record's resource
    /// and value the same way [`create_as`](Self::create_as) is.
    ///
    /// Returns the deleted key, or `None` when no record had that key.
    pub async fn delete_as(
        &self,
        user_id: &str,
        params: PermissionParams,
    ) -> EngineResult<Option<String>> {
        let key = params.record_key()?;

        if !self.is_global_admin(user_id).await? {
            let (resource, value) = match params.id() {
                Some(id) => {
                    let filter = PermissionFilter::new().with_id(id);
                    match self.store.find_permissions(&filter).await?.into_iter().next() {
                        Some(record) => (record.resource, record.value),
                        None => {
                            debug!(key = %key, "No record to delete");
                            return Ok(None);
                        }
                    }
                }
                None => {
                    let resource = params.resource().unwrap_or_default().to_string();
                    let value = params.value().unwrap_or_default().to_string();
                    (resource, value)
                }
            };
            self.require_create_permission(user_id, &resource, &value)
                .await?;
        }

        match self.store.delete_permission(&key).await {
            Ok(deleted) => {
                info!(id = %deleted, actor = %user_id, "Deleted permission");
                Ok(Some(deleted))
            }
            Err(StoreError::NotFound(_)) => {
                debug!(key = %key, "No record to delete");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Updating a record in place is not supported; delete and create instead.
    pub async fn update(
        &self,
        _access_token: &str,
        _params: PermissionParams,
    ) -> EngineResult<Permission> {
        Err(EngineError::Unsupported("update"))
    }

    /// Gate a mutation on `(resource, value)`.
    ///
    /// Holding `create` on a resource instance is what allows writing and
    /// removing records for it, whatever the action of the record.
    async fn authorize_mutation(&self, user_id: &str, resource: &str, value: &str) -> EngineResult<()> {
        if self.is_global_admin(user_id).await? {
            debug!(actor = %user_id, "Global admin mutation");
            return Ok(());
        }
        self.require_create_permission(user_id, resource, value)
            .await
    }

    async fn require_create_permission(
        &self,
        user_id: &str,
        resource: &str,
        value: &str,
    ) -> EngineResult<()> {
        if self.has_create_permission(user_id, resource, value).await? {
            return Ok(());
        }

        warn!(actor = %user_id, resource = %resource, value = %value, "Mutation denied");
        Err(EngineError::forbidden(format!(
            "{} may not modify permissions on {}/{}",
            user_id, resource, value
        )))
    }

    async fn has_create_permission(
        &self,
        user_id: &str,
        resource: &str,
        value: &str,
    ) -> EngineResult<bool> {
        if resource.is_empty() || value.is_empty() {
            return Ok(false);
        }

        let groups = self.memberships.groups_of(user_id).await?;
        let filter = PermissionFilter::new()
            .with_resource(resource)
            .with_action(Action::Create)
            .with_value(value)
            .with_user(user_id)
            .with_subjects(groups.into_iter().map(Subject::Group));

        let records = self.store.find_permissions(&filter).await?;
        let records = self.apply_conditions(records, Some(user_id)).await?;
        Ok(!records.is_empty())
    }

    // ---- Queries ----

    /// Find the permission records visible to the token's owner.
    #[instrument(skip(self, access_token))]
    pub async fn find(
        &self,
        access_token: &str,
        params: PermissionParams,
    ) -> EngineResult<Vec<Permission>> {
        let user_id = self.resolve_identity(access_token).await?;
        self.find_as(&user_id, params).await
    }

    /// Find permission records on behalf of `acting`.
    ///
    /// The first matching rule decides:
    ///
    /// 1. No target user or group: the caller's own records, conditions
    ///    evaluated for the caller.
    /// 2. Global admin: records as requested, conditions evaluated for the
    ///    target user (if any).
    /// 3. Target group: the caller must administer it. Only that group's
    ///    records are returned, whatever `user_id` or `all` say, and
    ///    conditions are not evaluated against any user.
    /// 4. Target user is the caller: as in 1.
    /// 5. Other target user: the caller must administer one of the target's
    ///    groups; conditions evaluated for the target.
    ///
    /// Anything else is forbidden.
    pub async fn find_as(
        &self,
        acting: &str,
        params: PermissionParams,
    ) -> EngineResult<Vec<Permission>> {
        if !params.has_target() {
            debug!(actor = %acting, "Self query");
            return self.fetch(&params, Some(acting), Some(acting)).await;
        }

        if self.is_global_admin(acting).await? {
            debug!(actor = %acting, "Global admin query");
            return self.fetch(&params, params.user(), params.user()).await;
        }

        if let Some(group_id) = params.group() {
            if self.is_group_admin(acting, Some(group_id)).await? {
                debug!(actor = %acting, group = %group_id, "Group admin query");
                // Group records only; `user_id` and `all` do not widen the scan.
                return self.fetch(&params, None, None).await;
            }
            warn!(actor = %acting, group = %group_id, "Group query denied");
            return Err(EngineError::forbidden(format!(
                "{} does not administer group {}",
                acting, group_id
            )));
        }

        if let Some(target) = params.user() {
            if target == acting {
                debug!(actor = %acting, "Own user query");
                return self.fetch(&params, Some(target), Some(target)).await;
            }

            let groups = self.memberships.groups_of(target).await?;
            if groups.is_empty() {
                warn!(actor = %acting, target = %target, "Target belongs to no group");
                return Err(EngineError::forbidden(format!(
                    "{} shares no administered group with {}",
                    acting, target
                )));
            }
            for group_id in &groups {
                if self.is_group_admin(acting, Some(group_id.as_str())).await? {
                    debug!(actor = %acting, target = %target, group = %group_id, "Delegated user query");
                    return self.fetch(&params, Some(target), Some(target)).await;
                }
            }

            warn!(actor = %acting, target = %target, "User query denied");
            return Err(EngineError::forbidden(format!(
                "{} shares no administered group with {}",
                acting, target
            )));
        }

        Err(EngineError::forbidden("unrecognized query scope"))
    }

    /// Fetching a single record is not supported; use [`find`](Self::find).
    pub async fn find_one(
        &self,
        _access_token: &str,
        _params: PermissionParams,
    ) -> EngineResult<Permission> {
        Err(EngineError::Unsupported("find_one"))
    }

    /// Check if the token's owner holds the permission described by `params`.
    ///
    /// Same as a [`find`](Self::find) with `all` set, reduced to whether
    /// anything matched. A query the caller may not make fails rather than
    /// answering `false`.
    #[instrument(skip(self, access_token))]
    pub async fn is_permitted(
        &self,
        access_token: &str,
        params: PermissionParams,
    ) -> EngineResult<bool> {
        let user_id = self.resolve_identity(access_token).await?;
        self.is_permitted_as(&user_id, params).await
    }

    /// [`is_permitted`](Self::is_permitted) for a resolved user.
    pub async fn is_permitted_as(
        &self,
        user_id: &str,
        params: PermissionParams,
    ) -> EngineResult<bool> {
        let records = self.find_as(user_id, params.with_all(true)).await?;
        Ok(!records.is_empty())
    }

    /// Check every entry with [`is_permitted`](Self::is_permitted), stopping
    /// at the first `false`. An empty list is permitted.
    #[instrument(skip(self, access_token, requests), fields(count = requests.len()))]
    pub async fn are_permitted(
        &self,
        access_token: &str,
        requests: &[PermissionParams],
    ) -> EngineResult<bool> {
        let user_id = self.resolve_identity(access_token).await?;
        for params in requests {
            if !self.is_permitted_as(&user_id, params.clone()).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Scan the store and filter conditions.
    ///
    /// `subject_user` narrows the scan to that user's records, widened to
    /// the user's groups when `params.all` is set. `params.group_id` adds
    /// that group's records.
    async fn fetch(
        &self,
        params: &PermissionParams,
        subject_user: Option<&str>,
        acting_user: Option<&str>,
    ) -> EngineResult<Vec<Permission>> {
        let mut filter = params.base_filter();
        if let Some(user_id) = subject_user {
            filter = filter.with_user(user_id);
            if params.all {
                let groups = self.memberships.groups_of(user_id).await?;
                filter = filter.with_subjects(groups.into_iter().map(Subject::Group));
            }
        }
        if let Some(group_id) = params.group() {
            filter = filter.with_group(group_id);
        }

        let records = self.store.find_permissions(&filter).await?;
        debug!(matched = records.len(), "Scanned permissions");
        self.apply_conditions(records, acting_user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grant_auth::MemoryTokenStore;
    use grant_store::MemoryRecordStore;

    fn engine() -> PermissionEngine {
        PermissionEngine::new(
            EngineConfig::default(),
            Arc::new(MemoryRecordStore::new()),
            Arc::new(MemoryTokenStore::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = PermissionEngine::new(
            EngineConfig::default().with_admin_group(""),
            Arc::new(MemoryRecordStore::new()),
            Arc::new(MemoryTokenStore::new()),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unsupported_without_identity() {
        let engine = engine();

        assert!(matches!(
            engine.update("no-such-token", PermissionParams::new()).await,
            Err(EngineError::Unsupported("update"))
        ));
        assert!(matches!(
            engine.find_one("no-such-token", PermissionParams::new()).await,
            Err(EngineError::Unsupported("find_one"))
        ));
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthenticated() {
        let engine = engine();

        assert!(matches!(
            engine.find("no-such-token", PermissionParams::new()).await,
            Err(EngineError::Unauthenticated)
        ));
        assert!(matches!(
            engine.is_permitted("", PermissionParams::new()).await,
            Err(EngineError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_params_before_gate() {
        let engine = engine();
        let params = PermissionParams::new().with_resource("doc");

        assert!(matches!(
            engine.create_as("anyone", params).await,
            Err(EngineError::InvalidRequest(_))
        ));
    }
}
