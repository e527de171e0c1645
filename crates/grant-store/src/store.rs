//! Record store abstraction.

use async_trait::async_trait;
use grant_org::{GroupMembership, MembershipFilter};
use grant_rbac::{Permission, PermissionFilter};
use thiserror::Error;

/// Record store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists under the key
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The backend rejected a write
    #[error("Write rejected: {0}")]
    WriteRejected(String),

    /// The backend failed to serve a read
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Generic associative store of permission and group-membership records.
///
/// The engine never composes backend query strings; it hands over structured
/// filters and each backend evaluates them however suits it.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Write a permission record under its `id`, replacing any existing record.
    async fn put_permission(&self, permission: Permission) -> StoreResult<Permission>;

    /// Delete the permission record under `id`.
    ///
    /// Returns the deleted key, or [`StoreError::NotFound`] if no record exists.
    async fn delete_permission(&self, id: &str) -> StoreResult<String>;

    /// Scan permission records matching the filter. An empty filter returns
    /// every record.
    async fn find_permissions(&self, filter: &PermissionFilter) -> StoreResult<Vec<Permission>>;

    /// Scan membership records matching the filter.
    async fn find_memberships(&self, filter: &MembershipFilter)
        -> StoreResult<Vec<GroupMembership>>;

    /// Name of the backend, for logs.
    fn backend_name(&self) -> &'static str;
}
