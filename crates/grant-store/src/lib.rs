//! # Grant Record Store
//!
//! Storage seam for permission and group-membership records.
//!
//! ## Overview
//!
//! The grant-store crate handles:
//! - **Record Store**: The [`RecordStore`] trait the permission engine reads
//!   and writes through
//! - **Memory backend**: [`MemoryRecordStore`] for single-process deployments
//!   and tests
//!
//! ## Features
//!
//! - `memory` (default): In-memory record store
//!
//! ## Consistency
//!
//! Backends guarantee single-key atomicity for puts and deletes, and
//! point-in-time scans. There is no cross-record transaction; retry policy,
//! if any, belongs to the backend.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use grant_rbac::{Action, Permission, PermissionFilter, Subject};
//! use grant_store::{MemoryRecordStore, RecordStore};
//!
//! async fn store_example() {
//!     let store = MemoryRecordStore::new();
//!
//!     let perm = Permission::new(Subject::user("alice"), "doc", Action::Read, "*");
//!     store.put_permission(perm).await.unwrap();
//!
//!     let filter = PermissionFilter::new().with_resource("doc").with_value("42");
//!     let rows = store.find_permissions(&filter).await.unwrap();
//!     assert_eq!(rows.len(), 1);
//! }
//! ```

pub mod store;

#[cfg(feature = "memory")]
pub mod memory;

// Re-export main types
pub use store::{RecordStore, StoreError, StoreResult};

#[cfg(feature = "memory")]
pub use memory::MemoryRecordStore;
