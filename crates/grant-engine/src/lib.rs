//! # Grant Engine
//!
//! Authorization decisions and permission-record management.
//!
//! ## Overview
//!
//! The grant-engine crate handles:
//! - **Identity**: Resolving access tokens through an [`IdentityResolver`](grant_auth::IdentityResolver)
//! - **Privilege**: Global and group administrator checks via the [`MembershipIndex`]
//! - **Conditions**: Filtering conditioned records against the acting user
//! - **Operations**: create, delete, find and is/are_permitted over a
//!   [`RecordStore`](grant_store::RecordStore)
//!
//! ## Decision model
//!
//! ```text
//! token ──► identity ──► admin?  ──► scope rule ──► store scan ──► conditions ──► records
//!                        member?
//! ```
//!
//! Members of the reserved administrator group bypass every scope check.
//! Group administrators manage the records of their group and of its
//! members. Holding `create` on a resource instance allows creating and
//! deleting records for that instance.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use grant_auth::MemoryTokenStore;
//! use grant_engine::{EngineConfig, PermissionEngine, PermissionParams};
//! use grant_org::{GroupMembership, ADMIN_GROUP_ID};
//! use grant_rbac::Action;
//! use grant_store::MemoryRecordStore;
//!
//! async fn engine_example() {
//!     let store = MemoryRecordStore::new();
//!     store.put_membership(GroupMembership::new("root", ADMIN_GROUP_ID)).await;
//!
//!     let tokens = MemoryTokenStore::new();
//!     let root = tokens.issue("root").await;
//!     let alice = tokens.issue("alice").await;
//!
//!     let engine = PermissionEngine::new(
//!         EngineConfig::from_env(),
//!         Arc::new(store),
//!         Arc::new(tokens),
//!     )
//!     .unwrap();
//!
//!     let grant = PermissionParams::new()
//!         .for_user("alice")
//!         .with_resource("doc")
//!         .with_action(Action::Read)
//!         .with_value("42");
//!     engine.create(&root.access_token, grant).await.unwrap();
//!
//!     let check = PermissionParams::new()
//!         .with_resource("doc")
//!         .with_action(Action::Read)
//!         .with_value("42");
//!     assert!(engine.is_permitted(&alice.access_token, check).await.unwrap());
//! }
//! ```

pub mod conditions;
pub mod config;
pub mod engine;
pub mod error;
pub mod membership;
pub mod params;

// Re-export main types for convenience
pub use config::{ConfigError, EngineConfig};
pub use engine::PermissionEngine;
pub use error::{EngineError, EngineResult};
pub use membership::MembershipIndex;
pub use params::PermissionParams;
