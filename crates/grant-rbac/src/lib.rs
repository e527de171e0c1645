//! # Grant RBAC
//!
//! Record model for the grant permission service.
//!
//! ## Overview
//!
//! The grant-rbac crate handles:
//! - **Actions**: Operations a permission grants on a resource
//! - **Subjects**: The user or group a permission is granted to
//! - **Conditions**: Optional predicates that narrow when a record applies
//! - **Permissions**: Subject + Resource + Action + Value records with derived keys
//! - **Filters**: Structured partial-match queries over permission records
//!
//! ## Architecture
//!
//! ```text
//! Permission = Subject + Resource + Action + Value [+ Condition]
//!
//! Keys:
//!   "u-alice-doc-read-42"     - alice may read doc 42
//!   "g-editors-doc-create-*"  - editors may create any doc
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use grant_rbac::{Action, Permission, PermissionFilter, Subject, WILDCARD};
//!
//! let perm = Permission::new(Subject::user("alice"), "doc", Action::Read, WILDCARD);
//! assert_eq!(perm.id, "u-alice-doc-read-*");
//!
//! // A wildcard record answers a lookup for any concrete value
//! let filter = PermissionFilter::new()
//!     .with_resource("doc")
//!     .with_action(Action::Read)
//!     .with_value("42");
//! assert!(filter.matches(&perm));
//! ```

pub mod actions;
pub mod conditions;
pub mod filter;
pub mod permission;

// Re-export main types for convenience
pub use actions::Action;
pub use conditions::Condition;
pub use filter::PermissionFilter;
pub use permission::{derive_id, Permission, Subject, WILDCARD};
