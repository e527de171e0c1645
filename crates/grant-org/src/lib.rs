//! # Grant Group Membership
//!
//! Group membership records for the grant permission service.
//!
//! ## Overview
//!
//! The grant-org crate handles:
//! - **Memberships**: User-group relationships with a per-group admin flag
//! - **Filters**: Partial-match queries over membership records
//! - **Global administrators**: The one reserved group whose members bypass scope checks
//!
//! ## Architecture
//!
//! ```text
//! User
//!   ├─ GroupMembership (is_admin = false) ─→ Group   member
//!   ├─ GroupMembership (is_admin = true)  ─→ Group   group administrator
//!   └─ GroupMembership ─→ ADMIN_GROUP_ID             global administrator
//! ```
//!
//! Membership records are written outside the permission engine; the engine
//! only reads them.

pub mod membership;

// Re-export main types for convenience
pub use membership::{GroupMembership, MembershipFilter, ADMIN_GROUP_ID};
