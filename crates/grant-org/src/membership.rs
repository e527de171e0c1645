//! Membership domain models
//!
//! This module provides membership records that link users to groups, and
//! the filter used to look them up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of the reserved global administrator group.
///
/// Membership in this group makes a user a global administrator regardless
/// of the membership's `is_admin` flag.
pub const ADMIN_GROUP_ID: &str = "ffffffff-ffff-ffff-ffff-ffffffffffff";

/// Group membership linking a user to a group.
///
/// # Examples
///
/// ```
/// use grant_org::GroupMembership;
///
/// let membership = GroupMembership::new("alice", "editors");
/// assert!(!membership.is_admin);
///
/// let admin = GroupMembership::new("bob", "editors").as_admin();
/// assert!(admin.is_admin);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupMembership {
    /// User ID
    pub user_id: String,

    /// Group ID
    pub group_id: String,

    /// Whether the user administers this group
    #[serde(default)]
    pub is_admin: bool,

    /// When the user joined
    pub joined_at: DateTime<Utc>,
}

impl GroupMembership {
    /// Creates a new plain (non-admin) membership.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user ID
    /// * `group_id` - The group ID
    pub fn new(user_id: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            group_id: group_id.into(),
            is_admin: false,
            joined_at: Utc::now(),
        }
    }

    /// Mark this membership as a group administrator.
    pub fn as_admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}

/// Partial match over membership records. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipFilter {
    user_id: Option<String>,
    group_id: Option<String>,
}

impl MembershipFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match memberships of a user.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Match memberships in a group.
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Check if a membership satisfies the filter.
    pub fn matches(&self, membership: &GroupMembership) -> bool {
        self.user_id
            .as_deref()
            .map_or(true, |id| id == membership.user_id)
            && self
                .group_id
                .as_deref()
                .map_or(true, |id| id == membership.group_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_creation() {
        let membership = GroupMembership::new("alice", "editors");

        assert_eq!(membership.user_id, "alice");
        assert_eq!(membership.group_id, "editors");
        assert!(!membership.is_admin);
    }

    #[test]
    fn test_membership_as_admin() {
        let membership = GroupMembership::new("alice", "editors").as_admin();
        assert!(membership.is_admin);
    }

    #[test]
    fn test_filter_by_user_and_group() {
        let membership = GroupMembership::new("alice", "editors");

        assert!(MembershipFilter::new().matches(&membership));
        assert!(MembershipFilter::new().with_user("alice").matches(&membership));
        assert!(MembershipFilter::new()
            .with_user("alice")
            .with_group("editors")
            .matches(&membership));
        assert!(!MembershipFilter::new()
            .with_user("alice")
            .with_group("ops")
            .matches(&membership));
        assert!(!MembershipFilter::new().with_user("bob").matches(&membership));
    }

    #[test]
    fn test_is_admin_defaults_to_false_on_the_wire() {
        let raw = serde_json::json!({
            "user_id": "alice",
            "group_id": "editors",
            "joined_at": "2024-01-01T00:00:00Z"
        });

        let membership: GroupMembership = serde_json::from_value(raw).unwrap();
        assert!(!membership.is_admin);
    }
}
