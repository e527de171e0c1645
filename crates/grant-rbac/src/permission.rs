//! # Permissions
//!
//! Permission records and the key derivation that gives each record its
//! store identity.

use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::conditions::Condition;

/// Sentinel `value` meaning "all instances of the resource".
pub const WILDCARD: &str = "*";

/// The user or group a permission is granted to.
///
/// A concrete grant always has exactly one subject. On the wire the subject
/// is flattened into the record as either a `user_id` or a `group_id` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Subject {
    /// Grant to a single user.
    #[serde(rename = "user_id")]
    User(String),

    /// Grant to every member of a group.
    #[serde(rename = "group_id")]
    Group(String),
}

impl Subject {
    /// Create a user subject.
    pub fn user(user_id: impl Into<String>) -> Self {
        Subject::User(user_id.into())
    }

    /// Create a group subject.
    pub fn group(group_id: impl Into<String>) -> Self {
        Subject::Group(group_id.into())
    }

    /// Key prefix for this subject kind: `u` for users, `g` for groups.
    pub fn prefix(&self) -> &'static str {
        match self {
            Subject::User(_) => "u",
            Subject::Group(_) => "g",
        }
    }

    /// The user or group identifier.
    pub fn id(&self) -> &str {
        match self {
            Subject::User(id) | Subject::Group(id) => id,
        }
    }
}

/// Derive the store key for a permission record.
///
/// The key is `"{u|g}-{subject_id}-{resource}-{action}-{value}"`. When no
/// subject is given the subject portion is empty, so the key starts with `-`.
///
/// Writes and deletes both go through this function, so a delete that names
/// fields resolves to the same key the original write used.
///
/// # Example
///
/// ```
/// use grant_rbac::{derive_id, Action, Subject};
///
/// let id = derive_id(Some(&Subject::group("ops")), "doc", &Action::Create, "42");
/// assert_eq!(id, "g-ops-doc-create-42");
///
/// let id = derive_id(None, "doc", &Action::Read, "*");
/// assert_eq!(id, "-doc-read-*");
/// ```
pub fn derive_id(subject: Option<&Subject>, resource: &str, action: &Action, value: &str) -> String {
    let subject_part = subject
        .map(|s| format!("{}-{}", s.prefix(), s.id()))
        .unwrap_or_default();
    format!("{}-{}-{}-{}", subject_part, resource, action.as_str(), value)
}

/// A permission record.
///
/// The `id` is a pure function of `(subject, resource, action, value)`;
/// creating the same tuple twice yields the same key and the second write
/// replaces the first. The optional `condition` does not take part in the key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Permission {
    /// Derived store key.
    pub id: String,

    /// Who the permission is granted to.
    #[serde(flatten)]
    pub subject: Subject,

    /// Resource class (e.g. "doc").
    pub resource: String,

    /// Operation granted on the resource.
    pub action: Action,

    /// Resource instance, or [`WILDCARD`] for all instances.
    pub value: String,

    /// Extra predicate that must hold for the record to apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Permission {
    /// Create a new permission record with its key derived from the fields.
    ///
    /// # Example
    ///
    /// ```
    /// use grant_rbac::{Action, Permission, Subject};
    ///
    /// let perm = Permission::new(Subject::user("u2"), "doc", Action::Read, "42");
    /// assert_eq!(perm.id, "u-u2-doc-read-42");
    /// assert!(perm.condition.is_none());
    /// ```
    pub fn new(
        subject: Subject,
        resource: impl Into<String>,
        action: Action,
        value: impl Into<String>,
    ) -> Self {
        let resource = resource.into();
        let value = value.into();
        let id = derive_id(Some(&subject), &resource, &action, &value);
        Self {
            id,
            subject,
            resource,
            action,
            value,
            condition: None,
        }
    }

    /// Attach a condition to this record.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Check if the record applies to every instance of its resource.
    pub fn is_wildcard(&self) -> bool {
        self.value == WILDCARD
    }

    /// The user this record is granted to, if it is a user grant.
    pub fn user_id(&self) -> Option<&str> {
        match &self.subject {
            Subject::User(id) => Some(id),
            Subject::Group(_) => None,
        }
    }

    /// The group this record is granted to, if it is a group grant.
    pub fn group_id(&self) -> Option<&str> {
        match &self.subject {
            Subject::Group(id) => Some(id),
            Subject::User(_) => None,
        }
    }
}
