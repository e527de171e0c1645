//! # Permission Filters
//!
//! Structured partial-match queries over permission records. Store backends
//! evaluate a [`PermissionFilter`] against their records instead of parsing a
//! query-language string.

use crate::actions::Action;
use crate::permission::{Permission, Subject, WILDCARD};

/// A partial match over `{id, resource, action, value, subject}`.
///
/// - Set fields combine with AND.
/// - Subjects combine with OR, since a record has exactly one subject.
/// - A `value` matches records stored with that value or with [`WILDCARD`].
/// - An empty filter matches every record.
///
/// # Example
///
/// ```
/// use grant_rbac::{Action, Permission, PermissionFilter, Subject};
///
/// let filter = PermissionFilter::new()
///     .with_resource("doc")
///     .with_value("42")
///     .with_user("alice")
///     .with_group("editors");
///
/// let direct = Permission::new(Subject::user("alice"), "doc", Action::Read, "42");
/// let via_group = Permission::new(Subject::group("editors"), "doc", Action::Read, "*");
/// let other = Permission::new(Subject::user("alice"), "doc", Action::Read, "99");
///
/// assert!(filter.matches(&direct));
/// assert!(filter.matches(&via_group));
/// assert!(!filter.matches(&other));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionFilter {
    id: Option<String>,
    resource: Option<String>,
    action: Option<Action>,
    value: Option<String>,
    subjects: Vec<Subject>,
}

impl PermissionFilter {
    /// Create an empty filter (full scan).
    pub fn new() -> Self {
        Self::default()
    }

    /// Match a single record key.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Match a resource class.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Match an action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Match a resource instance (or records stored with the wildcard).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Add a user to the accepted subjects.
    pub fn with_user(self, user_id: impl Into<String>) -> Self {
        self.with_subject(Subject::User(user_id.into()))
    }

    /// Add a group to the accepted subjects.
    pub fn with_group(self, group_id: impl Into<String>) -> Self {
        self.with_subject(Subject::Group(group_id.into()))
    }

    /// Add a subject to the accepted subjects.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        if !self.subjects.contains(&subject) {
            self.subjects.push(subject);
        }
        self
    }

    /// Add several subjects to the accepted subjects.
    pub fn with_subjects<I>(self, subjects: I) -> Self
    where
        I: IntoIterator<Item = Subject>,
    {
        subjects.into_iter().fold(self, Self::with_subject)
    }

    /// Check if the filter constrains nothing.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.resource.is_none()
            && self.action.is_none()
            && self.value.is_none()
            && self.subjects.is_empty()
    }

    /// Check if a record satisfies the filter.
    pub fn matches(&self, permission: &Permission) -> bool {
        if let Some(ref id) = self.id {
            if &permission.id != id {
                return false;
            }
        }

        if let Some(ref resource) = self.resource {
            if &permission.resource != resource {
                return false;
            }
        }

        if let Some(ref action) = self.action {
            if &permission.action != action {
                return false;
            }
        }

        if let Some(ref value) = self.value {
            if &permission.value != value && permission.value != WILDCARD {
                return false;
            }
        }

        self.subjects.is_empty() || self.subjects.contains(&permission.subject)
    }
}
