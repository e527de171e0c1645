//! Request parameters for engine operations.

use grant_rbac::{derive_id, Action, Condition, Permission, PermissionFilter, Subject};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Parameters accepted by the engine's public operations.
///
/// Every field is optional; which fields an operation needs depends on the
/// operation. Empty strings are treated the same as absent fields.
///
/// # Example
///
/// ```
/// use grant_engine::PermissionParams;
/// use grant_rbac::Action;
///
/// let params = PermissionParams::new()
///     .for_user("u2")
///     .with_resource("doc")
///     .with_action(Action::Read)
///     .with_value("42");
///
/// let perm = params.to_permission().unwrap();
/// assert_eq!(perm.id, "u-u2-doc-read-42");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionParams {
    /// Explicit record key (delete only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Target user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Target group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    /// Resource class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    /// Action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,

    /// Resource instance or wildcard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Condition to attach on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,

    /// Widen a user query to the groups the user belongs to.
    #[serde(default)]
    pub all: bool,
}

impl PermissionParams {
    /// Create empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target a user.
    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Target a group.
    pub fn for_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Name an explicit record key.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the resource class.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Set the action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the resource instance.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the condition to attach on create.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set the `all` flag.
    pub fn with_all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub(crate) fn id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    pub(crate) fn user(&self) -> Option<&str> {
        non_empty(&self.user_id)
    }

    pub(crate) fn group(&self) -> Option<&str> {
        non_empty(&self.group_id)
    }

    pub(crate) fn resource(&self) -> Option<&str> {
        non_empty(&self.resource)
    }

    pub(crate) fn value(&self) -> Option<&str> {
        non_empty(&self.value)
    }

    /// Check if the parameters name a target user or group.
    pub fn has_target(&self) -> bool {
        self.user().is_some() || self.group().is_some()
    }

    /// The subject named by the parameters.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidRequest`] when both a user and a group are named.
    pub fn subject(&self) -> EngineResult<Option<Subject>> {
        match (self.user(), self.group()) {
            (Some(_), Some(_)) => Err(EngineError::InvalidRequest(
                "a permission names either user_id or group_id, not both".to_string(),
            )),
            (Some(user), None) => Ok(Some(Subject::user(user))),
            (None, Some(group)) => Ok(Some(Subject::group(group))),
            (None, None) => Ok(None),
        }
    }

    /// Build the permission record these parameters describe.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidRequest`] unless exactly one subject, a resource,
    /// an action and a value are present.
    pub fn to_permission(&self) -> EngineResult<Permission> {
        let subject = self.subject()?.ok_or_else(|| {
            EngineError::InvalidRequest("a permission needs user_id or group_id".to_string())
        })?;
        let (resource, action, value) = self.required_fields()?;

        let permission = Permission::new(subject, resource, action.clone(), value);
        Ok(match self.condition.clone() {
            Some(condition) => permission.with_condition(condition),
            None => permission,
        })
    }

    /// The store key these parameters address: the explicit `id` if present,
    /// otherwise the key derived from the fields.
    pub fn record_key(&self) -> EngineResult<String> {
        if let Some(id) = self.id() {
            return Ok(id.to_string());
        }
        let subject = self.subject()?;
        let (resource, action, value) = self.required_fields()?;
        Ok(derive_id(subject.as_ref(), resource, action, value))
    }

    /// Filter over `{id, resource, action, value}`; subjects are added by the
    /// engine.
    pub(crate) fn base_filter(&self) -> PermissionFilter {
        let mut filter = PermissionFilter::new();
        if let Some(id) = self.id() {
            filter = filter.with_id(id);
        }
        if let Some(resource) = self.resource() {
            filter = filter.with_resource(resource);
        }
        if let Some(action) = &self.action {
            filter = filter.with_action(action.clone());
        }
        if let Some(value) = self.value() {
            filter = filter.with_value(value);
        }
        filter
    }

    fn required_fields(&self) -> EngineResult<(&str, &Action, &str)> {
        let missing = |field: &str| EngineError::InvalidRequest(format!("missing {}", field));
        Ok((
            self.resource().ok_or_else(|| missing("resource"))?,
            self.action.as_ref().ok_or_else(|| missing("action"))?,
            self.value().ok_or_else(|| missing("value"))?,
        ))
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grant_rbac::WILDCARD;
    use serde_json::json;

    fn doc_read() -> PermissionParams {
        PermissionParams::new()
            .with_resource("doc")
            .with_action(Action::Read)
            .with_value("42")
    }

    #[test]
    fn test_subject_exclusivity() {
        assert!(doc_read().subject().unwrap().is_none());
        assert_eq!(
            doc_read().for_user("a").subject().unwrap(),
            Some(Subject::user("a"))
        );
        assert_eq!(
            doc_read().for_group("g").subject().unwrap(),
            Some(Subject::group("g"))
        );
        assert!(matches!(
            doc_read().for_user("a").for_group("g").subject(),
            Err(EngineError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let params = doc_read().for_user("");
        assert!(!params.has_target());
        assert!(params.subject().unwrap().is_none());
    }

    #[test]
    fn test_to_permission_requires_fields() {
        assert!(matches!(
            doc_read().to_permission(),
            Err(EngineError::InvalidRequest(_))
        ));
        assert!(matches!(
            PermissionParams::new().for_user("a").with_resource("doc").to_permission(),
            Err(EngineError::InvalidRequest(_))
        ));

        let perm = doc_read()
            .for_group("g")
            .with_condition(Condition::admin(true))
            .to_permission()
            .unwrap();
        assert_eq!(perm.id, "g-g-doc-read-42");
        assert!(perm.condition.is_some());
    }

    #[test]
    fn test_record_key_matches_created_key() {
        let params = doc_read().for_user("a");
        assert_eq!(params.record_key().unwrap(), params.to_permission().unwrap().id);
    }

    #[test]
    fn test_record_key_prefers_explicit_id() {
        let params = PermissionParams::new().with_id("u-a-doc-read-42");
        assert_eq!(params.record_key().unwrap(), "u-a-doc-read-42");
    }

    #[test]
    fn test_record_key_without_subject() {
        assert_eq!(doc_read().record_key().unwrap(), "-doc-read-42");
    }

    #[test]
    fn test_base_filter_ignores_subject() {
        let filter = doc_read().for_user("a").base_filter();
        let other_user = Permission::new(Subject::user("b"), "doc", Action::Read, WILDCARD);
        assert!(filter.matches(&other_user));
    }

    #[test]
    fn test_deserialize_custom_action() {
        let params: PermissionParams = serde_json::from_value(json!({
            "group_id": "ops",
            "resource": "doc",
            "action": "publish",
            "value": "*"
        }))
        .unwrap();

        assert_eq!(params.action, Some(Action::Custom("publish".to_string())));
        assert_eq!(params.record_key().unwrap(), "g-ops-doc-publish-*");
    }

    #[test]
    fn test_deserialize_request_shape() {
        let params: PermissionParams = serde_json::from_value(json!({
            "user_id": "u2",
            "resource": "doc",
            "action": "read",
            "value": "42",
            "condition": "{\"is_admin\": 0}"
        }))
        .unwrap();

        assert_eq!(params.user_id.as_deref(), Some("u2"));
        assert!(!params.all);
        assert_eq!(
            params.condition.as_ref().and_then(Condition::admin_flag),
            Some(false)
        );
    }
}
