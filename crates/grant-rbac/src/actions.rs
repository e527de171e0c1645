//! # Actions
//!
//! Defines the operations a permission record can grant on a resource.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Action a permission record grants.
///
/// The well-known actions have their own variants; any other name is carried
/// as [`Action::Custom`]. On the wire an action is always its plain string,
/// and two actions are equal iff their strings are equal.
///
/// `Create` carries extra weight in the engine: holding `Create` on a
/// resource instance is what lets a non-administrator manage the permission
/// records for that instance.
///
/// # Example
///
/// ```
/// use grant_rbac::Action;
///
/// assert_eq!(Action::from("read"), Action::Read);
/// assert_eq!(Action::from("publish").as_str(), "publish");
/// assert_eq!(Action::Custom("delete".into()), Action::Delete);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    /// Create new resource instances.
    Create,

    /// Read/view a resource.
    Read,

    /// Modify an existing resource.
    Update,

    /// Remove a resource.
    Delete,

    /// Browse or query multiple resources.
    List,

    /// Trigger a process backed by the resource.
    Execute,

    /// Any other action name.
    Custom(String),
}

impl Action {
    /// Get the string representation of the action.
    ///
    /// This is the form used on the wire and inside derived record keys.
    pub fn as_str(&self) -> &str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::List => "list",
            Action::Execute => "execute",
            Action::Custom(name) => name,
        }
    }

    /// Check if the action is outside the well-known set.
    pub fn is_custom(&self) -> bool {
        matches!(Action::from(self.as_str()), Action::Custom(_))
    }
}

impl From<&str> for Action {
    fn from(name: &str) -> Self {
        match name {
            "create" => Action::Create,
            "read" => Action::Read,
            "update" => Action::Update,
            "delete" => Action::Delete,
            "list" => Action::List,
            "execute" => Action::Execute,
            other => Action::Custom(other.to_string()),
        }
    }
}

impl From<String> for Action {
    fn from(name: String) -> Self {
        match Action::from(name.as_str()) {
            Action::Custom(_) => Action::Custom(name),
            known => known,
        }
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        match action {
            Action::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Action {}

impl Hash for Action {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
