//! # Conditions
//!
//! Optional predicates attached to permission records.
//!
//! The vocabulary is deliberately small: the only recognized predicate is the
//! administrative-scope flag `is_admin`, evaluated against the group the
//! record is granted to. Conditions without that flag are unrecognized.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A permission condition.
///
/// Stored as a JSON object. For compatibility with records written as
/// encoded strings, deserialization also accepts a JSON string containing an
/// object.
///
/// # Example
///
/// ```
/// use grant_rbac::Condition;
///
/// let condition = Condition::parse(r#"{"is_admin": 1}"#).unwrap();
/// assert_eq!(condition.admin_flag(), Some(true));
///
/// let condition = Condition::parse(r#"{"parent": "folder-1"}"#).unwrap();
/// assert_eq!(condition.admin_flag(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ConditionRepr")]
pub struct Condition(Map<String, Value>);

impl Condition {
    /// Key of the administrative-scope flag.
    pub const ADMIN_FLAG: &'static str = "is_admin";

    /// Create an empty condition.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Create a condition on the administrative-scope flag.
    ///
    /// `true` requires the caller to administer the record's group; `false`
    /// requires plain membership.
    pub fn admin(required: bool) -> Self {
        Self::new().with(Self::ADMIN_FLAG, Value::Bool(required))
    }

    /// Parse a condition from its encoded JSON form.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Set a raw key on the condition.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Read the administrative-scope flag.
    ///
    /// Booleans and numbers are recognized: zero reads as `false`, any other
    /// number as `true`. Absence, or any other shape, yields `None`.
    pub fn admin_flag(&self) -> Option<bool> {
        match self.0.get(Self::ADMIN_FLAG)? {
            Value::Bool(flag) => Some(*flag),
            Value::Number(n) => n.as_f64().map(|n| n != 0.0),
            _ => None,
        }
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConditionRepr {
    Object(Map<String, Value>),
    Encoded(String),
}

impl TryFrom<ConditionRepr> for Condition {
    type Error = String;

    fn try_from(repr: ConditionRepr) -> Result<Self, Self::Error> {
        match repr {
            ConditionRepr::Object(map) => Ok(Self(map)),
            ConditionRepr::Encoded(raw) => serde_json::from_str::<Map<String, Value>>(&raw)
                .map(Self)
                .map_err(|e| format!("invalid encoded condition: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_admin_flag_variants() {
        assert_eq!(Condition::admin(true).admin_flag(), Some(true));
        assert_eq!(Condition::admin(false).admin_flag(), Some(false));
        assert_eq!(
            Condition::new().with("is_admin", json!(0)).admin_flag(),
            Some(false)
        );
        assert_eq!(
            Condition::new().with("is_admin", json!(1)).admin_flag(),
            Some(true)
        );
    }

    #[test]
    fn test_nonzero_numbers_require_admin() {
        for raw in [json!(2), json!(-1), json!(0.5)] {
            assert_eq!(
                Condition::new().with("is_admin", raw.clone()).admin_flag(),
                Some(true),
                "{} should require admin",
                raw
            );
        }
        assert_eq!(
            Condition::new().with("is_admin", json!(0.0)).admin_flag(),
            Some(false)
        );
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert_eq!(Condition::new().admin_flag(), None);
        assert_eq!(
            Condition::new().with("is_admin", json!("yes")).admin_flag(),
            None
        );
        assert_eq!(
            Condition::new().with("is_admin", json!(null)).admin_flag(),
            None
        );
        assert_eq!(
            Condition::new().with("parent", json!("p-1")).admin_flag(),
            None
        );
    }

    #[test]
    fn test_deserialize_object_and_encoded() {
        let object: Condition = serde_json::from_value(json!({"is_admin": true})).unwrap();
        let encoded: Condition = serde_json::from_value(json!("{\"is_admin\": true}")).unwrap();

        assert_eq!(object, encoded);
        assert_eq!(object.admin_flag(), Some(true));
    }

    #[test]
    fn test_deserialize_rejects_bad_encoding() {
        let result: Result<Condition, _> = serde_json::from_value(json!("not json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_as_object() {
        let value = serde_json::to_value(Condition::admin(false)).unwrap();
        assert_eq!(value, json!({"is_admin": false}));
    }
}
