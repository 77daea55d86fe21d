//! Template values that may be literal strings or intrinsic function calls.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A string-valued template expression.
///
/// Literals serialize as plain JSON strings; every other variant serializes
/// as the corresponding single-key intrinsic object (`{"Ref": ...}`,
/// `{"Fn::GetAtt": [...]}`, `{"Fn::Sub": ...}`), resolved later by the
/// deployment engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CfnValue {
    /// A value known at synthesis time.
    Literal(String),
    /// `Ref` to a resource's primary identifier.
    Ref(String),
    /// `Fn::GetAtt` on a resource attribute.
    GetAtt {
        /// Logical ID of the resource.
        logical_id: String,
        /// Attribute name, e.g. `Arn`.
        attribute: String,
    },
    /// `Fn::Sub` template string with `${...}` placeholders.
    Sub(String),
}

impl CfnValue {
    /// A literal value.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// A `Ref` to `logical_id`.
    #[must_use]
    pub fn reference(logical_id: impl Into<String>) -> Self {
        Self::Ref(logical_id.into())
    }

    /// An `Fn::GetAtt` on `logical_id.attribute`.
    #[must_use]
    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::GetAtt {
            logical_id: logical_id.into(),
            attribute: attribute.into(),
        }
    }

    /// An `Fn::Sub` template string.
    #[must_use]
    pub fn sub(template: impl Into<String>) -> Self {
        Self::Sub(template.into())
    }

    /// The literal string, if this value is known at synthesis time.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for CfnValue {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<String> for CfnValue {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl Serialize for CfnValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(s) => serializer.serialize_str(s),
            Self::Ref(id) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", id)?;
                map.end()
            }
            Self::GetAtt {
                logical_id,
                attribute,
            } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &[logical_id, attribute])?;
                map.end()
            }
            Self::Sub(template) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Sub", template)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_should_serialize_literal_as_string() {
        let v = serde_json::to_value(CfnValue::literal("finance")).unwrap();
        assert_eq!(v, json!("finance"));
    }

    #[test]
    fn test_should_serialize_intrinsics() {
        assert_eq!(
            serde_json::to_value(CfnValue::reference("UserPool")).unwrap(),
            json!({"Ref": "UserPool"})
        );
        assert_eq!(
            serde_json::to_value(CfnValue::get_att("Client", "ClientSecret")).unwrap(),
            json!({"Fn::GetAtt": ["Client", "ClientSecret"]})
        );
        assert_eq!(
            serde_json::to_value(CfnValue::sub("${Bucket.Arn}/*")).unwrap(),
            json!({"Fn::Sub": "${Bucket.Arn}/*"})
        );
    }

    #[test]
    fn test_should_expose_only_literal_values() {
        assert_eq!(CfnValue::from("x").as_literal(), Some("x"));
        assert_eq!(CfnValue::reference("X").as_literal(), None);
    }
}
