//! Universal node representation for loaded sources.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One node of a hierarchical source, or one cell of a tabular one.
///
/// Mapping keys are unique and keep document order; sequences keep
/// insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(IndexMap<String, Value>),
}

impl Value {
    /// An empty mapping, the root of an empty namespace.
    pub fn empty_mapping() -> Self {
        Value::Mapping(IndexMap::new())
    }

    /// Mappings and sequences project to directories.
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    pub fn is_scalar(&self) -> bool {
        !self.is_composite()
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Textual rendering of a scalar.
    ///
    /// Strings render raw (unquoted). Composite values fall back to
    /// compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Sequence(_) | Value::Mapping(_) => {
                serde_json::to_string(self).unwrap_or_default()
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Mapping(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Number(i.into()),
            // Non-finite floats have no JSON number form.
            toml::Value::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(f.to_string())),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            toml::Value::Table(table) => {
                Value::Mapping(table.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(i.into())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => items.serialize(serializer),
            Value::Mapping(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_key_order() {
        let value = Value::from(json!({"zeta": 1, "alpha": 2, "mid": 3}));
        let keys: Vec<_> = value.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(Value::from("1.2.0").to_text(), "1.2.0");
        assert_eq!(Value::from(true).to_text(), "true");
        assert_eq!(Value::from(42i64).to_text(), "42");
        assert_eq!(Value::Null.to_text(), "null");
        assert_eq!(Value::from(json!(1.5)).to_text(), "1.5");
    }

    #[test]
    fn test_composite_classification() {
        assert!(Value::empty_mapping().is_composite());
        assert!(Value::Sequence(vec![]).is_composite());
        assert!(Value::from("x").is_scalar());
        assert!(Value::Null.is_scalar());
    }

    #[test]
    fn test_serialize_matches_json() {
        let source = json!({"a": [1, "two", null], "b": {"c": false}});
        let value = Value::from(source.clone());
        assert_eq!(serde_json::to_value(&value).unwrap(), source);
    }

    #[test]
    fn test_from_toml() {
        let table: toml::Value = toml::from_str(
            r#"
            name = "svc"
            ports = [80, 443]
            [limits]
            ratio = 0.5
            "#,
        )
        .unwrap();
        let value = Value::from(table);
        let map = value.as_mapping().unwrap();
        assert_eq!(map["name"], Value::from("svc"));
        assert_eq!(map["ports"], Value::from(json!([80, 443])));
        assert!(map["limits"].is_composite());
    }
}
