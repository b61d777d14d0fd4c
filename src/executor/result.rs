//! Query result types
//!
//! The shell does not model result sets. A query returns either an opaque
//! structured value or nothing at all.

use serde_json::Value;

/// Data returned from a single query
#[derive(Debug, Clone, PartialEq)]
pub enum ResultData {
    /// Structured payload (mapping, sequence or scalar)
    Value(Value),

    /// No data
    None,
}

impl ResultData {
    /// Wrap a JSON value, treating `null` as absent
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => ResultData::None,
            other => ResultData::Value(other),
        }
    }

    /// Parse a response body; an empty body means no data.
    pub fn from_body(body: &str) -> serde_json::Result<Self> {
        if body.trim().is_empty() {
            return Ok(ResultData::None);
        }
        serde_json::from_str(body).map(Self::from_value)
    }

    /// True when there is nothing worth printing
    pub fn is_empty(&self) -> bool {
        match self {
            ResultData::None => true,
            ResultData::Value(Value::Array(items)) => items.is_empty(),
            ResultData::Value(Value::Object(map)) => map.is_empty(),
            ResultData::Value(_) => false,
        }
    }
}

impl From<Value> for ResultData {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_absent() {
        assert_eq!(ResultData::from_value(Value::Null), ResultData::None);
        assert!(ResultData::from(Value::Null).is_empty());
    }

    #[test]
    fn test_empty_collections_are_empty() {
        assert!(ResultData::from(json!([])).is_empty());
        assert!(ResultData::from(json!({})).is_empty());
    }

    #[test]
    fn test_scalars_are_not_empty() {
        assert!(!ResultData::from(json!(0)).is_empty());
        assert!(!ResultData::from(json!("")).is_empty());
        assert!(!ResultData::from(json!(false)).is_empty());
        assert!(!ResultData::from(json!([{"id": 1}])).is_empty());
    }

    #[test]
    fn test_from_body() {
        assert_eq!(ResultData::from_body("").unwrap(), ResultData::None);
        assert_eq!(ResultData::from_body("  \n").unwrap(), ResultData::None);
        assert_eq!(ResultData::from_body("null").unwrap(), ResultData::None);
        assert_eq!(
            ResultData::from_body(r#"[{"name": "a"}]"#).unwrap(),
            ResultData::Value(json!([{"name": "a"}]))
        );
        assert!(ResultData::from_body("{not json").is_err());
    }
}
