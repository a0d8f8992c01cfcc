use serde_json::Value;

use crate::errors::StorageError;

pub(crate) fn encode(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

pub(crate) fn decode(key: &str, raw: &str) -> Result<Value, StorageError> {
    serde_json::from_str(raw).map_err(|source| StorageError::Decode {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encodes_compact_json() {
        assert_eq!(encode(&json!({"a": [1, 2], "b": null})).unwrap(), r#"{"a":[1,2],"b":null}"#);
        assert_eq!(encode(&json!("v")).unwrap(), r#""v""#);
    }

    #[test]
    fn decode_error_names_the_key() {
        let err = decode("settings", "{oops").unwrap_err();
        match &err {
            StorageError::Decode { key, .. } => assert_eq!(key, "settings"),
            other => panic!("expected Decode, got {:?}", other),
        }
        assert!(err.to_string().contains("settings"));
    }

    #[test]
    fn decodes_scalars() {
        assert_eq!(decode("k", "null").unwrap(), Value::Null);
        assert_eq!(decode("k", "42").unwrap(), json!(42));
    }
}
