//! Conversion of untyped payload values into native field types.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserializes `value` into `V`, allowing scalar/string mismatches.
///
/// Hosts commonly send every form value as a string, so a strict failure
/// gets one retry: a string holding a JSON number or boolean is re-read as
/// that scalar, and a number or boolean is re-read as its text. The strict
/// error is returned if the retry fails too.
pub(crate) fn coerce<V: DeserializeOwned>(value: &Value) -> Result<V, serde_json::Error> {
    match V::deserialize(value) {
        Ok(v) => Ok(v),
        Err(strict) => lenient_alternative(value)
            .and_then(|alt| V::deserialize(&alt).ok())
            .ok_or(strict),
    }
}

fn lenient_alternative(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => match serde_json::from_str::<Value>(s.trim()) {
            Ok(scalar @ (Value::Number(_) | Value::Bool(_))) => Some(scalar),
            _ => None,
        },
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_values_pass_through() {
        assert_eq!(coerce::<u32>(&json!(7)).unwrap(), 7);
        assert_eq!(coerce::<String>(&json!("hi")).unwrap(), "hi");
        assert_eq!(coerce::<Vec<u8>>(&json!([1, 2])).unwrap(), vec![1, 2]);
        assert_eq!(coerce::<Option<String>>(&json!(null)).unwrap(), None);
    }

    #[test]
    fn numeric_strings_become_numbers() {
        assert_eq!(coerce::<u32>(&json!("42")).unwrap(), 42);
        assert_eq!(coerce::<f64>(&json!(" 1.5 ")).unwrap(), 1.5);
        assert!(coerce::<bool>(&json!("true")).unwrap());
    }

    #[test]
    fn scalars_become_strings() {
        assert_eq!(coerce::<String>(&json!(12)).unwrap(), "12");
        assert_eq!(coerce::<String>(&json!(false)).unwrap(), "false");
    }

    #[test]
    fn irreconcilable_values_fail() {
        assert!(coerce::<u32>(&json!("abc")).is_err());
        assert!(coerce::<u32>(&json!([1])).is_err());
        assert!(coerce::<u8>(&json!("300")).is_err());
        assert!(coerce::<String>(&json!({"a": 1})).is_err());
        assert!(coerce::<String>(&json!(null)).is_err());
    }
}
