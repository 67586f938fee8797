//! Purpose: Typed field access over decoded JSON objects.
//! Exports: `require_object`, `require_type`, `get_str`, `get_string`, `require_string`,
//! `get_bool`, `get_array`.
//! Role: Single place mapping JSON shape violations to schema errors.
//! Invariants: Missing optional fields fall back to defaults; present fields of the
//! wrong type fail the parse.
//! Invariants: Helpers never mutate the input value.

use serde_json::{Map, Value};

use crate::core::error::{Error, ErrorKind};

pub fn require_object(json: &Value) -> Result<&Map<String, Value>, Error> {
    json.as_object()
        .ok_or_else(|| Error::new(ErrorKind::Schema).with_message("element must be a JSON object"))
}

pub fn require_type(obj: &Map<String, Value>, expected: &str) -> Result<(), Error> {
    let found = obj.get("type").and_then(Value::as_str).ok_or_else(|| {
        Error::new(ErrorKind::Schema)
            .with_message("missing type discriminator")
            .with_field("type")
    })?;
    if found != expected {
        return Err(Error::new(ErrorKind::Schema)
            .with_message(format!("expected type {expected}, found {found}"))
            .with_field("type")
            .with_element_type(found));
    }
    Ok(())
}

pub fn get_str<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, Error> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(_) => Err(Error::new(ErrorKind::Schema)
            .with_message(format!("{key} must be a string"))
            .with_field(key)),
    }
}

pub fn get_string(obj: &Map<String, Value>, key: &str) -> Result<String, Error> {
    Ok(get_str(obj, key)?.unwrap_or_default().to_string())
}

pub fn require_string(obj: &Map<String, Value>, key: &str) -> Result<String, Error> {
    get_str(obj, key)?.map(str::to_string).ok_or_else(|| {
        Error::new(ErrorKind::Schema)
            .with_message(format!("{key} is required"))
            .with_field(key)
    })
}

pub fn get_bool(obj: &Map<String, Value>, key: &str, default: bool) -> Result<bool, Error> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => Err(Error::new(ErrorKind::Schema)
            .with_message(format!("{key} must be a boolean"))
            .with_field(key)),
    }
}

pub fn get_array<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<Option<&'a Vec<Value>>, Error> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(_) => Err(Error::new(ErrorKind::Schema)
            .with_message(format!("{key} must be an array"))
            .with_field(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use serde_json::json;

    fn obj(value: serde_json::Value) -> Map<String, Value> {
        value.as_object().expect("object").clone()
    }

    #[test]
    fn require_object_rejects_non_objects() {
        assert!(require_object(&json!({"type": "Input.ChoiceSet"})).is_ok());
        for bad in [json!(null), json!(3), json!("text"), json!([])] {
            let err = require_object(&bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Schema);
        }
    }

    #[test]
    fn require_type_checks_discriminator() {
        let fields = obj(json!({"type": "Input.ChoiceSet"}));
        assert!(require_type(&fields, "Input.ChoiceSet").is_ok());

        let err = require_type(&fields, "Input.Text").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.element_type(), Some("Input.ChoiceSet"));

        let missing = obj(json!({"id": "x"}));
        let err = require_type(&missing, "Input.ChoiceSet").unwrap_err();
        assert_eq!(err.field(), Some("type"));
    }

    #[test]
    fn optional_fields_default_and_wrong_types_fail() {
        let fields = obj(json!({"id": "a", "wrap": true, "count": 3}));
        assert_eq!(get_str(&fields, "id").unwrap(), Some("a"));
        assert_eq!(get_str(&fields, "missing").unwrap(), None);
        assert_eq!(get_string(&fields, "missing").unwrap(), "");
        assert!(get_bool(&fields, "wrap", false).unwrap());
        assert!(!get_bool(&fields, "missing", false).unwrap());
        assert!(get_str(&fields, "count").is_err());
        assert!(get_bool(&fields, "id", false).is_err());
    }

    #[test]
    fn null_fields_count_as_missing() {
        let fields = obj(json!({"id": null, "choices": null}));
        assert_eq!(get_str(&fields, "id").unwrap(), None);
        assert!(get_array(&fields, "choices").unwrap().is_none());
    }

    #[test]
    fn require_string_fails_when_absent() {
        let fields = obj(json!({"title": "Red"}));
        assert_eq!(require_string(&fields, "title").unwrap(), "Red");
        let err = require_string(&fields, "value").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.field(), Some("value"));
    }

    #[test]
    fn get_array_rejects_scalars() {
        let fields = obj(json!({"choices": "not-an-array"}));
        let err = get_array(&fields, "choices").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);
        assert_eq!(err.field(), Some("choices"));
    }
}
