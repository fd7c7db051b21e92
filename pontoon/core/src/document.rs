use crate::error::CoreError;
use crate::field_path::validate_identifier;
use quill::ast::Value;
use serde_json::{Map, Value as JsonValue};

/// One document: an ordered mapping of field names to values. Top-level
/// keys become insert columns, so they are held to identifier rules;
/// nested keys live inside the canonical encoding and are free-form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document(Vec<(String, Value<'static>)>);

impl Document {
    pub fn new() -> Self {
        Document(Vec::new())
    }

    /// Decode a JSON object into a document, keeping key order.
    pub fn from_json_object(map: Map<String, JsonValue>) -> crate::Result<Self> {
        let mut document = Document(Vec::with_capacity(map.len()));

        for (key, value) in map {
            validate_identifier(&key)
                .map_err(|_| CoreError::MalformedRequest(format!("`{key}` is not a valid field name")))?;

            let value = Value::try_from(value)
                .map_err(|e| CoreError::MalformedRequest(format!("field `{key}`: {e}")))?;

            document.0.push((key, value));
        }

        Ok(document)
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::from(Value::Document(self.0.clone()))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value<'static>) {
        self.0.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&Value<'static>> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value<'static>)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value<'static>)>>(iter: I) -> Self {
        Document(iter.into_iter().collect())
    }
}

impl From<Document> for Value<'static> {
    fn from(document: Document) -> Self {
        Value::Document(document.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_object(json: JsonValue) -> Map<String, JsonValue> {
        match json {
            JsonValue::Object(map) => map,
            other => panic!("expected an object, got {other:?}"),
        }
    }

    #[test]
    fn decodes_json_objects_in_order() {
        let document =
            Document::from_json_object(as_object(json!({"name": "John", "age": "79"}))).unwrap();

        assert_eq!(vec!["name", "age"], document.keys().collect::<Vec<_>>());
        assert_eq!(Some(&Value::text("John")), document.get("name"));
        assert_eq!(document.to_json(), json!({"name": "John", "age": "79"}));
    }

    #[test]
    fn rejects_field_names_unusable_as_columns() {
        let result = Document::from_json_object(as_object(json!({"na me": 1})));
        assert!(matches!(result, Err(CoreError::MalformedRequest(_))));
    }

    #[test]
    fn nested_keys_are_not_restricted() {
        let document = Document::from_json_object(as_object(
            json!({"items": {"detail name": "anything goes"}}),
        ))
        .unwrap();

        assert_eq!(
            Some(&Value::document(vec![("detail name", Value::text("anything goes"))])),
            document.get("items")
        );
    }
}
