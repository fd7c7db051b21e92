use indexmap::IndexMap;
use pontoon_core::field_path::validate_identifier;
use pontoon_core::{CoreError, Document, Filter, QueryIntent};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

/// The wire shape of the query endpoint, decoded exactly once. All
/// presence and type questions are answered here; past this point the
/// intent is fully typed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(default)]
    find: Option<String>,
    #[serde(default)]
    insert: Option<String>,
    #[serde(default)]
    delete: Option<String>,
    #[serde(default)]
    filter: Option<Map<String, JsonValue>>,
    #[serde(default)]
    documents: Option<Vec<JsonValue>>,
    #[serde(default)]
    confirm_unconditional: Option<bool>,
    #[serde(flatten)]
    unrecognized: IndexMap<String, JsonValue>,
}

impl RequestBody {
    pub fn try_from_slice(body: &[u8]) -> Result<Self, CoreError> {
        serde_json::from_slice(body)
            .map_err(|e| CoreError::MalformedRequest(format!("could not parse the request body: {e}")))
    }

    pub fn into_intent(self) -> Result<QueryIntent, CoreError> {
        match (self.find, self.insert, self.delete) {
            (Some(collection), None, None) => {
                validate_collection(&collection)?;

                if self.documents.is_some() {
                    return Err(CoreError::MalformedRequest(
                        "`documents` is not valid for a find".to_string(),
                    ));
                }

                Ok(QueryIntent::Find {
                    collection,
                    filter: parse_filter(self.filter)?,
                })
            }

            (None, Some(collection), None) => {
                validate_collection(&collection)?;

                if self.filter.is_some() {
                    return Err(CoreError::MalformedRequest(
                        "`filter` is not valid for an insert".to_string(),
                    ));
                }

                let documents = self
                    .documents
                    .unwrap_or_default()
                    .into_iter()
                    .map(|json| match json {
                        JsonValue::Object(map) => Document::from_json_object(map),
                        other => Err(CoreError::MalformedRequest(format!(
                            "documents must be objects, got {other}"
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(QueryIntent::Insert {
                    collection,
                    documents,
                })
            }

            (None, None, Some(collection)) => {
                validate_collection(&collection)?;

                if self.documents.is_some() {
                    return Err(CoreError::MalformedRequest(
                        "`documents` is not valid for a delete".to_string(),
                    ));
                }

                Ok(QueryIntent::Delete {
                    collection,
                    filter: parse_filter(self.filter)?,
                    confirm_unconditional: self.confirm_unconditional.unwrap_or(false),
                })
            }

            (None, None, None) => {
                let seen: Vec<&str> = self.unrecognized.keys().map(String::as_str).collect();

                if seen.is_empty() {
                    Err(CoreError::UnsupportedOperation(
                        "the request names no operation".to_string(),
                    ))
                } else {
                    Err(CoreError::UnsupportedOperation(format!(
                        "no supported operation in request (saw: {})",
                        seen.join(", ")
                    )))
                }
            }

            _ => Err(CoreError::MalformedRequest(
                "the request names more than one operation".to_string(),
            )),
        }
    }
}

fn validate_collection(collection: &str) -> Result<(), CoreError> {
    validate_identifier(collection)
        .map_err(|_| CoreError::MalformedRequest(format!("`{collection}` is not a valid collection name")))
}

fn parse_filter(filter: Option<Map<String, JsonValue>>) -> Result<Filter, CoreError> {
    match filter {
        Some(map) => Filter::from_json(map),
        None => Ok(Filter::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn intent(raw: &str) -> Result<QueryIntent, CoreError> {
        RequestBody::try_from_slice(raw.as_bytes())?.into_intent()
    }

    #[test]
    fn find_bodies_decode() {
        let intent = intent(r#"{"find": "testing", "filter": {"name": "Daria"}}"#).unwrap();

        match intent {
            QueryIntent::Find { collection, filter } => {
                assert_eq!("testing", collection);
                assert_eq!(1, filter.len());
            }
            other => panic!("expected a find, got {other:?}"),
        }
    }

    #[test]
    fn insert_bodies_decode() {
        let intent = intent(indoc! {r#"
            {
                "insert": "testing",
                "documents": [{"name": "John", "age": "79"}, {"name": "Helen"}]
            }
        "#})
        .unwrap();

        match intent {
            QueryIntent::Insert {
                collection,
                documents,
            } => {
                assert_eq!("testing", collection);
                assert_eq!(2, documents.len());
            }
            other => panic!("expected an insert, got {other:?}"),
        }
    }

    #[test]
    fn delete_bodies_default_to_unconfirmed() {
        let intent = intent(r#"{"delete": "testing"}"#).unwrap();

        assert_eq!(
            QueryIntent::Delete {
                collection: "testing".to_string(),
                filter: Filter::default(),
                confirm_unconditional: false,
            },
            intent
        );

        let confirmed = self::intent(r#"{"delete": "testing", "confirmUnconditional": true}"#).unwrap();
        assert!(matches!(
            confirmed,
            QueryIntent::Delete {
                confirm_unconditional: true,
                ..
            }
        ));
    }

    #[test]
    fn unknown_operations_are_unsupported_not_malformed() {
        let error = intent(r#"{"update": "testing", "u": {"$set": {"name": "x"}}}"#).unwrap_err();

        assert!(matches!(error, CoreError::UnsupportedOperation(_)));
    }

    #[test]
    fn unparseable_bodies_are_malformed() {
        let error = intent("{not json").unwrap_err();
        assert!(matches!(error, CoreError::MalformedRequest(_)));
    }

    #[test]
    fn two_operations_are_malformed() {
        let error = intent(r#"{"find": "a", "delete": "b"}"#).unwrap_err();
        assert!(matches!(error, CoreError::MalformedRequest(_)));
    }

    #[test]
    fn mismatched_payload_fields_are_malformed() {
        let error = intent(r#"{"find": "a", "documents": []}"#).unwrap_err();
        assert!(matches!(error, CoreError::MalformedRequest(_)));

        let error = intent(r#"{"insert": "a", "filter": {}}"#).unwrap_err();
        assert!(matches!(error, CoreError::MalformedRequest(_)));
    }

    #[test]
    fn collection_names_are_validated() {
        let error = intent(r#"{"find": "not a table"}"#).unwrap_err();
        assert!(matches!(error, CoreError::MalformedRequest(_)));
    }
}
