use pontoon_core::{CoreError, Document, QueryResponse};
use serde_json::{json, Value as JsonValue};

/// An HTTP-ready rendition of one handled request: status, JSON body and
/// the decoder omission count, which the server surfaces as the
/// `x-omitted-rows` header so the success body shape stays stable.
#[derive(Debug, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: JsonValue,
    pub omitted_rows: usize,
}

impl HandlerResponse {
    pub fn ok(response: QueryResponse) -> Self {
        match response {
            QueryResponse::Documents { documents, omitted } => Self {
                status: 200,
                body: JsonValue::Array(documents.iter().map(Document::to_json).collect()),
                omitted_rows: omitted,
            },
            QueryResponse::Inserted {
                inserted,
                failed,
                errors,
            } => {
                let mut body = json!({"inserted": inserted, "failed": failed});

                if !errors.is_empty() {
                    body["errors"] = json!(errors);
                }

                Self {
                    status: 200,
                    body,
                    omitted_rows: 0,
                }
            }
            QueryResponse::Deleted { deleted } => Self {
                status: 200,
                body: json!({"deleted": deleted}),
                omitted_rows: 0,
            },
        }
    }

    pub fn error(error: &CoreError) -> Self {
        Self {
            status: status_for(error),
            body: json!({"error": error.kind(), "message": error.to_string()}),
            omitted_rows: 0,
        }
    }
}

/// Malformed or unsupported intents are the client's shape problem,
/// compiler-level field and operator failures are the client's data
/// problem, everything downstream of compilation is ours.
pub fn status_for(error: &CoreError) -> u16 {
    match error {
        CoreError::MalformedRequest(_)
        | CoreError::UnsupportedOperation(_)
        | CoreError::UnconfirmedUnconditionalDelete => 400,

        CoreError::UnknownField { .. }
        | CoreError::UnsupportedCondition { .. }
        | CoreError::EmptyInsertSet => 422,

        CoreError::ExecutionError(_) | CoreError::DecodeError { .. } => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_taxonomy() {
        assert_eq!(400, status_for(&CoreError::MalformedRequest("x".into())));
        assert_eq!(400, status_for(&CoreError::UnsupportedOperation("x".into())));
        assert_eq!(400, status_for(&CoreError::UnconfirmedUnconditionalDelete));
        assert_eq!(
            422,
            status_for(&CoreError::UnknownField {
                collection: "t".into(),
                field: "f".into(),
            })
        );
        assert_eq!(
            422,
            status_for(&CoreError::UnsupportedCondition {
                field: "f".into(),
                operator: "$regex".into(),
            })
        );
        assert_eq!(422, status_for(&CoreError::EmptyInsertSet));
        assert_eq!(
            500,
            status_for(&CoreError::DecodeError {
                column: "c".into(),
                message: "m".into(),
            })
        );
    }

    #[test]
    fn error_bodies_carry_kind_and_message() {
        let rendered = HandlerResponse::error(&CoreError::EmptyInsertSet);

        assert_eq!(422, rendered.status);
        assert_eq!(
            json!({"error": "EmptyInsertSet", "message": "Insert requires at least one document"}),
            rendered.body
        );
    }

    #[test]
    fn insert_acknowledgment_omits_empty_error_lists() {
        let rendered = HandlerResponse::ok(QueryResponse::Inserted {
            inserted: 2,
            failed: 0,
            errors: Vec::new(),
        });

        assert_eq!(json!({"inserted": 2, "failed": 0}), rendered.body);
    }
}
