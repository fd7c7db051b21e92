use crate::{HandlerResponse, RequestBody};
use pontoon_core::{QueryResponse, QueryRouter, SchemaRegistry};
use quill::connector::Queryable;
use tracing::debug;

/// Turns raw request bodies into routed, HTTP-ready responses.
pub struct RequestHandler<'a> {
    router: QueryRouter<'a>,
}

impl<'a> RequestHandler<'a> {
    pub fn new(schema: &'a SchemaRegistry, executor: &'a dyn Queryable) -> Self {
        Self {
            router: QueryRouter::new(schema, executor),
        }
    }

    pub async fn handle(&self, body: &[u8]) -> HandlerResponse {
        let routed: pontoon_core::Result<QueryResponse> = async {
            let intent = RequestBody::try_from_slice(body)?.into_intent()?;
            self.router.route(intent).await
        }
        .await;

        match routed {
            Ok(response) => HandlerResponse::ok(response),
            Err(error) => {
                debug!(%error, "request failed");
                HandlerResponse::error(&error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pontoon_core::{CollectionSchema, SchemaRegistry};
    use quill::ast::Value;
    use quill::connector::ResultSet;
    use serde_json::json;

    struct StaticExecutor;

    #[async_trait]
    impl Queryable for StaticExecutor {
        async fn query_raw(&self, _sql: &str, _params: &[Value<'_>]) -> quill::Result<ResultSet> {
            Ok(ResultSet::new(
                vec!["name".to_string()],
                vec![vec![Value::text("Daria")]],
            ))
        }

        async fn execute_raw(&self, _sql: &str, _params: &[Value<'_>]) -> quill::Result<u64> {
            Ok(1)
        }

        async fn raw_cmd(&self, _cmd: &str) -> quill::Result<()> {
            Ok(())
        }

        async fn version(&self) -> quill::Result<Option<String>> {
            Ok(None)
        }
    }

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::default();
        registry.insert(
            "testing",
            CollectionSchema {
                columns: vec!["name".to_string()],
                containers: Vec::new(),
            },
        );
        registry
    }

    #[tokio::test]
    async fn a_find_responds_with_a_bare_document_array() {
        let registry = registry();
        let executor = StaticExecutor;
        let handler = RequestHandler::new(&registry, &executor);

        let response = handler
            .handle(br#"{"find": "testing", "filter": {"name": "Daria"}}"#)
            .await;

        assert_eq!(200, response.status);
        assert_eq!(json!([{"name": "Daria"}]), response.body);
    }

    #[tokio::test]
    async fn compiler_failures_map_to_unprocessable() {
        let registry = registry();
        let executor = StaticExecutor;
        let handler = RequestHandler::new(&registry, &executor);

        let response = handler
            .handle(br#"{"find": "testing", "filter": {"missing": 1}}"#)
            .await;

        assert_eq!(422, response.status);
        assert_eq!(json!("UnknownField"), response.body["error"]);
    }

    #[tokio::test]
    async fn unconditional_deletes_are_refused_up_front() {
        let registry = registry();
        let executor = StaticExecutor;
        let handler = RequestHandler::new(&registry, &executor);

        let response = handler.handle(br#"{"delete": "testing"}"#).await;

        assert_eq!(400, response.status);
        assert_eq!(json!("UnconfirmedUnconditionalDelete"), response.body["error"]);
    }
}
