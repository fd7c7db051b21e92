use crate::compiler::{self, Statement};
use crate::decoder;
use crate::document::Document;
use crate::error::CoreError;
use crate::filter::Filter;
use crate::intent::QueryIntent;
use crate::response::QueryResponse;
use crate::schema::SchemaRegistry;
use quill::ast::Params;
use quill::connector::{Queryable, ResultSet};
use tracing::{debug, warn};

/// Dispatches a query intent through filter compilation, statement
/// compilation and execution. Stateless per request; one statement
/// execution per logical request, with the single exception of a batched
/// insert decomposed after a constraint failure.
pub struct QueryRouter<'a> {
    schema: &'a SchemaRegistry,
    executor: &'a dyn Queryable,
}

impl<'a> QueryRouter<'a> {
    pub fn new(schema: &'a SchemaRegistry, executor: &'a dyn Queryable) -> Self {
        Self { schema, executor }
    }

    pub async fn route(&self, intent: QueryIntent) -> crate::Result<QueryResponse> {
        match intent {
            QueryIntent::Find { collection, filter } => self.find(&collection, &filter).await,
            QueryIntent::Insert {
                collection,
                documents,
            } => self.insert(&collection, &documents).await,
            QueryIntent::Delete {
                collection,
                filter,
                confirm_unconditional,
            } => self.delete(&collection, &filter, confirm_unconditional).await,
        }
    }

    async fn find(&self, collection: &str, filter: &Filter) -> crate::Result<QueryResponse> {
        let tree = filter.compile(collection, self.schema.get(collection))?;
        let statement = compiler::compile_select(collection, tree);

        let result_set = self.query(&statement).await?;
        let decoded = decoder::decode(result_set);

        if decoded.omitted > 0 {
            warn!(
                collection,
                omitted = decoded.omitted,
                "dropped rows that could not be mapped back to documents"
            );
        }

        Ok(QueryResponse::Documents {
            documents: decoded.documents,
            omitted: decoded.omitted,
        })
    }

    async fn insert(&self, collection: &str, documents: &[Document]) -> crate::Result<QueryResponse> {
        let statement = compiler::compile_insert(collection, documents)?;

        match self.execute(&statement).await {
            Ok(_) => Ok(QueryResponse::Inserted {
                inserted: documents.len(),
                failed: 0,
                errors: Vec::new(),
            }),
            // The failed batch applied nothing, so executing the same rows
            // one at a time runs each exactly once and shows which of them
            // the engine rejects.
            Err(e) if e.is_constraint_violation() => {
                if documents.len() == 1 {
                    return Ok(QueryResponse::Inserted {
                        inserted: 0,
                        failed: 1,
                        errors: vec![e.to_string()],
                    });
                }

                warn!(
                    collection,
                    rows = documents.len(),
                    "batched insert hit a constraint, retrying row by row"
                );

                let mut inserted = 0;
                let mut errors = Vec::new();

                for document in documents {
                    let row = compiler::compile_insert(collection, std::slice::from_ref(document))?;

                    match self.execute(&row).await {
                        Ok(_) => inserted += 1,
                        Err(e) if e.is_constraint_violation() => errors.push(e.to_string()),
                        Err(e) => return Err(CoreError::from(e)),
                    }
                }

                Ok(QueryResponse::Inserted {
                    inserted,
                    failed: errors.len(),
                    errors,
                })
            }
            Err(e) => Err(CoreError::from(e)),
        }
    }

    async fn delete(
        &self,
        collection: &str,
        filter: &Filter,
        confirm_unconditional: bool,
    ) -> crate::Result<QueryResponse> {
        let tree = filter.compile(collection, self.schema.get(collection))?;

        // An unguarded full-table delete never reaches statement
        // compilation.
        if tree.is_empty() && !confirm_unconditional {
            return Err(CoreError::UnconfirmedUnconditionalDelete);
        }

        let statement = compiler::compile_delete(collection, tree);
        let deleted = self.execute(&statement).await.map_err(CoreError::from)?;

        Ok(QueryResponse::Deleted { deleted })
    }

    async fn query(&self, statement: &Statement) -> crate::Result<ResultSet> {
        debug!(query = %statement.sql, params = %Params(&statement.params), "executing");

        self.executor
            .query_raw(&statement.sql, &statement.params)
            .await
            .map_err(CoreError::from)
    }

    async fn execute(&self, statement: &Statement) -> quill::Result<u64> {
        debug!(query = %statement.sql, params = %Params(&statement.params), "executing");

        self.executor
            .execute_raw(&statement.sql, &statement.params)
            .await
    }
}
