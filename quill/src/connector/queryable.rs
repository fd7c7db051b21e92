use super::ResultSet;
use crate::ast::Value;
use async_trait::async_trait;

pub trait GetRow {
    fn get_result_row(&self) -> crate::Result<Vec<Value<'static>>>;
}

pub trait ToColumnNames {
    fn to_column_names(&self) -> Vec<String>;
}

/// Represents a connection that can be queried.
///
/// Implementations execute exactly the statement they are given; they never
/// rewrite it, and a failed execution leaves nothing applied unless the
/// statement itself was partially executed by the engine.
#[async_trait]
pub trait Queryable: Send + Sync {
    /// Execute a query given as SQL, interpolating the given parameters,
    /// returning the resulting rows.
    async fn query_raw(&self, sql: &str, params: &[Value<'_>]) -> crate::Result<ResultSet>;

    /// Execute a query given as SQL, interpolating the given parameters and
    /// returning the number of affected rows.
    async fn execute_raw(&self, sql: &str, params: &[Value<'_>]) -> crate::Result<u64>;

    /// Run a command in the database, for queries that can't be run using
    /// prepared statements.
    async fn raw_cmd(&self, cmd: &str) -> crate::Result<()>;

    /// Return the version of the underlying database, queried directly from
    /// the source.
    async fn version(&self) -> crate::Result<Option<String>>;
}
