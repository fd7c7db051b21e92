mod conversion;
mod error;

use crate::ast::{Params, Value};
use crate::connector::{
    queryable::{GetRow, Queryable, ToColumnNames},
    ResultSet,
};
use crate::error::Error;
use async_trait::async_trait;
use postgres_types::ToSql;
use tokio_postgres::{Client, Config, NoTls};
use tracing::debug;

/// A connector interface for the PostgreSQL database.
pub struct PostgreSql {
    client: Client,
}

impl PostgreSql {
    /// Connect with the given configuration. The connection task is spawned
    /// onto the current runtime and lives until the client goes away.
    pub async fn new(config: Config) -> crate::Result<Self> {
        let (client, connection) = config.connect(NoTls).await.map_err(Error::from)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("Database connection error: {e}");
            }
        });

        Ok(Self { client })
    }

    fn conv_params<'a>(params: &'a [Value<'a>]) -> Vec<&'a (dyn ToSql + Sync)> {
        params.iter().map(|value| value as &(dyn ToSql + Sync)).collect()
    }
}

#[async_trait]
impl Queryable for PostgreSql {
    async fn query_raw(&self, sql: &str, params: &[Value<'_>]) -> crate::Result<ResultSet> {
        debug!(query = %sql, params = %Params(params), "executing query");

        let stmt = self.client.prepare(sql).await.map_err(Error::from)?;
        let rows = self
            .client
            .query(&stmt, Self::conv_params(params).as_slice())
            .await
            .map_err(Error::from)?;

        let mut result = ResultSet::new(stmt.to_column_names(), Vec::new());

        for row in rows {
            result.rows.push(row.get_result_row()?);
        }

        Ok(result)
    }

    async fn execute_raw(&self, sql: &str, params: &[Value<'_>]) -> crate::Result<u64> {
        debug!(query = %sql, params = %Params(params), "executing statement");

        let stmt = self.client.prepare(sql).await.map_err(Error::from)?;
        let changes = self
            .client
            .execute(&stmt, Self::conv_params(params).as_slice())
            .await
            .map_err(Error::from)?;

        Ok(changes)
    }

    async fn raw_cmd(&self, cmd: &str) -> crate::Result<()> {
        self.client.simple_query(cmd).await.map_err(Error::from)?;
        Ok(())
    }

    async fn version(&self) -> crate::Result<Option<String>> {
        let result = self.query_raw("SELECT version()", &[]).await?;

        Ok(result.first().and_then(|row| {
            row.get("version")
                .and_then(|version| version.as_str().map(ToString::to_string))
        }))
    }
}
