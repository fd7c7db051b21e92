//! Pooling for PostgreSQL connections.
use crate::ast::Value;
use crate::connector::{PostgreSql, Queryable, ResultSet};
use crate::error::{Error, ErrorKind};
use async_trait::async_trait;
use mobc::{Connection, Manager, Pool};
use std::str::FromStr;
use tokio_postgres::Config;

/// Hands out PostgreSQL connections for the pool.
pub struct PostgresManager {
    config: Config,
}

#[async_trait]
impl Manager for PostgresManager {
    type Connection = PostgreSql;
    type Error = Error;

    async fn connect(&self) -> Result<Self::Connection, Self::Error> {
        PostgreSql::new(self.config.clone()).await
    }

    async fn check(&self, conn: Self::Connection) -> Result<Self::Connection, Self::Error> {
        conn.raw_cmd("SELECT 1").await?;
        Ok(conn)
    }
}

/// A pool of PostgreSQL connections.
///
/// A checked out connection is an RAII guard. It returns to the pool when
/// dropped, on every exit path, including a cancelled request future.
pub struct PooledPostgres {
    inner: Pool<PostgresManager>,
}

impl PooledPostgres {
    /// Build a pool from a `postgres://` connection string.
    pub fn new(url: &str, max_open: u64) -> crate::Result<Self> {
        let config = Config::from_str(url)
            .map_err(|e| Error::builder(ErrorKind::DatabaseUrlIsInvalid(e.to_string())).build())?;

        let inner = Pool::builder().max_open(max_open).build(PostgresManager { config });

        Ok(Self { inner })
    }

    /// Check a connection out of the pool, waiting for a free slot when the
    /// pool is exhausted.
    pub async fn check_out(&self) -> crate::Result<Connection<PostgresManager>> {
        self.inner.get().await.map_err(|e| match e {
            mobc::Error::Inner(e) => e,
            mobc::Error::Timeout => {
                Error::builder(ErrorKind::Timeout("checking out a pooled connection".into())).build()
            }
            other => Error::builder(ErrorKind::ConnectionError(format!("{other:?}").into())).build(),
        })
    }
}

#[async_trait]
impl Queryable for PooledPostgres {
    async fn query_raw(&self, sql: &str, params: &[Value<'_>]) -> crate::Result<ResultSet> {
        let conn = self.check_out().await?;
        conn.query_raw(sql, params).await
    }

    async fn execute_raw(&self, sql: &str, params: &[Value<'_>]) -> crate::Result<u64> {
        let conn = self.check_out().await?;
        conn.execute_raw(sql, params).await
    }

    async fn raw_cmd(&self, cmd: &str) -> crate::Result<()> {
        let conn = self.check_out().await?;
        conn.raw_cmd(cmd).await
    }

    async fn version(&self) -> crate::Result<Option<String>> {
        let conn = self.check_out().await?;
        conn.version().await
    }
}
