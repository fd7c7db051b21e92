use crate::error::EngineError;
use crate::opt::PontoonOpt;
use crate::EngineResult;
use pontoon_core::SchemaRegistry;
use quill::connector::Queryable;
use quill::pooled::PooledPostgres;
use std::{fmt, fs};
use tracing::info;

/// Request context containing all immutable state of the process: the
/// collection schema registry and the connection pool. There is one
/// context per process.
pub struct EngineContext {
    pub schema: SchemaRegistry,
    executor: PooledPostgres,
}

impl fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EngineContext { .. }")
    }
}

impl EngineContext {
    pub async fn new(opts: &PontoonOpt) -> EngineResult<EngineContext> {
        let url = url::Url::parse(&opts.database_url)?;

        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(EngineError::Configuration(format!(
                "unsupported database scheme `{}`",
                url.scheme()
            )));
        }

        let schema = load_schema(opts)?;
        let executor = PooledPostgres::new(&opts.database_url, opts.max_connections)?;

        let context = EngineContext { schema, executor };
        context.verify_connection().await?;

        Ok(context)
    }

    pub fn executor(&self) -> &dyn Queryable {
        &self.executor
    }

    async fn verify_connection(&self) -> EngineResult<()> {
        if let Some(version) = self.executor.version().await? {
            info!(version = %version, "connected to the database");
        }

        Ok(())
    }
}

pub fn load_schema(opts: &PontoonOpt) -> EngineResult<SchemaRegistry> {
    let registry = match &opts.schema {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            SchemaRegistry::from_json(&raw)?
        }
        None => SchemaRegistry::default(),
    };

    registry.validate().map_err(EngineError::Configuration)?;

    Ok(registry)
}
