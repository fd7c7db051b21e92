//! Core translation layer: typed query intents over document collections,
//! compiled into parameterized SQL statements and decoded back into
//! documents.
//!
//! Compilation is fully local and side-effect free; nothing touches the
//! database until the router hands a finished [`compiler::Statement`] to
//! the executor.

pub mod compiler;
pub mod decoder;
pub mod document;
pub mod error;
pub mod field_path;
pub mod filter;
pub mod intent;
pub mod response;
pub mod router;
pub mod schema;

pub use compiler::{Statement, StatementKind};
pub use document::Document;
pub use error::CoreError;
pub use field_path::FieldPath;
pub use filter::{Filter, MatchCondition};
pub use intent::QueryIntent;
pub use response::QueryResponse;
pub use router::QueryRouter;
pub use schema::{CollectionSchema, SchemaRegistry};

pub type Result<T> = std::result::Result<T, CoreError>;
