//! A "prelude" for users of the crate.
pub use crate::ast::*;
pub use crate::connector::{PostgreSql, Queryable, ResultRow, ResultSet};
pub use crate::error::{Error, ErrorKind};
pub use crate::pooled::PooledPostgres;
pub use crate::visitor::{self, Visitor};
