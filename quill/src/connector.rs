//! Connecting to a database and executing statements against it.
mod postgres;
mod queryable;
mod result_set;

pub use postgres::PostgreSql;
pub use queryable::{GetRow, Queryable, ToColumnNames};
pub use result_set::{ResultRow, ResultSet};
