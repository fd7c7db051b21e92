//! # quill
//!
//! A small abstraction layer for building and executing parameterized SQL
//! against PostgreSQL. Statements are described as an AST, rendered into
//! text with positional placeholders by a [`visitor::Visitor`], and executed
//! through the [`connector::Queryable`] trait. Values never end up in the
//! statement text; they travel in the parameter list and are bound by
//! position.
//!
//! ```
//! use quill::{ast::*, visitor::{Postgres, Visitor}};
//!
//! let query = Select::from_table("users").so_that(Column::from("name").equals("Alice"));
//! let (sql, params) = Postgres::build(query);
//!
//! assert_eq!("SELECT * FROM users WHERE name = $1", sql);
//! assert_eq!(vec![Value::text("Alice")], params);
//! ```

pub mod ast;
pub mod connector;
pub mod error;
pub mod pooled;
pub mod prelude;
pub mod visitor;

pub use error::Error;

pub type Result<T> = std::result::Result<T, error::Error>;
