//! An abstract syntax tree for SQL statements.
mod column;
mod compare;
mod conditions;
mod delete;
mod expression;
mod insert;
mod row;
mod select;
mod table;
mod values;

pub use column::Column;
pub use compare::{Comparable, Compare};
pub use conditions::ConditionTree;
pub use delete::Delete;
pub use expression::Expression;
pub use insert::{Insert, MultiRowInsert, SingleRowInsert};
pub use row::Row;
pub use select::Select;
pub use table::Table;
pub use values::{Params, Value};

/// A database query.
#[derive(Debug, Clone, PartialEq)]
pub enum Query<'a> {
    Select(Select<'a>),
    Insert(Insert<'a>),
    Delete(Delete<'a>),
}
