use crate::ast::{ConditionTree, Query, Table};

/// A builder for a `DELETE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete<'a> {
    pub(crate) table: Table<'a>,
    pub(crate) conditions: Option<ConditionTree<'a>>,
}

impl<'a> Delete<'a> {
    /// Creates a new `DELETE` statement for the given table. Without
    /// conditions the statement deletes every row; callers wanting a guard
    /// against that must add it before building.
    pub fn from_table<T>(table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        Delete {
            table: table.into(),
            conditions: None,
        }
    }

    /// Adds `WHERE` conditions to the statement.
    pub fn so_that<T>(mut self, conditions: T) -> Self
    where
        T: Into<ConditionTree<'a>>,
    {
        self.conditions = Some(conditions.into());
        self
    }
}

impl<'a> From<Delete<'a>> for Query<'a> {
    fn from(delete: Delete<'a>) -> Self {
        Query::Delete(delete)
    }
}
