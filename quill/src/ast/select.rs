use crate::ast::{Column, ConditionTree, Query, Table};

/// A builder for a `SELECT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Select<'a> {
    pub(crate) table: Table<'a>,
    pub(crate) columns: Vec<Column<'a>>,
    pub(crate) conditions: Option<ConditionTree<'a>>,
}

impl<'a> Select<'a> {
    /// Creates a new `SELECT` statement from the given table. With no
    /// explicit column selection the statement selects `*`.
    ///
    /// ```
    /// # use quill::{ast::*, visitor::{Visitor, Postgres}};
    /// let query = Select::from_table("users");
    /// let (sql, _) = Postgres::build(query);
    ///
    /// assert_eq!("SELECT * FROM users", sql);
    /// ```
    pub fn from_table<T>(table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        Select {
            table: table.into(),
            columns: Vec::new(),
            conditions: None,
        }
    }

    /// Adds a column to be selected.
    pub fn column<C>(mut self, column: C) -> Self
    where
        C: Into<Column<'a>>,
    {
        self.columns.push(column.into());
        self
    }

    /// Adds `WHERE` conditions to the query. See
    /// [Comparable](trait.Comparable.html) for the predicate builders.
    ///
    /// ```
    /// # use quill::{ast::*, visitor::{Visitor, Postgres}};
    /// let query = Select::from_table("users").so_that(Column::from("name").equals("Naukio"));
    /// let (sql, params) = Postgres::build(query);
    ///
    /// assert_eq!("SELECT * FROM users WHERE name = $1", sql);
    /// assert_eq!(vec![Value::text("Naukio")], params);
    /// ```
    pub fn so_that<T>(mut self, conditions: T) -> Self
    where
        T: Into<ConditionTree<'a>>,
    {
        self.conditions = Some(conditions.into());
        self
    }
}

impl<'a> From<Select<'a>> for Query<'a> {
    fn from(select: Select<'a>) -> Self {
        Query::Select(select)
    }
}
