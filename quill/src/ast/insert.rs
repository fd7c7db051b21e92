use crate::ast::{Column, Query, Row, Table};

/// A builder for an `INSERT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert<'a> {
    pub(crate) table: Table<'a>,
    pub(crate) columns: Vec<Column<'a>>,
    pub(crate) values: Vec<Row<'a>>,
}

/// A builder for an `INSERT` statement for a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleRowInsert<'a> {
    pub(crate) table: Table<'a>,
    pub(crate) columns: Vec<Column<'a>>,
    pub(crate) values: Row<'a>,
}

/// A builder for an `INSERT` statement for multiple rows.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiRowInsert<'a> {
    pub(crate) table: Table<'a>,
    pub(crate) columns: Vec<Column<'a>>,
    pub(crate) values: Vec<Row<'a>>,
}

impl<'a> Insert<'a> {
    /// Creates a new single row `INSERT` statement for the given table.
    pub fn single_into<T>(table: T) -> SingleRowInsert<'a>
    where
        T: Into<Table<'a>>,
    {
        SingleRowInsert {
            table: table.into(),
            columns: Vec::new(),
            values: Row::new(),
        }
    }

    /// Creates a new multi row `INSERT` statement for the given table and
    /// columns.
    pub fn multi_into<T, K, I>(table: T, columns: I) -> MultiRowInsert<'a>
    where
        T: Into<Table<'a>>,
        K: Into<Column<'a>>,
        I: IntoIterator<Item = K>,
    {
        MultiRowInsert {
            table: table.into(),
            columns: columns.into_iter().map(|c| c.into()).collect(),
            values: Vec::new(),
        }
    }
}

impl<'a> SingleRowInsert<'a> {
    /// Adds a new value to the `INSERT` statement
    pub fn value<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<Column<'a>>,
        V: Into<crate::ast::Value<'a>>,
    {
        self.columns.push(key.into());
        self.values = self.values.push(value);
        self
    }
}

impl<'a> MultiRowInsert<'a> {
    /// Adds a new row to be inserted.
    pub fn values<V>(mut self, values: V) -> Self
    where
        V: Into<Row<'a>>,
    {
        self.values.push(values.into());
        self
    }
}

impl<'a> From<SingleRowInsert<'a>> for Insert<'a> {
    fn from(insert: SingleRowInsert<'a>) -> Self {
        Insert {
            table: insert.table,
            columns: insert.columns,
            values: vec![insert.values],
        }
    }
}

impl<'a> From<MultiRowInsert<'a>> for Insert<'a> {
    fn from(insert: MultiRowInsert<'a>) -> Self {
        Insert {
            table: insert.table,
            columns: insert.columns,
            values: insert.values,
        }
    }
}

impl<'a> From<Insert<'a>> for Query<'a> {
    fn from(insert: Insert<'a>) -> Self {
        Query::Insert(insert)
    }
}

impl<'a> From<SingleRowInsert<'a>> for Query<'a> {
    fn from(insert: SingleRowInsert<'a>) -> Self {
        Query::from(Insert::from(insert))
    }
}

impl<'a> From<MultiRowInsert<'a>> for Query<'a> {
    fn from(insert: MultiRowInsert<'a>) -> Self {
        Query::from(Insert::from(insert))
    }
}
