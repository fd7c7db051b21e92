mod result_row;

pub use result_row::ResultRow;

use crate::ast::Value;
use std::sync::Arc;

/// Encapsulates a set of results and their respective column names, in the
/// order the database returned them.
#[derive(Debug, Default)]
pub struct ResultSet {
    pub(crate) columns: Arc<Vec<String>>,
    pub(crate) rows: Vec<Vec<Value<'static>>>,
}

impl ResultSet {
    /// Creates a new instance, bound to the given column names and result
    /// rows.
    pub fn new(names: Vec<String>, rows: Vec<Vec<Value<'static>>>) -> Self {
        Self {
            columns: Arc::new(names),
            rows,
        }
    }

    /// The column names, in result order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of rows in the `ResultSet`.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the `ResultSet` contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the first row of the `ResultSet`, or None if the set is
    /// empty.
    pub fn first(&self) -> Option<ResultRow> {
        self.get(0)
    }

    /// Returns a row in a given position.
    pub fn get(&self, index: usize) -> Option<ResultRow> {
        self.rows.get(index).map(|row| ResultRow {
            columns: Arc::clone(&self.columns),
            values: row.clone(),
        })
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultRow;
    type IntoIter = ResultSetIterator;

    fn into_iter(self) -> Self::IntoIter {
        ResultSetIterator {
            columns: self.columns,
            internal_iterator: self.rows.into_iter(),
        }
    }
}

/// Thin iterator for ResultSet rows.
pub struct ResultSetIterator {
    pub(crate) columns: Arc<Vec<String>>,
    pub(crate) internal_iterator: std::vec::IntoIter<Vec<Value<'static>>>,
}

impl Iterator for ResultSetIterator {
    type Item = ResultRow;

    fn next(&mut self) -> Option<Self::Item> {
        match self.internal_iterator.next() {
            Some(row) => Some(ResultRow {
                columns: Arc::clone(&self.columns),
                values: row,
            }),
            None => None,
        }
    }
}
