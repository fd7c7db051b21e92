use crate::ast::Value;
use std::sync::Arc;

/// A single row of a [`ResultSet`](super::ResultSet), holding its values in
/// column order.
#[derive(Debug)]
pub struct ResultRow {
    pub(crate) columns: Arc<Vec<String>>,
    pub(crate) values: Vec<Value<'static>>,
}

impl ResultRow {
    /// The number of values in the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value of the given column, if the row has it.
    pub fn get(&self, name: &str) -> Option<&Value<'static>> {
        self.columns
            .iter()
            .position(|column| column == name)
            .and_then(|index| self.values.get(index))
    }

    /// The row's values, in column order.
    pub fn into_values(self) -> Vec<Value<'static>> {
        self.values
    }
}

impl IntoIterator for ResultRow {
    type Item = Value<'static>;
    type IntoIter = std::vec::IntoIter<Value<'static>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
