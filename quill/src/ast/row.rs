use crate::ast::Value;

/// A collection of values surrounded by parentheses, one `VALUES` tuple of
/// an `INSERT`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row<'a> {
    pub(crate) values: Vec<Value<'a>>,
}

impl<'a> Row<'a> {
    pub fn new() -> Self {
        Row { values: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Row {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push<T>(mut self, value: T) -> Self
    where
        T: Into<Value<'a>>,
    {
        self.values.push(value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a, T> From<Vec<T>> for Row<'a>
where
    T: Into<Value<'a>>,
{
    fn from(values: Vec<T>) -> Self {
        values.into_iter().fold(Row::new(), |row, v| row.push(v))
    }
}
