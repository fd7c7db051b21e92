use std::borrow::Cow;

/// A table reference in a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<'a> {
    pub(crate) name: Cow<'a, str>,
}

impl<'a> Table<'a> {
    pub fn new<N>(name: N) -> Self
    where
        N: Into<Cow<'a, str>>,
    {
        Table { name: name.into() }
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }
}

impl<'a> From<&'a str> for Table<'a> {
    fn from(name: &'a str) -> Self {
        Table::new(name)
    }
}

impl From<String> for Table<'_> {
    fn from(name: String) -> Self {
        Table::new(name)
    }
}
