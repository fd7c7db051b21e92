use crate::ast::{Column, Compare, ConditionTree, Value};

/// A database expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression<'a> {
    /// A tree of expressions to evaluate from the deepest value up
    ConditionTree(ConditionTree<'a>),
    /// A comparison expression
    Compare(Compare<'a>),
    /// A column reference
    Column(Column<'a>),
    /// A value bound as a positional parameter
    Parameterized(Value<'a>),
}

impl<'a> From<Value<'a>> for Expression<'a> {
    fn from(value: Value<'a>) -> Self {
        Expression::Parameterized(value)
    }
}
