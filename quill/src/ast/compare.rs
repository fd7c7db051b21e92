use crate::ast::{Column, ConditionTree, Expression, Value};

/// A comparison between two expressions. Values on the right-hand side are
/// always bound as parameters, never rendered into the statement text.
#[derive(Debug, Clone, PartialEq)]
pub enum Compare<'a> {
    Equals(Box<Expression<'a>>, Box<Expression<'a>>),
    NotEquals(Box<Expression<'a>>, Box<Expression<'a>>),
    LessThan(Box<Expression<'a>>, Box<Expression<'a>>),
    LessThanOrEquals(Box<Expression<'a>>, Box<Expression<'a>>),
    GreaterThan(Box<Expression<'a>>, Box<Expression<'a>>),
    GreaterThanOrEquals(Box<Expression<'a>>, Box<Expression<'a>>),

    In(Box<Expression<'a>>, Vec<Value<'a>>),

    Null(Box<Expression<'a>>),
    NotNull(Box<Expression<'a>>),

    /// jsonb containment, `left @> right`.
    JsonContains(Box<Expression<'a>>, Box<Expression<'a>>),
}

impl<'a> From<Compare<'a>> for ConditionTree<'a> {
    fn from(compare: Compare<'a>) -> Self {
        ConditionTree::single(Expression::Compare(compare))
    }
}

impl<'a> From<Compare<'a>> for Expression<'a> {
    fn from(compare: Compare<'a>) -> Self {
        Expression::Compare(compare)
    }
}

/// Comparison builders for anything that can stand on the left-hand side of
/// a predicate.
pub trait Comparable<'a> {
    /// Tests if both sides are the same value.
    fn equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>;

    /// Tests if both sides are not the same value.
    fn not_equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>;

    /// Tests if the left side is smaller than the right side.
    fn less_than<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>;

    /// Tests if the left side is smaller than the right side or the same.
    fn less_than_or_equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>;

    /// Tests if the left side is bigger than the right side.
    fn greater_than<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>;

    /// Tests if the left side is bigger than the right side or the same.
    fn greater_than_or_equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>;

    /// Tests if the left side is included in the right side collection.
    fn in_selection<T>(self, selection: Vec<T>) -> Compare<'a>
    where
        T: Into<Value<'a>>;

    /// Tests if the left side is `NULL`.
    fn is_null(self) -> Compare<'a>;

    /// Tests if the left side is not `NULL`.
    fn is_not_null(self) -> Compare<'a>;

    /// Tests if the left side contains the right side under jsonb
    /// containment rules.
    fn json_contains<T>(self, contained: T) -> Compare<'a>
    where
        T: Into<Value<'a>>;
}

impl<'a> Comparable<'a> for Expression<'a> {
    fn equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Compare::Equals(Box::new(self), Box::new(comparison.into().into()))
    }

    fn not_equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Compare::NotEquals(Box::new(self), Box::new(comparison.into().into()))
    }

    fn less_than<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Compare::LessThan(Box::new(self), Box::new(comparison.into().into()))
    }

    fn less_than_or_equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Compare::LessThanOrEquals(Box::new(self), Box::new(comparison.into().into()))
    }

    fn greater_than<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Compare::GreaterThan(Box::new(self), Box::new(comparison.into().into()))
    }

    fn greater_than_or_equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Compare::GreaterThanOrEquals(Box::new(self), Box::new(comparison.into().into()))
    }

    fn in_selection<T>(self, selection: Vec<T>) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Compare::In(Box::new(self), selection.into_iter().map(|v| v.into()).collect())
    }

    fn is_null(self) -> Compare<'a> {
        Compare::Null(Box::new(self))
    }

    fn is_not_null(self) -> Compare<'a> {
        Compare::NotNull(Box::new(self))
    }

    fn json_contains<T>(self, contained: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Compare::JsonContains(Box::new(self), Box::new(contained.into().into()))
    }
}

impl<'a> Comparable<'a> for Column<'a> {
    fn equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Expression::from(self).equals(comparison)
    }

    fn not_equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Expression::from(self).not_equals(comparison)
    }

    fn less_than<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Expression::from(self).less_than(comparison)
    }

    fn less_than_or_equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Expression::from(self).less_than_or_equals(comparison)
    }

    fn greater_than<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Expression::from(self).greater_than(comparison)
    }

    fn greater_than_or_equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Expression::from(self).greater_than_or_equals(comparison)
    }

    fn in_selection<T>(self, selection: Vec<T>) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Expression::from(self).in_selection(selection)
    }

    fn is_null(self) -> Compare<'a> {
        Expression::from(self).is_null()
    }

    fn is_not_null(self) -> Compare<'a> {
        Expression::from(self).is_not_null()
    }

    fn json_contains<T>(self, contained: T) -> Compare<'a>
    where
        T: Into<Value<'a>>,
    {
        Expression::from(self).json_contains(contained)
    }
}
