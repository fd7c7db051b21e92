//! Rendering an AST into statement text and a parameter list.
mod postgres;

pub use postgres::Postgres;

use crate::ast::*;

/// A `Visitor` walks a query AST, producing the statement text and the
/// values to bind, collected in render order. The text contains only
/// placeholders where values appear; rendering a value into the text is not
/// expressible through this interface.
pub trait Visitor<'a> {
    /// Convert the query into a statement string and its parameters.
    fn build<Q>(query: Q) -> (String, Vec<Value<'a>>)
    where
        Q: Into<Query<'a>>;

    /// Register a parameter for the placeholder rendered last.
    fn add_parameter(&mut self, value: Value<'a>);

    /// The placeholder for the parameter registered last.
    fn parameter_substitution(&mut self) -> String;

    fn visit_parameterized(&mut self, value: Value<'a>) -> String {
        self.add_parameter(value);
        self.parameter_substitution()
    }

    fn visit_query(&mut self, query: Query<'a>) -> String {
        match query {
            Query::Select(select) => self.visit_select(select),
            Query::Insert(insert) => self.visit_insert(insert),
            Query::Delete(delete) => self.visit_delete(delete),
        }
    }

    fn visit_select(&mut self, select: Select<'a>) -> String {
        let mut result = vec![String::from("SELECT")];

        if select.columns.is_empty() {
            result.push(String::from("*"));
        } else {
            let columns: Vec<String> = select
                .columns
                .into_iter()
                .map(|c| self.visit_column(c))
                .collect();

            result.push(columns.join(", "));
        }

        result.push(format!("FROM {}", self.visit_table(select.table)));

        if let Some(conditions) = select.conditions {
            result.push(format!("WHERE {}", self.visit_conditions(conditions)));
        }

        result.join(" ")
    }

    fn visit_insert(&mut self, insert: Insert<'a>) -> String {
        let mut result = vec![format!("INSERT INTO {}", self.visit_table(insert.table))];

        if insert.columns.is_empty() {
            result.push(String::from("DEFAULT VALUES"));
        } else {
            let columns: Vec<String> = insert
                .columns
                .into_iter()
                .map(|c| self.visit_column(c))
                .collect();

            let rows: Vec<String> = insert.values.into_iter().map(|row| self.visit_row(row)).collect();

            result.push(format!("({}) VALUES {}", columns.join(", "), rows.join(", ")));
        }

        result.join(" ")
    }

    fn visit_delete(&mut self, delete: Delete<'a>) -> String {
        let mut result = vec![format!("DELETE FROM {}", self.visit_table(delete.table))];

        if let Some(conditions) = delete.conditions {
            result.push(format!("WHERE {}", self.visit_conditions(conditions)));
        }

        result.join(" ")
    }

    fn visit_row(&mut self, row: Row<'a>) -> String {
        let values: Vec<String> = row
            .values
            .into_iter()
            .map(|value| self.visit_parameterized(value))
            .collect();

        format!("({})", values.join(", "))
    }

    fn visit_conditions(&mut self, tree: ConditionTree<'a>) -> String {
        match tree {
            ConditionTree::And(left, right) => format!(
                "({} AND {})",
                self.visit_expression(*left),
                self.visit_expression(*right),
            ),
            ConditionTree::Or(left, right) => format!(
                "({} OR {})",
                self.visit_expression(*left),
                self.visit_expression(*right),
            ),
            ConditionTree::Single(expression) => self.visit_expression(*expression),
            ConditionTree::NoCondition => String::from("1=1"),
        }
    }

    fn visit_expression(&mut self, expression: Expression<'a>) -> String {
        match expression {
            Expression::ConditionTree(tree) => self.visit_conditions(tree),
            Expression::Compare(compare) => self.visit_compare(compare),
            Expression::Column(column) => self.visit_column(column),
            Expression::Parameterized(value) => self.visit_parameterized(value),
        }
    }

    fn visit_compare(&mut self, compare: Compare<'a>) -> String {
        match compare {
            Compare::Equals(left, right) => format!(
                "{} = {}",
                self.visit_expression(*left),
                self.visit_expression(*right),
            ),
            Compare::NotEquals(left, right) => format!(
                "{} <> {}",
                self.visit_expression(*left),
                self.visit_expression(*right),
            ),
            Compare::LessThan(left, right) => format!(
                "{} < {}",
                self.visit_expression(*left),
                self.visit_expression(*right),
            ),
            Compare::LessThanOrEquals(left, right) => format!(
                "{} <= {}",
                self.visit_expression(*left),
                self.visit_expression(*right),
            ),
            Compare::GreaterThan(left, right) => format!(
                "{} > {}",
                self.visit_expression(*left),
                self.visit_expression(*right),
            ),
            Compare::GreaterThanOrEquals(left, right) => format!(
                "{} >= {}",
                self.visit_expression(*left),
                self.visit_expression(*right),
            ),
            Compare::In(left, values) => {
                // An empty selection can never match.
                if values.is_empty() {
                    return String::from("1=0");
                }

                let left = self.visit_expression(*left);
                let params: Vec<String> = values
                    .into_iter()
                    .map(|value| self.visit_parameterized(value))
                    .collect();

                format!("{} IN ({})", left, params.join(", "))
            }
            Compare::Null(expression) => format!("{} IS NULL", self.visit_expression(*expression)),
            Compare::NotNull(expression) => {
                format!("{} IS NOT NULL", self.visit_expression(*expression))
            }
            Compare::JsonContains(left, right) => format!(
                "{} @> {}",
                self.visit_expression(*left),
                self.visit_expression(*right),
            ),
        }
    }

    fn visit_table(&mut self, table: Table<'a>) -> String {
        table.name.into_owned()
    }

    fn visit_column(&mut self, column: Column<'a>) -> String {
        column.name.into_owned()
    }
}
