use crate::{ast::*, visitor::Visitor};
use tracing::debug;

/// A visitor to generate queries for the PostgreSQL database.
///
/// The returned parameter values can be bound directly through the
/// connector; placeholders are numbered `$1`, `$2`, ... in parameter order.
pub struct Postgres<'a> {
    parameters: Vec<Value<'a>>,
}

impl<'a> Visitor<'a> for Postgres<'a> {
    fn build<Q>(query: Q) -> (String, Vec<Value<'a>>)
    where
        Q: Into<Query<'a>>,
    {
        let mut postgres = Postgres {
            parameters: Vec::new(),
        };

        let sql = postgres.visit_query(query.into());

        debug!(
            query = %sql,
            params = %Params(postgres.parameters.as_slice()),
            "rendered statement"
        );

        (sql, postgres.parameters)
    }

    fn add_parameter(&mut self, value: Value<'a>) {
        self.parameters.push(value);
    }

    fn parameter_substitution(&mut self) -> String {
        format!("${}", self.parameters.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::{ast::*, visitor::*};

    fn expected_values<T>(sql: &'static str, params: Vec<T>) -> (String, Vec<Value<'static>>)
    where
        T: Into<Value<'static>>,
    {
        (
            String::from(sql),
            params.into_iter().map(|p| p.into()).collect(),
        )
    }

    #[test]
    fn test_select_star_from() {
        let expected_sql = "SELECT * FROM testing";
        let query = Select::from_table("testing");
        let (sql, params) = Postgres::build(query);

        assert_eq!(expected_sql, sql);
        assert!(params.is_empty());
    }

    #[test]
    fn test_select_columns_from() {
        let expected_sql = "SELECT name, age FROM users";
        let query = Select::from_table("users").column("name").column("age");
        let (sql, params) = Postgres::build(query);

        assert_eq!(expected_sql, sql);
        assert!(params.is_empty());
    }

    #[test]
    fn test_select_with_equality() {
        let expected = expected_values("SELECT * FROM testing WHERE name = $1", vec!["Daria"]);
        let query = Select::from_table("testing").so_that(Column::from("name").equals("Daria"));
        let (sql, params) = Postgres::build(query);

        assert_eq!(expected.0, sql);
        assert_eq!(expected.1, params);
    }

    #[test]
    fn test_conditions_nest_under_and() {
        let expected = expected_values(
            "SELECT * FROM users WHERE (name = $1 AND age = $2)",
            vec![Value::text("John"), Value::integer(79)],
        );

        let conditions = ConditionTree::and(
            Column::from("name").equals("John"),
            Column::from("age").equals(79i64),
        );
        let query = Select::from_table("users").so_that(conditions);
        let (sql, params) = Postgres::build(query);

        assert_eq!(expected.0, sql);
        assert_eq!(expected.1, params);
    }

    #[test]
    fn test_or_keeps_parameter_order() {
        let expected = expected_values(
            "SELECT * FROM users WHERE (name = $1 OR name = $2)",
            vec!["Rihanna", "LMFAO"],
        );

        let conditions = ConditionTree::or(
            Column::from("name").equals("Rihanna"),
            Column::from("name").equals("LMFAO"),
        );
        let query = Select::from_table("users").so_that(conditions);
        let (sql, params) = Postgres::build(query);

        assert_eq!(expected.0, sql);
        assert_eq!(expected.1, params);
    }

    #[test]
    fn test_in_selection() {
        let expected = expected_values(
            "SELECT * FROM users WHERE age IN ($1, $2)",
            vec![Value::integer(27), Value::integer(35)],
        );

        let query = Select::from_table("users")
            .so_that(Column::from("age").in_selection(vec![27i64, 35i64]));
        let (sql, params) = Postgres::build(query);

        assert_eq!(expected.0, sql);
        assert_eq!(expected.1, params);
    }

    #[test]
    fn test_empty_in_selection_never_matches() {
        let query = Select::from_table("users")
            .so_that(Column::from("age").in_selection(Vec::<Value<'static>>::new()));
        let (sql, params) = Postgres::build(query);

        assert_eq!("SELECT * FROM users WHERE 1=0", sql);
        assert!(params.is_empty());
    }

    #[test]
    fn test_is_null() {
        let query = Select::from_table("users").so_that(Column::from("deleted_at").is_null());
        let (sql, params) = Postgres::build(query);

        assert_eq!("SELECT * FROM users WHERE deleted_at IS NULL", sql);
        assert!(params.is_empty());
    }

    #[test]
    fn test_json_containment() {
        let contained = Value::document(vec![("details", Value::document(vec![(
            "detail_name",
            Value::text("color"),
        )]))]);

        let query =
            Select::from_table("testing").so_that(Column::from("items").json_contains(contained.clone()));
        let (sql, params) = Postgres::build(query);

        assert_eq!("SELECT * FROM testing WHERE items @> $1", sql);
        assert_eq!(vec![contained], params);
    }

    #[test]
    fn test_single_row_insert() {
        let expected = expected_values(
            "INSERT INTO testing (name, age) VALUES ($1, $2)",
            vec![Value::text("John"), Value::text("79")],
        );

        let query = Insert::single_into("testing").value("name", "John").value("age", "79");
        let (sql, params) = Postgres::build(query);

        assert_eq!(expected.0, sql);
        assert_eq!(expected.1, params);
    }

    #[test]
    fn test_multi_row_insert_numbers_parameters_across_rows() {
        let expected = expected_values(
            "INSERT INTO testing (name) VALUES ($1), ($2)",
            vec!["example", "example2"],
        );

        let query = Insert::multi_into("testing", vec!["name"])
            .values(vec!["example"])
            .values(vec!["example2"]);
        let (sql, params) = Postgres::build(query);

        assert_eq!(expected.0, sql);
        assert_eq!(expected.1, params);
    }

    #[test]
    fn test_delete_with_equality() {
        let expected = expected_values("DELETE FROM testing WHERE name = $1", vec!["Helen"]);
        let query = Delete::from_table("testing").so_that(Column::from("name").equals("Helen"));
        let (sql, params) = Postgres::build(query);

        assert_eq!(expected.0, sql);
        assert_eq!(expected.1, params);
    }

    #[test]
    fn test_delete_without_conditions() {
        let query = Delete::from_table("testing");
        let (sql, params) = Postgres::build(query);

        assert_eq!("DELETE FROM testing", sql);
        assert!(params.is_empty());
    }

    #[test]
    fn test_statement_breaking_text_stays_in_parameters() {
        let expected = expected_values(
            "SELECT * FROM users WHERE name = $1",
            vec!["'; DROP TABLE users; --"],
        );

        let query = Select::from_table("users")
            .so_that(Column::from("name").equals("'; DROP TABLE users; --"));
        let (sql, params) = Postgres::build(query);

        assert_eq!(expected.0, sql);
        assert_eq!(expected.1, params);
    }
}
