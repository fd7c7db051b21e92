use crate::document::Document;
use crate::error::CoreError;
use itertools::Itertools;
use quill::ast::{ConditionTree, Delete, Insert, Row, Select, Value};
use quill::visitor::{Postgres, Visitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Delete,
}

/// A fully rendered statement: text with positional placeholders plus the
/// values to bind, in placeholder order. Built once per request and never
/// mutated afterwards; values never appear in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub collection: String,
    pub sql: String,
    pub params: Vec<Value<'static>>,
}

/// `SELECT * FROM <collection>`, with a `WHERE` clause only when the
/// predicate constrains something.
pub fn compile_select(collection: &str, tree: ConditionTree<'static>) -> Statement {
    let mut select = Select::from_table(collection.to_string());

    if !tree.is_empty() {
        select = select.so_that(tree);
    }

    let (sql, params) = Postgres::build(select);

    Statement {
        kind: StatementKind::Select,
        collection: collection.to_string(),
        sql,
        params,
    }
}

/// One multi-row `INSERT` for the whole document batch. The column list is
/// the union of keys over all documents in first-seen order; keys absent
/// from a given document bind `NULL` for that row.
pub fn compile_insert(collection: &str, documents: &[Document]) -> crate::Result<Statement> {
    if documents.is_empty() {
        return Err(CoreError::EmptyInsertSet);
    }

    let columns: Vec<&str> = documents.iter().flat_map(Document::keys).unique().collect();

    let mut insert = Insert::multi_into(
        collection.to_string(),
        columns.iter().map(|column| column.to_string()),
    );

    for document in documents {
        let row: Row<'static> = columns
            .iter()
            .map(|column| document.get(column).cloned().unwrap_or(Value::Null))
            .collect::<Vec<_>>()
            .into();

        insert = insert.values(row);
    }

    let (sql, params) = Postgres::build(insert);

    Ok(Statement {
        kind: StatementKind::Insert,
        collection: collection.to_string(),
        sql,
        params,
    })
}

/// `DELETE FROM <collection>`, with a `WHERE` clause only when the
/// predicate constrains something. The guard against unconditional deletes
/// sits in the router, before this is ever called.
pub fn compile_delete(collection: &str, tree: ConditionTree<'static>) -> Statement {
    let mut delete = Delete::from_table(collection.to_string());

    if !tree.is_empty() {
        delete = delete.so_that(tree);
    }

    let (sql, params) = Postgres::build(delete);

    Statement {
        kind: StatementKind::Delete,
        collection: collection.to_string(),
        sql,
        params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(json: serde_json::Value) -> Document {
        match json {
            serde_json::Value::Object(map) => Document::from_json_object(map).unwrap(),
            other => panic!("expected an object, got {other:?}"),
        }
    }

    #[test]
    fn select_without_predicate_has_no_where_clause() {
        let statement = compile_select("testing", ConditionTree::NoCondition);

        assert_eq!("SELECT * FROM testing", statement.sql);
        assert!(statement.params.is_empty());
    }

    #[test]
    fn insert_derives_columns_from_one_document() {
        let statement =
            compile_insert("testing", &[document(json!({"name": "John", "age": "79"}))]).unwrap();

        assert_eq!("INSERT INTO testing (name, age) VALUES ($1, $2)", statement.sql);
        assert_eq!(vec![Value::text("John"), Value::text("79")], statement.params);
    }

    #[test]
    fn insert_takes_the_union_of_heterogeneous_keys() {
        let statement = compile_insert(
            "testing",
            &[
                document(json!({"name": "Rihanna", "worker1": 1})),
                document(json!({"name": "example", "worker5": 1})),
            ],
        )
        .unwrap();

        assert_eq!(
            "INSERT INTO testing (name, worker1, worker5) VALUES ($1, $2, $3), ($4, $5, $6)",
            statement.sql
        );
        assert_eq!(
            vec![
                Value::text("Rihanna"),
                Value::integer(1),
                Value::Null,
                Value::text("example"),
                Value::Null,
                Value::integer(1),
            ],
            statement.params
        );
    }

    #[test]
    fn insert_keeps_nested_values_whole() {
        let statement = compile_insert(
            "testing",
            &[document(json!({"name": "x", "items": {"qty": 2, "tags": ["a", "b"]}}))],
        )
        .unwrap();

        assert_eq!("INSERT INTO testing (name, items) VALUES ($1, $2)", statement.sql);
        assert_eq!(
            vec![
                Value::text("x"),
                Value::document(vec![
                    ("qty", Value::integer(2)),
                    ("tags", Value::array(vec![Value::text("a"), Value::text("b")])),
                ]),
            ],
            statement.params
        );
    }

    #[test]
    fn empty_insert_set_is_rejected() {
        let error = compile_insert("testing", &[]).unwrap_err();
        assert!(matches!(error, CoreError::EmptyInsertSet));
    }

    #[test]
    fn compiling_twice_is_byte_identical() {
        let documents = vec![
            document(json!({"name": "John", "age": "79"})),
            document(json!({"name": "Helen"})),
        ];

        let first = compile_insert("testing", &documents).unwrap();
        let second = compile_insert("testing", &documents).unwrap();

        assert_eq!(first, second);
    }
}
