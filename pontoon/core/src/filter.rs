use crate::error::CoreError;
use crate::field_path::FieldPath;
use crate::schema::{CollectionSchema, ColumnKind};
use quill::ast::{Column, Comparable, Compare, ConditionTree, Value};
use serde_json::{Map, Value as JsonValue};

/// A single field's match condition: literal equality, or one of the
/// supported comparison operator tags.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchCondition {
    Equals(Value<'static>),
    NotEquals(Value<'static>),
    LessThan(Value<'static>),
    LessThanOrEquals(Value<'static>),
    GreaterThan(Value<'static>),
    GreaterThanOrEquals(Value<'static>),
    In(Vec<Value<'static>>),
}

impl MatchCondition {
    /// The operator tag this condition was written with.
    pub fn operator(&self) -> &'static str {
        match self {
            Self::Equals(_) => "$eq",
            Self::NotEquals(_) => "$ne",
            Self::LessThan(_) => "$lt",
            Self::LessThanOrEquals(_) => "$lte",
            Self::GreaterThan(_) => "$gt",
            Self::GreaterThanOrEquals(_) => "$gte",
            Self::In(_) => "$in",
        }
    }
}

/// An ordered sequence of field path / match condition pairs, combined
/// under `AND`. Pair order is compilation order, which is also parameter
/// order in the rendered statement. An empty filter matches all rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pairs: Vec<(FieldPath, MatchCondition)>,
}

impl Filter {
    /// Decode the wire form of a filter. Scalar values mean equality; an
    /// object whose keys start with `$` is a set of operator conditions on
    /// the field; any other object is literal document equality.
    pub fn from_json(map: Map<String, JsonValue>) -> crate::Result<Self> {
        let mut filter = Filter::default();

        for (raw_path, condition) in map {
            let path = FieldPath::parse(&raw_path)?;

            match condition {
                JsonValue::Object(object) if is_operator_object(&object) => {
                    for (operator, operand) in object {
                        filter
                            .pairs
                            .push((path.clone(), parse_operator(&path, &operator, operand)?));
                    }
                }
                other => {
                    let value = convert_value(&path, other)?;
                    filter.pairs.push((path, MatchCondition::Equals(value)));
                }
            }
        }

        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn push(&mut self, path: FieldPath, condition: MatchCondition) {
        self.pairs.push((path, condition));
    }

    /// Compile the filter into a predicate tree against the collection's
    /// declared columns. One comparison leaf per pair, left-folded under
    /// `AND` in pair order.
    pub fn compile(
        &self,
        collection: &str,
        schema: &CollectionSchema,
    ) -> crate::Result<ConditionTree<'static>> {
        let mut tree = ConditionTree::NoCondition;

        for (path, condition) in &self.pairs {
            let leaf = compile_leaf(collection, schema, path, condition)?;

            tree = match tree {
                ConditionTree::NoCondition => ConditionTree::single(leaf),
                combined => ConditionTree::and(combined, leaf),
            };
        }

        Ok(tree)
    }
}

fn is_operator_object(object: &Map<String, JsonValue>) -> bool {
    object.keys().next().map(|key| key.starts_with('$')).unwrap_or(false)
}

fn parse_operator(path: &FieldPath, operator: &str, operand: JsonValue) -> crate::Result<MatchCondition> {
    let condition = match operator {
        "$eq" => MatchCondition::Equals(convert_value(path, operand)?),
        "$ne" => MatchCondition::NotEquals(convert_value(path, operand)?),
        "$lt" => MatchCondition::LessThan(convert_value(path, operand)?),
        "$lte" => MatchCondition::LessThanOrEquals(convert_value(path, operand)?),
        "$gt" => MatchCondition::GreaterThan(convert_value(path, operand)?),
        "$gte" => MatchCondition::GreaterThanOrEquals(convert_value(path, operand)?),
        "$in" => match operand {
            JsonValue::Array(values) => MatchCondition::In(
                values
                    .into_iter()
                    .map(|value| convert_value(path, value))
                    .collect::<crate::Result<Vec<_>>>()?,
            ),
            _ => {
                return Err(CoreError::MalformedRequest(format!(
                    "`$in` on field `{path}` takes an array"
                )))
            }
        },
        unsupported => {
            return Err(CoreError::UnsupportedCondition {
                field: path.to_string(),
                operator: unsupported.to_string(),
            })
        }
    };

    Ok(condition)
}

fn convert_value(path: &FieldPath, json: JsonValue) -> crate::Result<Value<'static>> {
    Value::try_from(json).map_err(|e| CoreError::MalformedRequest(format!("field `{path}`: {e}")))
}

fn unknown_field(collection: &str, path: &FieldPath) -> CoreError {
    CoreError::UnknownField {
        collection: collection.to_string(),
        field: path.to_string(),
    }
}

fn compile_leaf(
    collection: &str,
    schema: &CollectionSchema,
    path: &FieldPath,
    condition: &MatchCondition,
) -> crate::Result<Compare<'static>> {
    let kind = schema
        .resolve(path.head())
        .ok_or_else(|| unknown_field(collection, path))?;
    let column = Column::from(path.head().to_string());

    match kind {
        // The relation has no dotted-key addressing on scalar columns.
        ColumnKind::Scalar if path.is_nested() => Err(unknown_field(collection, path)),

        ColumnKind::Scalar => Ok(match condition.clone() {
            MatchCondition::Equals(Value::Null) => column.is_null(),
            MatchCondition::NotEquals(Value::Null) => column.is_not_null(),
            MatchCondition::Equals(value) => column.equals(value),
            MatchCondition::NotEquals(value) => column.not_equals(value),
            MatchCondition::LessThan(value) => column.less_than(value),
            MatchCondition::LessThanOrEquals(value) => column.less_than_or_equals(value),
            MatchCondition::GreaterThan(value) => column.greater_than(value),
            MatchCondition::GreaterThanOrEquals(value) => column.greater_than_or_equals(value),
            MatchCondition::In(values) => column.in_selection(values),
        }),

        // A container column compares under the canonical encoding: whole
        // value equality for the column itself, containment for a path
        // reaching into it. The containment parameter is the condition
        // value wrapped into single-key documents along the remaining
        // segments.
        ColumnKind::Container => match condition {
            MatchCondition::Equals(value) if path.is_nested() => {
                Ok(column.json_contains(wrap_segments(path.tail(), value.clone())))
            }
            MatchCondition::Equals(value) => Ok(column.equals(value.clone())),
            other => Err(CoreError::UnsupportedCondition {
                field: path.to_string(),
                operator: other.operator().to_string(),
            }),
        },
    }
}

fn wrap_segments(segments: &[String], value: Value<'static>) -> Value<'static> {
    segments
        .iter()
        .rev()
        .fold(value, |wrapped, segment| {
            Value::Document(vec![(segment.clone(), wrapped)])
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaRegistry;
    use quill::ast::Select;
    use quill::visitor::{Postgres, Visitor};
    use serde_json::json;

    fn schema() -> CollectionSchema {
        CollectionSchema {
            columns: vec!["name".to_string(), "age".to_string()],
            containers: vec!["items".to_string()],
        }
    }

    fn filter(json: JsonValue) -> Filter {
        match json {
            JsonValue::Object(map) => Filter::from_json(map).unwrap(),
            other => panic!("expected an object, got {other:?}"),
        }
    }

    fn build(tree: ConditionTree<'static>) -> (String, Vec<Value<'static>>) {
        Postgres::build(Select::from_table("testing").so_that(tree))
    }

    #[test]
    fn empty_filter_compiles_to_no_condition() {
        let compiled = filter(json!({})).compile("testing", &schema()).unwrap();
        assert!(compiled.is_empty());
    }

    #[test]
    fn one_leaf_and_one_parameter_per_pair() {
        let compiled = filter(json!({"name": "Daria", "age": 30}))
            .compile("testing", &schema())
            .unwrap();
        let (sql, params) = build(compiled);

        assert_eq!("SELECT * FROM testing WHERE (name = $1 AND age = $2)", sql);
        assert_eq!(vec![Value::text("Daria"), Value::integer(30)], params);
    }

    #[test]
    fn parameter_order_follows_filter_order() {
        let compiled = filter(json!({"age": 30, "name": "Daria"}))
            .compile("testing", &schema())
            .unwrap();
        let (_, params) = build(compiled);

        assert_eq!(vec![Value::integer(30), Value::text("Daria")], params);
    }

    #[test]
    fn operator_conditions_compile_to_comparisons() {
        let compiled = filter(json!({"age": {"$gt": 18, "$lte": 65}}))
            .compile("testing", &schema())
            .unwrap();
        let (sql, params) = build(compiled);

        assert_eq!("SELECT * FROM testing WHERE (age > $1 AND age <= $2)", sql);
        assert_eq!(vec![Value::integer(18), Value::integer(65)], params);
    }

    #[test]
    fn in_condition_takes_an_array() {
        let compiled = filter(json!({"name": {"$in": ["Daria", "Helen"]}}))
            .compile("testing", &schema())
            .unwrap();
        let (sql, params) = build(compiled);

        assert_eq!("SELECT * FROM testing WHERE name IN ($1, $2)", sql);
        assert_eq!(vec![Value::text("Daria"), Value::text("Helen")], params);

        let error = Filter::from_json(match json!({"name": {"$in": "Daria"}}) {
            JsonValue::Object(map) => map,
            _ => unreachable!(),
        })
        .unwrap_err();
        assert!(matches!(error, CoreError::MalformedRequest(_)));
    }

    #[test]
    fn null_equality_becomes_is_null() {
        let compiled = filter(json!({"name": null})).compile("testing", &schema()).unwrap();
        let (sql, params) = build(compiled);

        assert_eq!("SELECT * FROM testing WHERE name IS NULL", sql);
        assert!(params.is_empty());
    }

    #[test]
    fn nested_path_compiles_to_containment() {
        let compiled = filter(json!({"items.details.detail_name": "color"}))
            .compile("testing", &schema())
            .unwrap();
        let (sql, params) = build(compiled);

        assert_eq!("SELECT * FROM testing WHERE items @> $1", sql);
        assert_eq!(
            vec![Value::document(vec![(
                "details",
                Value::document(vec![("detail_name", Value::text("color"))]),
            )])],
            params
        );
    }

    #[test]
    fn container_column_equality_stays_whole_value() {
        let compiled = filter(json!({"items": {"qty": 2}}))
            .compile("testing", &schema())
            .unwrap();
        let (sql, params) = build(compiled);

        assert_eq!("SELECT * FROM testing WHERE items = $1", sql);
        assert_eq!(vec![Value::document(vec![("qty", Value::integer(2))])], params);
    }

    #[test]
    fn unknown_leading_segment_fails() {
        let error = filter(json!({"missing": 1}))
            .compile("testing", &schema())
            .unwrap_err();

        assert!(matches!(error, CoreError::UnknownField { .. }));

        let error = filter(json!({"name.nested": 1}))
            .compile("testing", &schema())
            .unwrap_err();

        assert!(matches!(error, CoreError::UnknownField { .. }));
    }

    #[test]
    fn filters_never_compile_against_undeclared_collections() {
        let registry = SchemaRegistry::default();
        let error = filter(json!({"name": "Daria"}))
            .compile("absent", registry.get("absent"))
            .unwrap_err();

        assert!(matches!(error, CoreError::UnknownField { .. }));
    }

    #[test]
    fn unsupported_operators_fail() {
        let error = Filter::from_json(match json!({"name": {"$regex": "^Da"}}) {
            JsonValue::Object(map) => map,
            _ => unreachable!(),
        })
        .unwrap_err();

        assert!(matches!(
            error,
            CoreError::UnsupportedCondition { ref operator, .. } if operator == "$regex"
        ));
    }

    #[test]
    fn ordering_operators_on_nested_paths_fail() {
        let error = filter(json!({"items.qty": {"$gt": 2}}))
            .compile("testing", &schema())
            .unwrap_err();

        assert!(matches!(error, CoreError::UnsupportedCondition { .. }));
    }
}
