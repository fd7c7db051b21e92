use crate::field_path::validate_identifier;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declared shape of one collection's backing relation: the scalar columns
/// plus the container columns that hold nested documents under the
/// canonical encoding. Schema is injected configuration; it is never
/// inferred from the documents that happen to arrive.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionSchema {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub containers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Scalar,
    Container,
}

impl CollectionSchema {
    /// Resolves a leading path segment to the kind of column backing it.
    pub fn resolve(&self, segment: &str) -> Option<ColumnKind> {
        if self.containers.iter().any(|c| c == segment) {
            Some(ColumnKind::Container)
        } else if self.columns.iter().any(|c| c == segment) {
            Some(ColumnKind::Scalar)
        } else {
            None
        }
    }
}

/// Per-collection schema descriptors. Collections that were never declared
/// resolve to an empty schema: filters against them cannot compile, while
/// unfiltered operations pass through and let the database be the
/// authority.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchemaRegistry {
    #[serde(default)]
    collections: IndexMap<String, CollectionSchema>,
}

static EMPTY: CollectionSchema = CollectionSchema {
    columns: Vec::new(),
    containers: Vec::new(),
};

impl SchemaRegistry {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn get(&self, collection: &str) -> &CollectionSchema {
        self.collections.get(collection).unwrap_or(&EMPTY)
    }

    pub fn insert(&mut self, collection: impl Into<String>, schema: CollectionSchema) {
        self.collections.insert(collection.into(), schema);
    }

    /// Every declared name must hold up in identifier position.
    pub fn validate(&self) -> Result<(), String> {
        for (collection, schema) in &self.collections {
            validate_identifier(collection)
                .map_err(|_| format!("`{collection}` is not a valid collection name"))?;

            for column in schema.columns.iter().chain(schema.containers.iter()) {
                validate_identifier(column).map_err(|_| {
                    format!("`{column}` is not a valid column name on collection `{collection}`")
                })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::from_json(indoc! {r#"
            {
                "collections": {
                    "testing": {
                        "columns": ["name", "age"],
                        "containers": ["items"]
                    }
                }
            }
        "#})
        .unwrap()
    }

    #[test]
    fn resolves_declared_columns() {
        let registry = registry();
        let schema = registry.get("testing");

        assert_eq!(Some(ColumnKind::Scalar), schema.resolve("name"));
        assert_eq!(Some(ColumnKind::Container), schema.resolve("items"));
        assert_eq!(None, schema.resolve("missing"));
    }

    #[test]
    fn undeclared_collections_resolve_nothing() {
        let registry = registry();
        assert_eq!(None, registry.get("absent").resolve("name"));
    }

    #[test]
    fn validation_rejects_bad_names() {
        let mut registry = SchemaRegistry::default();
        registry.insert(
            "users",
            CollectionSchema {
                columns: vec!["name; --".to_string()],
                containers: vec![],
            },
        );

        assert!(registry.validate().is_err());
    }
}
