use crate::error::CoreError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z_][A-Za-z0-9_]*$").expect("compiling the identifier regex"));

/// Checks that a name is usable in identifier position of a statement.
/// Identifiers render into statement text unescaped, so nothing else is
/// allowed through.
pub fn validate_identifier(name: &str) -> crate::Result<()> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(CoreError::MalformedRequest(format!(
            "`{name}` is not a valid identifier"
        )))
    }
}

/// A dotted-segment address into a possibly nested document, e.g.
/// `items.details.detail_name`. Every segment is an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> crate::Result<Self> {
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();

        for segment in &segments {
            if !IDENTIFIER.is_match(segment) {
                return Err(CoreError::MalformedRequest(format!(
                    "`{raw}` is not a valid field path: segment `{segment}` is not an identifier"
                )));
            }
        }

        Ok(FieldPath { segments })
    }

    /// The leading segment, naming a column on the target relation.
    pub fn head(&self) -> &str {
        &self.segments[0]
    }

    /// The segments after the leading one.
    pub fn tail(&self) -> &[String] {
        &self.segments[1..]
    }

    /// `true` when the path addresses into a nested container.
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_and_nested_paths() {
        let flat = FieldPath::parse("name").unwrap();
        assert_eq!("name", flat.head());
        assert!(!flat.is_nested());

        let nested = FieldPath::parse("items.details.detail_name").unwrap();
        assert_eq!("items", nested.head());
        assert_eq!(&["details".to_string(), "detail_name".to_string()], nested.tail());
        assert!(nested.is_nested());
        assert_eq!("items.details.detail_name", nested.to_string());
    }

    #[test]
    fn rejects_non_identifier_segments() {
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("a..b").is_err());
        assert!(FieldPath::parse("items.1.details").is_err());
        assert!(FieldPath::parse("na me").is_err());
        assert!(FieldPath::parse("name; DROP TABLE users").is_err());
    }

    #[test]
    fn validates_identifiers() {
        assert!(validate_identifier("testing").is_ok());
        assert!(validate_identifier("_private").is_ok());
        assert!(validate_identifier("1starts_with_digit").is_err());
        assert!(validate_identifier("robert'); DROP TABLE students;--").is_err());
    }
}
