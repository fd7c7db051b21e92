use crate::error::{Error, ErrorKind};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde_json::{Map, Number, Value as JsonValue};
use std::{borrow::Cow, fmt, str::FromStr};

/// A value bound into a statement as a positional parameter, or read back
/// from a result column.
///
/// `Array` and `Document` cross the relational boundary through the
/// canonical JSON encoding, applied in the connector's conversion layer:
/// they bind as `jsonb` parameters and `json`/`jsonb` columns decode back
/// into them. `Document` keys keep their construction order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Null,
    /// Boolean value.
    Boolean(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// An arbitrary-precision decimal, also covering JSON floats.
    Float(Decimal),
    /// String value.
    Text(Cow<'a, str>),
    /// An ordered list of values.
    Array(Vec<Value<'a>>),
    /// An ordered mapping of keys to values.
    Document(Vec<(String, Value<'a>)>),
}

/// Display wrapper for a parameter slice, used when logging queries.
pub struct Params<'a>(pub &'a [Value<'a>]);

impl fmt::Display for Params<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.0.len();

        write!(f, "[")?;
        for (i, val) in self.0.iter().enumerate() {
            write!(f, "{val}")?;

            if i < (len - 1) {
                write!(f, ",")?;
            }
        }
        write!(f, "]")
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(d) => write!(f, "{d}"),
            Value::Text(s) => write!(f, "\"{s}\""),
            Value::Array(vals) => {
                let len = vals.len();

                write!(f, "[")?;
                for (i, val) in vals.iter().enumerate() {
                    write!(f, "{val}")?;

                    if i < (len - 1) {
                        write!(f, ",")?;
                    }
                }
                write!(f, "]")
            }
            Value::Document(pairs) => {
                let len = pairs.len();

                write!(f, "{{")?;
                for (i, (key, val)) in pairs.iter().enumerate() {
                    write!(f, "\"{key}\":{val}")?;

                    if i < (len - 1) {
                        write!(f, ",")?;
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

impl<'a> Value<'a> {
    /// Creates a new string value.
    pub fn text<T>(value: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        Value::Text(value.into())
    }

    /// Creates a new integer value.
    pub fn integer<I>(value: I) -> Self
    where
        I: Into<i64>,
    {
        Value::Integer(value.into())
    }

    /// Creates a new decimal value.
    pub fn float(value: Decimal) -> Self {
        Value::Float(value)
    }

    /// Creates a new boolean value.
    pub fn boolean<B>(value: B) -> Self
    where
        B: Into<bool>,
    {
        Value::Boolean(value.into())
    }

    /// Creates a new array value.
    pub fn array<I, V>(value: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value<'a>>,
    {
        Value::Array(value.into_iter().map(|v| v.into()).collect())
    }

    /// Creates a new document value from key/value pairs, keeping their
    /// order.
    pub fn document<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value<'a>>,
    {
        Value::Document(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// `true` if the `Value` is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns a &str if the value is text, otherwise `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(cow) => Some(cow.as_ref()),
            _ => None,
        }
    }

    /// Returns an i64 if the value is an integer, otherwise `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns a bool if the value is a boolean, otherwise `None`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Clones all borrowed data, detaching the value from its source.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Null => Value::Null,
            Value::Boolean(b) => Value::Boolean(b),
            Value::Integer(i) => Value::Integer(i),
            Value::Float(d) => Value::Float(d),
            Value::Text(s) => Value::Text(Cow::Owned(s.into_owned())),
            Value::Array(vals) => Value::Array(vals.into_iter().map(Value::into_owned).collect()),
            Value::Document(pairs) => {
                Value::Document(pairs.into_iter().map(|(k, v)| (k, v.into_owned())).collect())
            }
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Text(value.into())
    }
}

impl From<String> for Value<'_> {
    fn from(value: String) -> Self {
        Value::Text(value.into())
    }
}

impl From<i64> for Value<'_> {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value<'_> {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Decimal> for Value<'_> {
    fn from(value: Decimal) -> Self {
        Value::Float(value)
    }
}

impl<'a> From<Value<'a>> for JsonValue {
    fn from(value: Value<'a>) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Boolean(b) => JsonValue::Bool(b),
            Value::Integer(i) => JsonValue::Number(Number::from(i)),
            Value::Float(d) => match d.to_f64().and_then(Number::from_f64) {
                Some(num) => JsonValue::Number(num),
                None => JsonValue::String(d.to_string()),
            },
            Value::Text(s) => JsonValue::String(s.into_owned()),
            Value::Array(vals) => JsonValue::Array(vals.into_iter().map(JsonValue::from).collect()),
            Value::Document(pairs) => {
                let mut map = Map::with_capacity(pairs.len());

                for (key, val) in pairs {
                    map.insert(key, JsonValue::from(val));
                }

                JsonValue::Object(map)
            }
        }
    }
}

impl TryFrom<JsonValue> for Value<'static> {
    type Error = Error;

    fn try_from(json: JsonValue) -> crate::Result<Self> {
        match json {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Bool(b) => Ok(Value::Boolean(b)),
            JsonValue::Number(num) => match num.as_i64() {
                Some(i) => Ok(Value::Integer(i)),
                None => parse_decimal(&num.to_string()).map(Value::Float),
            },
            JsonValue::String(s) => Ok(Value::Text(s.into())),
            JsonValue::Array(vals) => vals
                .into_iter()
                .map(Value::try_from)
                .collect::<crate::Result<Vec<_>>>()
                .map(Value::Array),
            JsonValue::Object(map) => map
                .into_iter()
                .map(|(k, v)| Ok((k, Value::try_from(v)?)))
                .collect::<crate::Result<Vec<_>>>()
                .map(Value::Document),
        }
    }
}

fn parse_decimal(source: &str) -> crate::Result<Decimal> {
    Decimal::from_str(source)
        .or_else(|_| Decimal::from_scientific(source))
        .map_err(|_| {
            Error::builder(ErrorKind::conversion(format!(
                "Number {source} does not fit a decimal"
            )))
            .build()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::FromPrimitive;
    use serde_json::json;

    #[test]
    fn json_scalars_convert_both_ways() {
        let json = json!({"name": "Daria", "age": 42, "height": 1.7, "fine": true, "note": null});
        let value = Value::try_from(json.clone()).unwrap();

        assert_eq!(
            value,
            Value::document(vec![
                ("name", Value::text("Daria")),
                ("age", Value::integer(42)),
                ("height", Value::Float(Decimal::from_str("1.7").unwrap())),
                ("fine", Value::boolean(true)),
                ("note", Value::Null),
            ])
        );

        assert_eq!(JsonValue::from(value), json);
    }

    #[test]
    fn document_key_order_survives_conversion() {
        let json = json!({"zulu": 1, "alpha": 2, "mike": 3});
        let value = Value::try_from(json).unwrap();

        match &value {
            Value::Document(pairs) => {
                let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["zulu", "alpha", "mike"]);
            }
            other => panic!("expected a document, got {other:?}"),
        }
    }

    #[test]
    fn nested_arrays_and_documents_convert() {
        let json = json!({"items": [{"detail_name": "color", "detail_value": "red"}, 2]});
        let value = Value::try_from(json.clone()).unwrap();

        assert_eq!(JsonValue::from(value), json);
    }

    #[test]
    fn params_display_wraps_text_in_quotes() {
        let params = vec![Value::text("Helen"), Value::integer(1)];
        assert_eq!("[\"Helen\",1]", format!("{}", Params(&params)));
    }

    #[test]
    fn a_number_too_large_for_i64_still_converts() {
        let json = json!(18446744073709551615u64);
        let value = Value::try_from(json).unwrap();

        assert_eq!(value, Value::Float(Decimal::from_u64(18446744073709551615).unwrap()));
    }
}
