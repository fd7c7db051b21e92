use crate::ast::Value;
use crate::connector::queryable::{GetRow, ToColumnNames};
use crate::error::{Error, ErrorKind};
use bytes::BytesMut;
use postgres_types::{to_sql_checked, IsNull, ToSql, Type};
use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal,
};
use serde_json::Value as JsonValue;
use std::fmt::Display;

/// The single place the canonical JSON encoding is applied on the write
/// path: any value bound against a `json`/`jsonb` parameter is converted
/// through its JSON form, and `Array`/`Document` values headed for a text
/// column serialize to JSON text.
impl ToSql for Value<'_> {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            _ if ty == &Type::JSON || ty == &Type::JSONB => {
                JsonValue::from(self.clone()).to_sql(ty, out)
            }
            Value::Boolean(b) => b.to_sql(ty, out),
            Value::Integer(i) => {
                if ty == &Type::INT2 {
                    (*i as i16).to_sql(ty, out)
                } else if ty == &Type::INT4 {
                    (*i as i32).to_sql(ty, out)
                } else if ty == &Type::FLOAT4 {
                    (*i as f32).to_sql(ty, out)
                } else if ty == &Type::FLOAT8 {
                    (*i as f64).to_sql(ty, out)
                } else if ty == &Type::NUMERIC {
                    Decimal::from(*i).to_sql(ty, out)
                } else if ty == &Type::TEXT || ty == &Type::VARCHAR {
                    i.to_string().to_sql(ty, out)
                } else {
                    i.to_sql(ty, out)
                }
            }
            Value::Float(d) => {
                if ty == &Type::FLOAT4 {
                    let f = d.to_f32().ok_or("decimal does not fit a float4")?;
                    f.to_sql(ty, out)
                } else if ty == &Type::FLOAT8 {
                    let f = d.to_f64().ok_or("decimal does not fit a float8")?;
                    f.to_sql(ty, out)
                } else if ty == &Type::TEXT || ty == &Type::VARCHAR {
                    d.to_string().to_sql(ty, out)
                } else {
                    d.to_sql(ty, out)
                }
            }
            Value::Text(s) => s.as_ref().to_sql(ty, out),
            Value::Array(_) | Value::Document(_) => {
                serde_json::to_string(&JsonValue::from(self.clone()))?.to_sql(ty, out)
            }
        }
    }

    fn accepts(_: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

/// The read-path half of the canonical encoding: `json`/`jsonb` columns
/// decode back into `Array`/`Document`, everything else maps through scalar
/// coercion. An unsupported column type fails with the column's name
/// attached.
impl GetRow for tokio_postgres::Row {
    fn get_result_row(&self) -> crate::Result<Vec<Value<'static>>> {
        let mut row = Vec::with_capacity(self.columns().len());

        for (i, column) in self.columns().iter().enumerate() {
            let name = column.name();
            let ty = column.type_();

            let value = if ty == &Type::BOOL {
                match self.try_get::<_, Option<bool>>(i).map_err(|e| read_error(name, e))? {
                    Some(b) => Value::Boolean(b),
                    None => Value::Null,
                }
            } else if ty == &Type::INT2 {
                match self.try_get::<_, Option<i16>>(i).map_err(|e| read_error(name, e))? {
                    Some(i) => Value::Integer(i64::from(i)),
                    None => Value::Null,
                }
            } else if ty == &Type::INT4 {
                match self.try_get::<_, Option<i32>>(i).map_err(|e| read_error(name, e))? {
                    Some(i) => Value::Integer(i64::from(i)),
                    None => Value::Null,
                }
            } else if ty == &Type::INT8 {
                match self.try_get::<_, Option<i64>>(i).map_err(|e| read_error(name, e))? {
                    Some(i) => Value::Integer(i),
                    None => Value::Null,
                }
            } else if ty == &Type::FLOAT4 {
                match self.try_get::<_, Option<f32>>(i).map_err(|e| read_error(name, e))? {
                    Some(f) => Value::Float(
                        Decimal::from_f32(f).ok_or_else(|| read_error(name, "float4 out of range"))?,
                    ),
                    None => Value::Null,
                }
            } else if ty == &Type::FLOAT8 {
                match self.try_get::<_, Option<f64>>(i).map_err(|e| read_error(name, e))? {
                    Some(f) => Value::Float(
                        Decimal::from_f64(f).ok_or_else(|| read_error(name, "float8 out of range"))?,
                    ),
                    None => Value::Null,
                }
            } else if ty == &Type::NUMERIC {
                match self
                    .try_get::<_, Option<Decimal>>(i)
                    .map_err(|e| read_error(name, e))?
                {
                    Some(d) => Value::Float(d),
                    None => Value::Null,
                }
            } else if ty == &Type::TEXT
                || ty == &Type::VARCHAR
                || ty == &Type::BPCHAR
                || ty == &Type::NAME
            {
                match self
                    .try_get::<_, Option<String>>(i)
                    .map_err(|e| read_error(name, e))?
                {
                    Some(s) => Value::Text(s.into()),
                    None => Value::Null,
                }
            } else if ty == &Type::JSON || ty == &Type::JSONB {
                match self
                    .try_get::<_, Option<JsonValue>>(i)
                    .map_err(|e| read_error(name, e))?
                {
                    Some(json) => Value::try_from(json)
                        .map_err(|e| read_error(name, e))?
                        .into_owned(),
                    None => Value::Null,
                }
            } else {
                return Err(read_error(name, format!("unsupported column type {ty}")));
            };

            row.push(value);
        }

        Ok(row)
    }
}

impl ToColumnNames for tokio_postgres::Statement {
    fn to_column_names(&self) -> Vec<String> {
        self.columns().iter().map(|c| c.name().to_string()).collect()
    }
}

fn read_error(column: &str, message: impl Display) -> Error {
    Error::builder(ErrorKind::column_read(column, message.to_string())).build()
}
