//! Type conversion between `Value` and PostgreSQL wire types.
//!
//! PostgreSQL is strict about parameter types (an `INT4` column will not accept
//! an `i64`), so arguments are converted against the types the server inferred
//! when the statement was prepared.

use postgres::types::{ToSql, Type};
use postgres::Row;

use crate::db::Value;
use crate::error::MappingError;

pub type SqlParam = Box<dyn ToSql + Sync>;

/// Convert a bound argument for a parameter of the given server type.
pub fn to_param(value: &Value, ty: &Type) -> Result<SqlParam, String> {
    let param: SqlParam = match (value, ty) {
        (Value::Null, ty) => return null_param(ty),
        (Value::Bool(b), &Type::BOOL) => Box::new(*b),
        (Value::Int(i), &Type::INT2) => Box::new(narrow::<i16>(*i, ty)?),
        (Value::Int(i), &Type::INT4) => Box::new(narrow::<i32>(*i, ty)?),
        (Value::Int(i), &Type::INT8) => Box::new(*i),
        (Value::Int(i), &Type::FLOAT8) => Box::new(*i as f64),
        (Value::Float(f), &Type::FLOAT4) => Box::new(*f as f32),
        (Value::Float(f), &Type::FLOAT8) => Box::new(*f),
        (Value::Text(s), &Type::TEXT | &Type::VARCHAR | &Type::BPCHAR | &Type::NAME) => {
            Box::new(s.clone())
        }
        (value, ty) => {
            return Err(format!(
                "cannot bind {} argument to parameter of type {}",
                crate::db::DatabaseValue::type_name(value),
                ty
            ));
        }
    };
    Ok(param)
}

/// A SQL NULL typed to match the parameter, which the server checks.
fn null_param(ty: &Type) -> Result<SqlParam, String> {
    let param: SqlParam = match *ty {
        Type::BOOL => Box::new(None::<bool>),
        Type::INT2 => Box::new(None::<i16>),
        Type::INT4 => Box::new(None::<i32>),
        Type::INT8 => Box::new(None::<i64>),
        Type::FLOAT4 => Box::new(None::<f32>),
        Type::FLOAT8 => Box::new(None::<f64>),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => Box::new(None::<String>),
        Type::TIMESTAMP => Box::new(None::<chrono::NaiveDateTime>),
        Type::TIMESTAMPTZ => Box::new(None::<chrono::DateTime<chrono::Utc>>),
        ref other => return Err(format!("cannot bind null to parameter of type {}", other)),
    };
    Ok(param)
}

fn narrow<T: TryFrom<i64>>(i: i64, ty: &Type) -> Result<T, String> {
    T::try_from(i).map_err(|_| format!("{} is out of range for {}", i, ty))
}

/// Convert every cell of a result row.
///
/// `index` is the row's position in the result, used in error reports.
pub fn row_values(row: &Row, index: usize) -> Result<Vec<Value>, MappingError> {
    (0..row.len()).map(|i| cell_value(row, index, i)).collect()
}

fn cell_value(row: &Row, index: usize, idx: usize) -> Result<Value, MappingError> {
    let column = &row.columns()[idx];
    let ty = column.type_().clone();
    let undecodable = |reason: String| MappingError::Undecodable {
        row: index,
        column: column.name().to_string(),
        reason,
    };
    let err = |e: postgres::Error| undecodable(e.to_string());

    let value: Value = match ty {
        Type::BOOL => row.try_get::<_, Option<bool>>(idx).map_err(err)?.into(),
        Type::INT2 => row
            .try_get::<_, Option<i16>>(idx)
            .map_err(err)?
            .map(|v| v as i64)
            .into(),
        Type::INT4 => row
            .try_get::<_, Option<i32>>(idx)
            .map_err(err)?
            .map(|v| v as i64)
            .into(),
        Type::INT8 => row.try_get::<_, Option<i64>>(idx).map_err(err)?.into(),
        Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(idx)
            .map_err(err)?
            .map(|v| v as f64)
            .into(),
        Type::FLOAT8 => row.try_get::<_, Option<f64>>(idx).map_err(err)?.into(),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            row.try_get::<_, Option<String>>(idx).map_err(err)?.into()
        }
        Type::TIMESTAMP => row
            .try_get::<_, Option<chrono::NaiveDateTime>>(idx)
            .map_err(err)?
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .into(),
        Type::TIMESTAMPTZ => row
            .try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(idx)
            .map_err(err)?
            .map(|ts| ts.to_rfc3339())
            .into(),
        other => return Err(undecodable(format!("unsupported type {}", other))),
    };
    Ok(value)
}
