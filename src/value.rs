//! Row and value model shared by both access paths.
//!
//! [`Value`] mirrors the driver's five storage classes so that actual rows
//! and hard-coded expected rows compare with plain equality. Rendering is
//! tuple-style (`(1, "Alice", 42)`) so mismatch messages read like the rows
//! they describe.

use std::fmt;

use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, Params};

use crate::error::Result;

/// A single column value as returned by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// One result row.
pub type Row = Vec<Value>;

impl From<SqlValue> for Value {
    fn from(value: SqlValue) -> Self {
        match value {
            SqlValue::Null => Value::Null,
            SqlValue::Integer(i) => Value::Integer(i),
            SqlValue::Real(r) => Value::Real(r),
            SqlValue::Text(t) => Value::Text(t),
            SqlValue::Blob(b) => Value::Blob(b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(t) => write!(f, "{t:?}"),
            Value::Blob(b) => write!(f, "<blob {} bytes>", b.len()),
        }
    }
}

/// Execute `sql` with `params` and collect every result row.
///
/// This is the fetch-all primitive both suites are built on; it does no
/// decoding of its own beyond mapping the driver's storage classes into
/// [`Value`].
pub fn fetch_all<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<Vec<Row>> {
    let mut stmt = conn.prepare(sql)?;
    let column_count = stmt.column_count();
    let mut rows = stmt.query(params)?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Row::with_capacity(column_count);
        for index in 0..column_count {
            values.push(Value::from(row.get::<_, SqlValue>(index)?));
        }
        out.push(values);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;

    #[test]
    fn storage_classes_map_one_to_one() {
        assert_eq!(Value::from(SqlValue::Null), Value::Null);
        assert_eq!(Value::from(SqlValue::Integer(42)), Value::Integer(42));
        assert_eq!(Value::from(SqlValue::Real(1.5)), Value::Real(1.5));
        assert_eq!(
            Value::from(SqlValue::Text("Alice".to_string())),
            Value::Text("Alice".to_string())
        );
        assert_eq!(Value::from(SqlValue::Blob(vec![1, 2])), Value::Blob(vec![1, 2]));
    }

    #[test]
    fn display_is_tuple_friendly() {
        assert_eq!(Value::Integer(1).to_string(), "1");
        assert_eq!(Value::Text("Alice".to_string()).to_string(), "\"Alice\"");
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Blob(vec![0; 3]).to_string(), "<blob 3 bytes>");
    }

    #[test]
    fn fetch_all_collects_typed_rows() {
        let conn = Connection::open_in_memory().expect("open in-memory database");
        let rows = fetch_all(&conn, "SELECT 1, 'a', 2.5, NULL", params![])
            .expect("literal select");
        assert_eq!(
            rows,
            vec![vec![
                Value::Integer(1),
                Value::Text("a".to_string()),
                Value::Real(2.5),
                Value::Null,
            ]]
        );
    }

    #[test]
    fn fetch_all_binds_positional_params() {
        let conn = Connection::open_in_memory().expect("open in-memory database");
        let rows = fetch_all(&conn, "SELECT ?1 + 1", params![41]).expect("bound select");
        assert_eq!(rows, vec![vec![Value::Integer(42)]]);
    }
}
