//! Hard-coded expected results and the comparisons against them.
//!
//! Both access paths share one oracle per level: the fixture dataset is
//! fixed, so the expected rows are literals. Row comparisons are exact
//! (value and order); name comparisons are set-membership, since catalogs
//! may legitimately contain more than the fixture.

use crate::error::{Result, SmokeError};
use crate::level::{AccessPath, Level};
use crate::value::{Row, Value};

/// Level 1: `SELECT 1` yields exactly one row, `(1)`.
#[must_use]
pub fn expected_literal_select() -> Vec<Row> {
    vec![vec![Value::Integer(1)]]
}

/// Level 2: the id=1 lookup yields exactly `(1, "Alice", 42)`.
#[must_use]
pub fn expected_single_row() -> Vec<Row> {
    vec![vec![
        Value::Integer(1),
        Value::Text("Alice".to_string()),
        Value::Integer(42),
    ]]
}

/// Level 3: the `value > 10` filter yields both rows, in id order.
#[must_use]
pub fn expected_value_filter() -> Vec<Row> {
    vec![
        vec![
            Value::Integer(1),
            Value::Text("Alice".to_string()),
            Value::Integer(42),
        ],
        vec![
            Value::Integer(2),
            Value::Text("Bob".to_string()),
            Value::Integer(55),
        ],
    ]
}

/// Level 3: `COUNT(*)` over the primary table yields `(2)`.
#[must_use]
pub fn expected_row_count() -> Vec<Row> {
    vec![vec![Value::Integer(2)]]
}

/// Compare actual rows against expected rows with exact equality, value and
/// ordering included.
pub fn expect_rows(
    level: Level,
    path: AccessPath,
    query: &str,
    expected: &[Row],
    actual: &[Row],
) -> Result<()> {
    if actual == expected {
        return Ok(());
    }
    Err(SmokeError::Mismatch {
        level,
        path,
        query: query.to_string(),
        detail: format!(
            "expected {}, got {}",
            render_rows(expected),
            render_rows(actual)
        ),
    })
}

/// Assert every `required` name occurs in `found` (order-independent,
/// superset allowed).
pub fn expect_names_present(
    level: Level,
    path: AccessPath,
    query: &str,
    required: &[&str],
    found: &[String],
) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !found.iter().any(|f| f == name))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(SmokeError::Mismatch {
        level,
        path,
        query: query.to_string(),
        detail: format!("missing {missing:?} in {found:?}"),
    })
}

/// Render rows tuple-style, e.g. `[(1, "Alice", 42), (2, "Bob", 55)]`.
#[must_use]
pub fn render_rows(rows: &[Row]) -> String {
    let mut out = String::from("[");
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('(');
        for (j, value) in row.iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            out.push_str(&value.to_string());
        }
        out.push(')');
    }
    out.push(']');
    out
}
