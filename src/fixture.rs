//! The fixed dataset the ladder runs against.
//!
//! The dataset is owned by the database service and created out-of-band
//! before an asserting run; the harness itself never writes to it. The seed
//! SQL lives here so that operators and tests apply exactly the same rows
//! the oracles were written for. Seeding is idempotent: tables are guarded
//! with `IF NOT EXISTS` and inserts with `OR IGNORE`, so re-applying it to
//! an already-seeded database is a no-op.

use rusqlite::Connection;

use crate::error::Result;

/// Primary fixture table: two rows, four columns.
pub const TEST_TABLE: &str = "test_table";
/// Secondary fixture table, present only so reflection has something else
/// to find.
pub const ANOTHER_TABLE: &str = "another_table";

/// Every column of [`TEST_TABLE`], in declaration order.
pub const TEST_TABLE_COLUMNS: [&str; 4] = ["id", "name", "value", "active"];

/// Schema and rows for both fixture tables.
pub const SEED_SQL: &str = "\
CREATE TABLE IF NOT EXISTS test_table (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    value INTEGER NOT NULL,
    active BOOLEAN DEFAULT 1
);
INSERT OR IGNORE INTO test_table (id, name, value, active) VALUES
    (1, 'Alice', 42, 1),
    (2, 'Bob', 55, 0);
CREATE TABLE IF NOT EXISTS another_table (
    id INTEGER PRIMARY KEY,
    description TEXT
);
INSERT OR IGNORE INTO another_table (id, description) VALUES
    (1, 'Sample row for reflection');
";

/// Apply [`SEED_SQL`] over an open connection.
pub fn seed(conn: &Connection) -> Result<()> {
    conn.execute_batch(SEED_SQL)?;
    Ok(())
}
