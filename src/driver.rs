//! Driver access path: one raw `rusqlite::Connection`, positional binds,
//! catalog queries written as plain SQL.
//!
//! This is the low-level half of the harness. It never goes through the
//! pool; the connection is owned for the whole ladder and closed
//! explicitly at the end.

use rusqlite::{params, Connection};

use crate::config::SmokeConfig;
use crate::error::Result;
use crate::fixture;
use crate::level::{AccessPath, Level};
use crate::oracle;
use crate::runner::LevelSuite;
use crate::value::fetch_all;

const LITERAL_SELECT_SQL: &str = "SELECT 1 AS test_value";
const SINGLE_ROW_SQL: &str = "SELECT id, name, value FROM test_table WHERE id = ?";
const VALUE_FILTER_SQL: &str =
    "SELECT id, name, value FROM test_table WHERE value > ? ORDER BY id";
const ROW_COUNT_SQL: &str = "SELECT COUNT(*) FROM test_table";
const TABLE_NAMES_SQL: &str = "SELECT name FROM sqlite_master WHERE type = 'table'";
const COLUMN_INFO_SQL: &str = "PRAGMA table_info(test_table)";

/// Runs the query ladder over a single owned connection.
pub struct DriverSuite {
    conn: Connection,
}

impl DriverSuite {
    /// Open the configured database. The fixture dataset is applied
    /// out-of-band before an asserting run; the suite only reads.
    pub fn connect(config: &SmokeConfig) -> Result<Self> {
        let conn = Connection::open(config.database_location())?;
        Ok(Self { conn })
    }

    /// Adopt an existing connection, e.g. one prepared by a test.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Level 1: a literal select with no table and no parameters.
    pub fn literal_select(&self) -> Result<()> {
        let rows = fetch_all(&self.conn, LITERAL_SELECT_SQL, params![])?;
        oracle::expect_rows(
            Level::LiteralSelect,
            AccessPath::Driver,
            LITERAL_SELECT_SQL,
            &oracle::expected_literal_select(),
            &rows,
        )
    }

    /// Level 2: a parameterized primary-key lookup.
    pub fn single_row(&self) -> Result<()> {
        let rows = fetch_all(&self.conn, SINGLE_ROW_SQL, params![1])?;
        oracle::expect_rows(
            Level::SingleRow,
            AccessPath::Driver,
            SINGLE_ROW_SQL,
            &oracle::expected_single_row(),
            &rows,
        )
    }

    /// Level 3: a multi-row filter followed by an aggregate.
    pub fn multi_row_aggregate(&self) -> Result<()> {
        let rows = fetch_all(&self.conn, VALUE_FILTER_SQL, params![10])?;
        oracle::expect_rows(
            Level::MultiRowAggregate,
            AccessPath::Driver,
            VALUE_FILTER_SQL,
            &oracle::expected_value_filter(),
            &rows,
        )?;
        let count = fetch_all(&self.conn, ROW_COUNT_SQL, params![])?;
        oracle::expect_rows(
            Level::MultiRowAggregate,
            AccessPath::Driver,
            ROW_COUNT_SQL,
            &oracle::expected_row_count(),
            &count,
        )
    }

    /// Level 4: schema reflection through the catalog, written as SQL.
    pub fn reflection(&self) -> Result<()> {
        let tables = self.fetch_names(TABLE_NAMES_SQL, 0)?;
        oracle::expect_names_present(
            Level::Reflection,
            AccessPath::Driver,
            TABLE_NAMES_SQL,
            &[fixture::TEST_TABLE, fixture::ANOTHER_TABLE],
            &tables,
        )?;
        // PRAGMA table_info lays out (cid, name, type, notnull, dflt_value, pk).
        let columns = self.fetch_names(COLUMN_INFO_SQL, 1)?;
        oracle::expect_names_present(
            Level::Reflection,
            AccessPath::Driver,
            COLUMN_INFO_SQL,
            &fixture::TEST_TABLE_COLUMNS,
            &columns,
        )
    }

    fn fetch_names(&self, sql: &str, column: usize) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(sql)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(column))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }

    /// Close the connection, surfacing any error SQLite reports on the way
    /// out instead of dropping it.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| err)?;
        Ok(())
    }
}

impl LevelSuite for DriverSuite {
    fn access_path(&self) -> AccessPath {
        AccessPath::Driver
    }

    fn run_level(&self, level: Level) -> Result<()> {
        match level {
            Level::LiteralSelect => self.literal_select(),
            Level::SingleRow => self.single_row(),
            Level::MultiRowAggregate => self.multi_row_aggregate(),
            Level::Reflection => self.reflection(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SmokeError;

    fn seeded_suite() -> DriverSuite {
        let conn = Connection::open_in_memory().expect("open in-memory database");
        fixture::seed(&conn).expect("seed fixture");
        DriverSuite::from_connection(conn)
    }

    #[test]
    fn full_ladder_passes_on_seeded_database() {
        let suite = seeded_suite();
        for level in Level::LADDER {
            suite.run_level(level).expect("seeded ladder level");
        }
        suite.close().expect("close");
    }

    #[test]
    fn wrong_fixture_data_is_reported_as_mismatch() {
        let conn = Connection::open_in_memory().expect("open");
        conn.execute_batch(
            "CREATE TABLE test_table (id INTEGER PRIMARY KEY, name TEXT, value INTEGER);
             INSERT INTO test_table (id, name, value) VALUES (1, 'Mallory', 42);",
        )
        .expect("seed wrong data");
        let suite = DriverSuite::from_connection(conn);
        let err = suite.single_row().expect_err("wrong name must mismatch");
        match err {
            SmokeError::Mismatch { level, path, .. } => {
                assert_eq!(level, Level::SingleRow);
                assert_eq!(path, AccessPath::Driver);
            }
            other => panic!("expected mismatch, got {other}"),
        }
    }
}
