//! Engine access path: a connection pool with scoped checkouts, named
//! binds, and reflection through the PRAGMA API instead of raw catalog
//! SQL.
//!
//! Each query checks a connection out of the pool and returns it on
//! scope exit. Nothing at this layer holds a connection across queries,
//! let alone across levels.

use std::sync::atomic::{AtomicU64, Ordering};

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{named_params, Params};

use crate::config::SmokeConfig;
use crate::error::Result;
use crate::fixture;
use crate::level::{AccessPath, Level};
use crate::oracle;
use crate::runner::LevelSuite;
use crate::value::{fetch_all, Row};

const LITERAL_SELECT_SQL: &str = "SELECT 1 AS test_value";
const SINGLE_ROW_SQL: &str = "SELECT id, name, value FROM test_table WHERE id = :id";
const VALUE_FILTER_SQL: &str =
    "SELECT id, name, value FROM test_table WHERE value > :val ORDER BY id";
const ROW_COUNT_SQL: &str = "SELECT COUNT(*) FROM test_table";
const TABLE_LIST_PRAGMA: &str = "PRAGMA table_list";
const TABLE_INFO_PRAGMA: &str = "PRAGMA table_info(test_table)";

const POOL_SIZE: u32 = 2;

static NEXT_MEMORY_ID: AtomicU64 = AtomicU64::new(0);

/// Pooled access to the configured database.
pub struct Engine {
    pool: Pool<SqliteConnectionManager>,
}

impl Engine {
    /// Build the pool for the configured database. The fixture dataset is
    /// applied out-of-band before an asserting run.
    pub fn connect(config: &SmokeConfig) -> Result<Self> {
        let manager = if config.is_in_memory() {
            // A plain :memory: open is private to its connection. The pool
            // needs every checkout to observe the same database, so
            // in-memory engines use a shared-cache URI with a per-engine
            // name.
            let id = NEXT_MEMORY_ID.fetch_add(1, Ordering::Relaxed);
            SqliteConnectionManager::file(format!(
                "file:d1-smoke-{id}?mode=memory&cache=shared"
            ))
        } else {
            SqliteConnectionManager::file(config.database_location())
        };
        let pool = Pool::builder().max_size(POOL_SIZE).build(manager)?;
        Ok(Self { pool })
    }

    /// Check a connection out of the pool. It returns on drop.
    pub fn checkout(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

/// Runs the query ladder through the pool, one scoped checkout per query.
pub struct EngineSuite {
    engine: Engine,
}

impl EngineSuite {
    pub fn connect(config: &SmokeConfig) -> Result<Self> {
        Ok(Self {
            engine: Engine::connect(config)?,
        })
    }

    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Level 1: a literal select with no table and no parameters.
    pub fn literal_select(&self) -> Result<()> {
        let rows = self.fetch_pooled(LITERAL_SELECT_SQL, [])?;
        oracle::expect_rows(
            Level::LiteralSelect,
            AccessPath::Engine,
            LITERAL_SELECT_SQL,
            &oracle::expected_literal_select(),
            &rows,
        )
    }

    /// Level 2: a primary-key lookup with a named bind.
    pub fn single_row(&self) -> Result<()> {
        let rows = self.fetch_pooled(SINGLE_ROW_SQL, named_params! { ":id": 1 })?;
        oracle::expect_rows(
            Level::SingleRow,
            AccessPath::Engine,
            SINGLE_ROW_SQL,
            &oracle::expected_single_row(),
            &rows,
        )
    }

    /// Level 3: a named-bind filter, then an aggregate, each on its own
    /// checkout.
    pub fn multi_row_aggregate(&self) -> Result<()> {
        let rows = self.fetch_pooled(VALUE_FILTER_SQL, named_params! { ":val": 10 })?;
        oracle::expect_rows(
            Level::MultiRowAggregate,
            AccessPath::Engine,
            VALUE_FILTER_SQL,
            &oracle::expected_value_filter(),
            &rows,
        )?;
        let count = self.fetch_pooled(ROW_COUNT_SQL, [])?;
        oracle::expect_rows(
            Level::MultiRowAggregate,
            AccessPath::Engine,
            ROW_COUNT_SQL,
            &oracle::expected_row_count(),
            &count,
        )
    }

    /// Level 4: schema reflection through the PRAGMA API.
    pub fn reflection(&self) -> Result<()> {
        let tables = self.table_names()?;
        oracle::expect_names_present(
            Level::Reflection,
            AccessPath::Engine,
            TABLE_LIST_PRAGMA,
            &[fixture::TEST_TABLE, fixture::ANOTHER_TABLE],
            &tables,
        )?;
        let columns = self.table_columns(fixture::TEST_TABLE)?;
        oracle::expect_names_present(
            Level::Reflection,
            AccessPath::Engine,
            TABLE_INFO_PRAGMA,
            &fixture::TEST_TABLE_COLUMNS,
            &columns,
        )
    }

    /// Run one query on a connection checked out for just that query.
    fn fetch_pooled<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Row>> {
        let conn = self.engine.checkout()?;
        fetch_all(&conn, sql, params)
    }

    fn table_names(&self) -> Result<Vec<String>> {
        let conn = self.engine.checkout()?;
        let mut tables = Vec::new();
        conn.pragma_query(None, "table_list", |row| {
            let kind: String = row.get("type")?;
            if kind == "table" {
                tables.push(row.get::<_, String>("name")?);
            }
            Ok(())
        })?;
        Ok(tables)
    }

    fn table_columns(&self, table: &str) -> Result<Vec<String>> {
        let conn = self.engine.checkout()?;
        let mut columns = Vec::new();
        conn.pragma(None, "table_info", table, |row| {
            columns.push(row.get::<_, String>("name")?);
            Ok(())
        })?;
        Ok(columns)
    }
}

impl LevelSuite for EngineSuite {
    fn access_path(&self) -> AccessPath {
        AccessPath::Engine
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
    use crate::config::MEMORY_DATABASE;

    fn seeded_engine(config: &SmokeConfig) -> Engine {
        let engine = Engine::connect(config).expect("engine connect");
        fixture::seed(&engine.checkout().expect("checkout for seeding")).expect("seed fixture");
        engine
    }

    #[test]
    fn in_memory_pool_shares_one_database() {
        // The seed goes through one checkout; the ladder passes only if
        // every later checkout observes the same database.
        let config = SmokeConfig::new("acct", "token", MEMORY_DATABASE);
        let suite = EngineSuite::new(seeded_engine(&config));
        for level in Level::LADDER {
            suite.run_level(level).expect("seeded ladder level");
        }
    }

    #[test]
    fn concurrent_checkouts_fit_in_the_pool() {
        let config = SmokeConfig::new("acct", "token", MEMORY_DATABASE);
        let engine = Engine::connect(&config).expect("in-memory engine");
        let first = engine.checkout().expect("first checkout");
        let second = engine.checkout().expect("second checkout");
        let one: i64 = first
            .query_row("SELECT 1", [], |row| row.get(0))
            .expect("query on first");
        let two: i64 = second
            .query_row("SELECT 2", [], |row| row.get(0))
            .expect("query on second");
        assert_eq!((one, two), (1, 2));
    }

    #[test]
    fn file_backed_engine_runs_the_ladder() {
        let file = tempfile::NamedTempFile::new().expect("temp db");
        let path = file.path().to_str().expect("utf-8 temp path");
        let config = SmokeConfig::new("acct", "token", path);
        let suite = EngineSuite::new(seeded_engine(&config));
        for level in Level::LADDER {
            suite.run_level(level).expect("seeded ladder level");
        }
    }
}
