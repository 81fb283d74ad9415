//! Test levels and access paths: the coordinates of the smoke ladder.
//!
//! Levels are plain data. The runner walks [`Level::LADDER`] in ascending
//! order and dispatches on the enum; there is no name-based lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One tier of the query ladder, from a literal select up to schema
/// reflection. Higher ordinals exercise more of the client stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// `SELECT 1` round-trip.
    LiteralSelect,
    /// Parameterized single-row lookup by primary key.
    SingleRow,
    /// Multi-row filter plus a `COUNT(*)` aggregate.
    MultiRowAggregate,
    /// Table and column enumeration.
    Reflection,
}

impl Level {
    /// All levels in ascending order of complexity. The runner executes them
    /// exactly in this order.
    pub const LADDER: [Level; 4] = [
        Level::LiteralSelect,
        Level::SingleRow,
        Level::MultiRowAggregate,
        Level::Reflection,
    ];

    /// 1-based ordinal of this level within the ladder.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            Level::LiteralSelect => 1,
            Level::SingleRow => 2,
            Level::MultiRowAggregate => 3,
            Level::Reflection => 4,
        }
    }

    /// Inverse of [`Level::ordinal`].
    #[must_use]
    pub fn from_ordinal(ordinal: u8) -> Option<Level> {
        match ordinal {
            1 => Some(Level::LiteralSelect),
            2 => Some(Level::SingleRow),
            3 => Some(Level::MultiRowAggregate),
            4 => Some(Level::Reflection),
            _ => None,
        }
    }

    /// Short human description, used in log lines and reports.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Level::LiteralSelect => "literal select",
            Level::SingleRow => "single-row lookup",
            Level::MultiRowAggregate => "multi-row and aggregate",
            Level::Reflection => "schema reflection",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lvl{}", self.ordinal())
    }
}

/// Which client surface a suite exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessPath {
    /// Low-level cursor style: one connection, positional binds, raw catalog
    /// queries.
    Driver,
    /// Pooled engine style: scoped checkout per query, named binds, PRAGMA
    /// introspection.
    Engine,
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AccessPath::Driver => "driver",
            AccessPath::Engine => "engine",
        })
    }
}
