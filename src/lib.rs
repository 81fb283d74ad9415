//! Smoke tests for the D1 database integration.
//!
//! # Intention
//!
//! - Exercise the D1 driver and the pooled engine through one shared
//!   query ladder, from a literal select up to schema reflection.
//! - Compare every result against hard-coded oracles so a failure names
//!   the exact level, access path, query, and values involved.
//!
//! # Architectural Boundaries
//!
//! - The library never reads process environment and never prints.
//!   Credentials arrive as an explicit [`SmokeConfig`]; results leave as
//!   a [`RunReport`] or an error. Process concerns live in the binaries.
//! - Only smoke-harness code belongs here. No schema management beyond
//!   the fixture seed, no migrations, no write-path coverage.

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod fixture;
pub mod level;
pub mod oracle;
pub mod runner;
pub mod value;

pub use config::SmokeConfig;
pub use driver::DriverSuite;
pub use engine::{Engine, EngineSuite};
pub use error::{Result, SmokeError};
pub use level::{AccessPath, Level};
pub use runner::{run_ladder, LevelOutcome, LevelSuite, RunMode, RunReport};
pub use value::{Row, Value};
