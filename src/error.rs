//! Error types for the smoke harness.
//!
//! Only one error kind is interesting here: an expectation mismatch. The
//! rest wrap whatever the driver or pool surfaces, with no local recovery;
//! every failure propagates to the process boundary.

use thiserror::Error;

use crate::level::{AccessPath, Level};

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, SmokeError>;

#[derive(Debug, Error)]
pub enum SmokeError {
    /// A query produced rows that differ from the hard-coded oracle.
    /// `detail` carries both the expected and the actual values.
    #[error("{path} {level} mismatch for `{query}`: {detail}")]
    Mismatch {
        level: Level,
        path: AccessPath,
        query: String,
        detail: String,
    },

    /// A required environment variable was absent at the binary boundary.
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("driver error: {0}")]
    Driver(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
}

impl SmokeError {
    /// Whether this error is an oracle mismatch (as opposed to an
    /// infrastructure failure while executing the query).
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, SmokeError::Mismatch { .. })
    }
}
