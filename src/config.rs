//! Connection configuration for the smoke run.
//!
//! Credentials are captured in an explicit [`SmokeConfig`] that the suite
//! constructors receive; nothing below the binary boundary reads process
//! environment. `database_id` names the database the driver opens (a path
//! or `:memory:` for a local run, which is the SQLite surface D1 exposes).
//! The account id and API token only travel into the DSN; authentication is
//! the hosted service's concern, not the harness's.

use std::env;

use crate::error::{Result, SmokeError};

/// Environment variable holding the account identifier.
pub const ENV_ACCOUNT_ID: &str = "CF_ACCOUNT_ID";
/// Environment variable holding the API token.
pub const ENV_API_TOKEN: &str = "CF_API_TOKEN";
/// Environment variable holding the database identifier.
pub const ENV_DATABASE_ID: &str = "D1_DB_ID";

/// Database location used by the placeholder profile.
pub const MEMORY_DATABASE: &str = ":memory:";

const PLACEHOLDER: &str = "placeholder";
const REDACTED: &str = "********";

/// Connection parameters for both access paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeConfig {
    pub account_id: String,
    pub api_token: String,
    pub database_id: String,
}

impl SmokeConfig {
    pub fn new(
        account_id: impl Into<String>,
        api_token: impl Into<String>,
        database_id: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            api_token: api_token.into(),
            database_id: database_id.into(),
        }
    }

    /// Read the credential triple from the process environment. Intended to
    /// be called once, by the binary; the library only ever sees the struct.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            account_id: require(ENV_ACCOUNT_ID)?,
            api_token: require(ENV_API_TOKEN)?,
            database_id: require(ENV_DATABASE_ID)?,
        })
    }

    /// Credential-free profile backed by an in-memory database. Used by the
    /// connectivity probe, which runs without assertions.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER, PLACEHOLDER, MEMORY_DATABASE)
    }

    /// URI-style connection string embedding all three credentials, in the
    /// form the engine dialect understands.
    #[must_use]
    pub fn dsn(&self) -> String {
        format!(
            "d1://{}:{}@{}",
            self.account_id, self.api_token, self.database_id
        )
    }

    /// Like [`SmokeConfig::dsn`] but with the token masked. Always use this
    /// form in log output.
    #[must_use]
    pub fn redacted_dsn(&self) -> String {
        format!("d1://{}:{REDACTED}@{}", self.account_id, self.database_id)
    }

    /// Where the driver opens the database.
    #[must_use]
    pub fn database_location(&self) -> &str {
        &self.database_id
    }

    /// True when the profile points at a private in-memory database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.database_id == MEMORY_DATABASE
    }
}

fn require(name: &'static str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(SmokeError::MissingEnv(name)),
    }
}
