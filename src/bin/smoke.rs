//! Asserting smoke run against the configured database.
//!
//! Reads the credential triple from the environment, runs the full query
//! ladder on the driver path and then on the engine path, and fails the
//! process at the first level that does not match its oracle.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use d1_smoke::{run_ladder, DriverSuite, EngineSuite, RunMode, SmokeConfig};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = SmokeConfig::from_env().context("loading connection settings")?;
    info!(dsn = %config.redacted_dsn(), "starting smoke run");

    let driver = DriverSuite::connect(&config).context("opening driver connection")?;
    run_ladder(&driver, RunMode::FailFast).context("driver ladder")?;
    driver.close().context("closing driver connection")?;

    let engine = EngineSuite::connect(&config).context("building engine pool")?;
    run_ladder(&engine, RunMode::FailFast).context("engine ladder")?;

    info!("all levels passed on both access paths");
    Ok(())
}
