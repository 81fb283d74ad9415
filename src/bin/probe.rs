//! Connectivity probe with placeholder credentials.
//!
//! Runs the ladder on both access paths in report-only mode against an
//! in-memory database and prints every outcome as JSON. The probe
//! succeeds as long as both paths can be constructed and round-trip a
//! literal select; the higher levels are informational.

use anyhow::{ensure, Context};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use d1_smoke::{run_ladder, DriverSuite, EngineSuite, Level, RunMode, RunReport, SmokeConfig};

#[derive(Serialize)]
struct ProbeReport {
    driver: RunReport,
    engine: RunReport,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = SmokeConfig::placeholder();
    info!(dsn = %config.redacted_dsn(), "starting connectivity probe");

    let driver = DriverSuite::connect(&config).context("opening driver connection")?;
    let driver_report = run_ladder(&driver, RunMode::ReportOnly).context("driver ladder")?;
    driver.close().context("closing driver connection")?;

    let engine = EngineSuite::connect(&config).context("building engine pool")?;
    let engine_report = run_ladder(&engine, RunMode::ReportOnly).context("engine ladder")?;

    let report = ProbeReport {
        driver: driver_report,
        engine: engine_report,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("rendering report")?
    );

    ensure!(
        report.driver.level_passed(Level::LiteralSelect),
        "driver path failed the literal select"
    );
    ensure!(
        report.engine.level_passed(Level::LiteralSelect),
        "engine path failed the literal select"
    );
    Ok(())
}
