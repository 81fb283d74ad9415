//! Ladder execution and reporting.
//!
//! The runner is deliberately dumb: it walks [`Level::LADDER`] in order,
//! asks the suite to run each level, and either aborts on the first
//! failure or records it and keeps going. Which queries a level runs is
//! entirely the suite's business.

use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::Result;
use crate::level::{AccessPath, Level};

/// How the runner reacts to a failing level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Abort the ladder at the first failure and propagate its error.
    FailFast,
    /// Run every level; failures land in the report instead of aborting.
    ReportOnly,
}

/// One access path's implementation of the query ladder.
pub trait LevelSuite {
    fn access_path(&self) -> AccessPath;
    fn run_level(&self, level: Level) -> Result<()>;
}

/// Outcome of a single ladder level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelOutcome {
    pub level: Level,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Everything one ladder run produced for a single access path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub path: AccessPath,
    pub outcomes: Vec<LevelOutcome>,
}

impl RunReport {
    fn new(path: AccessPath) -> Self {
        Self {
            path,
            outcomes: Vec::new(),
        }
    }

    fn record_pass(&mut self, level: Level) {
        self.outcomes.push(LevelOutcome {
            level,
            passed: true,
            detail: None,
        });
    }

    fn record_failure(&mut self, level: Level, detail: String) {
        self.outcomes.push(LevelOutcome {
            level,
            passed: false,
            detail: Some(detail),
        });
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// Whether `level` was run and passed.
    #[must_use]
    pub fn level_passed(&self, level: Level) -> bool {
        self.outcomes.iter().any(|o| o.level == level && o.passed)
    }
}

/// Walk the ladder bottom-up on `suite`.
///
/// In [`RunMode::FailFast`] the first failing level aborts the run with
/// its error, so a returned report means every level passed. In
/// [`RunMode::ReportOnly`] the report carries one outcome per level
/// regardless of failures.
pub fn run_ladder<S: LevelSuite>(suite: &S, mode: RunMode) -> Result<RunReport> {
    let path = suite.access_path();
    let mut report = RunReport::new(path);
    for level in Level::LADDER {
        debug!(%path, %level, check = level.describe(), "running");
        match suite.run_level(level) {
            Ok(()) => {
                info!(%path, %level, "pass");
                report.record_pass(level);
            }
            Err(err) => {
                error!(%path, %level, %err, "fail");
                if mode == RunMode::FailFast {
                    return Err(err);
                }
                report.record_failure(level, err.to_string());
            }
        }
    }
    info!(
        %path,
        passed = report.passed(),
        failed = report.failed(),
        "ladder complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::SmokeError;

    struct ScriptedSuite {
        fail_at: Option<Level>,
        ran: RefCell<Vec<Level>>,
    }

    impl ScriptedSuite {
        fn new(fail_at: Option<Level>) -> Self {
            Self {
                fail_at,
                ran: RefCell::new(Vec::new()),
            }
        }
    }

    impl LevelSuite for ScriptedSuite {
        fn access_path(&self) -> AccessPath {
            AccessPath::Driver
        }

        fn run_level(&self, level: Level) -> Result<()> {
            self.ran.borrow_mut().push(level);
            if self.fail_at == Some(level) {
                return Err(SmokeError::Mismatch {
                    level,
                    path: AccessPath::Driver,
                    query: "q".to_string(),
                    detail: "expected [(1)], got []".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn clean_run_reports_every_level_passed() {
        let suite = ScriptedSuite::new(None);
        let report = run_ladder(&suite, RunMode::FailFast).expect("clean run");
        assert_eq!(report.total(), Level::LADDER.len());
        assert_eq!(report.failed(), 0);
        assert!(report.all_passed());
        assert_eq!(*suite.ran.borrow(), Level::LADDER.to_vec());
    }

    #[test]
    fn fail_fast_stops_at_the_failing_level() {
        let suite = ScriptedSuite::new(Some(Level::SingleRow));
        let err = run_ladder(&suite, RunMode::FailFast).expect_err("must abort");
        assert!(err.is_mismatch());
        // Nothing after the failing level ran.
        assert_eq!(
            *suite.ran.borrow(),
            vec![Level::LiteralSelect, Level::SingleRow]
        );
    }

    #[test]
    fn report_only_keeps_walking_past_failures() {
        let suite = ScriptedSuite::new(Some(Level::SingleRow));
        let report = run_ladder(&suite, RunMode::ReportOnly).expect("report run");
        assert_eq!(report.total(), Level::LADDER.len());
        assert_eq!(report.passed(), 3);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_passed());
        assert!(report.level_passed(Level::LiteralSelect));
        assert!(!report.level_passed(Level::SingleRow));
        assert_eq!(*suite.ran.borrow(), Level::LADDER.to_vec());
    }

    #[test]
    fn report_serializes_with_snake_case_levels() {
        let suite = ScriptedSuite::new(Some(Level::Reflection));
        let report = run_ladder(&suite, RunMode::ReportOnly).expect("report run");
        let json = serde_json::to_value(&report).expect("serialize report");
        assert_eq!(json["path"], "driver");
        assert_eq!(json["outcomes"][0]["level"], "literal_select");
        assert_eq!(json["outcomes"][0]["passed"], true);
        // Passing outcomes omit the detail field entirely.
        assert!(json["outcomes"][0].get("detail").is_none());
        assert_eq!(json["outcomes"][3]["passed"], false);
        assert!(json["outcomes"][3]["detail"]
            .as_str()
            .expect("failure detail")
            .contains("mismatch"));
    }
}
