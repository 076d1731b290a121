//! Compile-and-run pipeline for one learner attempt.
//!
//! Attempt counters and elapsed time belong to the caller: they are passed
//! in and handed back in the report, never kept here.

use crate::event::RunReport;
use crate::executor::Executor;
use crate::grid::GridWorld;
use codehero_compiler::{compile_with_options, CompilerOptions};
use codehero_types::CompileError;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Counters the host tracks across attempts at one level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptStats {
    /// Attempts made so far, including the one being reported.
    pub attempts: u32,
    /// Seconds spent on the level, measured by the host.
    pub elapsed_secs: u64,
}

/// What happened to the program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptResult {
    /// The program did not compile; nothing was executed.
    CompileFailed { error: CompileError },
    /// The program compiled and ran.
    Executed { report: RunReport },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptReport {
    pub stats: AttemptStats,
    pub result: AttemptResult,
}

impl AttemptReport {
    pub fn succeeded(&self) -> bool {
        matches!(&self.result, AttemptResult::Executed { report } if report.outcome.is_success())
    }

    /// Whether the program ran and stopped early on an illegal move.
    pub fn halted(&self) -> bool {
        matches!(&self.result, AttemptResult::Executed { report } if report.outcome.is_halt())
    }

    /// Plain-text reason for a failed attempt, suitable for a hint request.
    pub fn failure_reason(&self) -> Option<String> {
        match &self.result {
            AttemptResult::CompileFailed { error } => {
                Some(format!("line {}: {}", error.line, error.message))
            }
            AttemptResult::Executed { report } if !report.outcome.is_success() => {
                Some(report.outcome.describe())
            }
            AttemptResult::Executed { .. } => None,
        }
    }
}

/// Compile `source` and run it on `grid`, counting one more attempt.
#[instrument(level = "debug", skip(grid, source, options), fields(attempt = stats.attempts.saturating_add(1)))]
pub fn run_attempt(
    grid: &GridWorld,
    source: &str,
    stats: AttemptStats,
    options: &CompilerOptions,
) -> AttemptReport {
    let stats = AttemptStats {
        attempts: stats.attempts.saturating_add(1),
        ..stats
    };
    let result = match compile_with_options(source, options) {
        Ok(actions) => AttemptResult::Executed {
            report: Executor::new(grid).execute(&actions),
        },
        Err(error) => AttemptResult::CompileFailed { error },
    };
    let report = AttemptReport { stats, result };
    info!(
        attempt = report.stats.attempts,
        success = report.succeeded(),
        halted = report.halted(),
        "attempt finished"
    );
    report
}
