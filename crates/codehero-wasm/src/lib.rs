//! CodeHero compiler and executor as a WASM module for browser environments.
//!
//! Every entry point takes and returns plain strings; structured data is
//! JSON. Pacing the event trace for animation, timers, and hint requests
//! stay in the UI layer.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { compile, run_level } from 'codehero-wasm';
//!
//! await init();
//!
//! const level = JSON.stringify({
//!   layout: [["EMPTY", "WALL"], ["GOAL", "EMPTY"]],
//!   start: { x: 0, y: 0 },
//! });
//! const result = JSON.parse(run_level("hero.move_down()", level, attempts, seconds));
//! // { ok: true, attempt: { stats: {...}, result: { status: "executed", report: {...} } } }
//! ```

use codehero_compiler::CompilerOptions;
use codehero_eval::{run_attempt, AttemptReport, AttemptStats, GridError, GridWorld};
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Cap on expanded moves for programs run in the browser.
pub const HOST_MAX_ACTIONS: usize = 10_000;

/// Failures of the host boundary itself, as opposed to failures of the
/// learner's program.
#[derive(Debug, Error)]
pub enum HostError {
    /// The level JSON is malformed or describes an invalid grid.
    #[error("invalid level: {0}")]
    InvalidLevel(#[from] serde_json::Error),

    /// An ASCII level is invalid.
    #[error("invalid level: {0}")]
    InvalidGrid(#[from] GridError),
}

/// Envelope for [`run_level`] and [`run_ascii_level`].
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RunResponse {
    Ok { ok: bool, attempt: AttemptReport },
    Err { ok: bool, host_error: String },
}

impl From<Result<AttemptReport, HostError>> for RunResponse {
    fn from(result: Result<AttemptReport, HostError>) -> Self {
        match result {
            Ok(attempt) => RunResponse::Ok { ok: true, attempt },
            Err(e) => {
                tracing::warn!(error = %e, "rejected level");
                RunResponse::Err {
                    ok: false,
                    host_error: e.to_string(),
                }
            }
        }
    }
}

fn host_options() -> CompilerOptions {
    CompilerOptions {
        max_actions: Some(HOST_MAX_ACTIONS),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        serde_json::json!({
            "ok": false,
            "host_error": format!("Serialization error: {e}"),
        })
        .to_string()
    })
}

/// Compile a program without running it.
///
/// Returns a JSON `CompileResult`:
/// ```json
/// { "success": true, "actions": [{ "direction": "DOWN", "line": 1 }], "error": null, "source_hash": "..." }
/// ```
#[wasm_bindgen]
pub fn compile(source: &str) -> String {
    to_json(&codehero_compiler::compile_to_result(source, &host_options()))
}

/// Compile and run a program against a JSON level descriptor.
///
/// `attempts` and `elapsed_secs` are the host's counters before this run;
/// the returned report carries the updated attempt count.
#[wasm_bindgen]
pub fn run_level(source: &str, level_json: &str, attempts: u32, elapsed_secs: u32) -> String {
    let result = serde_json::from_str::<GridWorld>(level_json)
        .map_err(HostError::from)
        .map(|grid| attempt(&grid, source, attempts, elapsed_secs));
    to_json(&RunResponse::from(result))
}

/// Like [`run_level`], with the level in the ASCII format
/// (`.` empty, `W` wall, `G` goal, `C` coin, `O` obstacle, `S` start).
#[wasm_bindgen]
pub fn run_ascii_level(source: &str, level: &str, attempts: u32, elapsed_secs: u32) -> String {
    let result = GridWorld::from_ascii(level)
        .map_err(HostError::from)
        .map(|grid| attempt(&grid, source, attempts, elapsed_secs));
    to_json(&RunResponse::from(result))
}

fn attempt(grid: &GridWorld, source: &str, attempts: u32, elapsed_secs: u32) -> AttemptReport {
    let stats = AttemptStats {
        attempts,
        elapsed_secs: u64::from(elapsed_secs),
    };
    run_attempt(grid, source, stats, &host_options())
}

/// Return the crate version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
