//! CodeHero grid executor.
//!
//! Replays a compiled [`ActionSequence`](codehero_types::ActionSequence)
//! against a level grid, producing an ordered event trace and an outcome.
//! Runs are deterministic: the same grid, start and actions always give the
//! same trace.

mod error;
mod event;
mod executor;
mod grid;
pub mod attempt;

pub use attempt::{run_attempt, AttemptReport, AttemptResult, AttemptStats};
pub use error::GridError;
pub use event::{Event, Outcome, RunReport};
pub use executor::{Executor, Run, RunConfig, RunState};
pub use grid::{CellKind, GridDescriptor, GridWorld};
