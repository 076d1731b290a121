//! Grid executor: replays an action sequence against a level grid.
//!
//! Execution is a pure fold over the actions. [`Run`] yields events lazily;
//! [`Executor::execute`] drives a run to completion and collects the trace.

use crate::error::GridError;
use crate::event::{Event, Outcome, RunReport};
use crate::grid::{CellKind, GridWorld};
use codehero_types::{Action, ActionSequence, Direction, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Per-run overrides of the level's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Start somewhere other than the level's start cell.
    pub start: Option<Position>,
    /// Initial facing; defaults to [`Direction::Right`].
    pub facing: Option<Direction>,
}

/// Mutable state of one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub position: Position,
    pub facing: Direction,
    /// Coins collected, in pickup order. Never contains duplicates.
    pub collected: Vec<Position>,
    /// Set once the run has halted or finished.
    pub outcome: Option<Outcome>,
}

impl RunState {
    fn new(position: Position, facing: Direction) -> Self {
        Self {
            position,
            facing,
            collected: Vec::new(),
            outcome: None,
        }
    }
}

/// Executes action sequences against one grid.
#[derive(Debug, Clone, Copy)]
pub struct Executor<'g> {
    grid: &'g GridWorld,
    start: Position,
    facing: Direction,
}

impl<'g> Executor<'g> {
    /// An executor starting at the level's start cell, facing right.
    pub fn new(grid: &'g GridWorld) -> Self {
        Self {
            grid,
            start: grid.start(),
            facing: Direction::default(),
        }
    }

    /// An executor with start overrides. The start must be a legal cell.
    pub fn with_config(grid: &'g GridWorld, config: RunConfig) -> Result<Self, GridError> {
        let start = config.start.unwrap_or(grid.start());
        grid.check_start(start)?;
        Ok(Self {
            grid,
            start,
            facing: config.facing.unwrap_or_default(),
        })
    }

    /// A fresh lazy run over `actions`. Calling this again restarts from
    /// the initial state.
    pub fn events<'a>(&self, actions: &'a [Action]) -> Run<'a>
    where
        'g: 'a,
    {
        Run {
            grid: self.grid,
            actions: actions.iter(),
            state: RunState::new(self.start, self.facing),
            pending: None,
        }
    }

    /// Run every action and collect the full trace.
    #[instrument(level = "debug", skip_all, fields(actions = actions.len()))]
    pub fn execute(&self, actions: &ActionSequence) -> RunReport {
        let report = self.events(actions.as_slice()).into_report();
        debug!(
            outcome = ?report.outcome,
            events = report.events.len(),
            coins = report.collected_count(),
            "run complete"
        );
        report
    }
}

/// A lazy, single-pass run: an iterator over [`Event`]s.
///
/// After the last event, [`Run::state`] holds the final run state.
#[derive(Debug, Clone)]
pub struct Run<'a> {
    grid: &'a GridWorld,
    actions: std::slice::Iter<'a, Action>,
    state: RunState,
    /// Second event produced by a single action (coin pickup or obstacle).
    pending: Option<Event>,
}

impl<'a> Run<'a> {
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Drain the remaining events and summarise the run.
    pub fn into_report(mut self) -> RunReport {
        let events: Vec<Event> = self.by_ref().collect();
        let RunState {
            position,
            facing,
            collected,
            outcome,
        } = self.state;
        RunReport {
            events,
            // A drained run always has an outcome.
            outcome: outcome.unwrap_or(Outcome::Incomplete {
                reached_goal: false,
                missing_coins: 0,
            }),
            final_position: position,
            final_direction: facing,
            collected,
        }
    }

    fn step(&mut self, action: Action) -> Event {
        let state = &mut self.state;
        state.facing = action.direction;

        let target = state
            .position
            .step(action.direction)
            .filter(|&pos| self.grid.is_open(pos));
        let Some(target) = target else {
            trace!(line = action.line, from = %state.position, direction = %action.direction, "blocked");
            state.outcome = Some(Outcome::Blocked { line: action.line });
            return Event::Blocked {
                line: action.line,
                facing: action.direction,
            };
        };

        state.position = target;
        trace!(line = action.line, to = %target, "moved");
        match self.grid.cell(target) {
            Some(CellKind::Coin) if !state.collected.contains(&target) => {
                state.collected.push(target);
                self.pending = Some(Event::Collected { position: target });
            }
            Some(CellKind::Obstacle) => {
                state.outcome = Some(Outcome::Destroyed { line: action.line });
                self.pending = Some(Event::Destroyed { line: action.line });
            }
            _ => {}
        }
        Event::Moved {
            position: target,
            direction: action.direction,
        }
    }

    fn finish(&mut self) -> Event {
        let state = &mut self.state;
        let reached_goal = self.grid.cell(state.position) == Some(CellKind::Goal);
        let missing_coins = self.grid.coin_count().saturating_sub(state.collected.len());
        let outcome = if reached_goal && missing_coins == 0 {
            Outcome::Success
        } else {
            Outcome::Incomplete {
                reached_goal,
                missing_coins,
            }
        };
        state.outcome = Some(outcome);
        Event::Finished {
            success: outcome.is_success(),
        }
    }
}

impl Iterator for Run<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        if let Some(event) = self.pending.take() {
            return Some(event);
        }
        if self.state.outcome.is_some() {
            return None;
        }
        match self.actions.next() {
            Some(&action) => Some(self.step(action)),
            None => Some(self.finish()),
        }
    }
}
