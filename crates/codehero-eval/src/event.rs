//! Observable run trace and summary types.

use codehero_types::{Direction, Position};
use serde::{Deserialize, Serialize};

/// One entry of the run trace, in the order it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// The hero stepped onto `position`, now facing `direction`.
    Moved {
        position: Position,
        direction: Direction,
    },
    /// A coin was picked up for the first time.
    Collected { position: Position },
    /// A wall or the grid edge stopped the run. `facing` is the attempted
    /// direction.
    Blocked { line: u32, facing: Direction },
    /// An obstacle destroyed the hero and stopped the run.
    Destroyed { line: u32 },
    /// All actions ran; `success` is the win check.
    Finished { success: bool },
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Ended on the goal with every coin collected.
    Success,
    /// Ran every action without a halt, but the win condition is unmet.
    Incomplete {
        reached_goal: bool,
        missing_coins: usize,
    },
    /// Halted by a wall or the grid edge at `line`.
    Blocked { line: u32 },
    /// Halted by an obstacle at `line`.
    Destroyed { line: u32 },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Whether the run stopped early on an illegal move.
    pub fn is_halt(&self) -> bool {
        matches!(self, Outcome::Blocked { .. } | Outcome::Destroyed { .. })
    }

    /// Source line of the halting action, if the run halted.
    pub fn line(&self) -> Option<u32> {
        match self {
            Outcome::Blocked { line } | Outcome::Destroyed { line } => Some(*line),
            _ => None,
        }
    }

    /// Plain-text description of a non-successful outcome.
    pub fn describe(&self) -> String {
        match self {
            Outcome::Success => "goal reached".to_string(),
            Outcome::Incomplete {
                reached_goal: false,
                ..
            } => "program finished but the goal was not reached".to_string(),
            Outcome::Incomplete { missing_coins, .. } => {
                format!("goal reached but {missing_coins} coin(s) were not collected")
            }
            Outcome::Blocked { line } => format!("hero hit a wall (line {line})"),
            Outcome::Destroyed { line } => {
                format!("hero was destroyed by an obstacle (line {line})")
            }
        }
    }
}

/// The full result of one execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub events: Vec<Event>,
    pub outcome: Outcome,
    pub final_position: Position,
    pub final_direction: Direction,
    /// Coins collected, in pickup order.
    pub collected: Vec<Position>,
}

impl RunReport {
    pub fn collected_count(&self) -> usize {
        self.collected.len()
    }
}
