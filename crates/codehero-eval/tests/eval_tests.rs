//! Integration tests for the grid executor.
//!
//! Tests key executor behaviour:
//! - walls and grid edges halt with `Blocked`
//! - obstacles halt with `Destroyed`, even on the goal's doorstep
//! - coins are collected once and are mandatory for a win
//! - end-to-end compile + run scenarios

use codehero_compiler::compile;
use codehero_eval::{CellKind, Event, Executor, GridWorld, Outcome, RunReport};
use codehero_types::{Action, ActionSequence, Direction, Position};

use CellKind::{Empty, Goal, Wall};
use Direction::{Down, Left, Right, Up};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn grid(ascii: &str) -> GridWorld {
    GridWorld::from_ascii(ascii).unwrap_or_else(|e| panic!("bad level: {e}"))
}

/// One action per direction, tagged with consecutive lines from 1.
fn moves(dirs: &[Direction]) -> ActionSequence {
    dirs.iter()
        .enumerate()
        .map(|(i, &d)| Action::new(d, i as u32 + 1))
        .collect()
}

fn run(level: &GridWorld, dirs: &[Direction]) -> RunReport {
    Executor::new(level).execute(&moves(dirs))
}

/// Compile and run, panicking on compile errors.
fn play(level: &GridWorld, source: &str) -> RunReport {
    let actions = compile(source).unwrap_or_else(|e| panic!("compile failed: {e}"));
    Executor::new(level).execute(&actions)
}

fn moved(x: u32, y: u32, direction: Direction) -> Event {
    Event::Moved {
        position: Position::new(x, y),
        direction,
    }
}

/// 2x2 level with a wall to the right of the start and the goal at (1, 1).
fn scenario_grid() -> GridWorld {
    GridWorld::new(
        vec![vec![Empty, Wall], vec![Empty, Goal]],
        Position::new(0, 0),
    )
    .unwrap()
}

/// 2x2 level with the goal directly below the start.
fn goal_below_grid() -> GridWorld {
    GridWorld::new(
        vec![vec![Empty, Wall], vec![Goal, Empty]],
        Position::new(0, 0),
    )
    .unwrap()
}

// ══════════════════════════════════════════════════════════════════════════════
// Movement
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_moves_update_position_and_facing() {
    let level = grid("S..\n...\n..G");
    let report = run(&level, &[Down, Right, Down, Right]);
    assert_eq!(
        report.events,
        vec![
            moved(0, 1, Down),
            moved(1, 1, Right),
            moved(1, 2, Down),
            moved(2, 2, Right),
            Event::Finished { success: true },
        ]
    );
    assert_eq!(report.outcome, Outcome::Success);
    assert_eq!(report.final_position, Position::new(2, 2));
    assert_eq!(report.final_direction, Right);
}

#[test]
fn test_passing_over_goal_does_not_win() {
    let level = grid("SG.");
    let report = run(&level, &[Right, Right]);
    assert_eq!(
        report.outcome,
        Outcome::Incomplete {
            reached_goal: false,
            missing_coins: 0
        }
    );
    assert_eq!(report.events.last(), Some(&Event::Finished { success: false }));
}

#[test]
fn test_start_cell_is_walkable() {
    let level = grid("S.G");
    let report = run(&level, &[Right, Left, Right, Right]);
    assert!(report.outcome.is_success());
}

// ══════════════════════════════════════════════════════════════════════════════
// Blocked
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_wall_blocks_and_halts() {
    let level = grid("S.W\n..G");
    let report = run(&level, &[Right, Right, Down]);
    assert_eq!(
        report.events,
        vec![
            moved(1, 0, Right),
            Event::Blocked {
                line: 2,
                facing: Right
            },
        ]
    );
    assert_eq!(report.outcome, Outcome::Blocked { line: 2 });
    assert_eq!(report.final_position, Position::new(1, 0));
}

#[test]
fn test_grid_edge_blocks_in_every_direction() {
    let level = grid("S");
    for dir in Direction::ALL {
        let report = run(&level, &[dir]);
        assert_eq!(
            report.events,
            vec![Event::Blocked {
                line: 1,
                facing: dir
            }]
        );
        assert_eq!(report.final_position, Position::new(0, 0));
        assert_eq!(report.final_direction, dir, "facing updated to attempted direction");
    }
}

#[test]
fn test_trace_length_is_committed_moves_plus_blocked() {
    let level = grid("S...W");
    let report = run(&level, &[Right, Right, Right, Right, Right, Right]);
    assert_eq!(report.events.len(), 3 + 1);
    assert_eq!(report.outcome, Outcome::Blocked { line: 4 });
}

#[test]
fn test_blocked_keeps_coins_collected_so_far() {
    let level = grid("SCW\n..G");
    let report = run(&level, &[Right, Right]);
    assert_eq!(report.collected, vec![Position::new(1, 0)]);
    assert_eq!(report.outcome, Outcome::Blocked { line: 2 });
}

// ══════════════════════════════════════════════════════════════════════════════
// Destroyed
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_obstacle_destroys() {
    let level = grid("SO.G");
    let report = run(&level, &[Right, Right, Right]);
    assert_eq!(
        report.events,
        vec![moved(1, 0, Right), Event::Destroyed { line: 1 }]
    );
    assert_eq!(report.outcome, Outcome::Destroyed { line: 1 });
    assert_eq!(report.final_position, Position::new(1, 0));
}

#[test]
fn test_obstacle_halts_even_when_it_is_the_last_move() {
    // The obstacle sits where the program ends; the hero never gets a
    // Finished event.
    let level = grid("SO\n.G");
    let report = run(&level, &[Right]);
    assert_eq!(report.outcome, Outcome::Destroyed { line: 1 });
    assert!(!report
        .events
        .iter()
        .any(|e| matches!(e, Event::Finished { .. })));
}

// ══════════════════════════════════════════════════════════════════════════════
// Coins
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_coin_collected_once() {
    let level = grid("SC.G");
    let report = run(&level, &[Right, Right, Left, Right, Right]);
    let collected: Vec<&Event> = report
        .events
        .iter()
        .filter(|e| matches!(e, Event::Collected { .. }))
        .collect();
    assert_eq!(
        collected,
        vec![&Event::Collected {
            position: Position::new(1, 0)
        }]
    );
    assert_eq!(report.collected_count(), 1);
    assert_eq!(report.outcome, Outcome::Success);
}

#[test]
fn test_collected_event_follows_move() {
    let level = grid("SCG");
    let report = run(&level, &[Right]);
    assert_eq!(
        &report.events[..2],
        &[
            moved(1, 0, Right),
            Event::Collected {
                position: Position::new(1, 0)
            }
        ]
    );
}

#[test]
fn test_goal_without_all_coins_is_incomplete() {
    let level = grid("S.G\nC..");
    let report = run(&level, &[Right, Right]);
    assert_eq!(
        report.outcome,
        Outcome::Incomplete {
            reached_goal: true,
            missing_coins: 1
        }
    );
}

#[test]
fn test_collected_order_is_pickup_order() {
    let level = grid("S.C\nC.G");
    let report = run(&level, &[Down, Right, Up, Right, Down]);
    assert_eq!(
        report.collected,
        vec![Position::new(0, 1), Position::new(2, 0)]
    );
    assert!(report.outcome.is_success());
}

// ══════════════════════════════════════════════════════════════════════════════
// End-to-end scenarios
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_scenario_a_move_down_reaches_goal() {
    let report = play(&goal_below_grid(), "hero.move_down()");
    assert_eq!(report.outcome, Outcome::Success);
    assert_eq!(report.final_position, Position::new(0, 1));
}

#[test]
fn test_layout_is_row_major() {
    // layout[y][x]: moving down from (0, 0) lands on row 1, column 0.
    let report = play(&scenario_grid(), "hero.move_down()");
    assert_eq!(report.final_position, Position::new(0, 1));
    assert_eq!(
        report.outcome,
        Outcome::Incomplete {
            reached_goal: false,
            missing_coins: 0
        }
    );
}

#[test]
fn test_scenario_b_move_right_hits_wall() {
    let report = play(&scenario_grid(), "hero.move_right()");
    assert_eq!(report.outcome, Outcome::Blocked { line: 1 });
    assert_eq!(report.final_position, Position::new(0, 0));
}

#[test]
fn test_scenario_c_variable_steps() {
    let level = GridWorld::new(vec![vec![Empty, Empty, Goal]], Position::new(0, 0)).unwrap();
    let source = "steps = 2\nhero.move_right(steps)";
    let actions = compile(source).unwrap();
    assert_eq!(
        actions,
        ActionSequence::from(vec![Action::new(Right, 2), Action::new(Right, 2)])
    );
    let report = Executor::new(&level).execute(&actions);
    assert_eq!(report.outcome, Outcome::Success);
}

#[test]
fn test_scenario_d_undefined_variable() {
    let err = compile("hero.move_right(x)").unwrap_err();
    assert_eq!(err.line, 1);
}

#[test]
fn test_loop_program_collects_coins() {
    let level = grid("
        SC.C.
        ....G
    ");
    let source = "\
# zig along the top row
for i in range(4):
    hero.move_right()
hero.move_down()";
    let report = play(&level, source);
    assert_eq!(report.collected_count(), 2);
    assert!(report.outcome.is_success());
}

#[test]
fn test_blocked_line_points_into_loop_body() {
    let level = grid("S..W");
    let source = "n = 5\nfor i in range(n):\n    hero.move_right()";
    let report = play(&level, source);
    assert_eq!(report.outcome, Outcome::Blocked { line: 3 });
}

// ══════════════════════════════════════════════════════════════════════════════
// Determinism
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_execution_determinism_100_iterations() {
    let level = grid("S.C\nCOG\n...");
    let actions = moves(&[Right, Right, Down, Left, Left, Down, Right, Right, Up]);
    let first = Executor::new(&level).execute(&actions);
    for i in 0..100 {
        let report = Executor::new(&level).execute(&actions);
        assert_eq!(first, report, "Determinism failure at iteration {i}");
    }
}

#[test]
fn test_report_json_shape() {
    let report = play(&scenario_grid(), "hero.move_right()");
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"]["kind"], "blocked");
    assert_eq!(json["outcome"]["line"], 1);
    assert_eq!(json["events"][0]["kind"], "blocked");
    assert_eq!(json["final_direction"], "RIGHT");
}
