//! Level invariants - sanity checks that detect bugs.
//!
//! Generation and the turn engine should never break these. A violation
//! means a bug, not a bad move by the player.

use crate::grid::{guaranteed_path, Grid, TileType, ZOE_COORD};
use crate::progression::ProfileStore;
use crate::session::GameSession;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check the layout rules of a grid.
///
/// Consumed tiles are ignored where the engine legitimately rewrites them
/// (a found Zoe turns into a normal tile).
#[must_use]
pub fn check_grid(grid: &Grid) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let goal = grid.goal();

    let goals: Vec<_> = grid
        .iter()
        .filter(|(_, t)| t.tile_type == TileType::Goal)
        .map(|(c, _)| c)
        .collect();
    if goals != [goal] {
        violations.push(violation(format!("expected a single goal at {goal}, found {goals:?}")));
    }

    for coord in guaranteed_path(grid.rows(), grid.cols()) {
        if coord == goal {
            continue;
        }
        if let Some(t) = grid.tile_type(coord)
            && t != TileType::Normal
        {
            violations.push(violation(format!("border route tile {coord} is {t:?}")));
        }
    }

    if grid.tile_type(grid.start()) != Some(TileType::Normal) {
        violations.push(violation(format!("start tile {} is not normal", grid.start())));
    }

    match grid.count(TileType::Zoe) {
        0 => {}
        1 => {
            if grid.find(TileType::Zoe) != Some(ZOE_COORD) {
                violations.push(violation(format!("zoe is not at {ZOE_COORD}")));
            }
        }
        n => violations.push(violation(format!("{n} zoe tiles on one grid"))),
    }

    if grid.count(TileType::Key) > 1 {
        violations.push(violation(format!("{} key tiles on one grid", grid.count(TileType::Key))));
    }

    violations
}

/// Check a live session: its grid plus the player state.
#[must_use]
pub fn check_session<S: ProfileStore>(session: &GameSession<S>) -> Vec<InvariantViolation> {
    let mut violations = check_grid(session.grid());
    let engine = session.engine();
    let player = engine.player();

    if !session.grid().in_bounds(player.position) {
        violations.push(violation(format!("player at {} is off the grid", player.position)));
    }
    if session.grid().tile_type(player.position) == Some(TileType::Blocked) {
        violations.push(violation(format!("player stands on blocked tile {}", player.position)));
    }
    if session.grid().get(player.position).is_some_and(|t| !t.explored) {
        violations.push(violation(format!("player tile {} is unexplored", player.position)));
    }
    if player.energy < 0 {
        violations.push(violation(format!("energy {} is negative", player.energy)));
    }
    if !engine.phase().is_terminal() && player.energy == 0 {
        violations.push(violation("energy is zero but the level is still running".to_string()));
    }
    if player.has_found_zoe_this_level && session.grid().count(TileType::Zoe) > 0 {
        violations.push(violation("zoe is found but still on the grid".to_string()));
    }

    for (id, value) in &session.profile().trait_affinities {
        if !(0.0..=100.0).contains(value) {
            violations.push(violation(format!("affinity {id} = {value} is out of range")));
        }
    }

    violations
}

/// Assert all session invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants<S: ProfileStore>(session: &GameSession<S>) {
    let violations = check_session(session);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Level invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants<S: ProfileStore>(_session: &GameSession<S>) {}
