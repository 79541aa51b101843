//! Turn engine for hexzoe.
//!
//! A small state machine over one level:
//! - `Idle` waits for an action selection, `end_turn`, or `rest`
//! - `ActionPending` waits for a target for the selected action
//! - `LevelWon` / `LevelLost` are terminal until the session starts a new level
//!
//! Every intent returns an [`Outcome`]. Invalid intents are rejected without
//! touching any state; they are not errors.

mod player;
mod stats;

pub use player::{start_energy, PlayerState, ENERGY_PER_STEP};
pub use stats::LevelStats;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::grid::{Coord, Effect, Grid, TileType};
use crate::progression::{ProfileStats, TraitId};
use crate::vision;

/// Base energy cost of an undiscounted action.
pub const ACTION_COST: i32 = 2;

/// Cost of an action when the matching trait is held.
pub const DISCOUNTED_COST: i32 = 1;

/// Energy lost at the end of every turn.
pub const UPKEEP: i32 = 1;

/// Energy restored by resting.
pub const REST_GAIN: i32 = 2;

/// Base energy from an energy cache (plus luck).
pub const ENERGY_CACHE: i32 = 3;

/// Actions that need a target tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// Step onto an adjacent tile.
    Move,
    /// Reveal a nearby tile without touching it.
    Sense,
    /// Interact with a nearby tile.
    Poke,
}

impl ActionKind {
    /// Trait that halves this action's cost.
    #[must_use]
    pub const fn discount_trait(self) -> TraitId {
        match self {
            ActionKind::Move => TraitId::Pathfinder,
            ActionKind::Sense => TraitId::Senser,
            ActionKind::Poke => TraitId::Explorer,
        }
    }
}

/// Where the level stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Waiting for the next intent.
    #[default]
    Idle,
    /// An action is selected and waits for a target.
    ActionPending(ActionKind),
    /// The goal was reached with Zoe.
    LevelWon,
    /// Energy ran out.
    LevelLost,
}

impl Phase {
    /// Check if the level is over.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::LevelWon | Phase::LevelLost)
    }
}

/// Why an intent was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rejection {
    /// The intent does not fit the current phase.
    WrongPhase,
    /// The target is not on the grid.
    OutOfBounds,
    /// The target is too far for this action.
    OutOfRange,
    /// No movement points left this turn.
    NoMovementPoints,
    /// The target tile cannot be entered.
    Blocked,
}

/// Result of an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    /// The intent was applied and play continues.
    Resolved,
    /// The intent won the level.
    Won,
    /// The intent exhausted the character's energy.
    Lost,
    /// The intent was ignored; nothing changed.
    Rejected(Rejection),
    /// Movement points remain; the caller must confirm ending the turn.
    NeedsConfirmation,
}

/// Turn/action/resource state machine for one level.
///
/// The engine owns the player state and level counters; the grid is owned by
/// the caller and passed in to every mutating intent.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    phase: Phase,
    player: PlayerState,
    stats: LevelStats,
    traits: BTreeSet<TraitId>,
    movement_range: u32,
    luck: u32,
    zoe_required: bool,
}

impl TurnEngine {
    /// Set up a fresh level on `grid` and reveal the starting view.
    ///
    /// Zoe is already with the character when `has_found_zoe` is set. When she
    /// has not been found and the grid holds no Zoe tile, the goal is open
    /// without her.
    pub fn new(
        grid: &mut Grid,
        traits: BTreeSet<TraitId>,
        stats: ProfileStats,
        has_found_zoe: bool,
    ) -> Self {
        let start = grid.start();
        let zoe_required = !has_found_zoe && grid.count(TileType::Zoe) > 0;
        let player = PlayerState::new(
            start,
            start_energy(grid.rows(), grid.cols()),
            stats.movement_range,
            has_found_zoe,
        );
        let level_stats = LevelStats {
            zoe_found: has_found_zoe,
            ..LevelStats::default()
        };

        if let Some(tile) = grid.get_mut(start) {
            tile.mark(Effect::Visited);
        }
        vision::reveal(grid, start, &traits);

        Self {
            phase: Phase::Idle,
            player,
            stats: level_stats,
            traits,
            movement_range: stats.movement_range,
            luck: stats.luck,
            zoe_required,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Player state.
    #[must_use]
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Level counters.
    #[must_use]
    pub const fn stats(&self) -> &LevelStats {
        &self.stats
    }

    /// Active traits for this level.
    #[must_use]
    pub const fn traits(&self) -> &BTreeSet<TraitId> {
        &self.traits
    }

    /// Energy cost of an action under the current traits.
    #[must_use]
    pub fn cost(&self, kind: ActionKind) -> i32 {
        if self.traits.contains(&kind.discount_trait()) {
            DISCOUNTED_COST
        } else {
            ACTION_COST
        }
    }

    /// Select an action and get the tiles it may target.
    ///
    /// The returned set is advisory, for highlighting. Selecting again while
    /// an action is pending switches to the new action.
    pub fn select_action(&mut self, grid: &Grid, kind: ActionKind) -> Vec<Coord> {
        if self.phase.is_terminal() {
            log::debug!("select {kind:?} ignored: level is over");
            return Vec::new();
        }
        self.set_phase(Phase::ActionPending(kind));
        self.targets(grid, kind)
    }

    /// Tiles an action may target from the current position.
    #[must_use]
    pub fn targets(&self, grid: &Grid, kind: ActionKind) -> Vec<Coord> {
        let here = self.player.position;
        let mut targets = grid.adjacent(here);
        if kind != ActionKind::Move {
            targets.insert(0, here);
        }
        targets
    }

    /// Drop a pending action without resolving it.
    pub fn cancel_action(&mut self) -> Outcome {
        match self.phase {
            Phase::ActionPending(_) => {
                self.set_phase(Phase::Idle);
                Outcome::Resolved
            }
            _ => self.reject(Rejection::WrongPhase, "cancel"),
        }
    }

    /// Resolve a target for whichever action is pending.
    pub fn attempt(&mut self, grid: &mut Grid, target: Coord) -> Outcome {
        match self.phase {
            Phase::ActionPending(ActionKind::Move) => self.attempt_move(grid, target),
            Phase::ActionPending(ActionKind::Sense) => self.attempt_sense(grid, target),
            Phase::ActionPending(ActionKind::Poke) => self.attempt_poke(grid, target),
            _ => self.reject(Rejection::WrongPhase, "target"),
        }
    }

    /// Move to an adjacent tile.
    pub fn attempt_move(&mut self, grid: &mut Grid, target: Coord) -> Outcome {
        if let Err(why) = self.check_target(grid, ActionKind::Move, target) {
            return self.reject(why, "move");
        }
        if self.player.movement_points == 0 {
            return self.reject(Rejection::NoMovementPoints, "move");
        }
        let Some(tile_type) = grid.tile_type(target) else {
            return self.reject(Rejection::OutOfBounds, "move");
        };
        if !tile_type.is_passable() {
            return self.reject(Rejection::Blocked, "move");
        }

        self.pay(self.cost(ActionKind::Move));
        self.player.movement_points -= 1;
        self.player.position = target;
        self.stats.tiles_moved += 1;

        if let Some(tile) = grid.get_mut(target) {
            tile.mark(Effect::Visited);
            match tile.tile_type {
                TileType::Zoe => {
                    tile.tile_type = TileType::Normal;
                    tile.consume();
                    self.find_zoe();
                }
                TileType::Water => self.player.movement_points = 0,
                TileType::Normal
                | TileType::Blocked
                | TileType::Energy
                | TileType::Key
                | TileType::Goal => {}
            }
        }
        vision::reveal(grid, target, &self.traits);

        self.settle(tile_type == TileType::Goal)
    }

    /// Reveal a tile within reach without touching it.
    pub fn attempt_sense(&mut self, grid: &mut Grid, target: Coord) -> Outcome {
        if let Err(why) = self.check_target(grid, ActionKind::Sense, target) {
            return self.reject(why, "sense");
        }

        self.pay(self.cost(ActionKind::Sense));
        self.stats.tiles_sensed += 1;
        if let Some(tile) = grid.get_mut(target) {
            tile.mark(Effect::Sensed);
            tile.explored = true;
        }

        self.settle(false)
    }

    /// Interact with a tile within reach.
    pub fn attempt_poke(&mut self, grid: &mut Grid, target: Coord) -> Outcome {
        if let Err(why) = self.check_target(grid, ActionKind::Poke, target) {
            return self.reject(why, "poke");
        }

        self.pay(self.cost(ActionKind::Poke));
        self.stats.tiles_interacted += 1;

        let mut at_goal = false;
        if let Some(tile) = grid.get_mut(target) {
            tile.mark(Effect::Poked);
            tile.explored = true;
            match tile.tile_type {
                TileType::Zoe => {
                    tile.tile_type = TileType::Normal;
                    tile.consume();
                    self.find_zoe();
                }
                TileType::Energy if tile.is_active() => {
                    tile.consume();
                    let luck = i32::try_from(self.luck).unwrap_or(i32::MAX);
                    self.player.restore(ENERGY_CACHE.saturating_add(luck));
                }
                TileType::Key if tile.is_active() => {
                    tile.consume();
                    self.player.has_key = true;
                    self.stats.key_found = true;
                }
                TileType::Goal => at_goal = true,
                TileType::Normal
                | TileType::Blocked
                | TileType::Water
                | TileType::Energy
                | TileType::Key => {}
            }
        }

        self.settle(at_goal)
    }

    /// End the turn: pay upkeep and refill movement points.
    ///
    /// With movement points left, `confirmed` must be set or the call only
    /// reports [`Outcome::NeedsConfirmation`].
    pub fn end_turn(&mut self, confirmed: bool) -> Outcome {
        if let Some(outcome) = self.turn_boundary_guard(confirmed, "end turn") {
            return outcome;
        }

        self.stats.turns += 1;
        self.player.movement_points = self.movement_range;
        self.pay(UPKEEP);

        self.settle(false)
    }

    /// Rest: skip the turn and recover energy.
    ///
    /// Same confirmation rule as [`TurnEngine::end_turn`].
    pub fn rest(&mut self, confirmed: bool) -> Outcome {
        if let Some(outcome) = self.turn_boundary_guard(confirmed, "rest") {
            return outcome;
        }

        self.stats.turns += 1;
        self.stats.rests_used += 1;
        let bonus = i32::from(self.traits.contains(&TraitId::Explorer));
        self.player.restore(REST_GAIN + bonus);
        self.player.movement_points = self.movement_range;

        Outcome::Resolved
    }

    fn turn_boundary_guard(&self, confirmed: bool, what: &str) -> Option<Outcome> {
        if self.phase != Phase::Idle {
            return Some(self.reject(Rejection::WrongPhase, what));
        }
        if self.player.movement_points > 0 && !confirmed {
            return Some(Outcome::NeedsConfirmation);
        }
        None
    }

    fn check_target(&self, grid: &Grid, kind: ActionKind, target: Coord) -> Result<(), Rejection> {
        if self.phase != Phase::ActionPending(kind) {
            return Err(Rejection::WrongPhase);
        }
        if !grid.in_bounds(target) {
            return Err(Rejection::OutOfBounds);
        }
        if !self.targets(grid, kind).contains(&target) {
            return Err(Rejection::OutOfRange);
        }
        Ok(())
    }

    fn pay(&mut self, cost: i32) {
        self.player.spend(cost);
        self.stats.spend(cost.unsigned_abs());
    }

    fn find_zoe(&mut self) {
        self.player.has_found_zoe_this_level = true;
        self.stats.zoe_found = true;
    }

    /// Finish an applied intent: check win, then loss, then return to idle.
    fn settle(&mut self, at_goal: bool) -> Outcome {
        if at_goal && (self.player.has_found_zoe_this_level || !self.zoe_required) {
            self.stats.goal_reached = true;
            self.player.energy = self.player.energy.max(0);
            self.set_phase(Phase::LevelWon);
            return Outcome::Won;
        }
        if self.player.is_exhausted() {
            self.player.energy = 0;
            self.set_phase(Phase::LevelLost);
            return Outcome::Lost;
        }
        self.set_phase(Phase::Idle);
        Outcome::Resolved
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.player.current_action = match phase {
            Phase::ActionPending(kind) => Some(kind),
            Phase::Idle | Phase::LevelWon | Phase::LevelLost => None,
        };
    }

    fn reject(&self, why: Rejection, what: &str) -> Outcome {
        log::debug!("{what} rejected: {why:?} (phase {:?})", self.phase);
        Outcome::Rejected(why)
    }
}
