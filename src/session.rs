//! Level lifecycle.
//!
//! [`GameSession`] owns everything one player has going: the current grid,
//! the turn engine, the persistent profile and the store it is saved to. It
//! forwards intents to the engine and reacts when a level ends: a win folds
//! the level into the profile and saves it, a loss waits for a restart.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::Dimensions;
use crate::error::ConfigError;
use crate::grid::{Coord, Grid};
use crate::progression::{reset_profile, EvolutionStage, Profile, ProfileStore, TraitId};
use crate::turn::{ActionKind, LevelStats, Outcome, Phase, PlayerState, TurnEngine};

/// Where the session stands between levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    /// A level is in progress.
    #[default]
    Playing,
    /// The level was won; waiting for `continue_level`.
    AwaitingContinue,
    /// The level was lost; waiting for `restart_level`.
    AwaitingRestart,
}

/// Summary of a finished level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelResult {
    /// The goal was reached.
    pub won: bool,
    /// Turns taken.
    pub turns: u32,
    /// Energy spent.
    pub energy_used: u32,
    /// Running affinities after the level (empty on a loss).
    pub affinities: BTreeMap<TraitId, f64>,
    /// Traits granted by the level.
    pub new_traits: Vec<TraitId>,
    /// Experience gained.
    pub xp_gained: u64,
    /// The level closed a generation.
    pub generation_advanced: bool,
}

/// Read-only view of a session for renderers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Dimensions used for the next level.
    pub dims: Dimensions,
    /// Levels started in this session, counting the current one.
    pub level: u32,
    /// Session phase.
    pub session_phase: SessionPhase,
    /// Turn engine phase.
    pub phase: Phase,
    /// The current grid.
    pub grid: Grid,
    /// Player state.
    pub player: PlayerState,
    /// Level counters.
    pub stats: LevelStats,
    /// Traits active this level.
    pub traits: BTreeSet<TraitId>,
    /// Profile generation.
    pub generation: u32,
    /// Profile evolution stage.
    pub evolution_stage: EvolutionStage,
    /// Profile experience.
    pub xp: u64,
    /// Result of the last finished level.
    pub last_result: Option<LevelResult>,
}

/// One player's game: current level plus persistent profile.
#[derive(Debug)]
pub struct GameSession<S: ProfileStore> {
    dims: Dimensions,
    /// Size of the level in play; a restart rebuilds at this size.
    level_dims: Dimensions,
    seed: u64,
    level: u32,
    grid: Grid,
    engine: TurnEngine,
    profile: Profile,
    store: S,
    phase: SessionPhase,
    last_result: Option<LevelResult>,
}

impl<S: ProfileStore> GameSession<S> {
    /// Load the profile from `store` and start the first level.
    ///
    /// A missing profile starts from defaults. A profile that cannot be read
    /// is logged and also replaced by defaults; play never stops for storage.
    /// Each level of the session uses the next seed after the previous one.
    pub fn new(dims: Dimensions, seed: u64, mut store: S) -> Self {
        let mut profile = match store.load() {
            Ok(Some(profile)) => profile,
            Ok(None) => Profile::default(),
            Err(e) => {
                log::warn!("could not load profile, starting fresh: {e}");
                Profile::default()
            }
        };
        profile.clamp_affinities();

        let mut grid = Grid::generate_seeded(dims, profile.has_found_zoe, seed);
        let engine = engine_for(&mut grid, &profile);
        let session = Self {
            dims,
            level_dims: dims,
            seed,
            level: 1,
            grid,
            engine,
            profile,
            store,
            phase: SessionPhase::Playing,
            last_result: None,
        };
        session.log_level_start();
        session
    }

    /// Build a fresh level from the current dimensions and profile.
    pub fn start_level(&mut self) {
        self.generate_level(self.dims);
    }

    fn generate_level(&mut self, dims: Dimensions) {
        // Level n (1-based) is generated from seed + n - 1.
        let seed = self.seed.wrapping_add(u64::from(self.level));
        let grid = Grid::generate_seeded(dims, self.profile.has_found_zoe, seed);
        self.load_level(grid);
    }

    /// Start a level on a prepared grid instead of a generated one.
    ///
    /// The grid's own size wins for this level; the session dimensions are
    /// left alone.
    pub fn load_level(&mut self, mut grid: Grid) {
        self.level += 1;
        self.level_dims =
            Dimensions::new(u32::from(grid.rows()), u32::from(grid.cols())).unwrap_or(self.dims);
        self.engine = engine_for(&mut grid, &self.profile);
        self.grid = grid;
        self.phase = SessionPhase::Playing;
        self.log_level_start();
    }

    fn log_level_start(&self) {
        log::info!(
            "level {} started on {}x{} (generation {}, traits {:?})",
            self.level,
            self.grid.rows(),
            self.grid.cols(),
            self.profile.generation,
            self.profile.traits
        );
    }

    /// Select an action; returns the tiles to highlight.
    pub fn select_action(&mut self, kind: ActionKind) -> Vec<Coord> {
        self.engine.select_action(&self.grid, kind)
    }

    /// Drop the pending action.
    pub fn cancel_action(&mut self) -> Outcome {
        self.engine.cancel_action()
    }

    /// Resolve the pending action on `target`.
    pub fn attempt(&mut self, target: Coord) -> Outcome {
        let outcome = self.engine.attempt(&mut self.grid, target);
        self.observe(outcome)
    }

    /// Move to an adjacent tile.
    pub fn attempt_move(&mut self, target: Coord) -> Outcome {
        let outcome = self.engine.attempt_move(&mut self.grid, target);
        self.observe(outcome)
    }

    /// Sense a tile within reach.
    pub fn attempt_sense(&mut self, target: Coord) -> Outcome {
        let outcome = self.engine.attempt_sense(&mut self.grid, target);
        self.observe(outcome)
    }

    /// Poke a tile within reach.
    pub fn attempt_poke(&mut self, target: Coord) -> Outcome {
        let outcome = self.engine.attempt_poke(&mut self.grid, target);
        self.observe(outcome)
    }

    /// End the turn.
    pub fn end_turn(&mut self, confirmed: bool) -> Outcome {
        let outcome = self.engine.end_turn(confirmed);
        self.observe(outcome)
    }

    /// Rest for a turn.
    pub fn rest(&mut self, confirmed: bool) -> Outcome {
        let outcome = self.engine.rest(confirmed);
        self.observe(outcome)
    }

    fn observe(&mut self, outcome: Outcome) -> Outcome {
        match outcome {
            Outcome::Won => self.on_victory(),
            Outcome::Lost => self.on_defeat(),
            Outcome::Resolved | Outcome::Rejected(_) | Outcome::NeedsConfirmation => {}
        }
        outcome
    }

    fn on_victory(&mut self) {
        let stats = *self.engine.stats();
        let report = self.profile.fold_level(&stats);

        let generation_advanced = self.profile.generation_due();
        if generation_advanced {
            self.profile.advance_generation();
            log::info!(
                "generation {} begins ({:?})",
                self.profile.generation,
                self.profile.evolution_stage
            );
        }
        self.persist();

        log::info!(
            "level {} won in {} turns using {} energy; new traits {:?}",
            self.level,
            stats.turns,
            stats.energy_used,
            report.new_traits
        );
        self.last_result = Some(LevelResult {
            won: true,
            turns: stats.turns,
            energy_used: stats.energy_used,
            affinities: report.affinities,
            new_traits: report.new_traits,
            xp_gained: report.xp_gained,
            generation_advanced,
        });
        self.phase = SessionPhase::AwaitingContinue;
    }

    fn on_defeat(&mut self) {
        let stats = *self.engine.stats();
        log::info!(
            "level {} lost after {} turns using {} energy",
            self.level,
            stats.turns,
            stats.energy_used
        );
        self.last_result = Some(LevelResult {
            won: false,
            turns: stats.turns,
            energy_used: stats.energy_used,
            ..LevelResult::default()
        });
        self.phase = SessionPhase::AwaitingRestart;
    }

    /// Move on after a win. Returns `false` if no win is waiting.
    pub fn continue_level(&mut self) -> bool {
        if self.phase != SessionPhase::AwaitingContinue {
            log::debug!("continue ignored in {:?}", self.phase);
            return false;
        }
        self.start_level();
        true
    }

    /// Try again after a loss, on a new grid of the lost level's size.
    /// Returns `false` if no loss is waiting.
    pub fn restart_level(&mut self) -> bool {
        if self.phase != SessionPhase::AwaitingRestart {
            log::debug!("restart ignored in {:?}", self.phase);
            return false;
        }
        self.generate_level(self.level_dims);
        true
    }

    /// Change the grid size used from the next new level on.
    ///
    /// Restarting a lost level keeps that level's size.
    ///
    /// # Errors
    ///
    /// Returns an error, and changes nothing, if either value is outside
    /// `[3, 20]`.
    pub fn resize(&mut self, rows: u32, cols: u32) -> Result<(), ConfigError> {
        let dims = Dimensions::new(rows, cols)?;
        log::info!("grid size set to {dims} from the next level");
        self.dims = dims;
        Ok(())
    }

    /// Wipe the profile back to defaults and save it.
    ///
    /// The level in progress keeps its traits; the next level uses the fresh
    /// profile.
    pub fn reset_profile(&mut self) {
        self.profile = reset_profile();
        self.persist();
        log::info!("profile reset");
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.profile) {
            log::warn!("could not save profile: {e}");
        }
    }

    /// Renderer view of the session.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            dims: self.dims,
            level: self.level,
            session_phase: self.phase,
            phase: self.engine.phase(),
            grid: self.grid.clone(),
            player: *self.engine.player(),
            stats: *self.engine.stats(),
            traits: self.engine.traits().clone(),
            generation: self.profile.generation,
            evolution_stage: self.profile.evolution_stage,
            xp: self.profile.xp,
            last_result: self.last_result.clone(),
        }
    }

    /// Session phase.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Dimensions for the next level.
    #[must_use]
    pub const fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Levels started so far.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// The current grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The turn engine for the current level.
    #[must_use]
    pub const fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// The persistent profile.
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// The profile store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Result of the last finished level.
    #[must_use]
    pub const fn last_result(&self) -> Option<&LevelResult> {
        self.last_result.as_ref()
    }
}

fn engine_for(grid: &mut Grid, profile: &Profile) -> TurnEngine {
    TurnEngine::new(grid, profile.traits.clone(), profile.stats, profile.has_found_zoe)
}
