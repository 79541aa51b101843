// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Hexzoe: a turn-based hex-grid exploration puzzle engine.
//!
//! A character crosses a fog-covered offset-hex grid from the top-left corner
//! to the goal in the bottom-right, spending energy on every action. Zoe, a
//! companion hidden on the grid, must be found before the goal counts. Play
//! style builds affinities that unlock persistent traits, and every few levels
//! a new generation begins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   GameSession (level lifecycle)     │
//! ├──────────────────┬──────────────────┤
//! │   TurnEngine     │  Progression     │
//! ├──────────────────┤  (profile,       │
//! │   Vision         │   ProfileStore)  │
//! ├──────────────────┴──────────────────┤
//! │   Grid (tiles, generation)          │
//! └─────────────────────────────────────┘
//! ```
//!
//! The engine is synchronous and free of I/O. Rendering reads
//! [`GameSession::snapshot`]; persistence goes through [`ProfileStore`].

pub mod config;
pub mod error;
pub mod grid;
pub mod invariants;
pub mod progression;
pub mod session;
pub mod turn;
pub mod vision;

pub use config::{Dimensions, Settings};
pub use error::{ConfigError, StoreError};

// Re-export key types at crate root for convenience
pub use grid::{Coord, Effect, Grid, Tile, TileState, TileType};
pub use progression::{
    EvolutionStage, JsonFileStore, MemoryStore, Profile, ProfileStats, ProfileStore, TraitId,
};
pub use session::{GameSession, LevelResult, SessionPhase, Snapshot};
pub use turn::{ActionKind, LevelStats, Outcome, Phase, PlayerState, Rejection, TurnEngine};
