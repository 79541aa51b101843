//! Per-level counters.

use serde::{Deserialize, Serialize};

/// Counters for a single level, folded into the profile on victory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    /// Turns taken, counting the one in progress.
    pub turns: u32,
    /// Energy spent on actions and upkeep.
    pub energy_used: u32,
    /// Times the character rested.
    pub rests_used: u32,
    /// Successful moves.
    pub tiles_moved: u32,
    /// Successful senses.
    pub tiles_sensed: u32,
    /// Successful pokes.
    pub tiles_interacted: u32,
    /// Zoe was found (or already at the character's side).
    pub zoe_found: bool,
    /// The goal was reached with Zoe.
    pub goal_reached: bool,
    /// The key was collected.
    pub key_found: bool,
}

impl Default for LevelStats {
    fn default() -> Self {
        Self {
            turns: 1,
            energy_used: 0,
            rests_used: 0,
            tiles_moved: 0,
            tiles_sensed: 0,
            tiles_interacted: 0,
            zoe_found: false,
            goal_reached: false,
            key_found: false,
        }
    }
}

impl LevelStats {
    /// Record an energy cost.
    pub fn spend(&mut self, cost: u32) {
        self.energy_used = self.energy_used.saturating_add(cost);
    }
}
