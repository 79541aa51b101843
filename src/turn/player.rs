//! Player state management.

use serde::{Deserialize, Serialize};

use crate::grid::Coord;
use crate::turn::ActionKind;

/// Energy granted per step of the border route at level start.
pub const ENERGY_PER_STEP: i32 = 5;

/// Starting energy for a grid: `5 * (rows + cols - 2)`.
#[must_use]
pub fn start_energy(rows: u8, cols: u8) -> i32 {
    ENERGY_PER_STEP * (i32::from(rows) + i32::from(cols) - 2)
}

/// State of the character within one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current tile.
    pub position: Coord,
    /// Remaining energy. Zero or below loses the level.
    pub energy: i32,
    /// Moves left this turn.
    pub movement_points: u32,
    /// Action waiting for a target, if any.
    pub current_action: Option<ActionKind>,
    /// Zoe is with the character for this level.
    pub has_found_zoe_this_level: bool,
    /// The key has been collected this level.
    pub has_key: bool,
}

impl PlayerState {
    /// Create the state for a fresh level.
    #[must_use]
    pub const fn new(position: Coord, energy: i32, movement_points: u32, zoe_with_you: bool) -> Self {
        Self {
            position,
            energy,
            movement_points,
            current_action: None,
            has_found_zoe_this_level: zoe_with_you,
            has_key: false,
        }
    }

    /// Pay an energy cost. Energy may dip below zero until the loss check runs.
    pub fn spend(&mut self, cost: i32) {
        self.energy -= cost;
    }

    /// Gain energy.
    pub fn restore(&mut self, amount: i32) {
        self.energy += amount;
    }

    /// Check if the character is out of energy.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.energy <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_energy() {
        assert_eq!(start_energy(5, 5), 40);
        assert_eq!(start_energy(3, 3), 20);
        assert_eq!(start_energy(20, 10), 140);
    }

    #[test]
    fn test_player_spend_and_restore() {
        let mut player = PlayerState::new(Coord::new(0, 0), 3, 2, false);
        player.spend(2);
        assert_eq!(player.energy, 1);
        assert!(!player.is_exhausted());

        player.spend(2);
        assert_eq!(player.energy, -1);
        assert!(player.is_exhausted());

        player.restore(4);
        assert_eq!(player.energy, 3);
    }
}
