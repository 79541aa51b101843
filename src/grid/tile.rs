//! Tile types and per-tile state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Kind of content on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileType {
    /// Open ground.
    Normal,
    /// Impassable rock.
    Blocked,
    /// Shallow water - passable, but wading in ends movement for the turn.
    Water,
    /// Energy cache, collected by poking it.
    Energy,
    /// A key, collected by poking it.
    Key,
    /// Zoe's hiding spot.
    Zoe,
    /// The exit. Reaching it with Zoe wins the level.
    Goal,
}

impl TileType {
    /// Check if the character can step onto this tile.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, TileType::Blocked)
    }

    /// Single-character glyph used by text renderers.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            TileType::Normal => '.',
            TileType::Blocked => '#',
            TileType::Water => '~',
            TileType::Energy => '+',
            TileType::Key => 'k',
            TileType::Zoe => 'Z',
            TileType::Goal => 'G',
        }
    }
}

/// Marker left on a tile by player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Effect {
    /// The tile's content was revealed by sensing.
    Sensed,
    /// The tile was poked.
    Poked,
    /// The character stood on this tile.
    Visited,
}

/// Whether a tile's content is still available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileState {
    /// Untouched.
    #[default]
    Active,
    /// Content has been used up.
    Consumed,
}

/// A single tile on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Content of the tile.
    pub tile_type: TileType,
    /// Markers left by actions.
    pub effects: BTreeSet<Effect>,
    /// Whether the content has been used.
    pub state: TileState,
    /// Whether the tile has ever been inside the character's vision.
    pub explored: bool,
}

impl Tile {
    /// Create a fresh, unexplored tile of the given type.
    #[must_use]
    pub const fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            effects: BTreeSet::new(),
            state: TileState::Active,
            explored: false,
        }
    }

    /// Create a normal tile.
    #[must_use]
    pub const fn normal() -> Self {
        Self::new(TileType::Normal)
    }

    /// Check if the tile's content can still be collected.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == TileState::Active
    }

    /// Mark the content as used up.
    pub fn consume(&mut self) {
        self.state = TileState::Consumed;
    }

    /// Add an action marker. Markers are a set, so repeats are harmless.
    pub fn mark(&mut self, effect: Effect) {
        self.effects.insert(effect);
    }

    /// Check if the tile carries a marker.
    #[must_use]
    pub fn has_effect(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_type_passable() {
        assert!(TileType::Normal.is_passable());
        assert!(TileType::Water.is_passable());
        assert!(TileType::Goal.is_passable());
        assert!(!TileType::Blocked.is_passable());
    }

    #[test]
    fn test_tile_consume_and_mark() {
        let mut tile = Tile::new(TileType::Energy);
        assert!(tile.is_active());
        assert!(!tile.explored);

        tile.consume();
        tile.mark(Effect::Poked);
        tile.mark(Effect::Poked);

        assert!(!tile.is_active());
        assert!(tile.has_effect(Effect::Poked));
        assert_eq!(tile.effects.len(), 1);
    }
}
