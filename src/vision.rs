//! Fog of war.
//!
//! Vision is a Chebyshev box around the character whose radius grows with the
//! Zoe traits. Anything that has ever been inside it stays explored for the
//! rest of the level.

use std::collections::BTreeSet;

use crate::grid::{Coord, Grid};
use crate::progression::TraitId;

/// Vision radius granted by a trait set.
#[must_use]
pub fn vision_radius(traits: &BTreeSet<TraitId>) -> u8 {
    if traits.contains(&TraitId::ZoeMaster) {
        3
    } else if traits.contains(&TraitId::ZoeInitiate) {
        2
    } else {
        1
    }
}

/// Coordinates currently visible from `from`.
#[must_use]
pub fn visible(grid: &Grid, from: Coord, traits: &BTreeSet<TraitId>) -> Vec<Coord> {
    grid.tiles_in_range(from, vision_radius(traits))
}

/// Mark everything visible from `from` as explored.
///
/// Exploration only ever grows. Returns the number of tiles newly explored,
/// so a repeated call with the same inputs returns 0.
pub fn reveal(grid: &mut Grid, from: Coord, traits: &BTreeSet<TraitId>) -> usize {
    let mut newly = 0;
    for coord in visible(grid, from, traits) {
        if let Some(tile) = grid.get_mut(coord)
            && !tile.explored
        {
            tile.explored = true;
            newly += 1;
        }
    }
    newly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dimensions;

    fn grid(rows: u32, cols: u32) -> Grid {
        Grid::new(Dimensions::new(rows, cols).unwrap())
    }

    #[test]
    fn test_vision_radius_by_trait() {
        let mut traits = BTreeSet::new();
        assert_eq!(vision_radius(&traits), 1);

        traits.insert(TraitId::Pathfinder);
        assert_eq!(vision_radius(&traits), 1);

        traits.insert(TraitId::ZoeInitiate);
        assert_eq!(vision_radius(&traits), 2);

        traits.insert(TraitId::ZoeMaster);
        assert_eq!(vision_radius(&traits), 3);
    }

    #[test]
    fn test_reveal_marks_box() {
        let mut grid = grid(6, 6);
        let newly = reveal(&mut grid, Coord::new(2, 2), &BTreeSet::new());
        assert_eq!(newly, 9);
        assert_eq!(grid.explored_count(), 9);
        assert!(grid.get(Coord::new(1, 3)).unwrap().explored);
        assert!(!grid.get(Coord::new(4, 4)).unwrap().explored);
    }

    #[test]
    fn test_reveal_idempotent() {
        let mut grid = grid(6, 6);
        let traits = BTreeSet::from([TraitId::ZoeInitiate]);

        reveal(&mut grid, Coord::new(0, 0), &traits);
        let first = grid.clone();
        let newly = reveal(&mut grid, Coord::new(0, 0), &traits);

        assert_eq!(newly, 0);
        assert_eq!(grid, first);
    }

    #[test]
    fn test_reveal_is_monotonic() {
        let mut grid = grid(8, 8);
        let traits = BTreeSet::new();

        reveal(&mut grid, Coord::new(0, 0), &traits);
        reveal(&mut grid, Coord::new(5, 5), &traits);

        // Earlier exploration survives moving away.
        assert!(grid.get(Coord::new(0, 0)).unwrap().explored);
        assert!(grid.get(Coord::new(5, 5)).unwrap().explored);
        assert_eq!(grid.explored_count(), 4 + 9);
    }
}
