//! Procedural level generation.

use std::collections::{HashSet, VecDeque};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::Dimensions;
use crate::grid::{Coord, Grid, TileType};

/// Fixed hiding spot for Zoe.
pub const ZOE_COORD: Coord = Coord::new(2, 2);

/// Number of blocked tiles for a grid: `2 * floor((min - 2) / 2)`.
#[must_use]
pub fn blocked_count(rows: u8, cols: u8) -> usize {
    let min = rows.min(cols);
    if min < 3 {
        return 0;
    }
    2 * usize::from((min - 2) / 2)
}

/// Number of water tiles: half the blocked tiles actually placed.
#[must_use]
pub const fn water_count(blocks_placed: usize) -> usize {
    blocks_placed / 2
}

/// Number of energy tiles: `floor(min / 2)`.
#[must_use]
pub fn energy_count(rows: u8, cols: u8) -> usize {
    usize::from(rows.min(cols) / 2)
}

/// The border route kept clear on every level: the top row left to right,
/// then the right column top to bottom.
#[must_use]
pub fn guaranteed_path(rows: u8, cols: u8) -> Vec<Coord> {
    let top = (0..cols).map(|c| Coord::new(0, c));
    let right = (1..rows).map(|r| Coord::new(r, cols - 1));
    top.chain(right).collect()
}

impl Grid {
    /// Generate a level from a seed.
    ///
    /// The same `(dims, has_found_zoe_already, seed)` always yields the same grid.
    #[must_use]
    pub fn generate_seeded(dims: Dimensions, has_found_zoe_already: bool, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::generate(dims, has_found_zoe_already, &mut rng)
    }

    /// Generate a level.
    ///
    /// Placement order is fixed: blocked, water, Zoe, key, energy. Each kind
    /// draws from the front of one shuffled pool of candidate positions, so no
    /// position is used twice. The top row and right column never enter the
    /// pool, which leaves a clear route from start to goal.
    pub fn generate<R: Rng + ?Sized>(
        dims: Dimensions,
        has_found_zoe_already: bool,
        rng: &mut R,
    ) -> Self {
        let mut grid = Grid::new(dims);
        let (rows, cols) = (dims.rows(), dims.cols());
        let goal = grid.goal();
        grid.set_type(goal, TileType::Goal);

        let mut excluded: HashSet<Coord> = guaranteed_path(rows, cols).into_iter().collect();
        excluded.insert(grid.start());
        excluded.insert(goal);

        let mut pool: Vec<Coord> = grid
            .iter()
            .map(|(coord, _)| coord)
            .filter(|coord| !excluded.contains(coord))
            .collect();
        pool.shuffle(rng);
        let mut pool = VecDeque::from(pool);

        let blocks = place(&mut grid, &mut pool, TileType::Blocked, blocked_count(rows, cols));
        let waters = place(&mut grid, &mut pool, TileType::Water, water_count(blocks));

        let zoe_placed = if has_found_zoe_already {
            false
        } else if let Some(pos) = pool.iter().position(|c| *c == ZOE_COORD) {
            pool.remove(pos);
            grid.set_type(ZOE_COORD, TileType::Zoe);
            true
        } else {
            false
        };

        let keys = place(&mut grid, &mut pool, TileType::Key, 1);
        let energies = place(&mut grid, &mut pool, TileType::Energy, energy_count(rows, cols));

        log::debug!(
            "generated {rows}x{cols} grid: {blocks} blocked, {waters} water, {keys} key, {energies} energy, zoe={zoe_placed}"
        );

        grid
    }
}

/// Pop up to `count` positions off the front of the pool and set their type.
///
/// Returns how many were actually placed.
fn place(
    grid: &mut Grid,
    pool: &mut VecDeque<Coord>,
    tile_type: TileType,
    count: usize,
) -> usize {
    let mut placed = 0;
    while placed < count {
        let Some(coord) = pool.pop_front() else {
            break;
        };
        grid.set_type(coord, tile_type);
        placed += 1;
    }
    placed
}
