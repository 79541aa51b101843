//! Property-based tests for level generation, vision, and energy.
//!
//! Run with: cargo test --release prop_grid

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;

use proptest::prelude::*;

use hexzoe::grid::{blocked_count, energy_count, guaranteed_path, water_count, ZOE_COORD};
use hexzoe::invariants::check_grid;
use hexzoe::vision::reveal;
use hexzoe::{ActionKind, Coord, Dimensions, Grid, Outcome, ProfileStats, TileType, TraitId, TurnEngine};

fn trait_set(zoe_level: u8) -> BTreeSet<TraitId> {
    match zoe_level % 3 {
        0 => BTreeSet::new(),
        1 => BTreeSet::from([TraitId::ZoeInitiate]),
        _ => BTreeSet::from([TraitId::ZoeInitiate, TraitId::ZoeMaster]),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Every generated grid keeps the goal in the corner and the border route clear.
    #[test]
    fn prop_layout_rules(rows in 3u32..=20, cols in 3u32..=20, seed in any::<u64>(), found in any::<bool>()) {
        let dims = Dimensions::new(rows, cols).unwrap();
        let grid = Grid::generate_seeded(dims, found, seed);

        prop_assert_eq!(grid.count(TileType::Goal), 1);
        prop_assert_eq!(grid.tile_type(grid.goal()), Some(TileType::Goal));

        let (r, c) = (grid.rows(), grid.cols());
        for coord in guaranteed_path(r, c) {
            if coord != grid.goal() {
                prop_assert_eq!(grid.tile_type(coord), Some(TileType::Normal));
            }
        }

        let violations = check_grid(&grid);
        prop_assert!(violations.is_empty(), "{:?}", violations);
    }

    /// Placement counts follow the size formulas.
    #[test]
    fn prop_placement_counts(rows in 3u32..=20, cols in 3u32..=20, seed in any::<u64>()) {
        let dims = Dimensions::new(rows, cols).unwrap();
        let grid = Grid::generate_seeded(dims, false, seed);
        let (r, c) = (grid.rows(), grid.cols());

        let blocked = grid.count(TileType::Blocked);
        prop_assert_eq!(blocked, blocked_count(r, c));
        prop_assert_eq!(grid.count(TileType::Water), water_count(blocked));
        prop_assert_eq!(grid.count(TileType::Energy), energy_count(r, c));
        prop_assert_eq!(grid.count(TileType::Key), 1);

        let zoe = grid.count(TileType::Zoe);
        prop_assert!(zoe <= 1);
        if zoe == 1 {
            prop_assert_eq!(grid.find(TileType::Zoe), Some(ZOE_COORD));
        }
    }

    /// Once Zoe is found she never appears on a grid again.
    #[test]
    fn prop_no_zoe_after_found(rows in 3u32..=20, cols in 3u32..=20, seed in any::<u64>()) {
        let grid = Grid::generate_seeded(Dimensions::new(rows, cols).unwrap(), true, seed);
        prop_assert_eq!(grid.count(TileType::Zoe), 0);
    }

    /// Generation is a pure function of its inputs.
    #[test]
    fn prop_generation_deterministic(rows in 3u32..=20, cols in 3u32..=20, seed in any::<u64>()) {
        let dims = Dimensions::new(rows, cols).unwrap();
        prop_assert_eq!(
            Grid::generate_seeded(dims, false, seed),
            Grid::generate_seeded(dims, false, seed)
        );
    }

    /// Revealing twice from the same place adds nothing.
    #[test]
    fn prop_reveal_idempotent(
        rows in 3u32..=20,
        cols in 3u32..=20,
        row in 0u8..20,
        col in 0u8..20,
        zoe_level in 0u8..3
    ) {
        let mut grid = Grid::new(Dimensions::new(rows, cols).unwrap());
        let from = Coord::new(row % grid.rows(), col % grid.cols());
        let traits = trait_set(zoe_level);

        let first = reveal(&mut grid, from, &traits);
        prop_assert!(first > 0);
        let explored = grid.clone();
        prop_assert_eq!(reveal(&mut grid, from, &traits), 0);
        prop_assert_eq!(grid, explored);
    }

    /// Moving never adds energy, whatever the targets.
    #[test]
    fn prop_moves_never_add_energy(
        seed in any::<u64>(),
        targets in prop::collection::vec((0u8..10, 0u8..10), 1..40)
    ) {
        let mut grid = Grid::generate_seeded(Dimensions::new(10, 10).unwrap(), false, seed);
        let stats = ProfileStats { movement_range: 40, luck: 0 };
        let mut engine = TurnEngine::new(&mut grid, BTreeSet::new(), stats, false);

        for (row, col) in targets {
            let before = engine.player().energy;
            engine.select_action(&grid, ActionKind::Move);
            let outcome = engine.attempt_move(&mut grid, Coord::new(row, col));
            prop_assert!(engine.player().energy <= before);
            if matches!(outcome, Outcome::Won | Outcome::Lost) {
                break;
            }
        }
    }
}
