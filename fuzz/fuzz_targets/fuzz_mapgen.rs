#![no_main]

//! Level generation fuzzer.
//!
//! Any seed and any valid size must give a grid that passes the layout checks.

use arbitrary::Arbitrary;
use hexzoe::invariants::check_grid;
use hexzoe::{Dimensions, Grid};
use libfuzzer_sys::fuzz_target;

/// Structured input for generation fuzzing.
#[derive(Arbitrary, Debug)]
struct MapInput {
    rows: u8,
    cols: u8,
    seed: u64,
    found_zoe: bool,
}

fuzz_target!(|input: MapInput| {
    let Ok(dims) = Dimensions::new(u32::from(input.rows), u32::from(input.cols)) else {
        return;
    };

    let grid = Grid::generate_seeded(dims, input.found_zoe, input.seed);
    let violations = check_grid(&grid);
    assert!(violations.is_empty(), "seed {}: {violations:?}", input.seed);

    if input.found_zoe {
        assert_eq!(grid.count(hexzoe::TileType::Zoe), 0);
    }
});
