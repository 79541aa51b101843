//! Output formatting utilities for CLI.

use std::fmt::Write as _;

use hexzoe::{Grid, Profile, TileType};
use serde::Serialize;

/// Tile kinds listed in summaries, in display order.
const SUMMARY_KINDS: [TileType; 6] = [
    TileType::Blocked,
    TileType::Water,
    TileType::Energy,
    TileType::Key,
    TileType::Zoe,
    TileType::Goal,
];

/// JSON-serializable generated map.
#[derive(Debug, Serialize)]
pub(super) struct JsonMap {
    /// Seed the map was generated from.
    pub(super) seed: u64,
    /// Number of rows.
    pub(super) rows: u8,
    /// Number of columns.
    pub(super) cols: u8,
    /// One string per row, one glyph per tile.
    pub(super) layout: Vec<String>,
    /// Tile counts by kind.
    pub(super) counts: Vec<JsonCount>,
}

/// JSON-serializable tile count.
#[derive(Debug, Serialize)]
pub(super) struct JsonCount {
    /// Tile kind.
    pub(super) kind: TileType,
    /// Number of tiles.
    pub(super) count: usize,
}

impl JsonMap {
    /// Describe a fully revealed grid.
    pub(super) fn from_grid(grid: &Grid, seed: u64) -> Self {
        Self {
            seed,
            rows: grid.rows(),
            cols: grid.cols(),
            layout: grid
                .render_text(true)
                .lines()
                .map(|line| line.trim_end().to_string())
                .collect(),
            counts: SUMMARY_KINDS
                .iter()
                .map(|&kind| JsonCount {
                    kind,
                    count: grid.count(kind),
                })
                .collect(),
        }
    }
}

/// Format a generated map as text: the picture, then a legend with counts.
pub(super) fn format_map_text(grid: &Grid, seed: u64) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Map {}x{} (seed: {seed})\n", grid.rows(), grid.cols());
    output.push_str(&grid.render_text(true));
    output.push('\n');
    for kind in SUMMARY_KINDS {
        let name = format!("{kind:?}");
        let _ = writeln!(output, "  {} {name:<8} {}", kind.glyph(), grid.count(kind));
    }

    output
}

/// Format a profile as human-readable text.
pub(super) fn format_profile_text(profile: &Profile) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Generation {} ({:?}), {} XP",
        profile.generation, profile.evolution_stage, profile.xp
    );
    let _ = writeln!(
        output,
        "  Levels: {}  Turns: {}  Energy used: {}  Rests: {}",
        profile.levels_completed, profile.total_turns, profile.total_energy_used, profile.total_rests
    );
    let _ = writeln!(
        output,
        "  Stats: movement {}  luck {}",
        profile.stats.movement_range, profile.stats.luck
    );

    let traits: Vec<String> = profile.traits.iter().map(ToString::to_string).collect();
    let traits = if traits.is_empty() { "none".to_string() } else { traits.join(", ") };
    let _ = writeln!(output, "  Traits: {traits}");

    output.push_str("  Affinities:\n");
    for (id, value) in &profile.trait_affinities {
        let _ = writeln!(output, "    {id:<12} {value:5.1}");
    }

    if profile.has_found_zoe {
        let _ = writeln!(output, "  Zoe: with you ({} levels together)", profile.zoe_levels);
    } else {
        output.push_str("  Zoe: not yet found\n");
    }

    if !profile.generation_history.is_empty() {
        output.push_str("  History:\n");
        for record in &profile.generation_history {
            let traits: Vec<String> = record.traits.iter().map(ToString::to_string).collect();
            let _ = writeln!(
                output,
                "    gen {}: {} levels, {} XP, traits [{}]",
                record.generation,
                record.metrics.levels_completed,
                record.metrics.xp,
                traits.join(", ")
            );
        }
    }

    output
}
