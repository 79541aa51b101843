//! The persistent player profile and its level/generation bookkeeping.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::progression::{EvolutionStage, TraitId};
use crate::turn::LevelStats;

/// Running affinity at which an affinity trait is granted.
pub const AFFINITY_THRESHOLD: f64 = 60.0;

/// Completed levels per generation.
pub const LEVELS_PER_GENERATION: u32 = 3;

/// Levels won alongside Zoe before `ZoeMaster` is granted.
pub const ZOE_MASTER_LEVELS: u32 = 5;

/// Base XP for completing a level.
const XP_PER_LEVEL: u64 = 10;

/// Bonus XP for collecting the key.
const XP_PER_KEY: u64 = 5;

/// Base character stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileStats {
    /// Movement points per turn.
    pub movement_range: u32,
    /// Extra energy from each energy cache.
    pub luck: u32,
}

impl Default for ProfileStats {
    fn default() -> Self {
        Self {
            movement_range: 3,
            luck: 0,
        }
    }
}

/// Cumulative numbers captured when a generation closes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationMetrics {
    /// Levels completed by the end of the generation.
    pub levels_completed: u32,
    /// Turns taken across all completed levels.
    pub total_turns: u64,
    /// Energy spent across all completed levels.
    pub total_energy_used: u64,
    /// Rests across all completed levels.
    pub total_rests: u64,
    /// Experience at the end of the generation.
    pub xp: u64,
    /// Running affinities at the end of the generation.
    pub trait_affinities: BTreeMap<TraitId, f64>,
}

/// Archive entry for a closed generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationRecord {
    /// The generation that closed.
    pub generation: u32,
    /// Traits held when it closed.
    pub traits: BTreeSet<TraitId>,
    /// Metrics when it closed.
    pub metrics: GenerationMetrics,
}

/// Cross-session player record.
///
/// Every field has a default, so a partial or older file still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    /// Base stats.
    pub stats: ProfileStats,
    /// Experience points.
    pub xp: u64,
    /// Active traits. Cleared when a generation closes.
    pub traits: BTreeSet<TraitId>,
    /// Current generation, starting at 1.
    pub generation: u32,
    /// Stage derived from the generation.
    pub evolution_stage: EvolutionStage,
    /// Closed generations, oldest first.
    pub generation_history: Vec<GenerationRecord>,
    /// Turns across all completed levels.
    pub total_turns: u64,
    /// Energy across all completed levels.
    pub total_energy_used: u64,
    /// Rests across all completed levels.
    pub total_rests: u64,
    /// Levels completed.
    pub levels_completed: u32,
    /// Running affinity per affinity trait, each in `[0, 100]`.
    #[serde(deserialize_with = "clamped_affinities")]
    pub trait_affinities: BTreeMap<TraitId, f64>,
    /// Zoe has been found at least once. She stays at the character's side
    /// afterwards and no longer appears on the grid.
    pub has_found_zoe: bool,
    /// Levels won with Zoe.
    pub zoe_levels: u32,
}

fn clamped_affinities<'de, D>(deserializer: D) -> Result<BTreeMap<TraitId, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut affinities = BTreeMap::<TraitId, f64>::deserialize(deserializer)?;
    clamp_all(&mut affinities);
    Ok(affinities)
}

fn clamp_all(affinities: &mut BTreeMap<TraitId, f64>) {
    for value in affinities.values_mut() {
        *value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 100.0) };
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            stats: ProfileStats::default(),
            xp: 0,
            traits: BTreeSet::new(),
            generation: 1,
            evolution_stage: EvolutionStage::Basic,
            generation_history: Vec::new(),
            total_turns: 0,
            total_energy_used: 0,
            total_rests: 0,
            levels_completed: 0,
            trait_affinities: BTreeMap::new(),
            has_found_zoe: false,
            zoe_levels: 0,
        }
    }
}

/// What folding one level into the profile produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelReport {
    /// This level's affinity samples.
    pub samples: BTreeMap<TraitId, f64>,
    /// Running affinities after the fold.
    pub affinities: BTreeMap<TraitId, f64>,
    /// Traits granted by this fold.
    pub new_traits: Vec<TraitId>,
    /// Experience gained.
    pub xp_gained: u64,
}

/// Affinity sample for one level: `min(100, count / turns * 100)`.
#[must_use]
pub fn affinity_sample(count: u32, turns: u32) -> f64 {
    if turns == 0 {
        return 0.0;
    }
    (f64::from(count) / f64::from(turns) * 100.0).min(100.0)
}

impl Profile {
    /// Running affinity for a trait (0 when never sampled).
    #[must_use]
    pub fn affinity(&self, id: TraitId) -> f64 {
        self.trait_affinities.get(&id).copied().unwrap_or(0.0)
    }

    /// Check if a trait is active.
    #[must_use]
    pub fn has_trait(&self, id: TraitId) -> bool {
        self.traits.contains(&id)
    }

    /// Pull every stored affinity back into `[0, 100]`.
    pub fn clamp_affinities(&mut self) {
        clamp_all(&mut self.trait_affinities);
    }

    /// Grant a trait. Returns `true` only if it was not already held.
    pub fn grant(&mut self, id: TraitId) -> bool {
        self.traits.insert(id)
    }

    /// Fold a won level into the profile.
    ///
    /// Each affinity trait's running value becomes the mean of its old value
    /// and this level's sample; a trait is granted when that mean reaches
    /// [`AFFINITY_THRESHOLD`]. Zoe traits follow the count of levels won with
    /// her.
    pub fn fold_level(&mut self, stats: &LevelStats) -> LevelReport {
        let mut report = LevelReport::default();

        for id in TraitId::AFFINITY {
            let count = match id {
                TraitId::Pathfinder => stats.tiles_moved,
                TraitId::Senser => stats.tiles_sensed,
                TraitId::Explorer | TraitId::ZoeInitiate | TraitId::ZoeMaster => stats.tiles_interacted,
            };
            let sample = affinity_sample(count, stats.turns);
            let running = ((self.affinity(id) + sample) / 2.0).clamp(0.0, 100.0);

            self.trait_affinities.insert(id, running);
            report.samples.insert(id, sample);
            report.affinities.insert(id, running);

            if running >= AFFINITY_THRESHOLD && self.grant(id) {
                report.new_traits.push(id);
            }
        }

        if stats.zoe_found {
            self.has_found_zoe = true;
            self.zoe_levels += 1;
        }
        if self.zoe_levels >= 1 && self.grant(TraitId::ZoeInitiate) {
            report.new_traits.push(TraitId::ZoeInitiate);
        }
        if self.zoe_levels >= ZOE_MASTER_LEVELS && self.grant(TraitId::ZoeMaster) {
            report.new_traits.push(TraitId::ZoeMaster);
        }

        report.xp_gained = XP_PER_LEVEL + if stats.key_found { XP_PER_KEY } else { 0 };
        self.xp += report.xp_gained;

        self.total_turns += u64::from(stats.turns);
        self.total_energy_used += u64::from(stats.energy_used);
        self.total_rests += u64::from(stats.rests_used);
        self.levels_completed += 1;

        report
    }

    /// Whether the level count has reached a generation boundary.
    #[must_use]
    pub fn generation_due(&self) -> bool {
        self.levels_completed > 0 && self.levels_completed % LEVELS_PER_GENERATION == 0
    }

    /// Close the current generation.
    ///
    /// Archives the generation with its traits and metrics, moves to the next
    /// one, and clears the active traits. Archived traits are not inherited.
    pub fn advance_generation(&mut self) {
        let record = GenerationRecord {
            generation: self.generation,
            traits: std::mem::take(&mut self.traits),
            metrics: self.metrics(),
        };
        self.generation_history.push(record);
        self.generation += 1;
        self.evolution_stage = EvolutionStage::for_generation(self.generation);
    }

    /// Snapshot of the cumulative numbers.
    #[must_use]
    pub fn metrics(&self) -> GenerationMetrics {
        GenerationMetrics {
            levels_completed: self.levels_completed,
            total_turns: self.total_turns,
            total_energy_used: self.total_energy_used,
            total_rests: self.total_rests,
            xp: self.xp,
            trait_affinities: self.trait_affinities.clone(),
        }
    }
}

/// A fresh zero-state profile.
#[must_use]
pub fn reset_profile() -> Profile {
    Profile::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(turns: u32, moved: u32, sensed: u32, poked: u32) -> LevelStats {
        LevelStats {
            turns,
            tiles_moved: moved,
            tiles_sensed: sensed,
            tiles_interacted: poked,
            goal_reached: true,
            ..LevelStats::default()
        }
    }

    #[test]
    fn test_affinity_sample() {
        assert!((affinity_sample(1, 2) - 50.0).abs() < 1e-9);
        assert!((affinity_sample(9, 3) - 100.0).abs() < 1e-9);
        assert!(affinity_sample(0, 0).abs() < 1e-9);
    }

    #[test]
    fn test_fold_averages_affinity() {
        let mut profile = Profile::default();
        let report = profile.fold_level(&level(4, 2, 1, 0));

        assert!((report.samples[&TraitId::Pathfinder] - 50.0).abs() < 1e-9);
        assert!((profile.affinity(TraitId::Pathfinder) - 25.0).abs() < 1e-9);
        assert!((profile.affinity(TraitId::Senser) - 12.5).abs() < 1e-9);
        assert!(profile.affinity(TraitId::Explorer).abs() < 1e-9);
        assert!(report.new_traits.is_empty());
    }

    #[test]
    fn test_fold_grants_at_threshold_once() {
        let mut profile = Profile::default();
        profile.trait_affinities.insert(TraitId::Pathfinder, 20.0);

        // (20 + 100) / 2 = 60.0
        let report = profile.fold_level(&level(5, 5, 0, 0));
        assert!((profile.affinity(TraitId::Pathfinder) - 60.0).abs() < 1e-9);
        assert_eq!(report.new_traits, vec![TraitId::Pathfinder]);

        let report = profile.fold_level(&level(5, 5, 0, 0));
        assert!(report.new_traits.is_empty());
        assert_eq!(profile.traits.iter().filter(|t| **t == TraitId::Pathfinder).count(), 1);
    }

    #[test]
    fn test_fold_below_threshold_no_grant() {
        let mut profile = Profile::default();
        profile.trait_affinities.insert(TraitId::Pathfinder, 19.8);

        profile.fold_level(&level(5, 5, 0, 0));
        assert!(profile.affinity(TraitId::Pathfinder) < AFFINITY_THRESHOLD);
        assert!(!profile.has_trait(TraitId::Pathfinder));
    }

    #[test]
    fn test_fold_totals_and_xp() {
        let mut profile = Profile::default();
        let mut stats = level(6, 3, 1, 1);
        stats.energy_used = 17;
        stats.rests_used = 2;
        stats.key_found = true;

        let report = profile.fold_level(&stats);
        assert_eq!(report.xp_gained, 15);
        assert_eq!(profile.xp, 15);
        assert_eq!(profile.total_turns, 6);
        assert_eq!(profile.total_energy_used, 17);
        assert_eq!(profile.total_rests, 2);
        assert_eq!(profile.levels_completed, 1);
    }

    #[test]
    fn test_zoe_traits() {
        let mut profile = Profile::default();
        let mut stats = level(3, 1, 1, 1);
        stats.zoe_found = true;

        let report = profile.fold_level(&stats);
        assert!(profile.has_found_zoe);
        assert!(report.new_traits.contains(&TraitId::ZoeInitiate));

        for _ in 1..ZOE_MASTER_LEVELS {
            profile.fold_level(&stats);
        }
        assert!(profile.has_trait(TraitId::ZoeMaster));
        assert_eq!(profile.zoe_levels, ZOE_MASTER_LEVELS);
    }

    #[test]
    fn test_generation_due_every_three() {
        let mut profile = Profile::default();
        assert!(!profile.generation_due());
        for expected in [false, false, true, false, false, true] {
            profile.fold_level(&level(2, 1, 0, 0));
            assert_eq!(profile.generation_due(), expected);
        }
    }

    #[test]
    fn test_advance_generation_archives_and_clears() {
        let mut profile = Profile::default();
        profile.grant(TraitId::Senser);
        profile.levels_completed = 3;

        profile.advance_generation();

        assert_eq!(profile.generation, 2);
        assert_eq!(profile.evolution_stage, EvolutionStage::Aware);
        assert!(profile.traits.is_empty());
        assert_eq!(profile.generation_history.len(), 1);

        let record = &profile.generation_history[0];
        assert_eq!(record.generation, 1);
        assert!(record.traits.contains(&TraitId::Senser));
        assert_eq!(record.metrics.levels_completed, 3);
    }

    #[test]
    fn test_affinity_clamped() {
        let mut profile = Profile::default();
        profile.trait_affinities.insert(TraitId::Explorer, 250.0);
        profile.fold_level(&level(1, 0, 0, 5));
        assert!(profile.affinity(TraitId::Explorer) <= 100.0);
    }

    #[test]
    fn test_loaded_affinities_clamped() {
        let profile: Profile =
            serde_json::from_str(r#"{"traitAffinities":{"explorer":250.0,"senser":-4.0}}"#).unwrap();
        assert!((profile.affinity(TraitId::Explorer) - 100.0).abs() < f64::EPSILON);
        assert!(profile.affinity(TraitId::Senser).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_gets_defaults() {
        let profile: Profile = serde_json::from_str(r#"{"xp": 40, "traits": ["senser"]}"#).unwrap();
        assert_eq!(profile.xp, 40);
        assert!(profile.has_trait(TraitId::Senser));
        assert_eq!(profile.generation, 1);
        assert_eq!(profile.stats.movement_range, 3);
        assert!(profile.generation_history.is_empty());
    }

    #[test]
    fn test_reset_profile_is_default() {
        assert_eq!(reset_profile(), Profile::default());
    }
}
