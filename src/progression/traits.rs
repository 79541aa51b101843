//! Trait identifiers and the evolution stage ladder.

use serde::{Deserialize, Serialize};

/// A persistent gameplay modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraitId {
    /// Moving costs 1 energy instead of 2.
    Pathfinder,
    /// Sensing costs 1 energy instead of 2.
    Senser,
    /// Poking costs 1 energy instead of 2, and resting restores one extra.
    Explorer,
    /// Zoe walks with you: vision radius 2.
    ZoeInitiate,
    /// Long companionship with Zoe: vision radius 3.
    ZoeMaster,
}

impl TraitId {
    /// Traits earned through play-style affinity.
    pub const AFFINITY: [TraitId; 3] = [TraitId::Pathfinder, TraitId::Senser, TraitId::Explorer];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TraitId::Pathfinder => "pathfinder",
            TraitId::Senser => "senser",
            TraitId::Explorer => "explorer",
            TraitId::ZoeInitiate => "zoeInitiate",
            TraitId::ZoeMaster => "zoeMaster",
        }
    }
}

impl std::fmt::Display for TraitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// How far the lineage has evolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EvolutionStage {
    /// First generation.
    #[default]
    Basic,
    /// Second generation.
    Aware,
    /// Third generation.
    Sentient,
    /// Fourth generation onward.
    Conscious,
}

impl EvolutionStage {
    /// Stage reached at a given generation number (generations start at 1).
    #[must_use]
    pub const fn for_generation(generation: u32) -> Self {
        match generation {
            0 | 1 => EvolutionStage::Basic,
            2 => EvolutionStage::Aware,
            3 => EvolutionStage::Sentient,
            _ => EvolutionStage::Conscious,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_ladder() {
        assert_eq!(EvolutionStage::for_generation(1), EvolutionStage::Basic);
        assert_eq!(EvolutionStage::for_generation(2), EvolutionStage::Aware);
        assert_eq!(EvolutionStage::for_generation(3), EvolutionStage::Sentient);
        assert_eq!(EvolutionStage::for_generation(4), EvolutionStage::Conscious);
        assert_eq!(EvolutionStage::for_generation(40), EvolutionStage::Conscious);
    }

    #[test]
    fn test_trait_serde_names() {
        let json = serde_json::to_string(&TraitId::ZoeInitiate).unwrap();
        assert_eq!(json, "\"zoeInitiate\"");
        let parsed: TraitId = serde_json::from_str("\"pathfinder\"").unwrap();
        assert_eq!(parsed, TraitId::Pathfinder);
    }
}
