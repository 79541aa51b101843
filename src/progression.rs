//! Cross-session progression.
//!
//! The profile outlives levels and processes:
//! - Trait affinities averaged across levels, with traits granted at a threshold
//! - Generations every few levels, archiving and clearing active traits
//! - A load/save capability so the engine never touches files directly

mod profile;
mod store;
mod traits;

pub use profile::{
    affinity_sample, reset_profile, GenerationMetrics, GenerationRecord, LevelReport, Profile,
    ProfileStats, AFFINITY_THRESHOLD, LEVELS_PER_GENERATION, ZOE_MASTER_LEVELS,
};
pub use store::{data_dir, default_profile_path, JsonFileStore, MemoryStore, ProfileStore};
pub use traits::{EvolutionStage, TraitId};
