//! Font pairing recommendations.
//!
//! A mood label or style prompt picks target categories, the catalog is
//! narrowed to those categories minus what is already on the board, each
//! candidate is tagged with the roles it suits next to the current heading and
//! body fonts, and candidates that fill an open role are ranked first.

pub mod classifier;
pub mod engine;
pub mod fallback;
pub mod filter;
pub mod ranker;
pub mod roles;
pub mod terms;

pub use classifier::MoodClassifier;
pub use engine::{RecommendationEngine, RecommendationRequest};
pub use fallback::fallback_for;
pub use filter::filter_candidates;
pub use ranker::{rank, RoleNeeds};
pub use roles::{
    chance_for, ChanceDraw, DeterministicChance, FixedChance, PairingContext, RandomChance,
    RoleAssigner, RoleChance, SeededChance,
};
pub use terms::TermTable;
