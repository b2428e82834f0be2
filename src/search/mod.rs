//! Search-and-rank pipeline
//!
//! raw query -> normalize -> fuzzy match -> (if empty) category fallback
//! -> rank -> top-N, with a failed-search record on empty results.

pub mod engine;
pub mod fallback;
pub mod fuzzy;
pub mod normalize;
pub mod ranking;


pub use engine::{SearchOutcome, SearchPipeline, SearchService};
pub use fuzzy::{FieldWeights, FuzzyConfig, FuzzyMatcher};
pub use ranking::{MatchSource, ScoredProfessional, SearchHit, PAGE_SIZE};
