pub mod matcher;
pub mod similarity;

pub use matcher::{classify, find_best_match, AthleteMatcher, MatchOutcome};
pub use similarity::{distance, similarity};
