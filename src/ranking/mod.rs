pub mod aggregator;
pub mod export;
pub mod stats;

pub use aggregator::{available_years, rank};
pub use export::{export_ranking_csv, filter_summary};
pub use stats::{athlete_stats, AthleteStats};
