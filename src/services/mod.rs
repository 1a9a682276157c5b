pub mod ids;
pub mod ranking;
pub mod result_import;
pub mod seed;
pub mod server;

pub use ranking::RankingService;
pub use result_import::{load_overrides, load_rows, DecisionOverrides, ImportService, ImportSummary};
pub use seed::{SeedService, Snapshot};
pub use server::ServerService;
