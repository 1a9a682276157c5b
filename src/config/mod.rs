pub mod settings;

pub use settings::{AppConfig, ColumnSettings, MatchSettings, StorageSettings};
