#[derive(Debug, Clone)]
pub struct MatchSettings {
    pub min_similarity: u8,
    pub exact_threshold: u8,
    pub similar_threshold: u8,
    pub birth_year_bonus: u8,
    pub suggestion_limit: usize,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            min_similarity: 80,
            exact_threshold: 95,
            similar_threshold: 80,
            birth_year_bonus: 10,
            suggestion_limit: 3,
        }
    }
}

/// Header names of imported result rows.
#[derive(Debug, Clone)]
pub struct ColumnSettings {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub placement: String,
    pub placement_alt: String,
    pub birth_year: String,
    pub club: String,
    pub gender: String,
}

impl Default for ColumnSettings {
    fn default() -> Self {
        Self {
            first_name: "Vorname".to_string(),
            last_name: "Nachname".to_string(),
            full_name: "Name".to_string(),
            placement: "Platz".to_string(),
            placement_alt: "Platzierung".to_string(),
            birth_year: "Jahrgang".to_string(),
            club: "Verein".to_string(),
            gender: "Geschlecht".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub database_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "judo_ranking.db".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub matching: MatchSettings,
    pub columns: ColumnSettings,
    pub storage: StorageSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

// Config is handed to services explicitly, there is no global instance.
