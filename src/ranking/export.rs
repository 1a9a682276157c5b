use chrono::NaiveDate;

use crate::domain::{RankingEntry, RankingFilters};

const HEADERS: [&str; 7] = ["Rang", "Name", "Verein", "Jahrgang", "Geschlecht", "Punkte", "Turniere"];

/// Semicolon-separated ranking list with a comment header describing the filters.
pub fn export_ranking_csv(entries: &[RankingEntry], filters: &RankingFilters, exported_on: NaiveDate) -> String {
    let mut lines = vec![
        format!("# Rangliste exportiert am {}", exported_on.format("%d.%m.%Y")),
        filter_line(filters),
        String::new(),
        HEADERS.join(";"),
    ];
    lines.extend(entries.iter().map(entry_line));
    lines.join("\n")
}

/// Human-readable summary of the active filters, empty when none are set.
pub fn filter_summary(filters: &RankingFilters) -> Vec<String> {
    let mut summary = Vec::new();

    if let Some(year) = filters.year {
        summary.push(format!("Jahr: {}", year));
    }
    if let Some(gender) = filters.gender {
        summary.push(format!("Geschlecht: {}", gender.as_str()));
    }
    if filters.birth_year_min.is_some() || filters.birth_year_max.is_some() {
        summary.push(format!(
            "Jahrgang: {}-{}",
            bound(filters.birth_year_min),
            bound(filters.birth_year_max)
        ));
    }
    if let Some(age_group) = &filters.age_group {
        summary.push(format!("Altersklasse: {}", age_group));
    }
    if !filters.tournament_levels.is_empty() {
        summary.push(format!("Level: {}", filters.tournament_levels.join(", ")));
    }
    if let Some(tournament_id) = &filters.tournament_id {
        summary.push(format!("Turnier: {}", tournament_id));
    }

    summary
}

fn filter_line(filters: &RankingFilters) -> String {
    let summary = filter_summary(filters);
    if summary.is_empty() {
        "# Keine Filter aktiviert".to_string()
    } else {
        format!("# Filter: {}", summary.join(" | "))
    }
}

fn bound(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "...".to_string())
}

fn entry_line(entry: &RankingEntry) -> String {
    let athlete = &entry.athlete;
    [
        entry.rank.to_string(),
        athlete.display_name(),
        athlete.club.clone().unwrap_or_else(|| "-".to_string()),
        athlete.birth_year.to_string(),
        athlete.gender.short().to_string(),
        entry.total_points.to_string(),
        entry.tournament_count.to_string(),
    ]
    .join(";")
}
