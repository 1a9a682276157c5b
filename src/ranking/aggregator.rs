use std::collections::HashMap;

use log::info;

use crate::domain::{Athlete, AthleteId, RankingEntry, RankingFilters, Tournament, TournamentResult};

/// Builds the ranking for the given filters.
///
/// Pure: the inputs are only read, and the same inputs always give the same
/// list. Athletes without a qualifying result are left out entirely.
pub fn rank(
    results: &[TournamentResult],
    athletes: &[Athlete],
    tournaments: &[Tournament],
    filters: &RankingFilters,
) -> Vec<RankingEntry> {
    let athletes_by_id: HashMap<&str, &Athlete> = athletes.iter().map(|a| (a.id.as_str(), a)).collect();
    let tournaments_by_id: HashMap<&str, &Tournament> =
        tournaments.iter().map(|t| (t.id.as_str(), t)).collect();

    let totals = aggregate(results, &athletes_by_id, &tournaments_by_id, filters);
    let mut entries: Vec<RankingEntry> = totals
        .into_iter()
        .map(|(athlete, total_points, tournament_count)| RankingEntry {
            athlete: athlete.clone(),
            total_points,
            tournament_count,
            rank: 0,
        })
        .collect();

    // stable: equal totals keep the order in which athletes were first seen
    entries.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    assign_competition_ranks(&mut entries);

    info!("Ranked {} athletes from {} results", entries.len(), results.len());
    entries
}

/// Distinct tournament years, newest first.
pub fn available_years(tournaments: &[Tournament]) -> Vec<i32> {
    let mut years: Vec<i32> = tournaments.iter().map(Tournament::year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

fn aggregate<'a>(
    results: &[TournamentResult],
    athletes: &HashMap<&str, &'a Athlete>,
    tournaments: &HashMap<&str, &Tournament>,
    filters: &RankingFilters,
) -> Vec<(&'a Athlete, i32, usize)> {
    let mut order: Vec<&AthleteId> = Vec::new();
    let mut totals: HashMap<&AthleteId, (&'a Athlete, i32, usize)> = HashMap::new();

    for result in results {
        let (Some(athlete), Some(tournament)) = (
            athletes.get(result.athlete_id.as_str()),
            tournaments.get(result.tournament_id.as_str()),
        ) else {
            continue;
        };

        if !qualifies(tournament, athlete, result, filters) {
            continue;
        }

        let entry = totals.entry(&result.athlete_id).or_insert_with(|| {
            order.push(&result.athlete_id);
            (*athlete, 0, 0)
        });
        entry.1 += result.points;
        entry.2 += 1;
    }

    order.into_iter().filter_map(|id| totals.remove(id)).collect()
}

fn qualifies(
    tournament: &Tournament,
    athlete: &Athlete,
    result: &TournamentResult,
    filters: &RankingFilters,
) -> bool {
    if filters.year.is_some_and(|year| tournament.year() != year) {
        return false;
    }
    if filters.tournament_id.as_ref().is_some_and(|id| *id != result.tournament_id) {
        return false;
    }
    if !filters.tournament_levels.is_empty() && !filters.tournament_levels.contains(&tournament.level_id) {
        return false;
    }
    if filters.gender.is_some_and(|gender| athlete.gender != gender) {
        return false;
    }
    if filters.birth_year_min.is_some_and(|min| athlete.birth_year < min) {
        return false;
    }
    if filters.birth_year_max.is_some_and(|max| athlete.birth_year > max) {
        return false;
    }
    // the age group is tournament metadata, not derived from the birth year
    if let Some(age_group) = &filters.age_group {
        if tournament.age_group.as_ref() != Some(age_group) {
            return false;
        }
    }
    true
}

/// Standard competition ranking: ties share a rank, the next rank skips.
fn assign_competition_ranks(entries: &mut [RankingEntry]) {
    let mut current_rank = 1;
    let mut previous_points: Option<i32> = None;
    let mut tied = 0;

    for entry in entries.iter_mut() {
        match previous_points {
            Some(points) if points == entry.total_points => {
                tied += 1;
            }
            Some(_) => {
                current_rank += tied;
                tied = 1;
            }
            None => {
                tied = 1;
            }
        }
        entry.rank = current_rank;
        previous_points = Some(entry.total_points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, Placement, PointSchedule, TournamentStatus};
    use chrono::NaiveDate;

    fn athlete(id: &str, gender: Gender, birth_year: i32) -> Athlete {
        Athlete {
            id: id.to_string(),
            import_id: String::new(),
            first_name: id.to_uppercase(),
            last_name: "Test".to_string(),
            birth_year,
            gender,
            club: None,
            district: None,
        }
    }

    fn tournament(id: &str, year: i32, level: &str, age_group: Option<&str>) -> Tournament {
        Tournament {
            id: id.to_string(),
            name: format!("Turnier {}", id),
            level_id: level.to_string(),
            date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            age_group: age_group.map(str::to_string),
            status: TournamentStatus::Completed,
            schedule: PointSchedule::default(),
        }
    }

    fn result(tournament_id: &str, athlete_id: &str, points: i32) -> TournamentResult {
        TournamentResult {
            id: format!("{}-{}", tournament_id, athlete_id),
            tournament_id: tournament_id.to_string(),
            athlete_id: athlete_id.to_string(),
            placement: Placement::First,
            points,
            is_manual: false,
            imported_at: None,
        }
    }

    fn ranks(entries: &[RankingEntry]) -> Vec<usize> {
        entries.iter().map(|e| e.rank).collect()
    }

    #[test]
    fn test_ties_share_rank_and_next_rank_skips() {
        let athletes = vec![
            athlete("a", Gender::Female, 2010),
            athlete("b", Gender::Female, 2010),
            athlete("c", Gender::Female, 2010),
        ];
        let tournaments = vec![tournament("t1", 2024, "LEM", None)];
        let results = vec![result("t1", "c", 30), result("t1", "a", 50), result("t1", "b", 50)];

        let entries = rank(&results, &athletes, &tournaments, &RankingFilters::default());

        assert_eq!(entries.iter().map(|e| e.total_points).collect::<Vec<_>>(), vec![50, 50, 30]);
        assert_eq!(ranks(&entries), vec![1, 1, 3]);
    }

    #[test]
    fn test_longer_tie_sequence() {
        let ids = ["a", "b", "c", "d", "e", "f"];
        let points = [50, 50, 50, 30, 30, 10];
        let athletes: Vec<Athlete> = ids.iter().map(|id| athlete(id, Gender::Male, 2008)).collect();
        let tournaments = vec![tournament("t1", 2024, "LEM", None)];
        let results: Vec<TournamentResult> = ids
            .iter()
            .zip(points)
            .map(|(id, p)| result("t1", id, p))
            .collect();

        let entries = rank(&results, &athletes, &tournaments, &RankingFilters::default());

        assert_eq!(ranks(&entries), vec![1, 1, 1, 4, 4, 6]);
    }

    #[test]
    fn test_equal_totals_keep_first_seen_order() {
        let athletes = vec![athlete("a", Gender::Female, 2010), athlete("b", Gender::Female, 2010)];
        let tournaments = vec![tournament("t1", 2024, "LEM", None)];
        let results = vec![result("t1", "b", 20), result("t1", "a", 20)];

        let entries = rank(&results, &athletes, &tournaments, &RankingFilters::default());

        let order: Vec<&str> = entries.iter().map(|e| e.athlete.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_sums_points_and_counts_tournaments() {
        let athletes = vec![athlete("a", Gender::Female, 2010)];
        let tournaments = vec![tournament("t1", 2024, "LEM", None), tournament("t2", 2024, "BEM", None)];
        let results = vec![result("t1", "a", 10), result("t2", "a", 4)];

        let entries = rank(&results, &athletes, &tournaments, &RankingFilters::default());

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].total_points, 14);
        assert_eq!(entries[0].tournament_count, 2);
    }

    #[test]
    fn test_year_filter_drops_athletes_without_qualifying_results() {
        let athletes = vec![athlete("a", Gender::Female, 2010), athlete("b", Gender::Female, 2010)];
        let tournaments = vec![tournament("t2023", 2023, "LEM", None), tournament("t2024", 2024, "LEM", None)];
        let results = vec![result("t2023", "a", 10), result("t2024", "a", 4), result("t2023", "b", 7)];
        let filters = RankingFilters {
            year: Some(2024),
            ..Default::default()
        };

        let entries = rank(&results, &athletes, &tournaments, &filters);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].athlete.id, "a");
        assert_eq!(entries[0].total_points, 4);
    }

    #[test]
    fn test_athlete_and_tournament_filters_combine() {
        let athletes = vec![
            athlete("girl-2010", Gender::Female, 2010),
            athlete("boy-2010", Gender::Male, 2010),
            athlete("girl-2005", Gender::Female, 2005),
        ];
        let tournaments = vec![
            tournament("u15-lem", 2024, "LEM", Some("U15")),
            tournament("u15-bem", 2024, "BEM", Some("U15")),
            tournament("u18-lem", 2024, "LEM", Some("U18")),
        ];
        let results = vec![
            result("u15-lem", "girl-2010", 10),
            result("u15-bem", "girl-2010", 5),
            result("u18-lem", "girl-2010", 3),
            result("u15-lem", "boy-2010", 10),
            result("u15-lem", "girl-2005", 10),
        ];
        let filters = RankingFilters {
            gender: Some(Gender::Female),
            birth_year_min: Some(2008),
            birth_year_max: Some(2012),
            age_group: Some("U15".to_string()),
            tournament_levels: vec!["LEM".to_string()],
            ..Default::default()
        };

        let entries = rank(&results, &athletes, &tournaments, &filters);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].athlete.id, "girl-2010");
        assert_eq!(entries[0].total_points, 10);
        assert_eq!(entries[0].tournament_count, 1);
    }

    #[test]
    fn test_tournament_filter_and_unknown_references() {
        let athletes = vec![athlete("a", Gender::Female, 2010)];
        let tournaments = vec![tournament("t1", 2024, "LEM", None), tournament("t2", 2024, "LEM", None)];
        let results = vec![result("t1", "a", 10), result("t2", "a", 4), result("t1", "ghost", 99), result("gone", "a", 50)];
        let filters = RankingFilters {
            tournament_id: Some("t2".to_string()),
            ..Default::default()
        };

        let entries = rank(&results, &athletes, &tournaments, &filters);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].total_points, 4);

        let unfiltered = rank(&results, &athletes, &tournaments, &RankingFilters::default());
        assert_eq!(unfiltered.len(), 1);
        assert_eq!(unfiltered[0].total_points, 14);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let athletes = vec![athlete("a", Gender::Female, 2010), athlete("b", Gender::Male, 2011)];
        let tournaments = vec![tournament("t1", 2024, "LEM", None)];
        let results = vec![result("t1", "a", 10), result("t1", "b", 7)];

        let first = rank(&results, &athletes, &tournaments, &RankingFilters::default());
        let second = rank(&results, &athletes, &tournaments, &RankingFilters::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_available_years_descending_unique() {
        let tournaments = vec![
            tournament("a", 2022, "LEM", None),
            tournament("b", 2024, "LEM", None),
            tournament("c", 2022, "LEM", None),
        ];
        assert_eq!(available_years(&tournaments), vec![2024, 2022]);
    }
}
